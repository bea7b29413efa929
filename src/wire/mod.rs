use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// ========================================
/// Plan record as persisted on disk
/// ========================================

/// Which template and plan shape a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[value(alias = "dev")]
    Development,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    PendingValidation,
    Validated,
    /// Never written by the validator; a failed validation leaves the status untouched.
    Invalid,
}

/// A section written as `null` reads as empty, so the validator reports it
/// as missing instead of the artifact failing to parse.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentSections {
    #[serde(default, deserialize_with = "nullable_list")]
    pub analysis: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub components: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub implementation_steps: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub technical_considerations: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub testing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugAnalysis {
    #[serde(default, deserialize_with = "nullable_list")]
    pub potential_causes: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub affected_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugSections {
    pub analysis: DebugAnalysis,
    #[serde(default, deserialize_with = "nullable_list")]
    pub diagnostic_steps: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub test_strategy: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub risk_considerations: Vec<String>,
}

/// The two plan shapes are told apart by `analysis`: a list for development,
/// a nested object for debug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanSections {
    Development(DevelopmentSections),
    Debug(DebugSections),
}

impl PlanSections {
    pub fn mode(&self) -> Mode {
        match self {
            PlanSections::Development(_) => Mode::Development,
            PlanSections::Debug(_) => Mode::Debug,
        }
    }

    /// Section names paired with their items, in review order.
    pub fn sections(&self) -> Vec<(&'static str, Vec<&str>)> {
        fn items(v: &[String]) -> Vec<&str> {
            v.iter().map(String::as_str).collect()
        }
        match self {
            PlanSections::Development(d) => vec![
                ("analysis", items(&d.analysis)),
                ("components", items(&d.components)),
                ("implementation_steps", items(&d.implementation_steps)),
                ("technical_considerations", items(&d.technical_considerations)),
                ("testing", items(&d.testing)),
            ],
            PlanSections::Debug(d) => vec![
                (
                    "analysis",
                    items(&d.analysis.potential_causes)
                        .into_iter()
                        .chain(items(&d.analysis.affected_areas))
                        .collect(),
                ),
                ("diagnostic_steps", items(&d.diagnostic_steps)),
                ("test_strategy", items(&d.test_strategy)),
                ("risk_considerations", items(&d.risk_considerations)),
            ],
        }
    }

    /// First required section that is missing or empty.
    pub fn first_empty_section(&self) -> Option<&'static str> {
        match self {
            PlanSections::Development(d) => [
                ("analysis", d.analysis.is_empty()),
                ("components", d.components.is_empty()),
                ("implementation_steps", d.implementation_steps.is_empty()),
                ("technical_considerations", d.technical_considerations.is_empty()),
                ("testing", d.testing.is_empty()),
            ]
            .into_iter()
            .find_map(|(name, empty)| empty.then_some(name)),
            PlanSections::Debug(d) => [
                (
                    "analysis",
                    d.analysis.potential_causes.is_empty() || d.analysis.affected_areas.is_empty(),
                ),
                ("diagnostic_steps", d.diagnostic_steps.is_empty()),
                ("test_strategy", d.test_strategy.is_empty()),
                ("risk_considerations", d.risk_considerations.is_empty()),
            ]
            .into_iter()
            .find_map(|(name, empty)| empty.then_some(name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub user_input: String,
    /// `YYYYMMDD_HHMMSS`; also keys the artifact file name.
    pub timestamp: String,
    pub created_at: DateTime<Local>,
    pub plan: PlanSections,
    pub status: PlanStatus,
}

impl PlanRecord {
    pub fn mode(&self) -> Mode {
        self.plan.mode()
    }
}

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_empty_section_follows_review_order() {
        let mut d = DevelopmentSections {
            analysis: vec!["a".into()],
            components: vec!["c".into()],
            implementation_steps: vec![],
            technical_considerations: vec!["t".into()],
            testing: vec![],
        };
        let sections = PlanSections::Development(d.clone());
        assert_eq!(sections.first_empty_section(), Some("implementation_steps"));

        d.implementation_steps.push("i".into());
        let sections = PlanSections::Development(d);
        assert_eq!(sections.first_empty_section(), Some("testing"));
    }

    #[test]
    fn test_debug_analysis_requires_both_lists() {
        let sections = PlanSections::Debug(DebugSections {
            analysis: DebugAnalysis {
                potential_causes: vec!["cause".into()],
                affected_areas: vec![],
            },
            diagnostic_steps: vec!["d".into()],
            test_strategy: vec!["t".into()],
            risk_considerations: vec!["r".into()],
        });
        assert_eq!(sections.first_empty_section(), Some("analysis"));
    }

    #[test]
    fn test_untagged_sections_pick_shape_from_analysis() {
        let dev: PlanSections = serde_json::from_str(r#"{"analysis": ["x"]}"#).unwrap();
        assert_eq!(dev.mode(), Mode::Development);

        let dbg: PlanSections = serde_json::from_str(
            r#"{"analysis": {"potential_causes": [], "affected_areas": []}, "diagnostic_steps": []}"#,
        )
        .unwrap();
        assert_eq!(dbg.mode(), Mode::Debug);
    }

    #[test]
    fn test_null_sections_read_as_empty() {
        let dev: PlanSections =
            serde_json::from_str(r#"{"analysis": ["a"], "components": null}"#).unwrap();
        assert_eq!(dev.mode(), Mode::Development);
        assert_eq!(dev.first_empty_section(), Some("components"));

        let dbg: PlanSections = serde_json::from_str(
            r#"{"analysis": {"potential_causes": ["c"], "affected_areas": null}, "diagnostic_steps": null}"#,
        )
        .unwrap();
        assert_eq!(dbg.mode(), Mode::Debug);
        assert_eq!(dbg.first_empty_section(), Some("analysis"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let s = serde_json::to_string(&PlanStatus::PendingValidation).unwrap();
        assert_eq!(s, "\"pending_validation\"");
    }

    #[test]
    fn test_format_timestamp() {
        use chrono::TimeZone;
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(&at), "20240309_070501");
    }
}
