use chrono::{DateTime, Local};

use crate::errors::EmptyInputError;
use crate::wire::{
    format_timestamp, DebugAnalysis, DebugSections, DevelopmentSections, Mode, PlanRecord,
    PlanSections, PlanStatus,
};

pub mod validator;

pub use validator::{validate, ValidatedPlan, ValidationOk};

/// Caller text that has been trimmed and is known to be non-empty.
///
/// Everything downstream of the composer's first step takes this type, so the
/// emptiness check happens exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput(String);

impl UserInput {
    pub fn parse(raw: &str) -> Result<Self, EmptyInputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptyInputError);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn build_plan(input: &UserInput, mode: Mode) -> PlanRecord {
    build_plan_at(input, mode, Local::now())
}

/// Same as [`build_plan`] with an explicit creation time.
pub fn build_plan_at(input: &UserInput, mode: Mode, now: DateTime<Local>) -> PlanRecord {
    let plan = match mode {
        Mode::Development => PlanSections::Development(development_scaffold()),
        Mode::Debug => PlanSections::Debug(debug_scaffold()),
    };
    PlanRecord {
        user_input: input.as_str().to_string(),
        timestamp: format_timestamp(&now),
        created_at: now,
        plan,
        status: PlanStatus::PendingValidation,
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn development_scaffold() -> DevelopmentSections {
    DevelopmentSections {
        analysis: lines(&[
            "Analyzing user requirements...",
            "Identifying key components...",
            "Determining technical constraints...",
        ]),
        components: lines(&[
            "List required components...",
            "Define component interactions...",
            "Specify dependencies...",
        ]),
        implementation_steps: lines(&[
            "Break down implementation steps...",
            "Define order of operations...",
            "Identify potential challenges...",
        ]),
        technical_considerations: lines(&[
            "Performance requirements...",
            "Security considerations...",
            "Scalability factors...",
        ]),
        testing: lines(&[
            "Unit testing strategy...",
            "Integration testing approach...",
            "Validation criteria...",
        ]),
    }
}

fn debug_scaffold() -> DebugSections {
    DebugSections {
        analysis: DebugAnalysis {
            potential_causes: lines(&[
                "Review the reported error message...",
                "Trace recent changes around the failure...",
            ]),
            affected_areas: lines(&[
                "Locate the failing module...",
                "List callers and dependencies...",
            ]),
        },
        diagnostic_steps: lines(&[
            "Reproduce the failure...",
            "Isolate the faulty code path...",
            "Confirm the root cause...",
        ]),
        test_strategy: lines(&[
            "Write a failing regression test...",
            "Verify the fix against the regression test...",
            "Re-run the related test suites...",
        ]),
        risk_considerations: lines(&[
            "Side effects on dependent modules...",
            "Rollback plan...",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        assert_eq!(UserInput::parse("  hi \n").unwrap().as_str(), "hi");
        assert_eq!(UserInput::parse("   "), Err(EmptyInputError));
        assert_eq!(UserInput::parse(""), Err(EmptyInputError));
        assert_eq!(UserInput::parse("\t\n"), Err(EmptyInputError));
    }

    #[test]
    fn test_build_plan_development_is_pending_and_complete() {
        let input = UserInput::parse("Build a photo-sharing web app").unwrap();
        let now = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let plan = build_plan_at(&input, Mode::Development, now);

        assert_eq!(plan.status, PlanStatus::PendingValidation);
        assert_eq!(plan.timestamp, "20240102_030405");
        assert_eq!(plan.created_at, now);
        assert_eq!(plan.mode(), Mode::Development);
        assert_eq!(plan.plan.first_empty_section(), None);
    }

    #[test]
    fn test_build_plan_debug_shape() {
        let input = UserInput::parse("NullPointerException on line 42").unwrap();
        let plan = build_plan(&input, Mode::Debug);
        assert_eq!(plan.mode(), Mode::Debug);
        assert_eq!(plan.plan.first_empty_section(), None);
    }

    #[test]
    fn test_scaffold_never_echoes_input() {
        let input = UserInput::parse("unique-marker-123").unwrap();
        for mode in [Mode::Development, Mode::Debug] {
            let plan = build_plan(&input, mode);
            let dump = serde_json::to_string(&plan.plan).unwrap();
            assert!(!dump.contains("unique-marker-123"));
        }
    }
}
