//! Renders a validated plan as XML-flavored instructions for the assistant.
//!
//! The output is meant to be read, not parsed back.

use std::fmt::Write;

use crate::plan::ValidatedPlan;

/// Pretty JSON dump of the plan sections. Used both here and as the
/// "PLAN DETALLADO" block of the final prompt.
pub fn plan_dump(plan: &ValidatedPlan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&plan.record().plan)
}

pub fn project(plan: &ValidatedPlan) -> Result<String, serde_json::Error> {
    let dump = plan_dump(plan)?;
    let record = plan.record();

    let mut out = String::new();
    out.push_str("Convierte el siguiente plan en un proyecto XML estructurado:\n\n");
    out.push_str(&dump);
    out.push_str(
        "\n\nUtiliza la estructura:
<proyecto id=\"...\" titulo=\"...\">
  <tarea id=\"...\" titulo=\"...\">
    <subtarea id=\"...\" titulo=\"...\">
      Descripción detallada...
    </subtarea>
  </tarea>
</proyecto>",
    );

    out.push_str("\n\nPunto de partida:\n");
    let _ = writeln!(out, "<proyecto id=\"plan_{}\" titulo=\"...\">", escape(&record.timestamp));
    for (name, items) in record.plan.sections() {
        let _ = writeln!(out, "  <tarea id=\"{0}\" titulo=\"{0}\">", escape(name));
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(
                out,
                "    <subtarea id=\"{}_{}\" titulo=\"{}\"></subtarea>",
                escape(name),
                i + 1,
                escape(item)
            );
        }
        out.push_str("  </tarea>\n");
    }
    out.push_str("</proyecto>");
    Ok(out)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_plan, validate, UserInput};
    use crate::store::PlanStore;
    use crate::wire::Mode;
    use tempfile::TempDir;

    fn validated(mode: Mode) -> (TempDir, ValidatedPlan) {
        let tmp = TempDir::new().unwrap();
        let store = PlanStore::new(tmp.path());
        let plan = build_plan(&UserInput::parse("anything").unwrap(), mode);
        let handle = store.save(&plan).unwrap();
        let ok = validate(&store, &handle).unwrap();
        (tmp, ok.plan)
    }

    #[test]
    fn test_projection_wraps_dump_in_instructions() {
        let (_tmp, plan) = validated(Mode::Development);
        let xml = project(&plan).unwrap();

        assert!(xml.starts_with("Convierte el siguiente plan en un proyecto XML estructurado:"));
        assert!(xml.contains(&plan_dump(&plan).unwrap()));
        assert!(xml.contains("<subtarea id=\"...\" titulo=\"...\">"));
        assert!(xml.contains("<tarea id=\"implementation_steps\""));
        assert!(xml.contains("<subtarea id=\"testing_3\" titulo=\"Validation criteria...\">"));
        assert!(xml.ends_with("</proyecto>"));
    }

    #[test]
    fn test_projection_debug_sections() {
        let (_tmp, plan) = validated(Mode::Debug);
        let xml = project(&plan).unwrap();
        assert!(xml.contains("<tarea id=\"diagnostic_steps\""));
        assert!(xml.contains("<tarea id=\"risk_considerations\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c">'"#), "a&lt;b &amp; &quot;c&quot;&gt;&apos;");
    }
}
