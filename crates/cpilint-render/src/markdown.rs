use crate::{RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# cpilint report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Artifacts inspected: {}\n- Issues: {}\n\n",
        verdict, report.data.artifacts_inspected, report.data.issues_found
    ));

    if let Some(reason) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", reason));
    }

    if report.issues.is_empty() {
        out.push_str("No issues.\n");
        return out;
    }

    out.push_str("## Issues\n\n");

    for issue in &report.issues {
        let message = issue.message.replace(['\r', '\n'], " ");
        match &issue.rule_id {
            Some(rule_id) => out.push_str(&format!(
                "- `{}` / `{}`: {}\n",
                rule_id, issue.code, message
            )),
            None => out.push_str(&format!("- `{}`: {}\n", issue.code, message)),
        }
        if !issue.artifacts.is_empty() {
            out.push_str(&format!("  - artifacts: {}\n", issue.artifacts.join(", ")));
        }
    }

    out
}
