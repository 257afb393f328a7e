use crate::RenderableReport;

/// Render issues as GitHub Actions workflow command annotations.
///
/// Issues have no file location, so each becomes `::error::{message}`.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for issue in &report.issues {
        let rule_id = issue.rule_id.as_deref().unwrap_or("cpilint");
        let mut message = format!("[{}:{}] {}", rule_id, issue.code, issue.message);
        if !issue.artifacts.is_empty() {
            message.push_str(&format!(" (artifacts: {})", issue.artifacts.join(", ")));
        }
        out.push(format!("::error::{}", escape(&message)));
    }

    if let Some(reason) = &report.data.truncated_reason {
        out.push(format!("::notice::{}", escape(reason)));
    }

    out
}

fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
