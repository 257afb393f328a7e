//! Render use cases: markdown and GitHub annotations from in-memory reports.

use cpilint_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    cpilint_render::render_markdown(report)
}

/// Annotations for at most `max` issues; a trailing notice reports how many were left out.
pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    let omitted = report.issues.len().saturating_sub(max);
    let mut capped = report.clone();
    capped.issues.truncate(max);
    if omitted > 0 {
        capped.data.truncated_reason = Some(format!("{omitted} more issue(s) not annotated"));
    }
    cpilint_render::render_github_annotations(&capped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpilint_render::{RenderableData, RenderableIssue, RenderableVerdictStatus};

    fn sample_report() -> RenderableReport {
        let issue = |code: &str| RenderableIssue {
            rule_id: None,
            code: code.to_string(),
            message: "bad".to_string(),
            artifacts: vec!["'A'".to_string()],
        };
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            issues: vec![issue("missing_description"), issue("naming_convention")],
            data: RenderableData {
                artifacts_inspected: 1,
                issues_found: 2,
                truncated_reason: None,
            },
        }
    }

    #[test]
    fn render_annotations_respects_max() {
        let annotations = render_annotations(&sample_report(), 1);
        assert_eq!(annotations.len(), 2);
        assert!(annotations[0].contains("missing_description"));
        assert_eq!(annotations[1], "::notice::1 more issue(s) not annotated");
    }

    #[test]
    fn render_annotations_without_cap_hit() {
        let annotations = render_annotations(&sample_report(), 10);
        assert_eq!(annotations.len(), 2);
    }

    #[test]
    fn render_markdown_smoke() {
        let markdown = render_markdown(&sample_report());
        assert!(markdown.contains("## Issues"));
    }
}
