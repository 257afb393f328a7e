use anyhow::{Context, bail};
use cpilint_render::{RenderableData, RenderableIssue, RenderableReport, RenderableVerdictStatus};
use cpilint_types::{Issue, LintReport, SCHEMA_REPORT_V1, Verdict};

pub fn parse_report_json(text: &str) -> anyhow::Result<LintReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        bail!("unknown report schema: {schema}");
    }
    serde_json::from_value(value).context("parse cpilint report")
}

pub fn serialize_report(report: &LintReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &LintReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        issues: report.issues.iter().map(renderable_issue).collect(),
        data: RenderableData {
            artifacts_inspected: report.data.artifacts_inspected,
            issues_found: report.data.issues_found,
            truncated_reason: None,
        },
    }
}

fn renderable_issue(issue: &Issue) -> RenderableIssue {
    RenderableIssue {
        rule_id: issue.rule_id().map(ToString::to_string),
        code: issue.kind().code().to_string(),
        message: issue.message().to_string(),
        artifacts: issue.tags().iter().map(ToString::to_string).collect(),
    }
}
