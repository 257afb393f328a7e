use crate::issue::Issue;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for cpilint reports.
pub const SCHEMA_REPORT_V1: &str = "cpilint.report.v1";

/// A run either found no (non-exempt) issues or it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_issue_count(issues_found: u32) -> Self {
        if issues_found == 0 {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Run summary payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LintData {
    pub artifacts_inspected: u32,
    /// Forwarded (non-exempt) issues only.
    pub issues_found: u32,
    pub rules_loaded: u32,
    pub exemptions_configured: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LintReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub issues: Vec<Issue>,
    pub data: LintData,
}
