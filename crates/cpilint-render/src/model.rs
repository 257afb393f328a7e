#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableIssue {
    pub rule_id: Option<String>,
    pub code: String,
    pub message: String,
    /// Display form of every implicated artifact.
    pub artifacts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub artifacts_inspected: u32,
    pub issues_found: u32,
    pub truncated_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub issues: Vec<RenderableIssue>,
    pub data: RenderableData,
}
