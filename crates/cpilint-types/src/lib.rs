//! Stable DTOs and IDs used across the cpilint workspace.
//!
//! This crate is intentionally boring:
//! - artifact tags, issues and exemptions
//! - stable rule element names and configuration vocabulary
//! - the JSON report envelope
//! - explain registry for rule documentation

#![forbid(unsafe_code)]

pub mod artifact;
pub mod exemption;
pub mod explain;
pub mod ids;
pub mod issue;
pub mod receipt;

pub use artifact::{ArtifactId, ArtifactTag, PackageInfo};
pub use exemption::Exemption;
pub use explain::{Explanation, lookup_explanation};
pub use issue::{Issue, IssueKind, ListFacet, NoArtifactsError, ResourceRef, RuleId};
pub use receipt::{LintData, LintReport, SCHEMA_REPORT_V1, ToolMeta, Verdict};
