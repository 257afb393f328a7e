//! The `check` use case: load rules, read artifacts, run the engine, produce a report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cpilint_domain::{CollectingIssueConsumer, ExemptionFilteringIssueConsumer};
use cpilint_repo::FsRulesSource;
use cpilint_settings::{FactoryRegistry, load_rules_file};
use cpilint_types::{LintData, LintReport, SCHEMA_REPORT_V1, ToolMeta, Verdict};
use std::convert::Infallible;
use time::OffsetDateTime;

/// Input for the lint use case.
#[derive(Clone, Debug)]
pub struct LintInput<'a> {
    /// Entry rules file; imports resolve relative to it.
    pub rules_file: &'a Utf8Path,
    /// Directories searched for unpacked artifacts.
    pub directories: &'a [Utf8PathBuf],
}

#[derive(Clone, Debug)]
pub struct LintOutput {
    pub report: LintReport,
    /// Issues withheld by exemptions.
    pub suppressed: usize,
}

/// Run the lint use case with the given factory registry.
pub fn run_lint(input: LintInput<'_>, registry: &FactoryRegistry) -> anyhow::Result<LintOutput> {
    let started_at = OffsetDateTime::now_utc();

    let rules_file = load_rules_file(input.rules_file, &FsRulesSource, registry)
        .with_context(|| format!("load rules file {}", input.rules_file))?;
    let (mut rules, exemptions) = rules_file.into_parts();
    tracing::info!(
        rules = rules.len(),
        exemptions = exemptions.len(),
        "rules loaded"
    );

    let artifacts = cpilint_repo::load_artifacts(input.directories).context("load artifacts")?;

    let mut consumer =
        ExemptionFilteringIssueConsumer::new(&exemptions, CollectingIssueConsumer::new());
    let summary = cpilint_domain::run(
        &mut rules,
        artifacts.into_iter().map(Ok::<_, Infallible>),
        &mut consumer,
    )
    .context("lint run aborted")?;

    let suppressed = consumer.suppressed();
    let issues = consumer.into_inner().into_issues();
    let issues_found = count(summary.issues_found);

    let report = LintReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "cpilint".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: Verdict::from_issue_count(issues_found),
        issues,
        data: LintData {
            artifacts_inspected: count(summary.artifacts_inspected),
            issues_found,
            rules_loaded: count(rules.len()),
            exemptions_configured: count(exemptions.len()),
        },
    };

    Ok(LintOutput { report, suppressed })
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Map verdict to exit code: 0 = pass, 2 = issues found.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
