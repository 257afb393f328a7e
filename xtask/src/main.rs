//! Developer tasks (golden fixture updates, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use cpilint_app::{LintInput, run_lint};
use cpilint_settings::FactoryRegistry;
use cpilint_test_util::normalize_nondeterministic;
use cpilint_types::{explain, ids};

/// Golden report: (rules file, flow set, expected report), relative to `tests/fixtures`.
const GOLDEN_FIXTURES: &[(&str, &str, &str)] =
    &[("rules/baseline.xml", "flows/clean", "expected/clean.report.json")];

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<Utf8PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => Utf8PathBuf::from(dir),
        Err(_) => Utf8PathBuf::from_path_buf(
            std::env::current_dir().context("determine current directory")?,
        )
        .map_err(|p| anyhow::anyhow!("current directory is not UTF-8: {}", p.display()))?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Utf8PathBuf::from)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn fixtures_dir() -> anyhow::Result<Utf8PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  update-fixtures   Regenerate golden reports under tests/fixtures/expected");
    eprintln!("  check-fixtures    Fail if golden reports differ from current output (for CI)");
    eprintln!("  explain-coverage  Validate every built-in rule element has an explanation");
}

/// Lint one fixture and return the normalized report JSON.
fn golden_report(rules: &str, flows: &str) -> anyhow::Result<serde_json::Value> {
    let fixtures = fixtures_dir()?;
    let output = run_lint(
        LintInput {
            rules_file: &fixtures.join(rules),
            directories: &[fixtures.join(flows)],
        },
        &FactoryRegistry::with_builtins(),
    )
    .with_context(|| format!("lint {flows} with {rules}"))?;
    let value = serde_json::to_value(&output.report).context("serialize report")?;
    Ok(normalize_nondeterministic(value))
}

fn update_fixtures() -> anyhow::Result<()> {
    let fixtures = fixtures_dir()?;
    for (rules, flows, expected) in GOLDEN_FIXTURES {
        let value = golden_report(rules, flows)?;
        let mut text = serde_json::to_string_pretty(&value).context("format report")?;
        text.push('\n');
        let path = fixtures.join(expected);
        std::fs::write(&path, text).with_context(|| format!("write {path}"))?;
        println!("Updated {expected}");
    }
    Ok(())
}

fn check_fixtures() -> anyhow::Result<()> {
    let fixtures = fixtures_dir()?;
    let mut stale = Vec::new();
    for (rules, flows, expected) in GOLDEN_FIXTURES {
        let actual = golden_report(rules, flows)?;
        let path = fixtures.join(expected);
        let text = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
        let recorded: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("parse {path}"))?;
        if normalize_nondeterministic(recorded) != actual {
            stale.push(*expected);
        }
    }

    if stale.is_empty() {
        println!("✓ {} golden report(s) up to date", GOLDEN_FIXTURES.len());
        Ok(())
    } else {
        for expected in &stale {
            eprintln!("  - {expected} is stale");
        }
        eprintln!("\nRun `cargo xtask update-fixtures` to regenerate.");
        bail!("Golden fixture check failed")
    }
}

fn explain_coverage() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    for &element in ids::BUILTIN_RULES {
        match explain::lookup_explanation(element) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Rule '{element}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Rule '{element}' has empty description"));
                }
                if !exp.example.contains(element) {
                    errors.push(format!("Rule '{element}' example does not use the element"));
                }
            }
            None => errors.push(format!("Rule '{element}' has no explanation")),
        }
    }
    for &element in explain::all_rule_elements() {
        if !ids::BUILTIN_RULES.contains(&element) {
            errors.push(format!("Explanation for unknown rule '{element}'"));
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule elements have explanations", ids::BUILTIN_RULES.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "update-fixtures" => update_fixtures(),
        "check-fixtures" => check_fixtures(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
