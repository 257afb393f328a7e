//! CLI entry point for cpilint.
//!
//! Argument parsing, logging setup, file IO and exit codes. All behavior lives in `cpilint-app`.

#![forbid(unsafe_code)]

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use cpilint_app::{
    ExplainOutput, LintInput, parse_report_json, render_annotations, render_markdown, run_explain,
    run_lint, serialize_report, to_renderable, verdict_exit_code,
};
use cpilint_settings::FactoryRegistry;
use cpilint_types::LintReport;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cpilint",
    version,
    about = "Rule-driven linter for packaged integration-flow artifacts"
)]
struct Cli {
    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect artifacts against a rules file and write the report.
    Check {
        /// Rules file (XML). Imports resolve relative to it.
        #[arg(long)]
        rules: Utf8PathBuf,

        /// Directory holding unpacked artifacts. Repeatable.
        #[arg(long = "directory", required = true)]
        directories: Vec<Utf8PathBuf>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/cpilint/report.json")]
        report_out: Utf8PathBuf,

        /// Also write a Markdown report here.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cpilint/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cpilint/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Describe a built-in rule element.
    Explain {
        /// Rule element name, e.g. "csrf-protection-required".
        rule: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Check {
            rules,
            directories,
            report_out,
            markdown_out,
        } => cmd_check(&rules, &directories, &report_out, markdown_out.as_deref()),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { rule } => cmd_explain(&rule),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "cpilint=warn",
        1 => "cpilint=info",
        _ => "cpilint=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(
    rules: &Utf8Path,
    directories: &[Utf8PathBuf],
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let registry = FactoryRegistry::with_builtins();
        let output = run_lint(
            LintInput {
                rules_file: rules,
                directories,
            },
            &registry,
        )?;
        let report = &output.report;

        for issue in &report.issues {
            println!("{}", issue.message());
        }
        println!(
            "Inspected {} artifact(s), found {} issue(s) ({} exempted).",
            report.data.artifacts_inspected, report.data.issues_found, output.suppressed
        );

        write_report_file(report_out, report).context("write report json")?;
        tracing::info!(path = %report_out, "report written");
        if let Some(path) = markdown_out {
            let md = render_markdown(&to_renderable(report));
            write_text_file(path, &md).context("write markdown")?;
            tracing::info!(path = %path, "markdown written");
        }

        Ok(verdict_exit_code(report.verdict))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("cpilint error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &LintReport) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    write_text_file(path, data)
}

fn write_text_file(path: &Utf8Path, contents: impl AsRef<[u8]>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write: {path}"))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<LintReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }
    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_explain(rule: &str) -> anyhow::Result<()> {
    match run_explain(rule) {
        ExplainOutput::Found(exp) => {
            print!("{}", cpilint_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available,
        } => {
            eprint!("{}", cpilint_app::format_not_found(&identifier, available));
            std::process::exit(1);
        }
    }
}
