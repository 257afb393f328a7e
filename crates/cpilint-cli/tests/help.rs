use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the cpilint binary.
#[allow(deprecated)]
fn cpilint_cmd() -> Command {
    Command::cargo_bin("cpilint").unwrap()
}

#[test]
fn help_works() {
    cpilint_cmd().arg("--help").assert().success();
}

#[test]
fn help_lists_subcommands() {
    cpilint_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("explain"))
        .stdout(predicate::str::contains("annotations"));
}

#[test]
fn check_requires_rules_and_directory() {
    cpilint_cmd().arg("check").assert().failure().code(2);
    cpilint_cmd()
        .args(["check", "--rules", "rules.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--directory"));
}
