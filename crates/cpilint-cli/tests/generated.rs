//! CLI runs over artifacts generated into a temp directory.

use assert_cmd::Command;
use camino::Utf8PathBuf;
use cpilint_test_util::{ArtifactFixture, ChannelFixture, write_file};
use predicates::prelude::*;

#[allow(deprecated)]
fn cpilint_cmd() -> Command {
    Command::cargo_bin("cpilint").expect("cpilint binary not found - run `cargo build` first")
}

#[test]
fn duplicate_scripts_are_reported_once_across_artifacts() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
    let flows = root.join("flows");
    for id in ["Billing_A", "Billing_B"] {
        ArtifactFixture::new(id)
            .described("Billing")
            .resource("script/common.groovy", "def process(msg) { msg }")
            .write_to(&flows)
            .expect("write artifact");
    }
    write_file(
        &root.join("rules.xml"),
        "<cpilint><rules><duplicate-resources-not-allowed/></rules></cpilint>",
    )
    .expect("write rules");

    cpilint_cmd()
        .arg("check")
        .arg("--rules")
        .arg(root.join("rules.xml"))
        .arg("--directory")
        .arg(&flows)
        .arg("--report-out")
        .arg(root.join("out/report.json"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("found 1 issue(s)"));
}

#[test]
fn unencrypted_receivers_are_flagged() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
    ArtifactFixture::new("Erp_Push")
        .channel(
            ChannelFixture::receiver("MessageFlow_1", "HTTP")
                .named("To ERP")
                .property("httpAddressWithoutQuery", "http://erp.internal/orders"),
        )
        .write_to(&root.join("flows"))
        .expect("write artifact");
    write_file(
        &root.join("rules.xml"),
        "<cpilint><rules><unencrypted-endpoints-not-allowed/></rules></cpilint>",
    )
    .expect("write rules");

    cpilint_cmd()
        .arg("-v")
        .arg("check")
        .arg("--rules")
        .arg(root.join("rules.xml"))
        .arg("--directory")
        .arg(root.join("flows"))
        .arg("--report-out")
        .arg(root.join("report.json"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("To ERP"));
}
