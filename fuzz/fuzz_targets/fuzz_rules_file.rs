//! Fuzz target for rules file loading.
//!
//! Goal: schema validation, rule construction and import resolution should **never panic**.
//! Every bad document must surface as a configuration error.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rules_file
//! ```

#![no_main]

use arbitrary::Arbitrary;
use camino::Utf8Path;
use cpilint_settings::{FactoryRegistry, MemoryRulesSource, load_rules_file};
use libfuzzer_sys::fuzz_target;

/// An entry document plus one file it may import as `base.xml`.
#[derive(Arbitrary, Debug)]
struct RulesInput {
    entry: String,
    base: String,
}

fuzz_target!(|input: RulesInput| {
    if input.entry.len() > 4096 || input.base.len() > 4096 {
        return;
    }
    let source = MemoryRulesSource::new()
        .with_file("rules/entry.xml", input.entry)
        .with_file("rules/base.xml", input.base);
    let _ = load_rules_file(
        Utf8Path::new("rules/entry.xml"),
        &source,
        &FactoryRegistry::with_builtins(),
    );
});
