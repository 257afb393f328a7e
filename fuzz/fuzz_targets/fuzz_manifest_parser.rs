//! Fuzz target for bundle manifest parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Ok(manifest) = cpilint_repo::parse_manifest(&text) {
        assert!(!manifest.symbolic_name.is_empty());
        assert!(!manifest.symbolic_name.contains(';'));
    }
});
