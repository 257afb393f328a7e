//! Rules-file loading.
//!
//! This crate is IO-free: documents are read through a [`RulesSource`], so the same loader runs
//! against the filesystem (see `cpilint-repo`) and against in-memory fixtures.

#![forbid(unsafe_code)]

mod loader;
mod registry;
mod schema;
mod source;

pub use loader::{RulesFile, load_rules_file};
pub use registry::FactoryRegistry;
pub use source::{MemoryRulesSource, RulesSource, normalize_path};
