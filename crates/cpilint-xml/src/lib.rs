//! XML element tree used by cpilint.
//!
//! Both the rules file and the integration-flow document are parsed into the same owned,
//! namespace-aware tree. The tree is read-only once built; queries borrow into it.
//!
//! Text content is kept per element (concatenated direct text and CDATA). Comments, processing
//! instructions and the XML declaration are dropped.

#![forbid(unsafe_code)]

mod element;
mod parse;

pub use element::{Attribute, Descendants, Element};
pub use parse::parse_document;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element (second root <{0}>)")]
    MultipleRoots(String),

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("unknown namespace prefix '{0}'")]
    UnknownPrefix(String),
}

impl XmlError {
    pub(crate) fn malformed(position: u64, err: impl std::fmt::Display) -> Self {
        XmlError::Malformed {
            position,
            message: err.to_string(),
        }
    }
}
