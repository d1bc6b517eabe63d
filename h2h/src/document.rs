//! Splitting documents into front matter and body, and reassembling them
//!
//! Wire format:
//!
//! ```text
//! ---
//! <metadata block>
//! ---
//!
//! <body>
//! ```

use thiserror::Error;

use crate::transform::{FrontMatterTransformer, TransformError};

/// Marker that opens and closes the metadata block
pub const DELIMITER: &str = "---";

/// Structural errors found while splitting a document
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("invalid hexo/hugo markdown format: expected front matter between two --- markers, found {delimiters} delimiter(s)")]
    Malformed { delimiters: usize },
}

/// Errors from converting one document, tagged with the failing step
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("parsing content: {0}")]
    Split(#[from] SplitError),

    #[error("converting front matter: {0}")]
    Transform(#[from] TransformError),
}

/// A document split into its raw metadata block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    pub front_matter: &'a str,
    pub body: &'a str,
}

/// Split `content` into metadata block and body
///
/// Anything before the first delimiter is dropped. The line break that ends
/// the closing delimiter line and at most one following blank line are
/// separator; everything after them is the body, unchanged.
pub fn split(content: &str) -> Result<SplitDocument<'_>, SplitError> {
    let mut parts = content.splitn(3, DELIMITER);
    let (_preamble, front_matter, rest) = match (parts.next(), parts.next(), parts.next()) {
        (Some(preamble), Some(front_matter), Some(rest)) => (preamble, front_matter, rest),
        _ => {
            return Err(SplitError::Malformed {
                delimiters: content.matches(DELIMITER).count(),
            });
        }
    };

    Ok(SplitDocument {
        front_matter,
        body: strip_line_break(strip_line_break(rest)),
    })
}

fn strip_line_break(s: &str) -> &str {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n')).unwrap_or(s)
}

/// Join a transformed metadata block and a body with one blank line
pub fn assemble(front_matter: &str, body: &str) -> String {
    format!("{front_matter}\n\n{body}")
}

/// Converts whole documents: split, transform the metadata block, reassemble
#[derive(Debug, Clone)]
pub struct DocumentConverter {
    transformer: FrontMatterTransformer,
}

impl DocumentConverter {
    pub fn new(transformer: FrontMatterTransformer) -> Self {
        Self { transformer }
    }

    /// Convert one document's contents; never returns partial output
    pub fn convert(&self, content: &str) -> Result<String, ConvertError> {
        let doc = split(content)?;
        let front_matter = self.transformer.transform(doc.front_matter)?;
        Ok(assemble(&front_matter, doc.body))
    }
}
