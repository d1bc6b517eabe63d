//! Front-matter codecs
//!
//! A codec decodes a metadata block into a [`Record`] and encodes a record
//! back into text. Codecs are looked up by format name in a [`CodecRegistry`];
//! the standard registry carries `yaml` and `toml`.

mod error;
mod toml_codec;
mod yaml_codec;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use error::CodecError;
pub use toml_codec::TomlCodec;
pub use yaml_codec::YamlCodec;

/// Decoded front matter: field name -> arbitrary structured value
///
/// Keys iterate in sorted order, so encoded output is deterministic but does
/// not follow the order of the source document.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Format name of the YAML codec
pub const YAML: &str = "yaml";

/// Format name of the TOML codec
pub const TOML: &str = "toml";

/// Decode/encode pair for one structured-text format
pub trait Codec: Send + Sync {
    /// Format name used for registry lookup (e.g. "yaml")
    fn name(&self) -> &'static str;

    /// Parse a metadata block into a record
    fn decode(&self, text: &str) -> Result<Record, CodecError>;

    /// Serialize a record; the returned text ends with a newline
    fn encode(&self, record: &Record) -> Result<String, CodecError>;
}

/// Codecs available to a conversion, keyed by format name
#[derive(Clone)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// Registry with the YAML and TOML codecs
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(YamlCodec));
        registry.register(Arc::new(TomlCodec));
        registry
    }

    /// Registry with no codecs (for testing)
    pub fn empty() -> Self {
        Self { codecs: HashMap::new() }
    }

    /// Add a codec, replacing any codec already registered under its name
    pub fn register(&mut self, codec: Arc<dyn Codec>) {
        self.codecs.insert(codec.name().to_string(), codec);
    }

    /// Look up a codec by format name
    pub fn get(&self, name: &str) -> Option<&dyn Codec> {
        self.codecs.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codecs.contains_key(name)
    }

    /// Registered format names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry").field("codecs", &self.names()).finish()
    }
}
