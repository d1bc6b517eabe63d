//! Metadata block transformation: decode, rename fields, re-encode

use thiserror::Error;
use tracing::debug;

use crate::codec::{CodecError, CodecRegistry, Record};
use crate::document::DELIMITER;
use crate::fieldmap::FieldMap;

/// Errors from transforming a metadata block
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unsupported front matter format: {name}")]
    UnsupportedFormat { name: String },

    #[error("unmarshaling front matter: {0}")]
    Decode(#[source] CodecError),

    #[error("marshaling front matter: {0}")]
    Encode(#[source] CodecError),
}

/// Converts metadata blocks from one format and dialect to another
///
/// Holds only shared, read-only state and can be used from many tasks at
/// once.
#[derive(Debug, Clone)]
pub struct FrontMatterTransformer {
    codecs: CodecRegistry,
    source_format: String,
    target_format: String,
    field_map: FieldMap,
}

impl FrontMatterTransformer {
    pub fn new(
        codecs: CodecRegistry,
        source_format: impl Into<String>,
        target_format: impl Into<String>,
        field_map: FieldMap,
    ) -> Self {
        Self {
            codecs,
            source_format: source_format.into(),
            target_format: target_format.into(),
            field_map,
        }
    }

    /// Transform a raw metadata block into a delimited block in the target format
    ///
    /// Values are carried over untouched; only keys go through the field map.
    /// When two keys map to the same name the later one (in record order)
    /// replaces the earlier one silently.
    pub fn transform(&self, raw_block: &str) -> Result<String, TransformError> {
        let source = self
            .codecs
            .get(&self.source_format)
            .ok_or_else(|| TransformError::UnsupportedFormat {
                name: self.source_format.clone(),
            })?;
        let target = self
            .codecs
            .get(&self.target_format)
            .ok_or_else(|| TransformError::UnsupportedFormat {
                name: self.target_format.clone(),
            })?;

        let record = source.decode(raw_block).map_err(TransformError::Decode)?;
        let remapped = remap(record, &self.field_map);
        let encoded = target.encode(&remapped).map_err(TransformError::Encode)?;

        debug!(
            fields = remapped.len(),
            source = %self.source_format,
            target = %self.target_format,
            direction = %self.field_map.direction(),
            "FrontMatterTransformer::transform: encoded block"
        );
        Ok(format!("{DELIMITER}\n{encoded}{DELIMITER}"))
    }
}

/// Rebuild `record` with every key passed through `field_map`
pub fn remap(record: Record, field_map: &FieldMap) -> Record {
    let mut remapped = Record::new();
    for (key, value) in record {
        let mapped = field_map.map(&key).to_string();
        remapped.insert(mapped, value);
    }
    remapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{TOML, YAML};
    use crate::fieldmap::Direction;
    use serde_json::json;

    fn transformer(source: &str, target: &str, direction: Direction) -> FrontMatterTransformer {
        FrontMatterTransformer::new(CodecRegistry::standard(), source, target, FieldMap::new(direction))
    }

    #[test]
    fn test_yaml_to_yaml_renames_fields() {
        let t = transformer(YAML, YAML, Direction::HexoToHugo);
        let block = t
            .transform("\ntitle: Test\npermalink: my-post\nupdated: 2023-06-01\n")
            .unwrap();

        assert_eq!(block, "---\nlastmod: 2023-06-01\nslug: my-post\ntitle: Test\n---");
    }

    #[test]
    fn test_reverse_direction() {
        let t = transformer(YAML, YAML, Direction::HugoToHexo);
        let block = t.transform("slug: my-post\nlastmod: 2023-06-01\n").unwrap();

        assert!(block.contains("permalink: my-post"));
        assert!(block.contains("updated: 2023-06-01"));
        assert!(!block.contains("slug"));
    }

    #[test]
    fn test_unknown_field_passes_through() {
        let t = transformer(YAML, YAML, Direction::HexoToHugo);
        let block = t.transform("author: Ann\ncomments: true\n").unwrap();

        assert!(block.contains("author: Ann"));
        assert!(block.contains("comments: true"));
    }

    #[test]
    fn test_yaml_to_toml() {
        let t = transformer(YAML, TOML, Direction::HexoToHugo);
        let block = t.transform("title: Test\ndate: 2023-05-01\ntags: [a, b]\n").unwrap();

        assert!(block.starts_with("---\n"));
        assert!(block.ends_with("\n---"));
        assert!(block.contains("date = 2023-05-01"));
        assert!(block.contains("title = \"Test\""));
        assert!(block.contains("tags = [\"a\", \"b\"]"));
    }

    #[test]
    fn test_unsupported_source_format() {
        let t = transformer("json", YAML, Direction::HexoToHugo);
        let err = t.transform("title: Test").unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedFormat { ref name } if name == "json"));
    }

    #[test]
    fn test_unsupported_target_format() {
        let t = transformer(YAML, "ini", Direction::HexoToHugo);
        let err = t.transform("title: Test").unwrap_err();
        assert!(err.to_string().contains("ini"));
    }

    #[test]
    fn test_decode_error() {
        let t = transformer(YAML, YAML, Direction::HexoToHugo);
        let err = t.transform("title: [broken\n").unwrap_err();
        assert!(matches!(err, TransformError::Decode(_)));
    }

    #[test]
    fn test_encode_error() {
        let t = transformer(YAML, TOML, Direction::HexoToHugo);
        let err = t.transform("title: Test\ndraft: ~\n").unwrap_err();
        assert!(matches!(err, TransformError::Encode(_)));
    }

    #[test]
    fn test_remap_collision_last_write_wins() {
        let mut record = Record::new();
        record.insert("permalink".into(), json!("from-permalink"));
        record.insert("slug".into(), json!("from-slug"));

        let remapped = remap(record, &FieldMap::new(Direction::HexoToHugo));
        assert_eq!(remapped.len(), 1);
        assert_eq!(remapped["slug"], json!("from-slug"));
    }
}
