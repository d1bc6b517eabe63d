//! YAML front matter

use super::{Codec, CodecError, Record, YAML};

/// Line-oriented key/value front matter (`serde_yaml`)
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        YAML
    }

    fn decode(&self, text: &str) -> Result<Record, CodecError> {
        if text.trim().is_empty() {
            return Ok(Record::new());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| CodecError::decode(YAML, e))?;

        // A record holds no NaN or infinity
        if let serde_yaml::Value::Mapping(mapping) = &value {
            for (key, field) in mapping {
                if has_non_finite(field) {
                    return Err(CodecError::NonFinite {
                        format: YAML,
                        key: key.as_str().map(str::to_string).unwrap_or_else(|| format!("{:?}", key)),
                    });
                }
            }
        }

        serde_yaml::from_value(value).map_err(|e| CodecError::decode(YAML, e))
    }

    fn encode(&self, record: &Record) -> Result<String, CodecError> {
        let mut text = serde_yaml::to_string(record).map_err(|e| CodecError::encode(YAML, e))?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

fn has_non_finite(value: &serde_yaml::Value) -> bool {
    match value {
        serde_yaml::Value::Number(n) => n.as_f64().is_some_and(|f| !f.is_finite()),
        serde_yaml::Value::Sequence(items) => items.iter().any(has_non_finite),
        serde_yaml::Value::Mapping(mapping) => mapping.values().any(has_non_finite),
        serde_yaml::Value::Tagged(tagged) => has_non_finite(&tagged.value),
        _ => false,
    }
}
