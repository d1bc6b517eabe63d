//! TOML front matter

use serde_json::{Number, Value};
use toml::value::Datetime;

use super::{Codec, CodecError, Record, TOML};

/// Table-oriented front matter (`toml`)
///
/// TOML has native dates while YAML front matter carries them as plain
/// strings, so on encode any string that parses as a TOML date or datetime is
/// written as one. Decoding turns datetimes back into their string form.
/// TOML has no null, so null fields are left out of the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn name(&self) -> &'static str {
        TOML
    }

    fn decode(&self, text: &str) -> Result<Record, CodecError> {
        let table: toml::Table = text.parse().map_err(|e| CodecError::decode(TOML, e))?;
        table
            .into_iter()
            .map(|(key, value)| {
                let converted = toml_to_json(&key, value)?;
                Ok((key, converted))
            })
            .collect()
    }

    fn encode(&self, record: &Record) -> Result<String, CodecError> {
        let table = json_to_table(record)?;

        let mut text = toml::to_string(&table).map_err(|e| CodecError::encode(TOML, e))?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

/// `key` names the top-level field, for error messages
fn toml_to_json(key: &str, value: toml::Value) -> Result<Value, CodecError> {
    let converted = match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => match Number::from_f64(f) {
            Some(n) => Value::Number(n),
            None => {
                return Err(CodecError::NonFinite {
                    format: TOML,
                    key: key.to_string(),
                });
            }
        },
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| toml_to_json(key, item))
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| Ok((k, toml_to_json(key, v)?)))
                .collect::<Result<_, CodecError>>()?,
        ),
    };
    Ok(converted)
}

/// Null fields have no TOML form and are left out of the table
fn json_to_table(map: &serde_json::Map<String, Value>) -> Result<toml::Table, CodecError> {
    let mut table = toml::Table::new();
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        table.insert(key.clone(), json_to_toml(key, value)?);
    }
    Ok(table)
}

fn json_to_toml(key: &str, value: &Value) -> Result<toml::Value, CodecError> {
    let converted = match value {
        Value::Null => {
            return Err(CodecError::Unrepresentable {
                format: TOML,
                what: format!("null list item for key '{}'", key),
            });
        }
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                toml::Value::Integer(i)
            } else if let Some(f) = n.as_f64()
                && n.is_f64()
            {
                toml::Value::Float(f)
            } else {
                return Err(CodecError::Unrepresentable {
                    format: TOML,
                    what: format!("integer {} for key '{}'", n, key),
                });
            }
        }
        Value::String(s) => match parse_date(s) {
            Some(dt) => toml::Value::Datetime(dt),
            None => toml::Value::String(s.clone()),
        },
        Value::Array(items) => toml::Value::Array(
            items
                .iter()
                .map(|item| json_to_toml(key, item))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => toml::Value::Table(json_to_table(map)?),
    };
    Ok(converted)
}

/// Only values carrying a calendar date count; bare times stay strings
fn parse_date(s: &str) -> Option<Datetime> {
    s.parse::<Datetime>().ok().filter(|dt| dt.date.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_table() {
        let record = TomlCodec
            .decode("title = \"Test\"\ntags = [\"a\", \"b\"]\nweight = 2\n\n[author]\nname = \"Ann\"\n")
            .unwrap();

        assert_eq!(record["title"], json!("Test"));
        assert_eq!(record["tags"], json!(["a", "b"]));
        assert_eq!(record["weight"], json!(2));
        assert_eq!(record["author"], json!({"name": "Ann"}));
    }

    #[test]
    fn test_decode_datetime_as_string() {
        let record = TomlCodec.decode("date = 2023-05-01\n").unwrap();
        assert_eq!(record["date"], json!("2023-05-01"));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let err = TomlCodec.decode("title = \n").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_encode_dates_natively() {
        let mut record = Record::new();
        record.insert("date".into(), json!("2023-05-01"));
        record.insert("time".into(), json!("10:30:00"));
        record.insert("title".into(), json!("Test"));

        let text = TomlCodec.encode(&record).unwrap();
        assert!(text.contains("date = 2023-05-01\n"));
        assert!(text.contains("time = \"10:30:00\"\n"));
        assert!(text.contains("title = \"Test\"\n"));
    }

    #[test]
    fn test_encode_nested_table_after_values() {
        let mut record = Record::new();
        record.insert("author".into(), json!({"name": "Ann"}));
        record.insert("title".into(), json!("Test"));

        let text = TomlCodec.encode(&record).unwrap();
        let reparsed = TomlCodec.decode(&text).unwrap();
        assert_eq!(reparsed, record);
    }

    #[test]
    fn test_encode_skips_null_fields() {
        let mut record = Record::new();
        record.insert("draft".into(), Value::Null);
        record.insert("extra".into(), json!({"note": null, "rank": 1}));
        record.insert("title".into(), json!("Hello"));

        let text = TomlCodec.encode(&record).unwrap();
        assert!(!text.contains("draft"));
        assert!(!text.contains("note"));
        assert!(text.contains("title = \"Hello\""));
        assert!(text.contains("rank = 1"));
    }

    #[test]
    fn test_decode_rejects_non_finite_float() {
        for text in ["ratio = nan\n", "ratio = inf\n", "[stats]\nratio = -inf\n"] {
            let err = TomlCodec.decode(text).unwrap_err();
            assert!(matches!(err, CodecError::NonFinite { .. }), "{}", text);
            assert!(err.to_string().contains("not a finite number"));
        }
    }

    #[test]
    fn test_encode_rejects_null_inside_list() {
        let mut record = Record::new();
        record.insert("tags".into(), json!(["a", null]));

        let err = TomlCodec.encode(&record).unwrap_err();
        assert!(matches!(err, CodecError::Unrepresentable { .. }));
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn test_encode_float() {
        let mut record = Record::new();
        record.insert("ratio".into(), json!(0.5));
        assert_eq!(TomlCodec.encode(&record).unwrap(), "ratio = 0.5\n");
    }
}
