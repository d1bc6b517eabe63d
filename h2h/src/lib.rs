//! h2h - Hexo/Hugo front matter migration
//!
//! Rewrites the front matter of every Markdown document under a source tree
//! from one blog engine's conventions to the other's, writing the results to a
//! mirrored destination tree. Document bodies are copied unchanged.
//!
//! # Pipeline
//!
//! ```text
//! BatchEngine ──(per file)──> DocumentConverter
//!                               ├─ document::split
//!                               └─ FrontMatterTransformer
//!                                    ├─ Codec::decode   (yaml | toml)
//!                                    ├─ FieldMap::map   (hexo2hugo | hugo2hexo)
//!                                    └─ Codec::encode   (yaml | toml)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use h2h::{BatchConfig, BatchEngine};
//!
//! let engine = BatchEngine::new(BatchConfig::default())?;
//! let report = engine.run("source/_posts", "content/posts").await?;
//! println!("converted {} files", report.converted);
//! ```

pub mod batch;
pub mod cli;
pub mod codec;
pub mod config;
pub mod document;
pub mod fieldmap;
pub mod transform;

pub use batch::{BatchConfig, BatchEngine, BatchError, BatchReport, ConversionFailure, TaskError};
pub use codec::{Codec, CodecError, CodecRegistry, Record, TOML, TomlCodec, YAML, YamlCodec};
pub use config::Config;
pub use document::{ConvertError, DELIMITER, DocumentConverter, SplitError, split};
pub use fieldmap::{Direction, FieldMap, HEXO_TO_HUGO};
pub use transform::{FrontMatterTransformer, TransformError};
