//! Front-matter field name mapping between Hexo and Hugo
//!
//! Both directions come from the single [`HEXO_TO_HUGO`] table: the Hugo to
//! Hexo map is built by inverting it, never maintained by hand.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Canonical Hexo field name -> Hugo field name table
pub const HEXO_TO_HUGO: &[(&str, &str)] = &[
    ("title", "title"),
    ("categories", "categories"),
    ("date", "date"),
    ("description", "description"),
    ("keywords", "keywords"),
    ("permalink", "slug"),
    ("tags", "tags"),
    ("updated", "lastmod"),
];

/// Conversion direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Direction {
    #[default]
    #[serde(rename = "hexo2hugo")]
    #[value(name = "hexo2hugo")]
    HexoToHugo,

    #[serde(rename = "hugo2hexo")]
    #[value(name = "hugo2hexo")]
    HugoToHexo,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::HexoToHugo => "hexo2hugo",
            Direction::HugoToHexo => "hugo2hexo",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hexo2hugo" => Ok(Direction::HexoToHugo),
            "hugo2hexo" => Ok(Direction::HugoToHexo),
            other => Err(format!("invalid conversion direction: {}", other)),
        }
    }
}

/// Immutable field name map for one direction
#[derive(Debug, Clone)]
pub struct FieldMap {
    direction: Direction,
    names: HashMap<&'static str, &'static str>,
}

impl FieldMap {
    /// Build the map for a direction from the canonical table
    pub fn new(direction: Direction) -> Self {
        let names = match direction {
            Direction::HexoToHugo => HEXO_TO_HUGO.iter().map(|&(hexo, hugo)| (hexo, hugo)).collect(),
            Direction::HugoToHexo => HEXO_TO_HUGO.iter().map(|&(hexo, hugo)| (hugo, hexo)).collect(),
        };
        Self { direction, names }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Counterpart of `field` in the target dialect, or `field` itself when unmapped
    pub fn map<'a>(&self, field: &'a str) -> &'a str {
        match self.names.get(field) {
            Some(mapped) => *mapped,
            None => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hexo_to_hugo_renames() {
        let map = FieldMap::new(Direction::HexoToHugo);
        assert_eq!(map.map("permalink"), "slug");
        assert_eq!(map.map("updated"), "lastmod");
        assert_eq!(map.map("tags"), "tags");
    }

    #[test]
    fn test_hugo_to_hexo_renames() {
        let map = FieldMap::new(Direction::HugoToHexo);
        assert_eq!(map.map("slug"), "permalink");
        assert_eq!(map.map("lastmod"), "updated");
        assert_eq!(map.map("title"), "title");
    }

    #[test]
    fn test_unmapped_field_passes_through() {
        let map = FieldMap::new(Direction::HexoToHugo);
        assert_eq!(map.map("author"), "author");
        assert_eq!(map.map(""), "");
    }

    #[test]
    fn test_inverse_is_consistent() {
        let forward = FieldMap::new(Direction::HexoToHugo);
        let inverse = FieldMap::new(Direction::HugoToHexo);

        for &(hexo, hugo) in HEXO_TO_HUGO {
            assert_eq!(forward.map(hexo), hugo);
            assert_eq!(inverse.map(hugo), hexo);
        }
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("hexo2hugo".parse::<Direction>().unwrap(), Direction::HexoToHugo);
        assert_eq!("hugo2hexo".parse::<Direction>().unwrap(), Direction::HugoToHexo);

        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(err.contains("sideways"));
    }

    proptest! {
        #[test]
        fn prop_canonical_fields_round_trip(idx in 0..HEXO_TO_HUGO.len()) {
            let (hexo, hugo) = HEXO_TO_HUGO[idx];
            let forward = FieldMap::new(Direction::HexoToHugo);
            let inverse = FieldMap::new(Direction::HugoToHexo);

            prop_assert_eq!(inverse.map(forward.map(hexo)), hexo);
            prop_assert_eq!(forward.map(inverse.map(hugo)), hugo);
        }

        #[test]
        fn prop_unknown_fields_unchanged(field in "[a-z_]{1,16}") {
            prop_assume!(HEXO_TO_HUGO.iter().all(|&(hexo, hugo)| hexo != field && hugo != field));
            let map = FieldMap::new(Direction::HexoToHugo);
            prop_assert_eq!(map.map(&field), field.as_str());
        }
    }
}
