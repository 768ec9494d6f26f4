use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Weighted input tree in the JSON exchange shape: numbers are leaves,
/// arrays are anonymous sequences, objects are named entries laid out
/// in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nest {
    Leaf(f64),
    Seq(Vec<Nest>),
    Map(IndexMap<String, Nest>),
}

impl Nest {
    /// Parse from JSON text. Any shape outside numbers, arrays and
    /// objects is a malformed tree.
    pub fn from_str(text: &str) -> Result<Nest> {
        serde_json::from_str(text).map_err(|e| Error::MalformedInput {
            message: e.to_string(),
        })
    }

    /// Parse a JSON byte stream, e.g. an open file.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Nest> {
        serde_json::from_reader(reader).map_err(|e| Error::MalformedInput {
            message: e.to_string(),
        })
    }

    /// Total of every number in the tree.
    pub fn weight(&self) -> f64 {
        match self {
            Nest::Leaf(value) => *value,
            Nest::Seq(children) => children.iter().map(Nest::weight).sum(),
            Nest::Map(children) => children.values().map(Nest::weight).sum(),
        }
    }

    /// Copy with every container's children reordered largest total
    /// weight first. The sort is stable, so equal weights keep their
    /// document order.
    pub fn ordered(&self) -> Nest {
        match self {
            Nest::Leaf(value) => Nest::Leaf(*value),
            Nest::Seq(children) => {
                let mut items: Vec<(f64, Nest)> = children
                    .iter()
                    .map(|child| {
                        let child = child.ordered();
                        (child.weight(), child)
                    })
                    .collect();
                items.sort_by(|a, b| b.0.total_cmp(&a.0));
                Nest::Seq(items.into_iter().map(|(_, child)| child).collect())
            }
            Nest::Map(children) => {
                let mut items: Vec<(f64, String, Nest)> = children
                    .iter()
                    .map(|(key, child)| {
                        let child = child.ordered();
                        (child.weight(), key.clone(), child)
                    })
                    .collect();
                items.sort_by(|a, b| b.0.total_cmp(&a.0));
                Nest::Map(items.into_iter().map(|(_, key, child)| (key, child)).collect())
            }
        }
    }
}
