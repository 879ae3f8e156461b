// Per-field scoring weights

use crate::fingerprint::Field;
use relocator_scanner::{LocateError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Weight awarded to a candidate for each field equal to the original's.
///
/// The id outweighs everything else, and content (button text) outweighs
/// every other attribute. Keys missing from a weights file keep these
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub id: u32,
    pub content: u32,
    pub tag: u32,
    pub class: u32,
    pub title: u32,
    pub href: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            id: 10,
            content: 5,
            tag: 1,
            class: 1,
            title: 1,
            href: 1,
        }
    }
}

impl Weights {
    pub fn weight(&self, field: Field) -> u32 {
        match field {
            Field::Id => self.id,
            Field::Content => self.content,
            Field::Tag => self.tag,
            Field::Class => self.class,
            Field::Title => self.title,
            Field::Href => self.href,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LocateError::InvalidWeights(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| LocateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
