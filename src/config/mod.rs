//! Declarative transition wiring.
//!
//! A [`TransitionDef`] is the JSON form of one transition: its configuration plus the behaviour
//! collections both screens contribute. Views are referenced by name and resolved against a
//! [`ViewNames`] map when the definition is built.

pub(crate) mod build;
pub(crate) mod model;
pub(crate) mod validate;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::config::model::TransitionDef;
use crate::foundation::error::{SegueError, SegueResult};

impl TransitionDef {
    /// Parse a transition definition from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> SegueResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SegueError::serde(format!("parse transition JSON: {e}")))
    }

    /// Parse a transition definition from a JSON string.
    pub fn from_json_str(s: &str) -> SegueResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| SegueError::serde(format!("parse transition JSON: {e}")))
    }

    /// Parse a transition definition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SegueResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open transition JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize back to pretty JSON.
    pub fn to_json_pretty(&self) -> SegueResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SegueError::serde(format!("write transition JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
