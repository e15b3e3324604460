//! JSON route documents on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::RouteError;
use super::node::Route;

/// A route document at a fixed path.
///
/// The document is the JSON form of [`Route`]: each node is an object
/// tagged by `kind` (`empty`, `series` or `split`), and missing children
/// are read as empty routes.
///
/// A series nests one object per computer, so documents have no depth
/// limit. Reading and writing grow the stack on demand instead.
#[derive(Debug, Clone)]
pub struct RouteFile {
    path: PathBuf,
}

impl RouteFile {
    /// Point at a route document.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document.
    pub fn load(&self) -> Result<Route, RouteError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| RouteError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut de = serde_json::Deserializer::from_str(&contents);
        de.disable_recursion_limit();
        let route = Route::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;

        debug!(
            path = %self.path.display(),
            computers = route.len(),
            "loaded route document"
        );

        Ok(route)
    }

    /// Write `route` to the document, creating parent directories if needed.
    pub fn save(&self, route: &Route) -> Result<(), RouteError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| RouteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut json = Vec::new();
        let mut ser = serde_json::Serializer::pretty(&mut json);
        route.serialize(serde_stacker::Serializer::new(&mut ser))?;
        std::fs::write(&self.path, json).map_err(|source| RouteError::Io {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}
