use serde::{Deserialize, Serialize};

/// A digitized image belonging to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterFile {
    /// Backend-relative storage key.
    pub path: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "unitID", default)]
    pub unit_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form tag; empty when untagged.
    #[serde(default)]
    pub status: String,
    #[serde(rename = "componentID", default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<u64>,
    /// Last problem reported by the backend for this file.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl MasterFile {
    pub fn new(unit_id: u64, path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
            unit_id,
            title: String::new(),
            description: String::new(),
            status: String::new(),
            component_id: None,
            error: String::new(),
        }
    }

    /// Builds a record whose path is `<dir>/<file_name>`.
    pub fn in_directory(unit_id: u64, dir: &str, file_name: &str) -> Self {
        let path = format!("{}/{}", dir.trim_end_matches('/'), file_name);
        Self::new(unit_id, path, file_name)
    }

    /// Renames the file in place, keeping its directory.
    pub fn rename(&mut self, new_name: &str) {
        self.path = match self.path.rfind('/') {
            Some(idx) => format!("{}/{}", &self.path[..idx], new_name),
            None => new_name.to_string(),
        };
        self.file_name = new_name.to_string();
    }
}

/// Metadata patch for one master file, keyed by `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    pub file: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "componentID", default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<u64>,
}

/// A per-file failure reported by the backend, keyed by file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProblem {
    pub file: String,
    pub problem: String,
}
