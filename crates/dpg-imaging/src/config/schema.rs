use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sequence::UnitId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagingConfig {
    pub version: String,
    /// Root directory holding one sub-directory per unit.
    #[serde(default)]
    pub images_directory: Option<String>,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            images_directory: None,
            naming: NamingConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl ImagingConfig {
    /// `<images_directory>/<padded unit>`, when an images directory is set.
    pub fn unit_directory(&self, unit: &UnitId) -> Option<PathBuf> {
        self.images_directory
            .as_deref()
            .map(|root| Path::new(root).join(unit.padded(self.naming.unit_pad_width)))
    }
}

/// Master-file naming convention: `<unit>_<page>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    #[serde(default = "default_unit_pad_width")]
    pub unit_pad_width: usize,
    #[serde(default = "default_page_pad_width")]
    pub page_pad_width: usize,
    #[serde(default = "default_master_extension")]
    pub master_extension: String,
}

fn default_unit_pad_width() -> usize {
    9
}

fn default_page_pad_width() -> usize {
    4
}

fn default_master_extension() -> String {
    "tif".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            unit_pad_width: default_unit_pad_width(),
            page_pad_width: default_page_pad_width(),
            master_extension: default_master_extension(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Master files shown per page of the unit view.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Projects shown per page of search results.
    #[serde(default = "default_page_size")]
    pub search_page_size: usize,
}

fn default_page_size() -> usize {
    20
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_page_size: default_page_size(),
        }
    }
}
