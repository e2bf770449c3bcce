use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Identifier of a unit, accepted as an integer or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Left-pads the id with zeros to `width` characters.
    pub fn padded(&self, width: usize) -> String {
        format!("{:0>width$}", self.0.trim(), width = width)
    }
}

impl From<u64> for UnitId {
    fn from(id: u64) -> Self {
        UnitId(id.to_string())
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        UnitId(id.trim().to_string())
    }
}

impl From<String> for UnitId {
    fn from(id: String) -> Self {
        UnitId::from(id.as_str())
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A master file name split into its unit and page parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub unit: String,
    pub page: String,
}

impl NameParts {
    /// Lowercases `file_name`, strips `.extension` and splits on `_`.
    /// Returns `None` unless exactly two parts remain.
    pub fn parse(file_name: &str, extension: &str) -> Option<Self> {
        let lowered = file_name.to_lowercase();
        let suffix = format!(".{}", extension.to_lowercase());
        let stem = lowered.strip_suffix(&suffix).unwrap_or(&lowered);

        let mut parts = stem.split('_');
        let unit = parts.next()?;
        let page = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            unit: unit.to_string(),
            page: page.to_string(),
        })
    }

    /// The page number, if the page part is exactly `width` ASCII digits.
    pub fn page_number(&self, width: usize) -> Option<u64> {
        if self.page.len() != width || !RE_DIGITS.is_match(&self.page) {
            return None;
        }
        self.page.parse().ok()
    }

    /// The page number for any all-digit page part.
    pub fn loose_page_number(&self) -> Option<u64> {
        if !RE_DIGITS.is_match(&self.page) {
            return None;
        }
        self.page.parse().ok()
    }
}
