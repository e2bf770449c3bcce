use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;
use crate::error::ModelError;

/// Project list filters offered by the search view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectFilter {
    Me,
    #[default]
    Active,
    Errors,
    Unassigned,
    Finished,
}

impl FromStr for ProjectFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "me" => Ok(ProjectFilter::Me),
            "active" => Ok(ProjectFilter::Active),
            "errors" => Ok(ProjectFilter::Errors),
            "unassigned" => Ok(ProjectFilter::Unassigned),
            "finished" => Ok(ProjectFilter::Finished),
            _ => Err(ModelError::UnknownFilter(s.to_string())),
        }
    }
}

/// Project counts per filter, as reported alongside search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTotals {
    #[serde(default)]
    pub me: usize,
    #[serde(default)]
    pub active: usize,
    #[serde(default)]
    pub errors: usize,
    #[serde(default)]
    pub unassigned: usize,
    #[serde(default)]
    pub finished: usize,
}

impl SearchTotals {
    pub fn total_for(&self, filter: ProjectFilter) -> usize {
        match filter {
            ProjectFilter::Me => self.me,
            ProjectFilter::Active => self.active,
            ProjectFilter::Errors => self.errors,
            ProjectFilter::Unassigned => self.unassigned,
            ProjectFilter::Finished => self.finished,
        }
    }

    pub fn total_pages(&self, filter: ProjectFilter, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total_for(filter).div_ceil(page_size)
    }

    /// Pages of search results at the configured search page size.
    pub fn total_pages_for(&self, filter: ProjectFilter, view: &ViewConfig) -> usize {
        self.total_pages(filter, view.search_page_size)
    }
}
