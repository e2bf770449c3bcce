use serde::{Deserialize, Serialize};

use crate::model::{MasterFile, MetadataUpdate};

/// How page titles are assigned across a run of images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageNumbering {
    /// Every image is its own page: `1, 2, 3, ...`.
    Sequential,
    /// Images alternate recto and verso, starting on a recto:
    /// `1, 1 verso, 2, 2 verso, ...`.
    RectoVerso,
}

/// Title updates numbering `files` from `start`.
pub fn page_number_updates(
    files: &[MasterFile],
    start: u32,
    numbering: PageNumbering,
) -> Vec<MetadataUpdate> {
    let mut page = start;
    files
        .iter()
        .enumerate()
        .map(|(idx, mf)| {
            let mut title = page.to_string();
            match numbering {
                PageNumbering::Sequential => page += 1,
                PageNumbering::RectoVerso if idx % 2 != 0 => {
                    title = format!("{} verso", page);
                    page += 1;
                }
                PageNumbering::RectoVerso => {}
            }
            MetadataUpdate {
                file: mf.path.clone(),
                title,
                description: mf.description.clone(),
                status: mf.status.clone(),
                component_id: mf.component_id,
            }
        })
        .collect()
}

/// Updates linking `files` to a component, with trimmed text fields.
pub fn component_link_updates(files: &[MasterFile], component_id: u64) -> Vec<MetadataUpdate> {
    files
        .iter()
        .map(|mf| MetadataUpdate {
            file: mf.path.clone(),
            title: mf.title.trim().to_string(),
            description: mf.description.trim().to_string(),
            status: mf.status.clone(),
            component_id: Some(component_id),
        })
        .collect()
}

/// Update setting the tag of one file; the tag `none` clears it.
pub fn tag_update(mf: &MasterFile, tag: &str) -> MetadataUpdate {
    let status = if tag == "none" { "" } else { tag };
    MetadataUpdate {
        file: mf.path.clone(),
        title: mf.title.trim().to_string(),
        description: mf.description.trim().to_string(),
        status: status.to_string(),
        component_id: mf.component_id,
    }
}
