use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::config::NamingConfig;
use crate::error::SequenceError;
use crate::model::MasterFile;
use crate::sanitize::unit_relative;
use crate::sequence::naming::{NameParts, UnitId};

/// One file to rename: storage path and the file name it should get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    pub original: String,
    #[serde(rename = "new")]
    pub new_name: String,
}

/// Renames needed to bring a unit's master files into sequence, in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenamePlan(Vec<RenameEntry>);

impl RenamePlan {
    pub fn entries(&self) -> &[RenameEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenameEntry> {
        self.0.iter()
    }

    /// Substitutes the planned names into `files`, matching on path.
    /// Returns the number of records renamed.
    pub fn apply(&self, files: &mut [MasterFile]) -> usize {
        // Resolve targets first: a renamed file may take a path that a later
        // entry still refers to by its old name.
        let targets: Vec<(usize, &RenameEntry)> = self
            .0
            .iter()
            .filter_map(|entry| {
                files
                    .iter()
                    .position(|mf| mf.path == entry.original)
                    .map(|idx| (idx, entry))
            })
            .collect();

        for (idx, entry) in &targets {
            files[*idx].rename(&entry.new_name);
        }
        targets.len()
    }
}

impl IntoIterator for RenamePlan {
    type Item = RenameEntry;
    type IntoIter = std::vec::IntoIter<RenameEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RenamePlan {
    type Item = &'a RenameEntry;
    type IntoIter = std::slice::Iter<'a, RenameEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Checks master file names against `<unit>_<page>.<ext>` and position.
#[derive(Debug, Clone, Default)]
pub struct SequenceNormalizer {
    naming: NamingConfig,
}

impl SequenceNormalizer {
    pub fn new(naming: NamingConfig) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    /// Name the file at zero-based `index` must carry.
    pub fn expected_name(&self, unit: &UnitId, index: usize) -> String {
        format!(
            "{}_{:0>width$}.{}",
            unit.padded(self.naming.unit_pad_width),
            index + 1,
            self.naming.master_extension.to_lowercase(),
            width = self.naming.page_pad_width
        )
    }

    /// True if `file_name` is malformed, carries the wrong unit prefix or
    /// is out of sequence for position `index`.
    pub fn needs_rename(&self, padded_unit: &str, file_name: &str, index: usize) -> bool {
        let Some(parts) = NameParts::parse(file_name, &self.naming.master_extension) else {
            return true;
        };
        match parts.page_number(self.naming.page_pad_width) {
            Some(page) => page != index as u64 + 1 || parts.unit != padded_unit,
            None => true,
        }
    }

    /// Builds the rename plan for `files`, taken in their intended order.
    pub fn rename_plan(&self, unit: &UnitId, files: &[MasterFile]) -> RenamePlan {
        let _span = info_span!("sequence.rename_plan", unit = %unit, files = files.len()).entered();

        let padded_unit = unit.padded(self.naming.unit_pad_width);
        let entries: Vec<RenameEntry> = files
            .iter()
            .enumerate()
            .filter(|(idx, mf)| self.needs_rename(&padded_unit, &mf.file_name, *idx))
            .map(|(idx, mf)| {
                let new_name = self.expected_name(unit, idx);
                debug!(
                    file = %unit_relative(Path::new(&mf.path)),
                    new_name = %new_name,
                    "Master file out of sequence"
                );
                RenameEntry {
                    original: mf.path.clone(),
                    new_name,
                }
            })
            .collect();

        debug!(renames = entries.len(), "Rename plan built");
        RenamePlan(entries)
    }

    /// Verifies a unit's files before a step is finished: every name must
    /// carry the unit prefix and the highest page number must equal the
    /// number of files. Returns the file count.
    pub fn validate<I, S>(&self, unit: &UnitId, file_names: I) -> Result<usize, SequenceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _span = info_span!("sequence.validate", unit = %unit).entered();

        let padded_unit = unit.padded(self.naming.unit_pad_width);
        let mut count = 0usize;
        let mut highest = 0u64;

        for name in file_names {
            let name = name.as_ref();
            let parts = NameParts::parse(name, &self.naming.master_extension)
                .filter(|p| p.unit == padded_unit)
                .ok_or_else(|| SequenceError::InvalidName {
                    file_name: name.to_string(),
                    expected_unit: padded_unit.clone(),
                })?;

            count += 1;
            highest = highest.max(parts.loose_page_number().unwrap_or(0));
        }

        if count == 0 {
            return Err(SequenceError::NoFiles {
                unit: padded_unit,
            });
        }
        if highest != count as u64 {
            return Err(SequenceError::CountMismatch { highest, count });
        }

        debug!(count, "Sequence is valid");
        Ok(count)
    }
}

/// Rename plan for `files` under the default naming convention
/// (9-digit unit, 4-digit page, `.tif`).
pub fn compute_rename_plan(unit: impl Into<UnitId>, files: &[MasterFile]) -> RenamePlan {
    SequenceNormalizer::default().rename_plan(&unit.into(), files)
}

pub fn validate_sequence<I, S>(
    unit: impl Into<UnitId>,
    file_names: I,
    naming: &NamingConfig,
) -> Result<usize, SequenceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SequenceNormalizer::new(naming.clone()).validate(&unit.into(), file_names)
}
