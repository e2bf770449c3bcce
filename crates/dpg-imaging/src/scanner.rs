use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::config::{ImagingConfig, NamingConfig};
use crate::error::{ConfigError, Result, ScanError};
use crate::model::MasterFile;
use crate::sanitize::unit_dir_tag;
use crate::sequence::{SequenceNormalizer, UnitId};

/// Lists the master files sitting in one unit's directory.
pub struct UnitScanner {
    directory: PathBuf,
    naming: NamingConfig,
}

impl UnitScanner {
    pub fn new<P: AsRef<Path>>(directory: P, naming: NamingConfig) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            naming,
        }
    }

    /// Scanner for a unit's directory under the configured images root.
    pub fn for_unit(config: &ImagingConfig, unit_id: u64) -> std::result::Result<Self, ConfigError> {
        let directory = config
            .unit_directory(&UnitId::from(unit_id))
            .ok_or_else(|| ConfigError::Validation {
                message: "images_directory is not configured".to_string(),
            })?;
        Ok(Self::new(directory, config.naming.clone()))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Top-level files with the master extension, sorted by file name.
    /// Sub-directories, including the `tmp` rename area, are not entered.
    pub fn scan(&self, unit_id: u64) -> std::result::Result<Vec<MasterFile>, ScanError> {
        let _span = tracing::info_span!(
            "scanner.scan_unit",
            unit_id,
            dir = %unit_dir_tag(&self.directory)
        )
        .entered();

        if !self.directory.is_dir() {
            return Err(ScanError::NotADirectory(self.directory.clone()));
        }

        let extension = self.naming.master_extension.to_lowercase();
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ScanError::ScanFailed {
                path: self.directory.clone(),
                source: e,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let is_master = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.to_lowercase() == extension);
            if !is_master {
                debug!("Skipping non-master file: {}", path.display());
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            files.push(MasterFile::new(
                unit_id,
                path.to_string_lossy().to_string(),
                file_name,
            ));
        }

        info!(
            "Scanned {} master files in {}",
            files.len(),
            self.directory.display()
        );
        Ok(files)
    }

    /// Scans the directory and checks the names form a complete sequence.
    pub fn validate(&self, unit_id: u64) -> Result<usize> {
        let files = self.scan(unit_id)?;
        let normalizer = SequenceNormalizer::new(self.naming.clone());
        let count = normalizer.validate(
            &UnitId::from(unit_id),
            files.iter().map(|mf| mf.file_name.as_str()),
        )?;
        Ok(count)
    }
}

pub fn scan_unit_directory<P: AsRef<Path>>(
    directory: P,
    unit_id: u64,
    naming: &NamingConfig,
) -> std::result::Result<Vec<MasterFile>, ScanError> {
    UnitScanner::new(directory, naming.clone()).scan(unit_id)
}
