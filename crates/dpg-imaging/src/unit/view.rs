use tracing::debug;

use crate::config::ViewConfig;
use crate::model::{FileProblem, MasterFile, MetadataUpdate};
use crate::sequence::{RenamePlan, SequenceNormalizer, UnitId};
use crate::unit::pages::{self, PageNumbering};

/// One unit's master files together with paging and selection state.
///
/// `page_files` is a working copy of the current page window; it may be
/// reordered independently before a rename is requested.
#[derive(Debug, Clone)]
pub struct UnitView {
    unit_id: UnitId,
    master_files: Vec<MasterFile>,
    page_files: Vec<MasterFile>,
    page_size: usize,
    current_page: usize,
    selection: Option<(usize, usize)>,
}

impl UnitView {
    pub fn new(unit_id: impl Into<UnitId>, master_files: Vec<MasterFile>, page_size: usize) -> Self {
        let mut view = Self {
            unit_id: unit_id.into(),
            master_files,
            page_files: Vec::new(),
            page_size: page_size.max(1),
            current_page: 1,
            selection: None,
        };
        view.set_page(1);
        view
    }

    /// Builds a view paged by the configured unit page size.
    pub fn from_config(
        unit_id: impl Into<UnitId>,
        master_files: Vec<MasterFile>,
        view: &ViewConfig,
    ) -> Self {
        Self::new(unit_id, master_files, view.page_size)
    }

    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    pub fn master_files(&self) -> &[MasterFile] {
        &self.master_files
    }

    pub fn page_files(&self) -> &[MasterFile] {
        &self.page_files
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_files(&self) -> usize {
        self.master_files.len()
    }

    pub fn total_pages(&self) -> usize {
        self.master_files.len().div_ceil(self.page_size)
    }

    /// Index into `master_files` of the first file on the current page.
    pub fn page_start_idx(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    /// Loads page `page` (1-based) into the page window.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
        let start = self.page_start_idx().min(self.master_files.len());
        let end = start.saturating_add(self.page_size).min(self.master_files.len());
        self.page_files = self.master_files[start..end].to_vec();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.set_page(1);
    }

    /// Moves a file within the page window. Returns false if either index
    /// is outside the window.
    pub fn reorder_page(&mut self, from: usize, to: usize) -> bool {
        if from >= self.page_files.len() || to >= self.page_files.len() {
            return false;
        }
        let mf = self.page_files.remove(from);
        self.page_files.insert(to, mf);
        true
    }

    pub fn select_all(&mut self) {
        self.selection = self.master_files.len().checked_sub(1).map(|last| (0, last));
    }

    /// Selects an inclusive range of indexes, clamped to the file list.
    pub fn select_range(&mut self, start: usize, end: usize) {
        let Some(last) = self.master_files.len().checked_sub(1) else {
            self.selection = None;
            return;
        };
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        let hi = hi.min(last);
        self.selection = Some((lo.min(hi), hi));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn selected_files(&self) -> &[MasterFile] {
        match self.selection {
            Some((start, end)) => &self.master_files[start..=end],
            None => &[],
        }
    }

    /// The full list in intended order: the page window is taken from
    /// `page_files`, which may have been reordered.
    pub fn ordered_files(&self) -> Vec<MasterFile> {
        let mut files = self.master_files.clone();
        let start = self.page_start_idx();
        for (offset, mf) in self.page_files.iter().enumerate() {
            if let Some(slot) = files.get_mut(start + offset) {
                *slot = mf.clone();
            }
        }
        files
    }

    pub fn rename_plan(&self, normalizer: &SequenceNormalizer) -> RenamePlan {
        normalizer.rename_plan(&self.unit_id, &self.ordered_files())
    }

    /// Applies metadata accepted by the backend, matched by path. Clears the
    /// error of every patched file. Returns the number of files patched.
    pub fn apply_metadata_update(&mut self, updates: &[MetadataUpdate]) -> usize {
        let mut patched = 0;
        for update in updates {
            let mut found = false;
            for mf in self
                .master_files
                .iter_mut()
                .chain(self.page_files.iter_mut())
                .filter(|mf| mf.path == update.file)
            {
                mf.title = update.title.clone();
                mf.description = update.description.clone();
                mf.status = update.status.clone();
                mf.component_id = update.component_id;
                mf.error.clear();
                found = true;
            }
            if found {
                patched += 1;
            } else {
                debug!(file = %update.file, "Metadata update for unknown master file");
            }
        }
        patched
    }

    /// Records per-file problems reported by the backend, matched by file
    /// name. Returns the number of problems that matched a file.
    pub fn apply_problems(&mut self, problems: &[FileProblem]) -> usize {
        let mut matched = 0;
        for problem in problems {
            let mut found = false;
            for mf in self
                .master_files
                .iter_mut()
                .chain(self.page_files.iter_mut())
                .filter(|mf| mf.file_name == problem.file)
            {
                mf.error = problem.problem.clone();
                found = true;
            }
            if found {
                matched += 1;
            }
        }
        matched
    }

    /// Drops a file from the list, refreshes the page window and clears the
    /// selection.
    pub fn remove_master_file(&mut self, file_name: &str) -> bool {
        let Some(idx) = self
            .master_files
            .iter()
            .position(|mf| mf.file_name == file_name)
        else {
            return false;
        };
        self.master_files.remove(idx);
        self.selection = None;
        self.set_page(self.current_page);
        true
    }

    pub fn page_number_updates(&self, start: u32, numbering: PageNumbering) -> Vec<MetadataUpdate> {
        pages::page_number_updates(self.selected_files(), start, numbering)
    }

    pub fn component_link_updates(&self, component_id: u64) -> Vec<MetadataUpdate> {
        pages::component_link_updates(self.selected_files(), component_id)
    }

    pub fn tag_update(&self, path: &str, tag: &str) -> Option<MetadataUpdate> {
        self.master_files
            .iter()
            .find(|mf| mf.path == path)
            .map(|mf| pages::tag_update(mf, tag))
    }
}
