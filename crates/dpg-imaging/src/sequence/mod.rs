//! Master-file sequencing.
//!
//! A unit's master files must be named `<unit>_<page>.<ext>` with the unit
//! id and page number zero-padded, and page numbers must follow list order
//! starting at 1.

pub mod naming;
pub mod plan;

pub use naming::{NameParts, UnitId};
pub use plan::{
    compute_rename_plan, validate_sequence, RenameEntry, RenamePlan, SequenceNormalizer,
};
