pub mod config;
pub mod error;
pub mod model;
pub mod progress;
pub mod sanitize;
pub mod scanner;
pub mod search;
pub mod sequence;
pub mod telemetry;
pub mod unit;

pub use config::{load_config, ImagingConfig, NamingConfig, ViewConfig};
pub use error::{ConfigError, DpgError, ModelError, Result, ScanError, SequenceError};
pub use model::{AssignStatus, Assignment, MasterFile, Project, StepType, Workflow, WorkflowStep};
pub use progress::{
    can_reject, has_error, in_progress, is_finalize_running, is_finished, percent_complete,
    status_text, Percent,
};
pub use scanner::{scan_unit_directory, UnitScanner};
pub use search::{ProjectFilter, SearchTotals};
pub use sequence::{compute_rename_plan, validate_sequence, RenamePlan, SequenceNormalizer, UnitId};
pub use unit::{PageNumbering, UnitView};
