pub mod master_file;
pub mod project;
pub mod workflow;

pub use master_file::{FileProblem, MasterFile, MetadataUpdate};
pub use project::{AssignStatus, Assignment, Project};
pub use workflow::{StepId, StepType, Workflow, WorkflowStep};
