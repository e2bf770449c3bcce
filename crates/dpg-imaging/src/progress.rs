//! Project progress: completion percentage and one-line status.
//!
//! Every non-error workflow step contributes three countable events
//! (assigned, started, finished). Progress is the share of those events
//! observed in the project's assignment history.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, debug_span, warn};

use crate::model::{AssignStatus, Project, StepId, Workflow, WorkflowStep};

/// Countable events per workflow step: assigned, started, finished.
const UNITS_PER_STEP: usize = 3;

/// A whole-number percentage in `0..=100`, displayed as `"NN%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const COMPLETE: Percent = Percent(100);

    /// Rounds `part / whole` to the nearest percent (halves round up) and
    /// clamps to 100. An empty `whole` is 0%.
    pub fn from_ratio(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let rounded = (part * 200 + whole) / (2 * whole);
        Percent(rounded.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Estimates how far a project has progressed through its workflow.
///
/// Only the first counted assignment per step contributes. Attempts on
/// error steps, attempts that ended in error or were reassigned, and
/// rejections that loop back to the same step are not progress. Records
/// referencing steps missing from the workflow are skipped.
pub fn percent_complete(project: &Project) -> Percent {
    let _span = debug_span!("progress.percent_complete", project_id = project.id).entered();

    let workflow = &project.workflow;
    let total_units = workflow.non_error_steps().count() * UNITS_PER_STEP;
    if total_units == 0 {
        debug!(workflow_id = workflow.id, "Workflow has no countable steps");
        return Percent::ZERO;
    }

    let mut counted_steps: HashSet<StepId> = HashSet::new();
    let mut counted_units = 0usize;

    for assignment in &project.assignments {
        if counted_steps.contains(&assignment.step_id) {
            continue;
        }

        let Some(step) = workflow.step(assignment.step_id) else {
            warn!(
                step_id = assignment.step_id,
                workflow_id = workflow.id,
                "Assignment references a step outside the workflow"
            );
            continue;
        };

        if step.is_error() || assignment.status.is_excluded_from_progress() {
            continue;
        }

        if assignment.status == AssignStatus::Rejected && !rejection_advances(workflow, step) {
            debug!(step_id = step.id, "Rejection loops back to the same step");
            continue;
        }

        counted_steps.insert(step.id);
        counted_units += 1;
        if assignment.started_at.is_some() {
            counted_units += 1;
        }
        if assignment.finished_at.is_some() {
            counted_units += 1;
        }
    }

    let percent = Percent::from_ratio(counted_units, total_units);
    debug!(counted_units, total_units, %percent, "Computed completion");
    percent
}

/// A rejection normally finishes the step: the fail step (a rescan) then
/// proceeds past it. When the fail step's successor is the rejected step
/// itself, the work has to be redone and the attempt is not progress.
fn rejection_advances(workflow: &Workflow, step: &WorkflowStep) -> bool {
    if !step.can_fail() {
        return true;
    }
    match workflow.step(step.fail_step_id) {
        Some(fail_step) => fail_step.next_step_id != step.id,
        None => {
            warn!(
                step_id = step.id,
                fail_step_id = step.fail_step_id,
                "Fail step missing from workflow"
            );
            false
        }
    }
}

/// One-line description of where a project stands, e.g. `"Scan: In progress"`.
pub fn status_text(project: &Project) -> String {
    if let Some(finished_at) = project.finished_at {
        return format!("Finished at {}", finished_at.format("%Y-%m-%d"));
    }

    let Some(step) = &project.current_step else {
        return "Unknown".to_string();
    };

    let state = match project.latest_assignment_for(step.id) {
        None => "Not assigned",
        Some(a)
            if a.status == AssignStatus::Error
                && (a.started_at.is_some() || a.finished_at.is_some()) =>
        {
            "Failed"
        }
        Some(a) if a.finished_at.is_some() => "Finished",
        Some(a) if a.started_at.is_some() => "In progress",
        Some(_) => "Not started",
    };

    format!("{}: {}", step.name, state)
}

/// True when the most recent assignment failed or sits on an error step.
pub fn has_error(project: &Project) -> bool {
    let Some(latest) = project.latest_assignment() else {
        return false;
    };
    if latest.status == AssignStatus::Error {
        return true;
    }
    project
        .workflow
        .step(latest.step_id)
        .is_some_and(|s| s.is_error())
}

/// True when the current attempt is under way on a step that has a fail
/// step to reject to.
pub fn can_reject(project: &Project) -> bool {
    let Some(latest) = project.latest_assignment() else {
        return false;
    };
    latest.status == AssignStatus::Started
        && project
            .workflow
            .step(latest.step_id)
            .is_some_and(|s| s.can_fail())
}

pub fn in_progress(project: &Project) -> bool {
    project.latest_assignment().is_some_and(|a| {
        matches!(
            a.status,
            AssignStatus::Started | AssignStatus::Error | AssignStatus::Finalizing
        )
    })
}

pub fn is_finalize_running(project: &Project) -> bool {
    project
        .latest_assignment()
        .is_some_and(|a| a.status == AssignStatus::Finalizing)
}

pub fn is_finished(project: &Project) -> bool {
    project.finished_at.is_some()
}
