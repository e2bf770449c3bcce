//! Builder patterns for creating test data programmatically.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use dpg_imaging::model::{
    AssignStatus, Assignment, MasterFile, Project, StepId, StepType, Workflow, WorkflowStep,
};

pub fn timestamp(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 3, 12, minute, 0).unwrap()
}

/// Builder for creating `Project` instances with a workflow and history.
pub struct ProjectBuilder {
    steps: Vec<WorkflowStep>,
    assignments: Vec<Assignment>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            assignments: Vec::new(),
        }
    }

    /// Add a step that advances to `next` and cannot fail.
    pub fn step(self, id: StepId, step_type: StepType, next: StepId) -> Self {
        self.step_with_fail(id, step_type, next, 0)
    }

    /// Add a step that advances to `next` and fails to `fail`.
    pub fn step_with_fail(mut self, id: StepId, step_type: StepType, next: StepId, fail: StepId) -> Self {
        self.steps.push(WorkflowStep {
            id,
            step_type,
            name: format!("Step {}", id),
            fail_step_id: fail,
            next_step_id: next,
        });
        self
    }

    /// Add an assignment with no timestamps.
    pub fn assigned(mut self, step: StepId, status: AssignStatus) -> Self {
        self.assignments.push(Assignment::new(step, status));
        self
    }

    /// Add an assignment that has been started.
    pub fn started(mut self, step: StepId, status: AssignStatus) -> Self {
        self.assignments
            .push(Assignment::new(step, status).started(timestamp(0)));
        self
    }

    /// Add an assignment that has been started and finished.
    pub fn finished(mut self, step: StepId, status: AssignStatus) -> Self {
        self.assignments.push(
            Assignment::new(step, status)
                .started(timestamp(0))
                .finished(timestamp(30)),
        );
        self
    }

    pub fn build(self) -> Project {
        let mut project = Project::new(1, Workflow::new(1, self.steps));
        project.assignments = self.assignments;
        project
    }
}

/// Standard production workflow: Scan -> Process -> QA -> Finalize, with
/// Process and QA failing into Rescan (which returns to QA) and Finalize
/// failing into Repair (which returns to Finalize).
pub fn standard_workflow() -> ProjectBuilder {
    ProjectBuilder::new()
        .step(1, StepType::Start, 2)
        .step_with_fail(2, StepType::Normal, 3, 10)
        .step_with_fail(3, StepType::Normal, 4, 10)
        .step_with_fail(4, StepType::End, 0, 11)
        .step(10, StepType::Error, 3)
        .step(11, StepType::Error, 4)
}

/// Master files for unit `unit` named as given, in display order.
pub fn master_files(unit: u64, names: &[&str]) -> Vec<MasterFile> {
    let dir = format!("/digiserv/{:09}", unit);
    names
        .iter()
        .map(|n| MasterFile::in_directory(unit, &dir, n))
        .collect()
}
