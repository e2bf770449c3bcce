use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;
use crate::model::workflow::{StepId, Workflow, WorkflowStep};

/// Assignment status, in the backend's integer encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AssignStatus {
    Pending,
    Started,
    Finished,
    Rejected,
    Error,
    Reassigned,
    Finalizing,
}

impl AssignStatus {
    /// Error and reassigned attempts never count as progress.
    pub fn is_excluded_from_progress(self) -> bool {
        matches!(self, AssignStatus::Error | AssignStatus::Reassigned)
    }
}

impl TryFrom<u8> for AssignStatus {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, ModelError> {
        match value {
            0 => Ok(AssignStatus::Pending),
            1 => Ok(AssignStatus::Started),
            2 => Ok(AssignStatus::Finished),
            3 => Ok(AssignStatus::Rejected),
            4 => Ok(AssignStatus::Error),
            5 => Ok(AssignStatus::Reassigned),
            6 => Ok(AssignStatus::Finalizing),
            other => Err(ModelError::UnknownAssignStatus(other)),
        }
    }
}

impl From<AssignStatus> for u8 {
    fn from(status: AssignStatus) -> Self {
        match status {
            AssignStatus::Pending => 0,
            AssignStatus::Started => 1,
            AssignStatus::Finished => 2,
            AssignStatus::Rejected => 3,
            AssignStatus::Error => 4,
            AssignStatus::Reassigned => 5,
            AssignStatus::Finalizing => 6,
        }
    }
}

impl std::fmt::Display for AssignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssignStatus::Pending => "pending",
            AssignStatus::Started => "started",
            AssignStatus::Finished => "finished",
            AssignStatus::Rejected => "rejected",
            AssignStatus::Error => "error",
            AssignStatus::Reassigned => "reassigned",
            AssignStatus::Finalizing => "finalizing",
        };
        f.write_str(name)
    }
}

/// One recorded attempt at a workflow step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignment")]
pub struct Assignment {
    #[serde(rename = "stepID")]
    pub step_id: StepId,
    pub status: AssignStatus,
    #[serde(rename = "assignedAt", skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(rename = "startedAt", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt", skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn new(step_id: StepId, status: AssignStatus) -> Self {
        Self {
            step_id,
            status,
            assigned_at: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn assigned(mut self, at: DateTime<Utc>) -> Self {
        self.assigned_at = Some(at);
        self
    }

    pub fn started(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn finished(mut self, at: DateTime<Utc>) -> Self {
        self.finished_at = Some(at);
        self
    }
}

#[derive(Deserialize)]
struct StepRef {
    id: StepId,
}

/// Wire shape of an assignment. Older payloads carry a flat `stepID`, the
/// project endpoint embeds the whole `step` object instead.
#[derive(Deserialize)]
struct RawAssignment {
    #[serde(rename = "stepID", default)]
    step_id: Option<StepId>,
    #[serde(default)]
    step: Option<StepRef>,
    status: AssignStatus,
    #[serde(rename = "assignedAt", default)]
    assigned_at: Option<DateTime<Utc>>,
    #[serde(rename = "startedAt", default)]
    started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt", default)]
    finished_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawAssignment> for Assignment {
    type Error = ModelError;

    fn try_from(raw: RawAssignment) -> Result<Self, ModelError> {
        let step_id = raw
            .step_id
            .or(raw.step.map(|s| s.id))
            .ok_or(ModelError::MissingStep)?;
        Ok(Self {
            step_id,
            status: raw.status,
            assigned_at: raw.assigned_at,
            started_at: raw.started_at,
            finished_at: raw.finished_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub workflow: Workflow,
    /// Step attempts, oldest first. The backend lists them newest first
    /// (`assigned_at DESC`), so the wire order is reversed on both ends.
    #[serde(
        default,
        deserialize_with = "assignments_from_wire",
        serialize_with = "assignments_to_wire"
    )]
    pub assignments: Vec<Assignment>,
    #[serde(rename = "currentStep", default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<WorkflowStep>,
    #[serde(rename = "finishedAt", default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(id: u64, workflow: Workflow) -> Self {
        Self {
            id,
            workflow,
            assignments: Vec::new(),
            current_step: None,
            finished_at: None,
        }
    }

    pub fn latest_assignment(&self) -> Option<&Assignment> {
        self.assignments.last()
    }

    /// Most recent attempt at the given step.
    pub fn latest_assignment_for(&self, step_id: StepId) -> Option<&Assignment> {
        self.assignments.iter().rev().find(|a| a.step_id == step_id)
    }
}

/// Accepts `null` as an empty history. Newest-first wire order is flipped,
/// then a stable sort on `assignedAt` settles payloads whose records all
/// carry it.
fn assignments_from_wire<'de, D>(deserializer: D) -> Result<Vec<Assignment>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut assignments = Option::<Vec<Assignment>>::deserialize(deserializer)?.unwrap_or_default();
    assignments.reverse();
    if assignments.iter().all(|a| a.assigned_at.is_some()) {
        assignments.sort_by_key(|a| a.assigned_at);
    }
    Ok(assignments)
}

fn assignments_to_wire<S>(assignments: &[Assignment], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(assignments.iter().rev())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::workflow::StepType;

    #[test]
    fn test_assignment_with_flat_step_id() {
        let json = r#"{ "stepID": 4, "status": 1, "startedAt": "2024-03-01T10:00:00Z" }"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(a.step_id, 4);
        assert_eq!(a.status, AssignStatus::Started);
        assert!(a.started_at.is_some());
        assert!(a.finished_at.is_none());
    }

    #[test]
    fn test_assignment_with_embedded_step() {
        let json = r#"{
            "id": 77,
            "projectID": 3,
            "step": { "id": 9, "stepType": 3, "name": "Scan" },
            "staffMember": { "id": 2 },
            "status": 2,
            "startedAt": "2024-03-01T10:00:00Z",
            "finishedAt": "2024-03-01T11:30:00Z"
        }"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(a.step_id, 9);
        assert_eq!(a.status, AssignStatus::Finished);
        assert!(a.finished_at.is_some());
    }

    #[test]
    fn test_assignment_without_step_is_rejected() {
        let result: Result<Assignment, _> = serde_json::from_str(r#"{ "status": 0 }"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("does not reference a workflow step"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<Assignment, _> = serde_json::from_str(r#"{ "stepID": 1, "status": 12 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_project_null_assignments() {
        let json = r#"{
            "id": 1,
            "workflow": { "id": 2, "steps": [ { "id": 1, "stepType": 0 } ] },
            "assignments": null
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.assignments.is_empty());
        assert_eq!(project.workflow.steps[0].step_type, StepType::Start);
    }

    #[test]
    fn test_project_assignments_newest_first_on_wire() {
        let json = r#"{
            "id": 1,
            "workflow": { "id": 2, "steps": [] },
            "assignments": [
                { "stepID": 2, "status": 1, "assignedAt": "2024-03-02T09:00:00Z" },
                { "stepID": 1, "status": 2, "assignedAt": "2024-03-01T09:00:00Z" }
            ]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        let steps: Vec<StepId> = project.assignments.iter().map(|a| a.step_id).collect();
        assert_eq!(steps, vec![1, 2]);
        assert_eq!(project.latest_assignment().map(|a| a.status), Some(AssignStatus::Started));

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["assignments"][0]["stepID"], 2);
        let again: Project = serde_json::from_value(value).unwrap();
        assert_eq!(again, project);
    }

    #[test]
    fn test_project_assignments_sorted_by_assigned_at() {
        let json = r#"{
            "id": 1,
            "workflow": { "id": 2, "steps": [] },
            "assignments": [
                { "stepID": 3, "status": 0, "assignedAt": "2024-03-03T09:00:00Z" },
                { "stepID": 1, "status": 2, "assignedAt": "2024-03-01T09:00:00Z" },
                { "stepID": 2, "status": 2, "assignedAt": "2024-03-02T09:00:00Z" }
            ]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        let steps: Vec<StepId> = project.assignments.iter().map(|a| a.step_id).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn test_latest_assignment_for_step() {
        let mut project = Project::new(1, Workflow::new(1, vec![]));
        project.assignments = vec![
            Assignment::new(1, AssignStatus::Rejected),
            Assignment::new(2, AssignStatus::Finished),
            Assignment::new(1, AssignStatus::Started),
        ];
        assert_eq!(
            project.latest_assignment_for(1).map(|a| a.status),
            Some(AssignStatus::Started)
        );
        assert_eq!(
            project.latest_assignment().map(|a| a.step_id),
            Some(1)
        );
        assert!(project.latest_assignment_for(5).is_none());
    }

    #[test]
    fn test_assign_status_display() {
        assert_eq!(AssignStatus::Reassigned.to_string(), "reassigned");
        assert!(AssignStatus::Error.is_excluded_from_progress());
        assert!(!AssignStatus::Rejected.is_excluded_from_progress());
    }
}
