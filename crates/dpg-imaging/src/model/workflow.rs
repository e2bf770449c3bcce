use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub type StepId = u64;

/// Kind of a workflow step. Serialized as the backend's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StepType {
    Start,
    End,
    Error,
    Normal,
}

impl TryFrom<u8> for StepType {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, ModelError> {
        match value {
            0 => Ok(StepType::Start),
            1 => Ok(StepType::End),
            2 => Ok(StepType::Error),
            3 => Ok(StepType::Normal),
            other => Err(ModelError::UnknownStepType(other)),
        }
    }
}

impl From<StepType> for u8 {
    fn from(step_type: StepType) -> Self {
        match step_type {
            StepType::Start => 0,
            StepType::End => 1,
            StepType::Error => 2,
            StepType::Normal => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: StepId,
    #[serde(rename = "stepType")]
    pub step_type: StepType,
    #[serde(default)]
    pub name: String,
    /// Step entered when this one is rejected; 0 when rejection is impossible.
    #[serde(rename = "failStepID", default)]
    pub fail_step_id: StepId,
    #[serde(rename = "nextStepID", default)]
    pub next_step_id: StepId,
}

impl WorkflowStep {
    pub fn new(id: StepId, step_type: StepType) -> Self {
        Self {
            id,
            step_type,
            name: String::new(),
            fail_step_id: 0,
            next_step_id: 0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.step_type == StepType::Error
    }

    pub fn can_fail(&self) -> bool {
        self.fail_step_id != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn new(id: u64, steps: Vec<WorkflowStep>) -> Self {
        Self {
            id,
            name: String::new(),
            steps,
        }
    }

    pub fn step(&self, id: StepId) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn non_error_steps(&self) -> impl Iterator<Item = &WorkflowStep> {
        self.steps.iter().filter(|s| !s.is_error())
    }
}
