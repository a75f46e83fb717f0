//! Request and response contracts.
//!
//! Defines the payloads accepted by the API and CLI, validates them before
//! any lookup runs, and shapes comparison and workflow results for output.

use namecast_model::{Candidate, CandidateSource, EvaluationResult, WorkflowResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_COMPARE_NAMES: usize = 2;
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MAX_GENERATE_COUNT: usize = 50;

/// Client input errors. Reported back to the caller, never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Must provide at least 2 names to compare")]
    TooFewNames,

    #[error("Project description must be at least 10 characters")]
    DescriptionTooShort,

    #[error("generate_count must be at most 50")]
    TooManyToGenerate,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub name: String,
    #[serde(default)]
    pub mission: Option<String>,
}

impl EvaluateRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    pub names: Vec<String>,
    #[serde(default)]
    pub mission: Option<String>,
}

impl CompareRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.names.len() < MIN_COMPARE_NAMES {
            return Err(ValidationError::TooFewNames);
        }
        self.names.iter().try_for_each(|n| validate_name(n))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub project_description: String,
    #[serde(default)]
    pub name_ideas: Option<Vec<String>>,
    #[serde(default = "default_generate_count")]
    pub generate_count: usize,
    #[serde(default = "default_max_to_evaluate")]
    pub max_to_evaluate: usize,
}

fn default_generate_count() -> usize {
    10
}

fn default_max_to_evaluate() -> usize {
    5
}

impl WorkflowRequest {
    pub fn new(project_description: impl Into<String>) -> Self {
        Self {
            project_description: project_description.into(),
            name_ideas: None,
            generate_count: default_generate_count(),
            max_to_evaluate: default_max_to_evaluate(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_description.chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooShort);
        }
        if self.generate_count > MAX_GENERATE_COUNT {
            return Err(ValidationError::TooManyToGenerate);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub results: Vec<EvaluationResult>,
    pub winner: String,
    pub winner_score: f64,
}

impl CompareResponse {
    /// Build the response; `None` when `winner` doesn't index into `results`.
    pub fn new(results: Vec<EvaluationResult>, winner: Option<usize>) -> Option<Self> {
        let best = results.get(winner?)?;
        Some(Self {
            winner: best.name.clone(),
            winner_score: best.overall_score,
            results,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedCandidate {
    pub name: String,
    pub source: CandidateSource,
    pub score: f64,
    pub evaluation: Option<EvaluationResult>,
}

impl From<&Candidate> for RecommendedCandidate {
    fn from(c: &Candidate) -> Self {
        Self {
            name: c.name.clone(),
            source: c.source,
            score: c.overall_score().unwrap_or(0.0),
            evaluation: c.evaluation.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub project_description: String,
    pub all_candidates: Vec<Candidate>,
    pub viable_count: usize,
    pub evaluated_count: usize,
    pub recommended: Option<RecommendedCandidate>,
}

impl From<WorkflowResult> for WorkflowResponse {
    fn from(result: WorkflowResult) -> Self {
        let viable_count = result.viable_candidates().count();
        let evaluated_count = result.evaluated_candidates().count();
        let recommended = result.recommended().map(RecommendedCandidate::from);

        Self {
            project_description: result.project_description,
            all_candidates: result.all_candidates,
            viable_count,
            evaluated_count,
            recommended,
        }
    }
}
