//! The naming workflow: collect, generate, filter, evaluate, rank.
//!
//! Full evaluations are comparatively expensive, so candidates first pass a
//! cheap domain filter (`.com` or `.io` must be free) and only the first
//! `max_to_evaluate` survivors are scored.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use namecast_backend_claude::{AiError, NameGenerator};
use namecast_features::extract_keywords;
use namecast_model::{Candidate, CandidateSource, WorkflowResult};
use namecast_query::WorkflowRequest;
use namecast_score::{pick_winner, BrandEvaluator};

/// A candidate passes the domain filter if any of these is free.
pub const FILTER_TLDS: [&str; 2] = [".com", ".io"];

pub const REJECTION_REASON: &str = "Neither .com nor .io available";

const SUFFIXES: [&str; 6] = ["ly", "ify", "hub", "io", "nest", "lab"];

/// Offline generator: keywords of the description joined to brandable suffixes.
#[derive(Debug, Default, Clone)]
pub struct KeywordNameGenerator;

impl KeywordNameGenerator {
    pub fn names(&self, description: &str, count: usize) -> Vec<String> {
        let stems: Vec<String> = extract_keywords(description)
            .iter()
            .map(|k| capitalize(&k.to_lowercase()))
            .collect();

        SUFFIXES
            .iter()
            .flat_map(|suffix| stems.iter().map(move |stem| format!("{stem}{suffix}")))
            .take(count)
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl NameGenerator for KeywordNameGenerator {
    async fn generate(&self, description: &str, count: usize) -> Result<Vec<String>, AiError> {
        Ok(self.names(description, count))
    }

    fn name(&self) -> &'static str {
        "keywords"
    }
}

/// Orchestrates a naming run over one `BrandEvaluator`.
#[derive(Clone)]
pub struct NamingWorkflow {
    evaluator: BrandEvaluator,
    generator: Arc<dyn NameGenerator>,
}

impl NamingWorkflow {
    pub fn new(evaluator: BrandEvaluator) -> Self {
        Self {
            evaluator,
            generator: Arc::new(KeywordNameGenerator),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn NameGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn evaluator(&self) -> &BrandEvaluator {
        &self.evaluator
    }

    async fn generate(&self, description: &str, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }

        match self.generator.generate(description, count).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "Name generation failed, falling back to keyword generator"
                );
                KeywordNameGenerator.names(description, count)
            }
        }
    }

    /// Run the workflow. Never fails; collaborator errors degrade per component.
    pub async fn run(&self, request: &WorkflowRequest) -> WorkflowResult {
        let description = request.project_description.as_str();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        let ideas = request.name_ideas.iter().flatten();
        for name in ideas {
            let name = name.trim();
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                candidates.push(Candidate::new(name, CandidateSource::User));
            }
        }

        let generated = self.generate(description, request.generate_count).await;
        for name in generated.iter().take(request.generate_count) {
            let name = name.trim();
            if !name.is_empty() && seen.insert(name.to_lowercase()) {
                candidates.push(Candidate::new(name, CandidateSource::Generated));
            }
        }

        tracing::info!(candidates = candidates.len(), "Collected candidates");

        for candidate in &mut candidates {
            let domains = self.evaluator.domain_checker().check(&candidate.name).await;
            candidate.passed_domain_filter = FILTER_TLDS
                .iter()
                .any(|tld| domains.get(*tld).copied().unwrap_or(false));
            if !candidate.passed_domain_filter {
                tracing::debug!(name = %candidate.name, "Rejected by domain filter");
                candidate.rejection_reason = Some(REJECTION_REASON.to_string());
            }
            candidate.domains_available = Some(domains);
        }

        let to_evaluate = candidates
            .iter_mut()
            .filter(|c| c.passed_domain_filter)
            .take(request.max_to_evaluate);
        for candidate in to_evaluate {
            let domains = candidate.domains_available.clone().unwrap_or_default();
            let evaluation = self
                .evaluator
                .evaluate_with_domains(&candidate.name, Some(description), domains)
                .await;
            candidate.evaluation = Some(evaluation);
        }

        let evaluated: Vec<_> = candidates
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.evaluation.as_ref().map(|e| (i, e)))
            .collect();
        let recommended =
            pick_winner(evaluated.iter().map(|(_, e)| *e)).map(|pos| evaluated[pos].0);

        if let Some(i) = recommended {
            tracing::info!(name = %candidates[i].name, "Recommended candidate");
        }

        WorkflowResult {
            project_description: request.project_description.clone(),
            all_candidates: candidates,
            recommended,
        }
    }
}
