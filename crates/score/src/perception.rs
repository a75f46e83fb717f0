//! Perception analysis with graceful degradation.
//!
//! The AI backend is an injected capability. Without one, or when it fails,
//! a fixed placeholder verdict is returned so evaluation always completes.

use std::sync::Arc;

use namecast_backend_claude::PerceptionBackend;
use namecast_model::{Memorability, PerceptionResult};

/// Persona cap for backend calls.
pub const DEFAULT_PERSONAS: usize = 5;

/// Mission alignment reported by the placeholder verdict.
pub const PLACEHOLDER_ALIGNMENT: f64 = 7.0;

/// The verdict used when no perception backend answers.
pub fn placeholder_perception(has_mission: bool) -> PerceptionResult {
    PerceptionResult {
        evokes: "professional, modern".to_string(),
        industry_association: vec!["technology".to_string(), "business".to_string()],
        memorability: Memorability::High,
        mission_alignment: has_mission.then_some(PLACEHOLDER_ALIGNMENT),
    }
}

#[derive(Clone)]
pub struct PerceptionAnalyzer {
    backend: Option<Arc<dyn PerceptionBackend>>,
    personas: usize,
}

impl Default for PerceptionAnalyzer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl PerceptionAnalyzer {
    /// Analyzer that always returns the placeholder verdict.
    pub fn disabled() -> Self {
        Self {
            backend: None,
            personas: DEFAULT_PERSONAS,
        }
    }

    pub fn new(backend: Arc<dyn PerceptionBackend>) -> Self {
        Self {
            backend: Some(backend),
            personas: DEFAULT_PERSONAS,
        }
    }

    pub fn with_personas(mut self, personas: usize) -> Self {
        self.personas = personas.max(1);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Never fails: backend errors are logged and replaced by the placeholder.
    ///
    /// A blank mission counts as no mission.
    pub async fn analyze(&self, name: &str, mission: Option<&str>) -> PerceptionResult {
        let mission = mission.filter(|m| !m.trim().is_empty());

        let Some(backend) = &self.backend else {
            tracing::debug!(name = %name, "No perception backend configured, using placeholder");
            return placeholder_perception(mission.is_some());
        };

        match backend.analyze(name, mission, self.personas).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    name = %name,
                    backend = backend.name(),
                    error = %e,
                    "Perception analysis failed, using placeholder"
                );
                placeholder_perception(mission.is_some())
            }
        }
    }
}
