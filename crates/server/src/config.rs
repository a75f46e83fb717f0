use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use namecast_availability::{DomainChecker, FailurePolicy, WhoisConfig, WhoisLookup};
use namecast_backend_claude::{ClaudeBackend, ClaudeConfig};
use namecast_score::{BrandEvaluator, PerceptionAnalyzer};
use namecast_trademark::KnownMarksChecker;
use namecast_workflow::NamingWorkflow;
use tracing::info;

/// Collaborator wiring, read once at start-up.
#[derive(Clone, Args)]
pub struct ServiceConfig {
    /// Anthropic API key; enables AI perception analysis and name generation
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Claude model for perception and generation
    #[arg(long, env = "NAMECAST_CLAUDE_MODEL", default_value = "claude-sonnet-4-20250514")]
    pub claude_model: String,

    /// Timeout for one WHOIS exchange, in seconds
    #[arg(long, env = "NAMECAST_WHOIS_TIMEOUT_SECS", default_value_t = 10)]
    pub whois_timeout_secs: u64,

    /// How to report a domain whose lookup failed (open = available, closed = taken)
    #[arg(long, env = "NAMECAST_DOMAIN_FAILURE_POLICY", default_value = "closed")]
    pub domain_failure_policy: FailurePolicy,

    /// Protected marks to check names against (comma-separated)
    #[arg(long, env = "NAMECAST_KNOWN_MARKS", value_delimiter = ',')]
    pub known_marks: Vec<String>,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("claude_model", &self.claude_model)
            .field("whois_timeout_secs", &self.whois_timeout_secs)
            .field("domain_failure_policy", &self.domain_failure_policy)
            .field("known_marks", &self.known_marks)
            .finish()
    }
}

impl ServiceConfig {
    fn api_key(&self) -> Option<&str> {
        self.anthropic_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Build the evaluator and workflow from this configuration.
    pub fn build(&self) -> Result<NamingWorkflow> {
        let whois = WhoisLookup::new(WhoisConfig {
            timeout_secs: self.whois_timeout_secs,
            ..Default::default()
        });
        let domains = DomainChecker::new(Arc::new(whois)).with_policy(self.domain_failure_policy);
        let mut evaluator = BrandEvaluator::new(domains);

        let marks = KnownMarksChecker::new(self.known_marks.iter().map(String::as_str));
        let trademark = if marks.is_empty() {
            "stub".to_string()
        } else {
            let description = format!("{} known marks", marks.len());
            evaluator = evaluator.with_trademark(Arc::new(marks));
            description
        };

        let claude = match self.api_key() {
            Some(key) => {
                let mut config = ClaudeConfig::new(key);
                config.model = self.claude_model.clone();
                Some(Arc::new(ClaudeBackend::new(config)?))
            }
            None => None,
        };

        info!(
            domain_failure_policy = %self.domain_failure_policy,
            whois_timeout_secs = self.whois_timeout_secs,
            trademark = %trademark,
            claude_model = ?claude.as_ref().map(|b| b.model()),
            "Service configured"
        );

        let workflow = match claude {
            Some(backend) => NamingWorkflow::new(
                evaluator.with_perception(PerceptionAnalyzer::new(backend.clone())),
            )
            .with_generator(backend),
            None => NamingWorkflow::new(evaluator),
        };

        Ok(workflow)
    }
}
