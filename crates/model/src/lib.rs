//! Core domain model for Namecast brand name evaluation.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `EvaluationResult`: The scored report for one candidate name
//! - `TrademarkResult`, `PronunciationResult`, `PerceptionResult`: Sub-results
//! - `RiskFlag`: Types of trademark conflicts identified
//! - `Candidate` / `WorkflowResult`: Naming workflow state

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Availability keyed by TLD or platform, in check order.
pub type AvailabilityMap = IndexMap<String, bool>;

/// International issues keyed by language, in check order.
pub type InternationalMap = IndexMap<String, InternationalIssue>;

/// Trademark risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl From<&str> for RiskLevel {
    /// Unrecognized levels are treated as high risk.
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Types of trademark risk flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum RiskFlag {
    /// Exact text match
    ExactMatch,

    /// Phonetically similar (sounds like)
    PhoneticMatch {
        /// Algorithm used (soundex, metaphone)
        algorithm: String,
        /// The phonetic code that matched
        code: String,
    },

    /// Similar spelling (edit distance)
    FuzzyMatch {
        /// Edit distance
        distance: u8,
    },

    /// Dominant term match
    DominantTermMatch {
        /// The dominant term that matched
        term: String,
    },
}

impl RiskFlag {
    /// Get a human-readable label for this flag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExactMatch => "Exact Match",
            Self::PhoneticMatch { .. } => "Sounds Similar",
            Self::FuzzyMatch { .. } => "Spelled Similarly",
            Self::DominantTermMatch { .. } => "Dominant Term Match",
        }
    }
}

/// A protected mark that conflicts with the candidate name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrademarkMatch {
    /// The conflicting mark text
    pub mark: String,

    /// Risk score (0.0 = no risk, 1.0 = high risk)
    pub risk_score: f32,

    /// Risk flags identified
    #[serde(default)]
    pub flags: Vec<RiskFlag>,
}

/// Result of a trademark conflict check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrademarkResult {
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub matches: Vec<TrademarkMatch>,
}

impl TrademarkResult {
    /// A clean result: low risk, nothing matched.
    pub fn clear() -> Self {
        Self::default()
    }
}

/// How hard a name is to spell after hearing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellingDifficulty {
    Easy,
    Medium,
    Hard,
}

impl SpellingDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// Result of pronunciation analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationResult {
    /// Ease of pronunciation, 0-10 (higher = easier)
    pub score: f64,
    /// Estimated syllable count (always >= 1)
    pub syllables: u32,
    pub spelling_difficulty: SpellingDifficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Memorability {
    High,
    Medium,
    Low,
}

/// Result of perception analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionResult {
    /// What the name evokes, free text
    pub evokes: String,
    #[serde(default)]
    pub industry_association: Vec<String>,
    pub memorability: Memorability,
    /// Fit with the mission statement, 0-10. Only set when a mission was given.
    #[serde(default)]
    pub mission_alignment: Option<f64>,
}

/// Whether a name carries an unfortunate meaning in one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternationalIssue {
    pub has_issue: bool,
    #[serde(default)]
    pub meaning: Option<String>,
}

/// Complete brand evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub name: String,
    pub overall_score: f64,
    pub domain_score: f64,
    pub social_score: f64,
    pub trademark_score: f64,
    pub pronunciation_score: f64,
    pub international_score: f64,

    #[serde(default)]
    pub domains: AvailabilityMap,
    #[serde(default)]
    pub social: AvailabilityMap,
    #[serde(default)]
    pub trademark: Option<TrademarkResult>,
    #[serde(default)]
    pub pronunciation: Option<PronunciationResult>,
    #[serde(default)]
    pub international: InternationalMap,
    #[serde(default)]
    pub perception: Option<PerceptionResult>,
}

impl EvaluationResult {
    /// Export as a JSON object.
    pub fn to_dict(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Export as an indented JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Where a candidate name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// Supplied by the user
    User,
    /// Produced by a name generator
    Generated,
}

/// A candidate moving through the naming workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub source: CandidateSource,

    /// Domain availability from the pre-filter (None until checked)
    #[serde(default)]
    pub domains_available: Option<AvailabilityMap>,

    #[serde(default)]
    pub passed_domain_filter: bool,

    #[serde(default)]
    pub rejection_reason: Option<String>,

    #[serde(default)]
    pub evaluation: Option<EvaluationResult>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            name: name.into(),
            source,
            domains_available: None,
            passed_domain_filter: false,
            rejection_reason: None,
            evaluation: None,
        }
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.evaluation.as_ref().map(|e| e.overall_score)
    }
}

/// Outcome of a full naming workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub project_description: String,
    pub all_candidates: Vec<Candidate>,
    /// Index into `all_candidates` of the top-ranked evaluated candidate
    #[serde(default)]
    pub recommended: Option<usize>,
}

impl WorkflowResult {
    /// Candidates that passed the domain filter.
    pub fn viable_candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.all_candidates.iter().filter(|c| c.passed_domain_filter)
    }

    /// Candidates that received a full evaluation.
    pub fn evaluated_candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.all_candidates.iter().filter(|c| c.evaluation.is_some())
    }

    pub fn recommended(&self) -> Option<&Candidate> {
        self.recommended.and_then(|i| self.all_candidates.get(i))
    }
}
