//! Trademark conflict checking for candidate names.
//!
//! Provides the `TrademarkChecker` trait and two implementations:
//! - `StubTrademarkChecker`: placeholder that reports every name as low risk.
//!   A real registry search (e.g. USPTO) plugs in behind the same trait.
//! - `KnownMarksChecker`: scores a name against an operator-supplied list of
//!   protected marks using exact, phonetic, fuzzy and dominant-term matching.

use namecast_features::{edit_distance, extract_dominant_term, normalize_text, phonetic_match};
use namecast_model::{RiskFlag, RiskLevel, TrademarkMatch, TrademarkResult};

/// Trait for trademark conflict checkers.
pub trait TrademarkChecker: Send + Sync {
    /// Check a candidate name for conflicts.
    fn check(&self, name: &str) -> TrademarkResult;

    /// Get the checker name for logging.
    fn name(&self) -> &'static str;
}

/// Placeholder checker: always low risk, no matches.
///
/// Stands in for a trademark registry search until one is wired up.
#[derive(Debug, Default, Clone)]
pub struct StubTrademarkChecker;

impl TrademarkChecker for StubTrademarkChecker {
    fn check(&self, _name: &str) -> TrademarkResult {
        TrademarkResult::clear()
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Configuration for known-mark matching.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Weight for phonetic similarity
    pub phonetic_weight: f32,
    /// Weight for fuzzy/edit distance
    pub fuzzy_weight: f32,
    /// Weight for dominant term match
    pub dominant_weight: f32,
    /// Maximum edit distance to consider
    pub max_edit_distance: usize,
    /// Match risk at or above which the overall level is high
    pub high_risk_threshold: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            phonetic_weight: 0.4,
            fuzzy_weight: 0.35,
            dominant_weight: 0.25,
            max_edit_distance: 2,
            high_risk_threshold: 0.7,
        }
    }
}

/// Checks names against a fixed list of protected marks.
#[derive(Debug, Clone)]
pub struct KnownMarksChecker {
    marks: Vec<String>,
    config: MatchConfig,
}

impl KnownMarksChecker {
    pub fn new(marks: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::with_config(marks, MatchConfig::default())
    }

    pub fn with_config(
        marks: impl IntoIterator<Item = impl Into<String>>,
        config: MatchConfig,
    ) -> Self {
        let marks = marks
            .into_iter()
            .map(Into::into)
            .filter(|m: &String| !m.trim().is_empty())
            .collect();
        Self { marks, config }
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

impl TrademarkChecker for KnownMarksChecker {
    fn check(&self, name: &str) -> TrademarkResult {
        let name_normalized = normalize_text(name);
        let name_dominant = extract_dominant_term(name);

        let mut matches: Vec<TrademarkMatch> = self
            .marks
            .iter()
            .filter_map(|mark| {
                let (risk_score, flags) =
                    compute_risk(&name_normalized, name_dominant.as_deref(), mark, &self.config);
                (!flags.is_empty()).then(|| TrademarkMatch {
                    mark: mark.clone(),
                    risk_score,
                    flags,
                })
            })
            .collect();

        // Sort by risk score descending
        matches.sort_by(|a, b| {
            b.risk_score
                .partial_cmp(&a.risk_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let risk_level = risk_level_for(&matches, &self.config);
        if risk_level != RiskLevel::Low {
            tracing::debug!(
                name = %name,
                risk = risk_level.as_str(),
                matches = matches.len(),
                "Trademark conflicts found"
            );
        }

        TrademarkResult {
            risk_level,
            matches,
        }
    }

    fn name(&self) -> &'static str {
        "known-marks"
    }
}

fn risk_level_for(matches: &[TrademarkMatch], config: &MatchConfig) -> RiskLevel {
    let exact = matches
        .iter()
        .any(|m| m.flags.contains(&RiskFlag::ExactMatch));
    let max_risk = matches.iter().map(|m| m.risk_score).fold(0.0_f32, f32::max);

    if exact || max_risk >= config.high_risk_threshold {
        RiskLevel::High
    } else if !matches.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Compute risk score and flags for a single protected mark.
fn compute_risk(
    name_normalized: &str,
    name_dominant: Option<&str>,
    mark: &str,
    config: &MatchConfig,
) -> (f32, Vec<RiskFlag>) {
    let mut flags = Vec::new();
    let mut score = 0.0_f32;

    let mark_normalized = normalize_text(mark);

    if name_normalized == mark_normalized {
        flags.push(RiskFlag::ExactMatch);
        return (1.0, flags);
    }

    if let Some((algorithm, code)) = phonetic_match(name_normalized, &mark_normalized) {
        flags.push(RiskFlag::PhoneticMatch { algorithm, code });
        score += config.phonetic_weight;
    }

    let distance = edit_distance(name_normalized, &mark_normalized);
    if distance > 0 && distance <= config.max_edit_distance {
        flags.push(RiskFlag::FuzzyMatch {
            distance: distance as u8,
        });
        // Closer = higher risk
        let closeness = 1.0 - (distance as f32 / (config.max_edit_distance as f32 + 1.0));
        score += config.fuzzy_weight * closeness;
    }

    if let Some(name_dom) = name_dominant {
        if let Some(mark_dom) = extract_dominant_term(mark) {
            if name_dom == mark_dom {
                flags.push(RiskFlag::DominantTermMatch { term: mark_dom });
                score += config.dominant_weight;
            }
        }
    }

    (score.min(1.0), flags)
}
