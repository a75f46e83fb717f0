//! Scoring and aggregation for brand name evaluation.
//!
//! Turns sub-results from the analyzers and availability checkers into
//! 0-100 dimension scores and one weighted overall score, and runs the
//! full evaluation pipeline for a name.

pub mod perception;

use std::sync::Arc;

use namecast_availability::{DomainChecker, SocialChecker, StubSocialChecker};
use namecast_features::{analyze_pronunciation, check_international};
use namecast_model::{
    AvailabilityMap, EvaluationResult, InternationalMap, PerceptionResult, PronunciationResult,
    RiskLevel, TrademarkResult,
};
use namecast_trademark::{StubTrademarkChecker, TrademarkChecker};

pub use perception::{placeholder_perception, PerceptionAnalyzer, DEFAULT_PERSONAS};

/// Weights of each dimension in the overall score. They sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub domain: f64,
    pub social: f64,
    pub trademark: f64,
    pub pronunciation: f64,
    pub international: f64,
}

/// The fixed weighting used for every evaluation.
pub const WEIGHTS: ScoreWeights = ScoreWeights {
    domain: 0.25,
    social: 0.15,
    trademark: 0.20,
    pronunciation: 0.20,
    international: 0.20,
};

/// Points deducted per language with an unfortunate meaning.
const INTERNATIONAL_PENALTY: f64 = 20.0;

/// The TLD that carries half the domain score on its own.
const PRIMARY_TLD: &str = ".com";

/// Per-dimension scores, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionScores {
    pub domain: f64,
    pub social: f64,
    pub trademark: f64,
    pub pronunciation: f64,
    pub international: f64,
}

impl ScoreWeights {
    /// Weighted linear combination of the dimension scores.
    pub fn combine(&self, scores: &DimensionScores) -> f64 {
        scores.domain * self.domain
            + scores.social * self.social
            + scores.trademark * self.trademark
            + scores.pronunciation * self.pronunciation
            + scores.international * self.international
    }
}

/// Domain score: 50 for `.com`, up to 50 more spread across the other TLDs.
pub fn domain_score(domains: &AvailabilityMap) -> f64 {
    if domains.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;
    if domains.get(PRIMARY_TLD).copied().unwrap_or(false) {
        score += 50.0;
    }

    let others: Vec<bool> = domains
        .iter()
        .filter(|(tld, _)| tld.as_str() != PRIMARY_TLD)
        .map(|(_, available)| *available)
        .collect();
    if !others.is_empty() {
        let available = others.iter().filter(|a| **a).count();
        score += available as f64 / others.len() as f64 * 50.0;
    }

    score
}

/// Social score: percentage of platforms with the handle free.
pub fn social_score(social: &AvailabilityMap) -> f64 {
    if social.is_empty() {
        return 0.0;
    }
    let available = social.values().filter(|a| **a).count();
    available as f64 / social.len() as f64 * 100.0
}

/// Safety score for a trademark risk level.
pub fn risk_level_score(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Low => 100.0,
        RiskLevel::Medium => 50.0,
        RiskLevel::High => 10.0,
    }
}

pub fn trademark_score(trademark: Option<&TrademarkResult>) -> f64 {
    trademark.map_or(0.0, |t| risk_level_score(t.risk_level))
}

/// Pronunciation score rescaled from 0-10 to 0-100.
pub fn pronunciation_score(pronunciation: Option<&PronunciationResult>) -> f64 {
    pronunciation.map_or(0.0, |p| p.score * 10.0)
}

/// International score: 100 minus 20 per flagged language, floored at 0.
pub fn international_score(international: &InternationalMap) -> f64 {
    let issues = international.values().filter(|i| i.has_issue).count();
    (100.0 - issues as f64 * INTERNATIONAL_PENALTY).max(0.0)
}

/// Raw sub-results gathered for one name.
#[derive(Debug, Clone, Default)]
pub struct SubResults {
    pub domains: AvailabilityMap,
    pub social: AvailabilityMap,
    pub trademark: Option<TrademarkResult>,
    pub pronunciation: Option<PronunciationResult>,
    pub international: InternationalMap,
    pub perception: Option<PerceptionResult>,
}

impl SubResults {
    pub fn dimension_scores(&self) -> DimensionScores {
        DimensionScores {
            domain: domain_score(&self.domains),
            social: social_score(&self.social),
            trademark: trademark_score(self.trademark.as_ref()),
            pronunciation: pronunciation_score(self.pronunciation.as_ref()),
            international: international_score(&self.international),
        }
    }
}

/// Score the sub-results and assemble the evaluation report.
pub fn aggregate(name: &str, results: SubResults) -> EvaluationResult {
    let scores = results.dimension_scores();

    EvaluationResult {
        name: name.to_string(),
        overall_score: WEIGHTS.combine(&scores),
        domain_score: scores.domain,
        social_score: scores.social,
        trademark_score: scores.trademark,
        pronunciation_score: scores.pronunciation,
        international_score: scores.international,
        domains: results.domains,
        social: results.social,
        trademark: results.trademark,
        pronunciation: results.pronunciation,
        international: results.international,
        perception: results.perception,
    }
}

/// Index of the highest overall score. The first one wins ties.
pub fn pick_winner<'a>(scores: impl IntoIterator<Item = &'a EvaluationResult>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, result) in scores.into_iter().enumerate() {
        match best {
            Some((_, score)) if result.overall_score <= score => {}
            _ => best = Some((i, result.overall_score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Evaluations of several names, in input order.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub results: Vec<EvaluationResult>,
    pub winner: Option<usize>,
}

impl Comparison {
    pub fn winner(&self) -> Option<&EvaluationResult> {
        self.winner.and_then(|i| self.results.get(i))
    }
}

/// Runs every check for a name and scores it.
#[derive(Clone)]
pub struct BrandEvaluator {
    domains: DomainChecker,
    social: Arc<dyn SocialChecker>,
    trademark: Arc<dyn TrademarkChecker>,
    perception: PerceptionAnalyzer,
}

impl BrandEvaluator {
    /// Evaluator with placeholder social, trademark and perception checks.
    pub fn new(domains: DomainChecker) -> Self {
        Self {
            domains,
            social: Arc::new(StubSocialChecker::default()),
            trademark: Arc::new(StubTrademarkChecker),
            perception: PerceptionAnalyzer::disabled(),
        }
    }

    pub fn with_social(mut self, social: Arc<dyn SocialChecker>) -> Self {
        self.social = social;
        self
    }

    pub fn with_trademark(mut self, trademark: Arc<dyn TrademarkChecker>) -> Self {
        self.trademark = trademark;
        self
    }

    pub fn with_perception(mut self, perception: PerceptionAnalyzer) -> Self {
        self.perception = perception;
        self
    }

    pub fn domain_checker(&self) -> &DomainChecker {
        &self.domains
    }

    /// Run the full evaluation for one name.
    pub async fn evaluate(&self, name: &str, mission: Option<&str>) -> EvaluationResult {
        let domains = self.domains.check(name).await;
        self.evaluate_with_domains(name, mission, domains).await
    }

    /// Run the evaluation reusing domain availability that was already checked.
    pub async fn evaluate_with_domains(
        &self,
        name: &str,
        mission: Option<&str>,
        domains: AvailabilityMap,
    ) -> EvaluationResult {
        let social = self.social.check(name).await;
        let trademark = self.trademark.check(name);
        let pronunciation = analyze_pronunciation(name);
        let international = check_international(name);
        let perception = self.perception.analyze(name, mission).await;

        let result = aggregate(
            name,
            SubResults {
                domains,
                social,
                trademark: Some(trademark),
                pronunciation: Some(pronunciation),
                international,
                perception: Some(perception),
            },
        );

        tracing::info!(
            name = %name,
            overall = result.overall_score,
            trademark_checker = self.trademark.name(),
            "Evaluated name"
        );

        result
    }

    /// Evaluate names in order and pick the best one.
    pub async fn compare(&self, names: &[String], mission: Option<&str>) -> Comparison {
        let mut results = Vec::with_capacity(names.len());
        for name in names {
            results.push(self.evaluate(name, mission).await);
        }
        let winner = pick_winner(&results);
        Comparison { results, winner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namecast_availability::fakes::MemoryDomainLookup;
    use namecast_availability::DEFAULT_TLDS;
    use namecast_model::InternationalIssue;
    use namecast_trademark::KnownMarksChecker;

    const EPSILON: f64 = 1e-9;

    fn availability(entries: &[(&str, bool)]) -> AvailabilityMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn evaluator(lookup: MemoryDomainLookup) -> BrandEvaluator {
        BrandEvaluator::new(DomainChecker::new(Arc::new(lookup)))
    }

    fn assert_weighted(result: &EvaluationResult) {
        let expected = result.domain_score * 0.25
            + result.social_score * 0.15
            + result.trademark_score * 0.20
            + result.pronunciation_score * 0.20
            + result.international_score * 0.20;
        assert!((result.overall_score - expected).abs() < EPSILON);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total = WEIGHTS.domain
            + WEIGHTS.social
            + WEIGHTS.trademark
            + WEIGHTS.pronunciation
            + WEIGHTS.international;
        assert!((total - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_domain_score() {
        let all: Vec<(&str, bool)> = DEFAULT_TLDS.iter().map(|t| (*t, true)).collect();
        assert_eq!(domain_score(&availability(&all)), 100.0);

        let mut com_taken = all.clone();
        com_taken[0].1 = false;
        assert_eq!(domain_score(&availability(&com_taken)), 50.0);

        let only_com = [(".com", true), (".io", false), (".co", false), (".ai", false), (".app", false)];
        assert_eq!(domain_score(&availability(&only_com)), 50.0);

        let half = [(".com", false), (".io", true), (".co", true), (".ai", false), (".app", false)];
        assert_eq!(domain_score(&availability(&half)), 25.0);

        assert_eq!(domain_score(&AvailabilityMap::new()), 0.0);
        assert_eq!(domain_score(&availability(&[(".com", true)])), 50.0);
    }

    #[test]
    fn test_social_score() {
        let social = availability(&[("twitter", true), ("github", false)]);
        assert_eq!(social_score(&social), 50.0);
        assert_eq!(social_score(&AvailabilityMap::new()), 0.0);
    }

    #[test]
    fn test_trademark_score_values() {
        assert_eq!(risk_level_score(RiskLevel::Low), 100.0);
        assert_eq!(risk_level_score(RiskLevel::Medium), 50.0);
        assert_eq!(risk_level_score(RiskLevel::High), 10.0);
        assert_eq!(trademark_score(None), 0.0);
    }

    #[test]
    fn test_international_score() {
        let flagged = |n: usize| -> InternationalMap {
            (0..7)
                .map(|i| {
                    let issue = InternationalIssue {
                        has_issue: i < n,
                        meaning: None,
                    };
                    (format!("lang{i}"), issue)
                })
                .collect()
        };
        assert_eq!(international_score(&flagged(0)), 100.0);
        assert_eq!(international_score(&flagged(1)), 80.0);
        assert_eq!(international_score(&flagged(3)), 40.0);
        assert_eq!(international_score(&flagged(5)), 0.0);
        assert_eq!(international_score(&flagged(7)), 0.0);
        assert_eq!(international_score(&InternationalMap::new()), 100.0);
    }

    #[test]
    fn test_missing_sub_results_score_zero() {
        let result = aggregate("ab", SubResults::default());
        assert_eq!(result.domain_score, 0.0);
        assert_eq!(result.trademark_score, 0.0);
        assert_eq!(result.pronunciation_score, 0.0);
        assert_eq!(result.international_score, 100.0);
        assert_weighted(&result);
    }

    #[test]
    fn test_pick_winner_first_on_ties() {
        let mut a = aggregate("a", SubResults::default());
        let mut b = a.clone();
        b.name = "b".to_string();
        assert_eq!(pick_winner([&a, &b]), Some(0));

        a.overall_score = 10.0;
        b.overall_score = 20.0;
        assert_eq!(pick_winner([&a, &b]), Some(1));
        assert_eq!(pick_winner(std::iter::empty()), None);
    }

    #[tokio::test]
    async fn test_evaluate_all_available() {
        let result = evaluator(MemoryDomainLookup::new()).evaluate("Kestrel", None).await;

        assert_eq!(result.domain_score, 100.0);
        assert_eq!(result.social_score, 100.0);
        assert_eq!(result.trademark_score, 100.0);
        assert_eq!(result.pronunciation_score, 90.0);
        assert_eq!(result.international_score, 100.0);
        assert!((result.overall_score - 98.0).abs() < EPSILON);
        assert_weighted(&result);

        let perception = result.perception.unwrap();
        assert_eq!(perception.mission_alignment, None);
    }

    #[tokio::test]
    async fn test_evaluate_scores_stay_in_range() {
        let lookup = MemoryDomainLookup::new()
            .with_registered(["nova.com", "nova.io", "schatch.com"])
            .with_failing(["nova.ai"]);
        let evaluator = evaluator(lookup);

        for name in ["Nova", "Schatch", "abababababxwzxptl", "ab"] {
            let result = evaluator.evaluate(name, Some("Mission")).await;
            for score in [
                result.domain_score,
                result.social_score,
                result.trademark_score,
                result.pronunciation_score,
                result.international_score,
                result.overall_score,
            ] {
                assert!((0.0..=100.0).contains(&score), "{name}: {score}");
            }
            assert_weighted(&result);
        }
    }

    #[tokio::test]
    async fn test_evaluate_flags_meaning_and_conflicts() {
        let evaluator = evaluator(MemoryDomainLookup::new())
            .with_trademark(Arc::new(KnownMarksChecker::new(["NOVA"])));

        let result = evaluator.evaluate("Nova", None).await;
        assert_eq!(result.international_score, 80.0);
        assert_eq!(result.trademark_score, 10.0);
        assert_eq!(result.trademark.unwrap().risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn test_evaluate_with_domains_skips_lookups() {
        let lookup = Arc::new(MemoryDomainLookup::new());
        let evaluator = BrandEvaluator::new(DomainChecker::new(lookup.clone()));
        let domains = availability(&[(".com", false), (".io", true)]);

        let result = evaluator
            .evaluate_with_domains("Kestrel", None, domains.clone())
            .await;
        assert_eq!(result.domains, domains);
        assert_eq!(result.domain_score, 50.0);
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn test_compare_picks_best_and_breaks_ties_by_order() {
        let lookup = MemoryDomainLookup::new().with_registered(["taken.com", "taken.io"]);
        let evaluator = evaluator(lookup);

        let names = vec!["Taken".to_string(), "Kestrel".to_string()];
        let comparison = evaluator.compare(&names, None).await;
        assert_eq!(comparison.results.len(), 2);
        assert_eq!(comparison.winner().map(|r| r.name.as_str()), Some("Kestrel"));

        // Same letters, same scores
        let names = vec!["Plume".to_string(), "PLUME".to_string()];
        let comparison = evaluator.compare(&names, None).await;
        assert_eq!(comparison.winner, Some(0));
    }
}
