//! Human-readable rendering of evaluation results.
//!
//! Converts evaluation reports into the Markdown summary and into short
//! explanations of trademark risk flags for the CLI and web interface.

use namecast_model::{EvaluationResult, RiskFlag, RiskLevel, TrademarkMatch, TrademarkResult};
use serde::{Deserialize, Serialize};

/// A structured explanation for a trademark risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    /// Short summary (1 line)
    pub summary: String,

    /// Detailed explanation (1-2 sentences)
    pub detail: String,
}

fn status(available: bool) -> &'static str {
    if available {
        "Available"
    } else {
        "Taken"
    }
}

/// Render the Markdown report for one evaluation.
pub fn render_markdown(result: &EvaluationResult) -> String {
    let mut lines = vec![
        format!("## Brand Evaluation: {}", result.name),
        String::new(),
        format!("### Overall Score: {:.0}/100", result.overall_score),
        String::new(),
        "### Domain Availability".to_string(),
        "| TLD | Status |".to_string(),
        "|-----|--------|".to_string(),
    ];
    for (tld, available) in &result.domains {
        lines.push(format!("| {} | {} |", tld, status(*available)));
    }

    lines.extend([
        String::new(),
        "### Social Handles".to_string(),
        "| Platform | Status |".to_string(),
        "|----------|--------|".to_string(),
    ]);
    for (platform, available) in &result.social {
        lines.push(format!("| {} | {} |", platform, status(*available)));
    }

    if let Some(trademark) = &result.trademark {
        lines.push(String::new());
        lines.push(format!(
            "### Trademark Risk: {}",
            trademark.risk_level.as_str().to_uppercase()
        ));
    }

    if let Some(pronunciation) = &result.pronunciation {
        lines.extend([
            String::new(),
            format!("### Pronunciation Score: {:.1}/10", pronunciation.score),
            format!("- Syllables: {}", pronunciation.syllables),
            format!("- Spelling: {}", pronunciation.spelling_difficulty.as_str()),
        ]);
    }

    lines.join("\n")
}

/// Generate explanation for a single risk flag.
pub fn explain_flag(flag: &RiskFlag, name: &str, mark: &str) -> Explanation {
    match flag {
        RiskFlag::ExactMatch => Explanation {
            summary: "Exact match found".to_string(),
            detail: format!(
                "The protected mark '{}' is identical to '{}'. \
                 This represents the highest level of potential conflict.",
                mark, name
            ),
        },

        RiskFlag::PhoneticMatch { algorithm, code } => Explanation {
            summary: "Sounds similar".to_string(),
            detail: format!(
                "The mark '{}' sounds like '{}' (both encode to {} under {}). \
                 Consumers may confuse the two when spoken aloud.",
                mark, name, code, algorithm
            ),
        },

        RiskFlag::FuzzyMatch { distance } => Explanation {
            summary: "Spelled similarly".to_string(),
            detail: format!(
                "The mark '{}' differs from '{}' by only {} character(s).",
                mark, name, distance
            ),
        },

        RiskFlag::DominantTermMatch { term } => Explanation {
            summary: format!("Dominant term '{}' matches", term),
            detail: format!(
                "The distinctive element '{}' appears in both '{}' and '{}'.",
                term, mark, name
            ),
        },
    }
}

/// Explanations for every flag on one conflicting mark.
pub fn explain_match(m: &TrademarkMatch, name: &str) -> Vec<Explanation> {
    m.flags.iter().map(|f| explain_flag(f, name, &m.mark)).collect()
}

/// One-line trademark verdict.
pub fn summarize_trademark(trademark: &TrademarkResult) -> String {
    if trademark.matches.is_empty() {
        return "Low risk - no conflicting marks found.".to_string();
    }

    let level = match trademark.risk_level {
        RiskLevel::High => "HIGH RISK",
        RiskLevel::Medium => "MODERATE RISK",
        RiskLevel::Low => "LOW RISK",
    };
    let marks: Vec<_> = trademark.matches.iter().map(|m| m.mark.as_str()).collect();
    format!("{}: conflicts with {}", level, marks.join(", "))
}

/// One-line summary of an evaluation for terminal output.
pub fn summarize(result: &EvaluationResult) -> String {
    let free_domains: Vec<_> = result
        .domains
        .iter()
        .filter(|(_, available)| **available)
        .map(|(tld, _)| tld.as_str())
        .collect();

    format!(
        "{}: {:.0}/100 (domains {:.0}, social {:.0}, trademark {:.0}, pronunciation {:.0}, international {:.0}) free: {}",
        result.name,
        result.overall_score,
        result.domain_score,
        result.social_score,
        result.trademark_score,
        result.pronunciation_score,
        result.international_score,
        if free_domains.is_empty() {
            "none".to_string()
        } else {
            free_domains.join(" ")
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use namecast_model::{AvailabilityMap, PronunciationResult, SpellingDifficulty};
    use pretty_assertions::assert_eq;

    fn result() -> EvaluationResult {
        let domains: AvailabilityMap = [(".com", false), (".io", true)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let social: AvailabilityMap = [("github".to_string(), true)].into_iter().collect();

        EvaluationResult {
            name: "Kestrel".to_string(),
            overall_score: 83.4,
            domain_score: 50.0,
            social_score: 100.0,
            trademark_score: 100.0,
            pronunciation_score: 90.0,
            international_score: 100.0,
            domains,
            social,
            trademark: Some(TrademarkResult::clear()),
            pronunciation: Some(PronunciationResult {
                score: 9.0,
                syllables: 2,
                spelling_difficulty: SpellingDifficulty::Easy,
            }),
            international: Default::default(),
            perception: None,
        }
    }

    #[test]
    fn test_markdown_layout() {
        let expected = "\
## Brand Evaluation: Kestrel

### Overall Score: 83/100

### Domain Availability
| TLD | Status |
|-----|--------|
| .com | Taken |
| .io | Available |

### Social Handles
| Platform | Status |
|----------|--------|
| github | Available |

### Trademark Risk: LOW

### Pronunciation Score: 9.0/10
- Syllables: 2
- Spelling: easy";
        assert_eq!(render_markdown(&result()), expected);
    }

    #[test]
    fn test_markdown_omits_missing_sections() {
        let mut result = result();
        result.trademark = None;
        result.pronunciation = None;
        let markdown = render_markdown(&result);
        assert!(!markdown.contains("Trademark Risk"));
        assert!(!markdown.contains("Pronunciation"));
        assert!(markdown.ends_with("| github | Available |"));
    }

    #[test]
    fn test_explain_flags() {
        let explanation = explain_flag(&RiskFlag::ExactMatch, "Nike", "NIKE");
        assert!(explanation.summary.contains("Exact"));

        let flag = RiskFlag::PhoneticMatch {
            algorithm: "soundex".to_string(),
            code: "N200".to_string(),
        };
        let explanation = explain_flag(&flag, "Nyke", "NIKE");
        assert!(explanation.detail.contains("N200"));
    }

    #[test]
    fn test_summaries() {
        assert_eq!(
            summarize_trademark(&TrademarkResult::clear()),
            "Low risk - no conflicting marks found."
        );

        let trademark = TrademarkResult {
            risk_level: RiskLevel::High,
            matches: vec![TrademarkMatch {
                mark: "NIKE".to_string(),
                risk_score: 1.0,
                flags: vec![RiskFlag::ExactMatch],
            }],
        };
        assert_eq!(summarize_trademark(&trademark), "HIGH RISK: conflicts with NIKE");
        assert_eq!(explain_match(&trademark.matches[0], "Nike").len(), 1);

        assert!(summarize(&result()).ends_with("free: .io"));
    }
}
