//! Heuristic feature extraction for brand names.
//!
//! Provides pure functions used by the evaluator:
//! - Pronunciation analysis (syllables, cluster penalties, spelling difficulty)
//! - International meaning lookup
//! - Text normalization and keyword extraction
//! - Phonetic encodings (Soundex, Metaphone) and edit distance

use namecast_model::{InternationalIssue, InternationalMap, PronunciationResult, SpellingDifficulty};
use rphonetic::{Encoder, Metaphone, Soundex};

// ---------------------------------------------------------------------------
// Pronunciation
// ---------------------------------------------------------------------------

const VOWELS: &str = "aeiouy";

/// Consonant clusters that trip up English speakers.
const DIFFICULT_CLUSTERS: [&str; 5] = ["xw", "zx", "ptl", "tch", "sch"];

/// Letter combinations whose spelling can't be guessed from the sound.
const UNUSUAL_PATTERNS: [&str; 7] = ["ph", "gh", "ough", "tion", "sion", "xc", "cq"];

/// Subset of `UNUSUAL_PATTERNS` that makes spelling hard rather than medium.
const HARD_PATTERNS: [&str; 3] = ["ph", "gh", "ough"];

const CLUSTER_PENALTY: f64 = 1.5;

/// Count syllables by vowel runs, with a silent trailing `e`.
pub fn count_syllables(word: &str) -> u32 {
    let word = word.to_lowercase();
    let mut count = 0_u32;
    let mut prev_was_vowel = false;

    for c in word.chars() {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if word.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

/// Classify how hard the name is to spell.
pub fn spelling_difficulty(name: &str) -> SpellingDifficulty {
    let lower = name.to_lowercase();
    if !UNUSUAL_PATTERNS.iter().any(|p| lower.contains(p)) {
        SpellingDifficulty::Easy
    } else if HARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        SpellingDifficulty::Hard
    } else {
        SpellingDifficulty::Medium
    }
}

/// Score pronunciation ease on a 0-10 scale (higher = easier).
pub fn analyze_pronunciation(name: &str) -> PronunciationResult {
    let syllables = count_syllables(name);

    // 1-2 syllables is ideal
    let base_score = match syllables {
        0..=2 => 9.0,
        3 => 7.0,
        4 => 5.0,
        _ => 3.0,
    };

    let lower = name.to_lowercase();
    let penalty = DIFFICULT_CLUSTERS
        .iter()
        .filter(|cluster| lower.contains(*cluster))
        .count() as f64
        * CLUSTER_PENALTY;

    PronunciationResult {
        score: (base_score - penalty).clamp(0.0, 10.0),
        syllables,
        spelling_difficulty: spelling_difficulty(name),
    }
}

// ---------------------------------------------------------------------------
// International meaning
// ---------------------------------------------------------------------------

/// Languages checked for every name, in report order.
pub const LANGUAGES: [&str; 7] = [
    "spanish",
    "french",
    "german",
    "mandarin",
    "japanese",
    "portuguese",
    "arabic",
];

/// Known problematic words: (word, language, meaning).
const PROBLEMATIC_WORDS: &[(&str, &str, &str)] = &[
    ("mist", "german", "manure/dung"),
    ("fart", "scandinavian", "speed"),
    ("nova", "spanish", "doesn't go (no va)"),
];

/// Look up unfortunate meanings of the whole name in each language.
///
/// This is a literal, case-insensitive equality check against a static table.
pub fn check_international(name: &str) -> InternationalMap {
    let lower = name.to_lowercase();

    LANGUAGES
        .iter()
        .map(|lang| {
            let meaning = PROBLEMATIC_WORDS
                .iter()
                .find(|(word, language, _)| *word == lower && language == lang)
                .map(|(_, _, meaning)| meaning.to_string());

            let issue = InternationalIssue {
                has_issue: meaning.is_some(),
                meaning,
            };
            (lang.to_string(), issue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text and phonetics
// ---------------------------------------------------------------------------

const STOPWORDS: [&str; 22] = [
    "INC", "LLC", "CORP", "CO", "LTD", "THE", "A", "AN", "AND", "OF", "FOR", "TO", "IN", "ON",
    "WITH", "THAT", "THIS", "IS", "ARE", "OUR", "YOUR", "HELPS",
];

/// Normalize text for comparison.
pub fn normalize_text(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct non-stopword terms of at least three characters, in order of appearance.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    let mut keywords: Vec<String> = Vec::new();

    for word in normalized.split_whitespace() {
        if word.chars().count() < 3 || STOPWORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }

    keywords
}

/// Extract the dominant term of a mark: the longest keyword, first one on ties.
pub fn extract_dominant_term(text: &str) -> Option<String> {
    extract_keywords(text)
        .into_iter()
        .fold(None, |best: Option<String>, word| match best {
            Some(b) if b.chars().count() >= word.chars().count() => Some(b),
            _ => Some(word),
        })
}

/// Phonetic encoding results for a mark.
#[derive(Debug, Clone, Default)]
pub struct PhoneticCodes {
    pub soundex: Option<String>,
    pub metaphone: Option<String>,
}

/// Compute phonetic encodings for a mark text.
pub fn compute_phonetics(text: &str) -> PhoneticCodes {
    let letters: String = text.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if letters.is_empty() {
        return PhoneticCodes::default();
    }

    let soundex_code = Soundex::default().encode(&letters);
    let metaphone_code = Metaphone::default().encode(&letters);

    PhoneticCodes {
        soundex: (!soundex_code.is_empty()).then_some(soundex_code),
        metaphone: (!metaphone_code.is_empty()).then_some(metaphone_code),
    }
}

/// Check if two texts are phonetically similar.
///
/// Returns the algorithm and the shared code on a match.
pub fn phonetic_match(text1: &str, text2: &str) -> Option<(String, String)> {
    let codes1 = compute_phonetics(text1);
    let codes2 = compute_phonetics(text2);

    if let (Some(s1), Some(s2)) = (&codes1.soundex, &codes2.soundex) {
        if s1 == s2 {
            return Some(("soundex".to_string(), s1.clone()));
        }
    }

    if let (Some(m1), Some(m2)) = (&codes1.metaphone, &codes2.metaphone) {
        if m1 == m2 {
            return Some(("metaphone".to_string(), m1.clone()));
        }
    }

    None
}

/// Compute Levenshtein edit distance between two strings.
pub fn edit_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();

    let mut prev: Vec<usize> = (0..=s2.len()).collect();
    let mut curr = vec![0; s2.len() + 1];

    for i in 1..=s1.len() {
        curr[0] = i;
        for j in 1..=s2.len() {
            let cost = usize::from(s1[i - 1] != s2[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[s2.len()]
}
