use std::sync::LazyLock;

use regex::Regex;

use crate::domain::feedback::value_objects::{FeedbackAnalysis, PlanAdjustment, Sentiment};

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z']+").expect("valid word regex"));

const POSITIVE_TERMS: &[&str] = &[
    "good",
    "great",
    "love",
    "loved",
    "like",
    "liked",
    "enjoyed",
    "tasty",
    "delicious",
    "easy",
    "followed",
    "satisfied",
    "full",
    "energetic",
    "energy",
    "healthy",
    "fresh",
    "perfect",
    "helpful",
    "nice",
];

const NEGATIVE_TERMS: &[&str] = &[
    "bad",
    "hungry",
    "bland",
    "boring",
    "tasteless",
    "difficult",
    "hard",
    "complicated",
    "skipped",
    "missed",
    "tired",
    "bloated",
    "heavy",
    "disliked",
    "hate",
    "hated",
    "craving",
    "cravings",
    "sick",
    "expensive",
];

/// Scores below this pick the simplify branch for the next plan.
pub const SIMPLIFY_THRESHOLD: f64 = 0.5;

fn suggestion_for(term: &str) -> Option<&'static str> {
    match term {
        "hungry" => Some("Increase portion sizes or add a protein-rich snack"),
        "bland" | "tasteless" => Some("Add herbs and spices for more flavour"),
        "boring" => Some("Rotate in new meals for more variety"),
        "difficult" | "hard" | "complicated" => Some("Simplify preparation with quicker recipes"),
        "skipped" | "missed" => Some("Plan simpler meals that fit your schedule"),
        "bloated" | "heavy" => Some("Choose lighter dinners and smaller portions"),
        "tired" => Some("Include complex carbohydrates for steadier energy"),
        "craving" | "cravings" => Some("Keep healthy snacks such as fruit at hand"),
        "expensive" => Some("Swap in seasonal, local produce"),
        _ => None,
    }
}

fn tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE.find_iter(&lowered)
        .map(|m| m.as_str().trim_matches('\'').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Keyword-count adherence score in `[0, 1]`; 0.5 when nothing matches.
pub fn adherence_score(text: &str) -> f64 {
    analyze(text).adherence_score
}

pub fn analyze(text: &str) -> FeedbackAnalysis {
    let mut positive_terms = Vec::new();
    let mut negative_terms = Vec::new();
    let (mut positive, mut negative) = (0usize, 0usize);

    for token in tokens(text) {
        if POSITIVE_TERMS.contains(&token.as_str()) {
            positive += 1;
            if !positive_terms.contains(&token) {
                positive_terms.push(token);
            }
        } else if NEGATIVE_TERMS.contains(&token.as_str()) {
            negative += 1;
            if !negative_terms.contains(&token) {
                negative_terms.push(token);
            }
        }
    }

    let adherence_score = if positive + negative == 0 {
        0.5
    } else {
        let raw = positive as f64 / (positive + negative) as f64;
        (raw * 100.0).round() / 100.0
    };

    let mut suggestions: Vec<String> = Vec::new();
    for suggestion in negative_terms.iter().filter_map(|t| suggestion_for(t)) {
        if !suggestions.iter().any(|s| s == suggestion) {
            suggestions.push(suggestion.to_string());
        }
    }

    FeedbackAnalysis {
        adherence_score,
        sentiment: Sentiment::from_score(adherence_score),
        positive_terms,
        negative_terms,
        suggestions,
        adjustment: PlanAdjustment::from_score(adherence_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_bounded_for_any_text() {
        for text in [
            "",
            "   ",
            "!!!",
            "good good good",
            "bad hungry bland",
            "ünïcödé 🍛 text",
            "I'd say it's GOOD but I was hungry",
        ] {
            let score = adherence_score(text);
            assert!((0.0..=1.0).contains(&score), "{text:?} scored {score}");
        }
    }

    #[test]
    fn empty_feedback_is_neutral() {
        let analysis = analyze("");
        assert_eq!(analysis.adherence_score, 0.5);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.adjustment, PlanAdjustment::AddVariety);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn ratio_of_positive_hits_is_rounded() {
        let analysis = analyze("Breakfast was tasty and easy, but I felt hungry.");
        assert_eq!(analysis.adherence_score, 0.67);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.positive_terms, vec!["tasty", "easy"]);
        assert_eq!(analysis.negative_terms, vec!["hungry"]);
        assert_eq!(
            analysis.suggestions,
            vec!["Increase portion sizes or add a protein-rich snack"]
        );
    }

    #[test]
    fn negative_feedback_selects_simplify() {
        let analysis = analyze("Too difficult to cook, skipped dinner and lunch was bland");
        assert_eq!(analysis.adherence_score, 0.0);
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(analysis.adjustment, PlanAdjustment::Simplify);
        assert_eq!(analysis.suggestions.len(), 3);
    }
}
