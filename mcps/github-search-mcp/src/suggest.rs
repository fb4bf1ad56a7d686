//! Alternative-search suggestions for empty result sets
//!
//! The agent relays these when a search comes back empty, so it can
//! broaden the next query instead of giving up.

use crate::params::SearchRequest;

pub const NO_RESULTS_MESSAGE: &str =
    "No repositories found matching your criteria. See suggestions for alternative searches.";

/// Checked in order; the first whole-word hit wins
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("dl", "deep learning"),
    ("nlp", "natural language processing"),
    ("cv", "computer vision"),
    ("eda", "exploratory data analysis"),
    ("etl", "extract transform load"),
    ("api", "application programming interface"),
    ("cli", "command line"),
    ("gui", "graphical user interface"),
    ("db", "database"),
    ("auth", "authentication"),
    ("auto", "automated OR automatic"),
];

const TOPIC_HINTS: &[(&str, &str)] = &[
    ("data analysis", "data-science"),
    ("machine learning", "machine-learning"),
    ("web framework", "web"),
    ("automation", "automation"),
    ("visualization", "data-visualization"),
    ("api", "api"),
    ("cli", "cli"),
    ("testing", "testing"),
];

/// Suggestions for broadening a search that returned nothing
pub fn suggestions(request: &SearchRequest) -> Vec<String> {
    let mut out = Vec::new();
    let lowered = request.keywords.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    if let Some((abbr, expansion)) = ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| words.contains(abbr))
    {
        let expanded: Vec<&str> = words
            .iter()
            .map(|w| if w == abbr { *expansion } else { *w })
            .collect();
        out.push(format!(
            "Try expanding abbreviations: \"{}\"",
            expanded.join(" ")
        ));
    }

    if request.min_stars > 100 {
        out.push(format!(
            "Try lowering min_stars from {} to {} or 50",
            request.min_stars,
            request.min_stars / 2
        ));
    }

    if let Some(ref language) = request.language {
        out.push(format!(
            "Try searching without the language filter (remove language: \"{}\")",
            language
        ));
    }

    let original: Vec<&str> = request.keywords.split_whitespace().collect();
    if original.len() > 2 {
        out.push(format!(
            "Try using fewer keywords: \"{}\"",
            original[..2].join(" ")
        ));
    }

    if request.topic.is_none() {
        if let Some((_, topic)) = TOPIC_HINTS
            .iter()
            .find(|(phrase, _)| contains_phrase(&words, phrase))
        {
            out.push(format!("Try adding topic filter: topic:\"{}\"", topic));
        }
    }

    if out.is_empty() {
        out.push("Try using more general or alternative keywords".to_string());
        out.push("Check spelling and try common synonyms".to_string());
    }

    out
}

/// Whole-word match of a (possibly multi-word) phrase
fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    !needle.is_empty() && words.windows(needle.len()).any(|w| w == needle.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SearchParams;

    fn request(json: &str) -> SearchRequest {
        SearchParams::from_json(json).unwrap().validate(5).unwrap()
    }

    #[test]
    fn test_abbreviation_expanded_as_whole_word() {
        let s = suggestions(&request(r#"{"keywords": "ML pipeline"}"#));
        assert_eq!(s[0], "Try expanding abbreviations: \"machine learning pipeline\"");

        // "html" must not trigger the "ml" expansion
        let s = suggestions(&request(r#"{"keywords": "html parser"}"#));
        assert!(!s.iter().any(|x| x.contains("abbreviations")));
    }

    #[test]
    fn test_filter_suggestions_in_order() {
        let s = suggestions(&request(
            r#"{"keywords": "fast json schema validator", "language": "go", "min_stars": 500}"#,
        ));
        assert_eq!(
            s,
            vec![
                "Try lowering min_stars from 500 to 250 or 50".to_string(),
                "Try searching without the language filter (remove language: \"go\")".to_string(),
                "Try using fewer keywords: \"fast json\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_topic_hint() {
        let s = suggestions(&request(r#"{"keywords": "machine learning"}"#));
        assert_eq!(s, vec!["Try adding topic filter: topic:\"machine-learning\"".to_string()]);

        let s = suggestions(&request(r#"{"keywords": "machine learning", "topic": "ai"}"#));
        assert!(!s.iter().any(|x| x.contains("topic filter")));
    }

    #[test]
    fn test_generic_fallback() {
        let s = suggestions(&request(r#"{"keywords": "zzqx"}"#));
        assert_eq!(s.len(), 2);
        assert!(s[0].contains("more general"));
    }
}
