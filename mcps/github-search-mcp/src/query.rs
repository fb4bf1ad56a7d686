//! Search query composition
//!
//! Conjoins the free-text keywords with the qualifiers the repository
//! search endpoint understands.

use crate::params::SearchRequest;

/// Build the `q` parameter for `/search/repositories`
pub fn build_query(request: &SearchRequest) -> String {
    let mut parts = vec![request.keywords.clone()];

    if let Some(ref language) = request.language {
        parts.push(format!("language:{}", qualifier_value(language)));
    }
    if request.min_stars > 0 {
        parts.push(format!("stars:>={}", request.min_stars));
    }
    if let Some(ref topic) = request.topic {
        parts.push(format!("topic:{}", qualifier_value(topic)));
    }

    parts.join(" ")
}

/// Quote qualifier values containing whitespace ("visual basic")
fn qualifier_value(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SearchParams;

    fn request(json: &str) -> SearchRequest {
        SearchParams::from_json(json).unwrap().validate(5).unwrap()
    }

    #[test]
    fn test_keywords_only() {
        assert_eq!(build_query(&request(r#"{"keywords": "excel"}"#)), "excel");
    }

    #[test]
    fn test_all_qualifiers() {
        let req = request(
            r#"{"keywords": "web framework", "language": "python", "min_stars": 1000, "topic": "api"}"#,
        );
        assert_eq!(
            build_query(&req),
            "web framework language:python stars:>=1000 topic:api"
        );
    }

    #[test]
    fn test_zero_stars_omitted() {
        let req = request(r#"{"keywords": "cli", "min_stars": 0}"#);
        assert_eq!(build_query(&req), "cli");
    }

    #[test]
    fn test_multi_word_language_quoted() {
        let req = request(r#"{"keywords": "forms", "language": "visual basic"}"#);
        assert_eq!(build_query(&req), "forms language:\"visual basic\"");
    }
}
