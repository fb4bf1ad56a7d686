//! README decoding and truncation

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::github::GitHubError;

/// Marker appended to READMEs cut at the configured length
pub const TRUNCATION_MARKER: &str = "\n\n[README truncated...]";

/// Decode the base64 `content` field of the README endpoint
///
/// GitHub wraps the payload with newlines, which the decoder rejects.
pub fn decode_content(content: &str) -> Result<String, GitHubError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| GitHubError::Readme(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| GitHubError::Readme(e.to_string()))
}

/// Cut `text` to at most `max_chars` characters, appending [`TRUNCATION_MARKER`]
pub fn truncate(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut cut = text;
            cut.truncate(byte_idx);
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_content() {
        // "# Hello\n\nWorld" split across lines the way GitHub returns it
        let content = "IyBIZWxs\nbwoKV29y\nbGQ=\n";
        assert_eq!(decode_content(content).unwrap(), "# Hello\n\nWorld");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_content("!!not base64!!").is_err());
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate("short".to_string(), 10), "short");
        assert_eq!(truncate("exact".to_string(), 5), "exact");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        let text = "héllo wörld".to_string();
        let cut = truncate(text, 4);
        assert_eq!(cut, format!("héll{}", TRUNCATION_MARKER));
    }
}
