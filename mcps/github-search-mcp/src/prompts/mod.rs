//! Agent instructions
//!
//! The LLM host loads this as the system prompt for the repository-search
//! agent. The tool only executes searches; ranking and write-ups are the
//! agent's job.

mod agent;

pub use agent::AGENT_INSTRUCTIONS;

/// Short form advertised in the MCP server info
pub const SERVER_INSTRUCTIONS: &str = "GitHub repository search. Call `search_repositories` with \
     keywords plus optional language, min_stars, topic, sort_by, max_results (1-10) and \
     include_readme. Never invent repositories: only recommend ones returned by the tool. \
     Call `get_agent_instructions` for the full recommendation workflow and output template.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_document_tool_contract() {
        for field in [
            "keywords",
            "language",
            "min_stars",
            "topic",
            "sort_by",
            "max_results",
            "include_readme",
        ] {
            assert!(AGENT_INSTRUCTIONS.contains(field), "missing {}", field);
        }
        assert!(AGENT_INSTRUCTIONS.contains("Never fabricate"));
    }
}
