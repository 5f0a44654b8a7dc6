//! Structured output contract enforcement
//!
//! The generator demands a JSON object with `category`, `answer`,
//! `context_used`, and optionally `diagram` from the model. This module
//! parses the raw completion and rejects anything outside the contract:
//! a bad category or missing field is never coerced or guessed, since
//! downstream consumers branch on these fields.

use serde::Deserialize;

use crate::config::DiagramMode;
use crate::error::{Error, Result};
use crate::types::{QueryCategory, QueryResult};

/// Raw model output before validation
#[derive(Debug, Deserialize)]
struct RawOutput {
    category: Option<String>,
    answer: Option<String>,
    context_used: Option<bool>,
    #[serde(default)]
    diagram: Option<String>,
}

/// Parser and validator for the QueryResult schema
pub struct OutputContract;

impl OutputContract {
    /// Parse raw model output into a validated `QueryResult`.
    ///
    /// Fails with `ContractViolation` on malformed JSON, missing required
    /// fields, a category outside the closed enumeration, or a diagram that
    /// breaks the placement rules of the active mode.
    pub fn parse(raw: &str, mode: DiagramMode) -> Result<QueryResult> {
        let json = Self::extract_json(raw)?;

        let output: RawOutput = serde_json::from_str(json)
            .map_err(|e| Error::contract_violation(format!("Malformed JSON output: {}", e)))?;

        let category_str = output
            .category
            .ok_or_else(|| Error::contract_violation("Missing required field: category"))?;

        let category = QueryCategory::parse(&category_str).ok_or_else(|| {
            Error::contract_violation(format!(
                "Invalid category \"{}\"; expected one of: {}",
                category_str,
                QueryCategory::ALL.join(", ")
            ))
        })?;

        let answer = output
            .answer
            .ok_or_else(|| Error::contract_violation("Missing required field: answer"))?;

        let context_used = output
            .context_used
            .ok_or_else(|| Error::contract_violation("Missing required field: context_used"))?;

        // Empty or whitespace-only diagram text counts as absent
        let diagram = output.diagram.filter(|d| !d.trim().is_empty());

        let diagram = match (mode, diagram) {
            (_, None) => None,
            (DiagramMode::Inline, Some(_)) => {
                return Err(Error::contract_violation(
                    "Diagram field is not allowed in inline mode",
                ));
            }
            (DiagramMode::SeparateField, Some(d)) => {
                Self::validate_dot(&d)?;
                if answer.contains(d.trim()) {
                    return Err(Error::contract_violation(
                        "Diagram text duplicated inside answer",
                    ));
                }
                Some(d)
            }
        };

        Ok(QueryResult {
            category,
            answer,
            diagram,
            context_used,
        })
    }

    /// Locate the JSON object inside the raw completion.
    ///
    /// Models routinely wrap structured output in Markdown fences or
    /// surrounding prose; the contract tolerates that wrapping but nothing
    /// else.
    fn extract_json(raw: &str) -> Result<&str> {
        let start = raw
            .find('{')
            .ok_or_else(|| Error::contract_violation("No JSON object in model output"))?;
        let end = raw
            .rfind('}')
            .ok_or_else(|| Error::contract_violation("No JSON object in model output"))?;

        if end < start {
            return Err(Error::contract_violation("No JSON object in model output"));
        }

        Ok(&raw[start..=end])
    }

    /// Check for directed-graph syntax markers.
    ///
    /// The DOT text is otherwise opaque to the core; it is rendered by the
    /// frontend, not parsed here.
    fn validate_dot(diagram: &str) -> Result<()> {
        let trimmed = diagram.trim();

        if !trimmed.starts_with("digraph") {
            return Err(Error::contract_violation(
                "Diagram is not a directed graph (missing digraph keyword)",
            ));
        }

        if !trimmed.contains("->") {
            return Err(Error::contract_violation(
                "Diagram has no directed edges",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_DOT: &str = "digraph G { rankdir=TB; A [label=\"Start\"]; B [label=\"End\"]; A -> B; }";

    fn valid_output(category: &str) -> String {
        format!(
            r#"{{"category": "{}", "answer": "Here you go.", "context_used": true}}"#,
            category
        )
    }

    #[test]
    fn test_accepts_all_five_categories() {
        for category in QueryCategory::ALL {
            let result =
                OutputContract::parse(&valid_output(category), DiagramMode::SeparateField)
                    .unwrap();
            assert_eq!(result.category.as_str(), category);
        }
    }

    #[test]
    fn test_rejects_unknown_category() {
        let err = OutputContract::parse(&valid_output("weather"), DiagramMode::SeparateField)
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation { .. }));
        assert!(err.to_string().contains("weather"));
    }

    #[test]
    fn test_rejects_missing_fields() {
        let missing_answer = r#"{"category": "greeting", "context_used": false}"#;
        let err =
            OutputContract::parse(missing_answer, DiagramMode::SeparateField).unwrap_err();
        assert!(err.to_string().contains("answer"));

        let missing_flag = r#"{"category": "greeting", "answer": "Hi!"}"#;
        let err = OutputContract::parse(missing_flag, DiagramMode::SeparateField).unwrap_err();
        assert!(err.to_string().contains("context_used"));
    }

    #[test]
    fn test_rejects_non_json() {
        let err = OutputContract::parse("I'm sorry, I can't do that.", DiagramMode::SeparateField)
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation { .. }));
    }

    #[test]
    fn test_strips_markdown_fences() {
        let fenced = format!("```json\n{}\n```", valid_output("chitchat"));
        let result = OutputContract::parse(&fenced, DiagramMode::SeparateField).unwrap();
        assert_eq!(result.category, QueryCategory::Chitchat);
    }

    #[test]
    fn test_tolerates_surrounding_prose() {
        let wrapped = format!("Sure! Here is the result:\n{}\nHope that helps.", valid_output("goodbye"));
        let result = OutputContract::parse(&wrapped, DiagramMode::SeparateField).unwrap();
        assert_eq!(result.category, QueryCategory::Goodbye);
    }

    #[test]
    fn test_valid_diagram_accepted() {
        let raw = format!(
            r#"{{"category": "document_query", "answer": "The pipeline has two stages.", "context_used": true, "diagram": "{}"}}"#,
            VALID_DOT.replace('"', "\\\"")
        );
        let result = OutputContract::parse(&raw, DiagramMode::SeparateField).unwrap();
        assert_eq!(result.diagram.as_deref(), Some(VALID_DOT));
    }

    #[test]
    fn test_rejects_malformed_diagram() {
        let raw = r#"{"category": "document_query", "answer": "ok", "context_used": true, "diagram": "graph TD; A-->B"}"#;
        let err = OutputContract::parse(raw, DiagramMode::SeparateField).unwrap_err();
        assert!(matches!(err, Error::ContractViolation { .. }));
    }

    #[test]
    fn test_rejects_diagram_duplicated_in_answer() {
        let raw = format!(
            r#"{{"category": "document_query", "answer": "See: {}", "context_used": true, "diagram": "{}"}}"#,
            VALID_DOT.replace('"', "\\\""),
            VALID_DOT.replace('"', "\\\"")
        );
        let err = OutputContract::parse(&raw, DiagramMode::SeparateField).unwrap_err();
        assert!(err.to_string().contains("duplicated"));
    }

    #[test]
    fn test_inline_mode_rejects_diagram_field() {
        let raw = format!(
            r#"{{"category": "document_query", "answer": "ok", "context_used": true, "diagram": "{}"}}"#,
            VALID_DOT.replace('"', "\\\"")
        );
        let err = OutputContract::parse(&raw, DiagramMode::Inline).unwrap_err();
        assert!(matches!(err, Error::ContractViolation { .. }));
    }

    #[test]
    fn test_empty_diagram_treated_as_absent() {
        let raw = r#"{"category": "greeting", "answer": "Hi!", "context_used": false, "diagram": ""}"#;
        let result = OutputContract::parse(raw, DiagramMode::SeparateField).unwrap();
        assert!(result.diagram.is_none());

        let raw_null = r#"{"category": "greeting", "answer": "Hi!", "context_used": false, "diagram": null}"#;
        let result = OutputContract::parse(raw_null, DiagramMode::Inline).unwrap();
        assert!(result.diagram.is_none());
    }
}
