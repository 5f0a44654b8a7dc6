//! Structured response types returned by the generator

use serde::{Deserialize, Serialize};

/// Closed set of query categories the model must classify into.
///
/// Any value outside this enumeration is a contract violation; downstream
/// consumers branch on the category, so it is never coerced or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    /// The user is saying hello or starting a conversation
    Greeting,
    /// A question about the ingested documents or the conversation history
    DocumentQuery,
    /// General knowledge unrelated to the documents
    GeneralInfo,
    /// The user is ending the conversation
    Goodbye,
    /// Small talk or questions about the assistant itself
    Chitchat,
}

impl QueryCategory {
    /// All valid wire values, in declaration order
    pub const ALL: [&'static str; 5] = [
        "greeting",
        "document_query",
        "general_info",
        "goodbye",
        "chitchat",
    ];

    /// Parse a wire value, returning `None` for anything outside the closed set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "greeting" => Some(Self::Greeting),
            "document_query" => Some(Self::DocumentQuery),
            "general_info" => Some(Self::GeneralInfo),
            "goodbye" => Some(Self::Goodbye),
            "chitchat" => Some(Self::Chitchat),
            _ => None,
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::DocumentQuery => "document_query",
            Self::GeneralInfo => "general_info",
            Self::Goodbye => "goodbye",
            Self::Chitchat => "chitchat",
        }
    }
}

/// Validated structured output of the response generator.
///
/// `diagram` is nullable on the wire and, when present, holds Graphviz DOT
/// text kept strictly out of `answer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Classified category of the user's query
    pub category: QueryCategory,
    /// Response text (never contains the diagram source)
    pub answer: String,
    /// Optional directed-graph description (Graphviz DOT)
    pub diagram: Option<String>,
    /// Whether the model reports having used retrieved context.
    /// Self-reported by the model and not independently verified.
    pub context_used: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for value in QueryCategory::ALL {
            let parsed = QueryCategory::parse(value).unwrap();
            assert_eq!(parsed.as_str(), value);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!(QueryCategory::parse("weather").is_none());
        assert!(QueryCategory::parse("").is_none());
        assert!(QueryCategory::parse("Greeting").is_none());
    }

    #[test]
    fn test_result_serializes_nullable_diagram() {
        let result = QueryResult {
            category: QueryCategory::Greeting,
            answer: "Hello!".to_string(),
            diagram: None,
            context_used: false,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["category"], "greeting");
        assert!(json["diagram"].is_null());
        assert_eq!(json["context_used"], false);
    }
}
