//! Prompt templates for classified, grounded chat generation

use crate::config::DiagramMode;
use crate::types::{Passage, Turn};

/// Prompt builder for chat queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join passage texts into a single context block, in retrieval order.
    ///
    /// No re-ranking or truncation happens here; length management belongs to
    /// the retriever and its caller.
    pub fn build_context(passages: &[Passage]) -> String {
        passages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the session's turns as a flat chronological transcript.
    ///
    /// This is a read-only snapshot; the turn being answered is not included.
    pub fn build_transcript(turns: &[Turn]) -> String {
        turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Diagram instructions for the active mode
    fn diagram_rules(mode: DiagramMode) -> &'static str {
        match mode {
            DiagramMode::SeparateField => {
                r#"    * If a diagram would help visualize complex information, generate Graphviz DOT code and place it ONLY in the `diagram` field of the JSON response. DO NOT include the DOT code in the `answer` field; the `answer` field contains only your explanation text.
    * Graphviz DOT syntax rules:
      - Use `digraph` for directed graphs.
      - Start with `graph [rankdir=TB]` for a top-to-bottom layout.
      - Node IDs are alphanumeric; use labels for display text (e.g., `A [label="Node Label"]`).
      - Use `->` for edges.
      - Keep diagrams concise and focused."#
            }
            DiagramMode::Inline => {
                r#"    * If a diagram would help visualize complex information, embed a fenced ```mermaid code block directly inside the `answer` text. Do NOT use the `diagram` field; leave it null."#
            }
        }
    }

    /// Build the full chat prompt: context block, transcript, query,
    /// classification instructions, and the output format contract.
    pub fn build_chat_prompt(
        context: &str,
        transcript: &str,
        query: &str,
        mode: DiagramMode,
    ) -> String {
        format!(
            r#"You are Codi, a friendly and knowledgeable assistant that helps users understand their documents. Be helpful, conversational, and clear.

**Core Task:**
1. Classify the user's query into EXACTLY ONE of the categories below.
2. Generate a response following the instructions for that category.

**Categories & Response Instructions:**

- **greeting:** The user is saying hello or starting a conversation.
  - Greet them warmly and ask how you can help with their documents today.

- **document_query:** The user is asking about information in the documents or the conversation history.
  - Look for the answer ONLY in the Context below and in the Chat History.
  - If you find relevant information, give a clear and detailed answer.
{diagram_rules}
  - If you cannot find an answer in the context or the history, say so in a friendly way. Never invent an answer.

- **general_info:** A general knowledge question unrelated to the documents.
  - Politely explain your purpose and guide the user back to the documents.

- **goodbye:** The user is ending the conversation.
  - Say goodbye in a friendly manner.

- **chitchat:** Small talk or questions about you (the assistant).
  - Engage briefly and pleasantly, then steer back to the documents.

**Context:**
{context}

**Chat History:**
{transcript}

**Question:**
{query}

**Output format:**
Respond with a single JSON object and nothing else:
{{
  "category": one of "greeting" | "document_query" | "general_info" | "goodbye" | "chitchat",
  "answer": your response text,
  "context_used": true if the Context above contributed to the answer, false otherwise,
  "diagram": Graphviz DOT text or null
}}

Response:"#,
            diagram_rules = Self::diagram_rules(mode),
            context = context,
            transcript = transcript,
            query = query,
        )
    }
}
