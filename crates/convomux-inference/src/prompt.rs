use convomux_core::Passage;

/// Persona shared by both instruction variants. Immutable; never built from
/// user input.
pub const ASSISTANT_PERSONA: &str =
    "You are a technical assistant for this service's documentation and operations.";

/// Sentinel phrase marking that retrieval produced nothing usable.
pub const NO_CONTEXT_NOTICE: &str = "No knowledge base context is available";

/// Join passages into one context block, one blank line between passages.
/// Zero passages yield an empty string.
pub fn render_context(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the system instruction for a query. Non-empty context selects the
/// grounded variant that forbids answering from anything but the context;
/// an empty context selects the general-knowledge variant carrying
/// [`NO_CONTEXT_NOTICE`].
pub fn build_instruction(context: &str) -> String {
    if context.is_empty() {
        format!(
            "{ASSISTANT_PERSONA} {NO_CONTEXT_NOTICE}. \
             Answer from general knowledge of the service, \
             and keep every answer to at most three sentences."
        )
    } else {
        format!(
            "{ASSISTANT_PERSONA} Answer ONLY from the context below. \
             If the context does not cover the question, reply that the \
             knowledge base has no information about it. \
             Keep every answer to at most three sentences.\n\nContext:\n{context}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(content: &str) -> Passage {
        Passage {
            content: content.to_string(),
            score: None,
        }
    }

    #[test]
    fn test_render_context_empty() {
        assert_eq!(render_context(&[]), "");
    }

    #[test]
    fn test_render_context_single_passage() {
        let passages = vec![passage("S3 is object storage")];
        assert_eq!(render_context(&passages), "S3 is object storage");
    }

    #[test]
    fn test_render_context_preserves_order_with_blank_line() {
        let passages = vec![passage("alpha"), passage("beta"), passage("gamma")];
        assert_eq!(render_context(&passages), "alpha\n\nbeta\n\ngamma");
    }

    #[test]
    fn test_build_instruction_grounded_contains_context_verbatim() {
        let instruction = build_instruction("alpha\n\nbeta");
        assert!(instruction.contains("Context:\nalpha\n\nbeta"));
        assert!(instruction.contains("ONLY from the context"));
        assert!(instruction.contains("three sentences"));
    }

    #[test]
    fn test_build_instruction_empty_selects_general_variant() {
        let instruction = build_instruction("");
        assert!(instruction.contains(NO_CONTEXT_NOTICE));
        assert!(!instruction.contains("Context:"));
        assert!(instruction.contains("three sentences"));
    }

    #[test]
    fn test_build_instruction_variants_share_persona() {
        assert!(build_instruction("").starts_with(ASSISTANT_PERSONA));
        assert!(build_instruction("ctx").starts_with(ASSISTANT_PERSONA));
    }
}
