use crate::{prompt_excerpt, Mode};

pub const SUMMARIZE_TEXT_PREFIX: &str =
    "Summarize the following legal document in plain language:\n\n";
pub const SUMMARIZE_PDF_PREFIX: &str = "Summarize this legal document in plain language:\n\n";

/// Builds the user-role message body for `mode` from its raw input.
///
/// Questions go out verbatim, pasted text is prefixed but never truncated, and
/// extracted PDF text is cut to the prompt excerpt.
pub fn build_prompt(mode: Mode, input: &str) -> String {
    match mode {
        Mode::AskQuestion => input.to_string(),
        Mode::SummarizeText => format!("{SUMMARIZE_TEXT_PREFIX}{input}"),
        Mode::SummarizePdf => format!("{SUMMARIZE_PDF_PREFIX}{}", prompt_excerpt(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_is_sent_verbatim() {
        let question = "  What is the precedent for breach of contract in New York?\n";
        assert_eq!(build_prompt(Mode::AskQuestion, question), question);
    }

    #[test]
    fn pasted_text_is_never_truncated() {
        let pasted = "x".repeat(20_000);
        let prompt = build_prompt(Mode::SummarizeText, &pasted);
        assert_eq!(prompt.len(), SUMMARIZE_TEXT_PREFIX.len() + 20_000);
        assert!(prompt.starts_with("Summarize the following legal document in plain language:\n\n"));
    }

    #[test]
    fn pdf_text_is_cut_to_excerpt() {
        let extracted = "y".repeat(8_500);
        let prompt = build_prompt(Mode::SummarizePdf, &extracted);
        assert_eq!(prompt, format!("{SUMMARIZE_PDF_PREFIX}{}", "y".repeat(8_000)));
    }
}
