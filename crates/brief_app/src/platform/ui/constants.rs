use brief_core::Mode;

pub const PAGE_TITLE: &str = "Legal Research AI";
pub const APP_TITLE: &str = "Legal Research AI Assistant";
pub const KEY_LABEL: &str = "OpenAI API Key";
pub const KEY_WARNING: &str = "Enter your OpenAI API key above to start";
pub const KEY_SET_PLACEHOLDER: &str = "Key set for this session";
pub const MODE_LABEL: &str = "Choose a function:";
pub const UPLOAD_LABEL: &str = "Upload PDF";
pub const PREVIEW_LABEL: &str = "Extracted Text";
pub const EXTRACTING_NOTICE: &str = "Extracting text...";
pub const FOOTER: &str = "Made with \u{2764}\u{FE0F} using Rust and OpenAI.";

pub const ROUTE_PAGE: &str = "/";
pub const ROUTE_CREDENTIAL: &str = "/credential";
pub const ROUTE_MODE: &str = "/mode";
pub const ROUTE_SUBMIT: &str = "/submit";
pub const ROUTE_UPLOAD: &str = "/upload";

pub const FIELD_KEY: &str = "api_key";
pub const FIELD_MODE: &str = "mode";
pub const FIELD_TEXT: &str = "text";
pub const FIELD_PDF: &str = "pdf";

/// Seconds between automatic reloads while work is pending.
pub const BUSY_REFRESH_SECS: u32 = 2;

pub fn header(mode: Mode) -> &'static str {
    match mode {
        Mode::AskQuestion => "Ask a Legal Research Question",
        Mode::SummarizeText => "Summarize Legal Document (Paste Text)",
        Mode::SummarizePdf => "Upload and Summarize PDF Legal Document",
    }
}

pub fn submit_label(mode: Mode) -> &'static str {
    match mode {
        Mode::AskQuestion => "Get AI Answer",
        Mode::SummarizeText => "Summarize Text",
        Mode::SummarizePdf => "Summarize PDF",
    }
}

pub fn busy_label(mode: Mode) -> &'static str {
    match mode {
        Mode::AskQuestion => "AI is researching...",
        Mode::SummarizeText => "Summarizing...",
        Mode::SummarizePdf => "Summarizing PDF...",
    }
}

/// Label and placeholder of the text field, if the mode has one.
pub fn text_field(mode: Mode) -> Option<(&'static str, &'static str)> {
    match mode {
        Mode::AskQuestion => Some((
            "Enter your question here:",
            "E.g., What is the precedent for breach of contract in New York?",
        )),
        Mode::SummarizeText => Some(("Paste the legal document or text here:", "")),
        Mode::SummarizePdf => None,
    }
}
