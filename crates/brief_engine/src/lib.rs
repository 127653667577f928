//! Brief engine: the completion client, PDF text extraction and command execution.
mod complete;
mod engine;
mod pdf;
mod types;

pub use complete::{
    build_messages, CompletionSettings, Completer, ReqwestCompleter, DEFAULT_ENDPOINT,
    DEFAULT_MODEL, SYSTEM_INSTRUCTION,
};
pub use engine::{Engine, EngineCommand, EngineEvent};
pub use pdf::{concatenate_pages, LopdfExtractor, PdfExtractor};
pub use types::{
    ChatMessage, CompletionError, ExtractError, ExtractedText, FailureKind, JobId, Role,
};
