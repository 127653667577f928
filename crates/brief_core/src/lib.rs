//! Brief core: pure session state machine, prompt templates and view-model helpers.
mod effect;
mod msg;
mod prompt;
mod state;
mod text;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use prompt::{build_prompt, SUMMARIZE_PDF_PREFIX, SUMMARIZE_TEXT_PREFIX};
pub use state::{
    AppState, Credential, Mode, Outcome, Phase, RequestId, UploadId, UploadedDocument,
};
pub use text::{
    preview_text, prompt_excerpt, PREVIEW_CHAR_LIMIT, PROMPT_CHAR_LIMIT, TRUNCATION_MARKER,
};
pub use update::update;
pub use view_model::{AppViewModel, PanelStyle, ResultPanel, UploadView};
