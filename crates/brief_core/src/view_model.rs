use crate::{Mode, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStyle {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub style: PanelStyle,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub file_name: String,
    /// Truncated extraction shown read-only on the page.
    pub preview: String,
    pub char_count: usize,
    pub page_count: usize,
    pub failed_pages: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// False until a key has been entered; the page then shows only the key field.
    pub gate_open: bool,
    pub mode: Mode,
    pub phase: Phase,
    pub input_text: String,
    pub upload: Option<UploadView>,
    pub upload_error: Option<String>,
    pub extracting: bool,
    pub busy: bool,
    pub result: Option<ResultPanel>,
}
