use std::fmt;

use crate::view_model::{AppViewModel, PanelStyle, ResultPanel, UploadView};
use crate::{preview_text, Effect};

pub type RequestId = u64;
pub type UploadId = u64;

/// The API key of one session. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty secret; no other validation happens locally.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    AskQuestion,
    SummarizeText,
    SummarizePdf,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::AskQuestion, Mode::SummarizeText, Mode::SummarizePdf];

    pub fn label(self) -> &'static str {
        match self {
            Mode::AskQuestion => "Ask Legal Question",
            Mode::SummarizeText => "Summarize Text",
            Mode::SummarizePdf => "Summarize PDF Document",
        }
    }

    /// Stable form value used by the page.
    pub fn key(self) -> &'static str {
        match self {
            Mode::AskQuestion => "ask",
            Mode::SummarizeText => "text",
            Mode::SummarizePdf => "pdf",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Mode::ALL.into_iter().find(|mode| mode.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InputCollected,
    AwaitingCompletion,
    ResultDisplayed,
}

/// Text extracted from an uploaded PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub file_name: String,
    pub text: String,
    pub page_count: usize,
    /// 1-based numbers of pages that contributed nothing because extraction failed.
    pub failed_pages: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answer(String),
    Summary(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    credential: Option<Credential>,
    mode: Mode,
    phase: Phase,
    question: String,
    pasted_text: String,
    document: Option<UploadedDocument>,
    upload_error: Option<String>,
    pending_upload: Option<UploadId>,
    pending_request: Option<RequestId>,
    next_upload_id: UploadId,
    next_request_id: RequestId,
    outcome: Option<Outcome>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        self.pending_request.is_some()
    }

    pub fn is_extracting(&self) -> bool {
        self.pending_upload.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let input_text = match self.mode {
            Mode::AskQuestion => self.question.clone(),
            Mode::SummarizeText => self.pasted_text.clone(),
            Mode::SummarizePdf => String::new(),
        };
        let upload = self.document.as_ref().map(|doc| UploadView {
            file_name: doc.file_name.clone(),
            preview: preview_text(&doc.text),
            char_count: doc.text.chars().count(),
            page_count: doc.page_count,
            failed_pages: doc.failed_pages.clone(),
        });
        let result = self.outcome.as_ref().map(|outcome| match outcome {
            Outcome::Answer(text) => ResultPanel {
                style: PanelStyle::Success,
                text: text.clone(),
            },
            Outcome::Summary(text) => ResultPanel {
                style: PanelStyle::Info,
                text: text.clone(),
            },
            Outcome::Failed(message) => ResultPanel {
                style: PanelStyle::Error,
                text: message.clone(),
            },
        });

        AppViewModel {
            gate_open: self.has_credential(),
            mode: self.mode,
            phase: self.phase,
            input_text,
            upload,
            upload_error: self.upload_error.clone(),
            extracting: self.is_extracting(),
            busy: self.is_awaiting(),
            result,
        }
    }

    pub(crate) fn set_credential(&mut self, credential: Option<Credential>) {
        if credential.is_none() {
            // Closing the gate abandons whatever was in flight.
            self.pending_request = None;
            self.pending_upload = None;
            self.outcome = None;
            self.phase = Phase::Idle;
        }
        self.credential = credential;
        self.dirty = true;
    }

    pub(crate) fn select_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.question.clear();
        self.pasted_text.clear();
        self.document = None;
        self.upload_error = None;
        self.pending_upload = None;
        self.outcome = None;
        self.phase = Phase::Idle;
        self.dirty = true;
    }

    pub(crate) fn edit_input(&mut self, text: String) {
        match self.mode {
            Mode::AskQuestion => self.question = text,
            Mode::SummarizeText => self.pasted_text = text,
            Mode::SummarizePdf => return,
        }
        self.outcome = None;
        self.phase = self.collected_phase();
        self.dirty = true;
    }

    pub(crate) fn begin_upload(&mut self, file_name: String, bytes: Vec<u8>) -> Effect {
        self.next_upload_id += 1;
        let upload_id = self.next_upload_id;
        self.pending_upload = Some(upload_id);
        self.document = None;
        self.upload_error = None;
        self.outcome = None;
        self.phase = Phase::Idle;
        self.dirty = true;
        Effect::ExtractPdf {
            upload_id,
            file_name,
            bytes,
        }
    }

    pub(crate) fn apply_extraction(
        &mut self,
        upload_id: UploadId,
        result: Result<UploadedDocument, String>,
    ) {
        if self.pending_upload != Some(upload_id) {
            return;
        }
        self.pending_upload = None;
        match result {
            Ok(document) => {
                self.document = Some(document);
                self.upload_error = None;
            }
            Err(message) => {
                self.document = None;
                self.upload_error = Some(message);
            }
        }
        self.phase = self.collected_phase();
        self.dirty = true;
    }

    /// Raw input of the active mode, if any was collected.
    pub(crate) fn required_input(&self) -> Option<&str> {
        let input = match self.mode {
            Mode::AskQuestion => self.question.as_str(),
            Mode::SummarizeText => self.pasted_text.as_str(),
            Mode::SummarizePdf => self.document.as_ref()?.text.as_str(),
        };
        (!input.is_empty()).then_some(input)
    }

    pub(crate) fn begin_request(&mut self, prompt: String) -> Option<Effect> {
        let credential = self.credential.clone()?;
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending_request = Some(request_id);
        self.outcome = None;
        self.phase = Phase::AwaitingCompletion;
        self.dirty = true;
        Some(Effect::RequestCompletion {
            request_id,
            credential,
            prompt,
        })
    }

    pub(crate) fn apply_completion(&mut self, request_id: RequestId, result: Result<String, String>) {
        if self.pending_request != Some(request_id) {
            return;
        }
        self.pending_request = None;
        self.outcome = Some(match result {
            Ok(text) if self.mode == Mode::AskQuestion => Outcome::Answer(text),
            Ok(text) => Outcome::Summary(text),
            Err(message) => Outcome::Failed(message),
        });
        self.phase = Phase::ResultDisplayed;
        self.dirty = true;
    }

    fn collected_phase(&self) -> Phase {
        if self.required_input().is_some() {
            Phase::InputCollected
        } else {
            Phase::Idle
        }
    }
}
