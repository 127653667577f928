use std::sync::Arc;

use engine_logging::{engine_info, engine_warn, text_summary};

use crate::complete::{CompletionSettings, Completer, ReqwestCompleter};
use crate::pdf::{LopdfExtractor, PdfExtractor};
use crate::{CompletionError, ExtractError, ExtractedText, JobId};

// No Debug: the credential must not reach logs.
pub enum EngineCommand {
    Complete {
        job_id: JobId,
        credential: String,
        prompt: String,
    },
    Extract {
        job_id: JobId,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CompletionFinished {
        job_id: JobId,
        result: Result<String, CompletionError>,
    },
    ExtractionFinished {
        job_id: JobId,
        result: Result<ExtractedText, ExtractError>,
    },
}

/// Executes engine commands. Each command is one awaited unit of work; nothing is retried.
#[derive(Clone)]
pub struct Engine {
    completer: Arc<dyn Completer>,
    extractor: Arc<dyn PdfExtractor>,
}

impl Engine {
    pub fn new(settings: CompletionSettings) -> Self {
        Self::with_parts(
            Arc::new(ReqwestCompleter::new(settings)),
            Arc::new(LopdfExtractor),
        )
    }

    pub fn with_parts(completer: Arc<dyn Completer>, extractor: Arc<dyn PdfExtractor>) -> Self {
        Self {
            completer,
            extractor,
        }
    }

    pub async fn execute(&self, command: EngineCommand) -> EngineEvent {
        match command {
            EngineCommand::Complete {
                job_id,
                credential,
                prompt,
            } => {
                engine_info!("Completion job_id={} prompt={}", job_id, text_summary(&prompt));
                let result = self.completer.complete(&credential, &prompt).await;
                match &result {
                    Ok(text) => {
                        engine_info!("Completion job_id={} done reply={}", job_id, text_summary(text))
                    }
                    Err(err) => engine_warn!("Completion job_id={} failed: {}", job_id, err),
                }
                EngineEvent::CompletionFinished { job_id, result }
            }
            EngineCommand::Extract { job_id, bytes } => {
                engine_info!("Extraction job_id={} bytes={}", job_id, bytes.len());
                let extractor = self.extractor.clone();
                // Parsing is CPU-bound and a malformed file may panic inside the parser.
                let result = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
                    .await
                    .unwrap_or_else(|join_err| Err(ExtractError::Crashed(join_err.to_string())));
                if let Err(err) = &result {
                    engine_warn!("Extraction job_id={} failed: {}", job_id, err);
                }
                EngineEvent::ExtractionFinished { job_id, result }
            }
        }
    }
}
