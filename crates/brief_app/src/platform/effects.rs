use brief_core::{Effect, Msg, UploadedDocument};
use brief_engine::{Engine, EngineCommand, EngineEvent};
use engine_logging::engine_info;

/// Runs core effects on the engine and turns the outcome back into a message.
pub struct EffectRunner {
    engine: Engine,
}

impl EffectRunner {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub async fn run(&self, effect: Effect) -> Msg {
        match effect {
            Effect::RequestCompletion {
                request_id,
                credential,
                prompt,
            } => {
                let command = EngineCommand::Complete {
                    job_id: request_id,
                    credential: credential.expose().to_string(),
                    prompt,
                };
                map_event(self.engine.execute(command).await, None)
            }
            Effect::ExtractPdf {
                upload_id,
                file_name,
                bytes,
            } => {
                engine_info!("ExtractPdf upload_id={} file={}", upload_id, file_name);
                let command = EngineCommand::Extract {
                    job_id: upload_id,
                    bytes,
                };
                map_event(self.engine.execute(command).await, Some(file_name))
            }
        }
    }
}

fn map_event(event: EngineEvent, file_name: Option<String>) -> Msg {
    match event {
        EngineEvent::CompletionFinished { job_id, result } => Msg::CompletionDone {
            request_id: job_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::ExtractionFinished { job_id, result } => Msg::PdfExtracted {
            upload_id: job_id,
            result: result
                .map(|extracted| UploadedDocument {
                    file_name: file_name.unwrap_or_default(),
                    text: extracted.text,
                    page_count: extracted.page_count,
                    failed_pages: extracted.failed_pages,
                })
                .map_err(|err| err.to_string()),
        },
    }
}
