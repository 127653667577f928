use std::sync::{Arc, Mutex};

use brief_engine::{
    CompletionError, Completer, Engine, EngineCommand, EngineEvent, ExtractError, ExtractedText,
    FailureKind, PdfExtractor,
};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct RecordingCompleter {
    calls: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait::async_trait]
impl Completer for RecordingCompleter {
    async fn complete(&self, credential: &str, prompt: &str) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.to_string(), prompt.to_string()));
        if self.fail {
            Err(CompletionError {
                kind: FailureKind::QuotaExceeded,
                message: "You exceeded your current quota".to_string(),
            })
        } else {
            Ok(format!("echo: {prompt}"))
        }
    }
}

struct FixedExtractor;

impl PdfExtractor for FixedExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        Ok(ExtractedText {
            text: String::from_utf8_lossy(bytes).into_owned(),
            page_count: 1,
            failed_pages: Vec::new(),
        })
    }
}

struct PanickingExtractor;

impl PdfExtractor for PanickingExtractor {
    fn extract(&self, _bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        panic!("parser bug");
    }
}

#[tokio::test]
async fn completion_command_reaches_completer_once() {
    let completer = Arc::new(RecordingCompleter::default());
    let engine = Engine::with_parts(completer.clone(), Arc::new(FixedExtractor));

    let event = engine
        .execute(EngineCommand::Complete {
            job_id: 3,
            credential: "sk-test".to_string(),
            prompt: "question".to_string(),
        })
        .await;

    assert_eq!(
        event,
        EngineEvent::CompletionFinished {
            job_id: 3,
            result: Ok("echo: question".to_string()),
        }
    );
    assert_eq!(
        *completer.calls.lock().unwrap(),
        vec![("sk-test".to_string(), "question".to_string())]
    );
}

#[tokio::test]
async fn provider_failure_is_reported_not_retried() {
    let completer = Arc::new(RecordingCompleter {
        fail: true,
        ..RecordingCompleter::default()
    });
    let engine = Engine::with_parts(completer.clone(), Arc::new(FixedExtractor));

    let event = engine
        .execute(EngineCommand::Complete {
            job_id: 1,
            credential: "sk-test".to_string(),
            prompt: "question".to_string(),
        })
        .await;

    match event {
        EngineEvent::CompletionFinished { result: Err(err), .. } => {
            assert_eq!(err.kind, FailureKind::QuotaExceeded)
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(completer.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn extraction_runs_off_the_async_thread() {
    let engine = Engine::with_parts(Arc::new(RecordingCompleter::default()), Arc::new(FixedExtractor));

    let event = engine
        .execute(EngineCommand::Extract {
            job_id: 9,
            bytes: b"Hello ".to_vec(),
        })
        .await;

    match event {
        EngineEvent::ExtractionFinished {
            job_id: 9,
            result: Ok(extracted),
        } => assert_eq!(extracted.text, "Hello "),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn parser_panic_becomes_error() {
    let engine = Engine::with_parts(
        Arc::new(RecordingCompleter::default()),
        Arc::new(PanickingExtractor),
    );

    let event = engine
        .execute(EngineCommand::Extract {
            job_id: 2,
            bytes: Vec::new(),
        })
        .await;

    match event {
        EngineEvent::ExtractionFinished {
            result: Err(ExtractError::Crashed(_)),
            ..
        } => {}
        other => panic!("unexpected event {other:?}"),
    }
}
