use crate::{Mode, RequestId, UploadId, UploadedDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User entered the API key. An empty value closes the gate again.
    CredentialEntered(String),
    /// User picked one of the three modes.
    ModeSelected(Mode),
    /// User edited the text field of the active mode (question or pasted document).
    InputChanged(String),
    /// User uploaded a file in the PDF mode.
    PdfUploaded { file_name: String, bytes: Vec<u8> },
    /// Engine finished extracting an upload.
    PdfExtracted {
        upload_id: UploadId,
        result: Result<UploadedDocument, String>,
    },
    /// User clicked the submit button of the active mode.
    SubmitClicked,
    /// Engine completion for a request.
    CompletionDone {
        request_id: RequestId,
        result: Result<String, String>,
    },
}
