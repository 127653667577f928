use crate::{Credential, RequestId, UploadId};

/// IO the shell must perform on behalf of the state machine.
///
/// Every effect carries what it needs; the shell never reads session state to
/// execute one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestCompletion {
        request_id: RequestId,
        credential: Credential,
        prompt: String,
    },
    ExtractPdf {
        upload_id: UploadId,
        file_name: String,
        bytes: Vec<u8>,
    },
}
