use crate::{build_prompt, AppState, Credential, Effect, Mode, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // Without a key nothing but key entry gets through.
    if !state.has_credential() && !matches!(msg, Msg::CredentialEntered(_)) {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::CredentialEntered(secret) => {
            state.set_credential(Credential::new(secret));
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            if !state.is_awaiting() {
                state.select_mode(mode);
            }
            Vec::new()
        }
        Msg::InputChanged(text) => {
            if !state.is_awaiting() {
                state.edit_input(text);
            }
            Vec::new()
        }
        Msg::PdfUploaded { file_name, bytes } => {
            if state.is_awaiting() || state.mode() != Mode::SummarizePdf {
                return (state, Vec::new());
            }
            vec![state.begin_upload(file_name, bytes)]
        }
        Msg::PdfExtracted { upload_id, result } => {
            state.apply_extraction(upload_id, result);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.is_awaiting() || state.is_extracting() {
                return (state, Vec::new());
            }
            // Empty input is a silent no-op.
            let Some(input) = state.required_input() else {
                return (state, Vec::new());
            };
            let prompt = build_prompt(state.mode(), input);
            state.begin_request(prompt).into_iter().collect()
        }
        Msg::CompletionDone { request_id, result } => {
            state.apply_completion(request_id, result);
            Vec::new()
        }
    };

    (state, effects)
}
