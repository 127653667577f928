use std::sync::Once;

use brief_core::{
    update, AppState, Effect, Mode, Msg, PanelStyle, Phase, SUMMARIZE_TEXT_PREFIX,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn unlocked() -> AppState {
    let (state, _) = update(AppState::new(), Msg::CredentialEntered("sk-test".to_string()));
    state
}

fn submit_text(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

fn sent_prompt(effects: &[Effect]) -> (u64, String) {
    match effects {
        [Effect::RequestCompletion {
            request_id, prompt, ..
        }] => (*request_id, prompt.clone()),
        other => panic!("expected one completion request, got {other:?}"),
    }
}

#[test]
fn gate_blocks_everything_until_key_entered() {
    init_logging();
    let state = AppState::new();
    assert!(!state.view().gate_open);

    for msg in [
        Msg::ModeSelected(Mode::SummarizeText),
        Msg::InputChanged("question".to_string()),
        Msg::SubmitClicked,
        Msg::PdfUploaded {
            file_name: "a.pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        },
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }

    let (next, effects) = update(state, Msg::CredentialEntered(String::new()));
    assert!(!next.view().gate_open);
    assert!(effects.is_empty());
}

#[test]
fn credential_is_carried_by_the_request_and_redacted() {
    init_logging();
    let (_state, effects) = submit_text(unlocked(), "Is a verbal contract binding?");
    match &effects[..] {
        [Effect::RequestCompletion { credential, .. }] => {
            assert_eq!(credential.expose(), "sk-test");
            assert_eq!(format!("{credential:?}"), "Credential(***)");
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn empty_submit_is_a_noop_in_every_mode() {
    init_logging();
    for mode in Mode::ALL {
        let (mut state, _) = update(unlocked(), Msg::ModeSelected(mode));
        state.consume_dirty();
        let before = state.clone();
        let (mut next, effects) = update(state, Msg::SubmitClicked);
        assert!(effects.is_empty(), "mode {mode:?}");
        assert_eq!(next, before);
        assert_eq!(next.view().result, None);
        assert_eq!(next.view().phase, Phase::Idle);
        assert!(!next.consume_dirty());
    }
}

#[test]
fn question_is_sent_verbatim_and_answer_is_success_panel() {
    init_logging();
    let question = "What is the precedent for breach of contract in New York?";
    let (state, effects) = submit_text(unlocked(), question);
    let (request_id, prompt) = sent_prompt(&effects);
    assert_eq!(prompt, question);
    assert_eq!(state.view().phase, Phase::AwaitingCompletion);
    assert!(state.view().busy);

    let (state, effects) = update(
        state,
        Msg::CompletionDone {
            request_id,
            result: Ok("See Hadley v Baxendale.".to_string()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::ResultDisplayed);
    assert!(!view.busy);
    let panel = view.result.expect("result panel");
    assert_eq!(panel.style, PanelStyle::Success);
    assert_eq!(panel.text, "See Hadley v Baxendale.");
}

#[test]
fn pasted_text_gets_prefix_and_info_panel() {
    init_logging();
    let (state, _) = update(unlocked(), Msg::ModeSelected(Mode::SummarizeText));
    let pasted = "THIS AGREEMENT is made on 1 May.\n".repeat(500);
    let (state, effects) = submit_text(state, &pasted);
    let (request_id, prompt) = sent_prompt(&effects);
    assert_eq!(prompt, format!("{SUMMARIZE_TEXT_PREFIX}{pasted}"));

    let (state, _) = update(
        state,
        Msg::CompletionDone {
            request_id,
            result: Ok("An agreement.".to_string()),
        },
    );
    assert_eq!(state.view().result.unwrap().style, PanelStyle::Info);
}

#[test]
fn failure_replaces_previous_result() {
    init_logging();
    let (state, effects) = submit_text(unlocked(), "first");
    let (first_id, _) = sent_prompt(&effects);
    let (state, _) = update(
        state,
        Msg::CompletionDone {
            request_id: first_id,
            result: Ok("first answer".to_string()),
        },
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    let (second_id, prompt) = sent_prompt(&effects);
    assert_eq!(prompt, "first");
    assert_ne!(first_id, second_id);
    // Stale result is gone as soon as the new request starts.
    assert_eq!(state.view().result, None);

    let (state, _) = update(
        state,
        Msg::CompletionDone {
            request_id: second_id,
            result: Err("unauthorized: Incorrect API key provided".to_string()),
        },
    );
    let panel = state.view().result.unwrap();
    assert_eq!(panel.style, PanelStyle::Error);
    assert_eq!(panel.text, "unauthorized: Incorrect API key provided");
}

#[test]
fn no_duplicate_submit_while_awaiting() {
    init_logging();
    let (state, effects) = submit_text(unlocked(), "question");
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::ModeSelected(Mode::SummarizePdf));
    assert!(effects.is_empty());
    assert_eq!(state.view().mode, Mode::AskQuestion);
    let (state, _) = update(state, Msg::InputChanged("edited".to_string()));
    assert_eq!(state.view().input_text, "question");
}

#[test]
fn stale_completion_is_discarded() {
    init_logging();
    let (state, effects) = submit_text(unlocked(), "question");
    let (request_id, _) = sent_prompt(&effects);

    let (mut state, _) = update(
        state,
        Msg::CompletionDone {
            request_id: request_id + 41,
            result: Ok("wrong".to_string()),
        },
    );
    assert!(state.consume_dirty());
    let before = state.clone();
    let (mut after, _) = update(
        state,
        Msg::CompletionDone {
            request_id: request_id + 41,
            result: Ok("wrong".to_string()),
        },
    );
    assert_eq!(after, before);
    assert!(!after.consume_dirty());
    assert!(after.view().busy);
}

#[test]
fn switching_modes_clears_result() {
    init_logging();
    let (state, effects) = submit_text(unlocked(), "question");
    let (request_id, _) = sent_prompt(&effects);
    let (state, _) = update(
        state,
        Msg::CompletionDone {
            request_id,
            result: Ok("answer".to_string()),
        },
    );
    assert!(state.view().result.is_some());

    let (state, effects) = update(state, Msg::ModeSelected(Mode::SummarizeText));
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.result, None);
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.input_text, "");
}

#[test]
fn selecting_active_mode_keeps_result() {
    init_logging();
    let (state, effects) = submit_text(unlocked(), "question");
    let (request_id, _) = sent_prompt(&effects);
    let (state, _) = update(
        state,
        Msg::CompletionDone {
            request_id,
            result: Ok("answer".to_string()),
        },
    );

    let (state, _) = update(state, Msg::ModeSelected(Mode::AskQuestion));
    assert!(state.view().result.is_some());
}

#[test]
fn editing_input_returns_to_collected_and_hides_result() {
    init_logging();
    let (state, effects) = submit_text(unlocked(), "question");
    let (request_id, _) = sent_prompt(&effects);
    let (state, _) = update(
        state,
        Msg::CompletionDone {
            request_id,
            result: Ok("answer".to_string()),
        },
    );

    let (state, _) = update(state, Msg::InputChanged("another question".to_string()));
    assert_eq!(state.view().result, None);
    assert_eq!(state.view().phase, Phase::InputCollected);

    let (state, _) = update(state, Msg::InputChanged(String::new()));
    assert_eq!(state.view().phase, Phase::Idle);
}

#[test]
fn clearing_key_abandons_pending_request() {
    init_logging();
    let (state, effects) = submit_text(unlocked(), "question");
    let (request_id, _) = sent_prompt(&effects);

    let (state, _) = update(state, Msg::CredentialEntered(String::new()));
    assert!(!state.view().gate_open);
    assert!(!state.view().busy);

    let (state, _) = update(state, Msg::CredentialEntered("sk-other".to_string()));
    let (state, _) = update(
        state,
        Msg::CompletionDone {
            request_id,
            result: Ok("late".to_string()),
        },
    );
    assert_eq!(state.view().result, None);

    let (_state, effects) = update(state, Msg::SubmitClicked);
    match &effects[..] {
        [Effect::RequestCompletion { credential, .. }] => {
            assert_eq!(credential.expose(), "sk-other")
        }
        other => panic!("unexpected effects {other:?}"),
    }
}
