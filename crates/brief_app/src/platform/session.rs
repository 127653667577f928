use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use brief_core::{update, AppState, AppViewModel, Effect, Msg};
use engine_logging::{engine_debug, engine_info};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "brief_session";

struct SessionEntry {
    state: AppState,
    last_seen: Instant,
}

/// One browser session. Cloning shares the same state.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    entry: Arc<Mutex<SessionEntry>>,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Applies `msg` to this session's state and returns the effects to run.
    ///
    /// The lock is released before returning; effects are never run under it.
    pub fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let kind = msg_kind(&msg);
        let mut entry = lock(&self.entry);
        let state = std::mem::take(&mut entry.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            engine_debug!(
                "Session {} applied {} -> phase {:?}",
                self.id,
                kind,
                state.phase()
            );
        }
        entry.state = state;
        effects
    }

    pub fn view(&self) -> AppViewModel {
        lock(&self.entry).state.view()
    }
}

/// In-memory map of live sessions; nothing survives a restart.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Returns the session for `requested`, or a fresh one if it is unknown or
    /// expired. The flag is true when a new session was created.
    pub fn resolve(&self, requested: Option<Uuid>) -> (Session, bool) {
        let now = Instant::now();
        let mut sessions = lock(&self.sessions);

        if let Some(session) = requested.and_then(|id| sessions.get(&id)) {
            lock(&session.entry).last_seen = now;
            return (session.clone(), false);
        }

        let idle_timeout = self.idle_timeout;
        let before = sessions.len();
        sessions.retain(|_, session| {
            now.duration_since(lock(&session.entry).last_seen) < idle_timeout
        });
        if sessions.len() < before {
            engine_info!("Dropped {} idle sessions", before - sessions.len());
        }

        let session = Session {
            id: Uuid::new_v4(),
            entry: Arc::new(Mutex::new(SessionEntry {
                state: AppState::new(),
                last_seen: now,
            })),
        };
        sessions.insert(session.id, session.clone());
        engine_info!("Created session {} ({} live)", session.id, sessions.len());
        (session, true)
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A panic while holding a session lock leaves the last consistent state in place.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// Messages carry secrets and file contents; only their kind is logged.
fn msg_kind(msg: &Msg) -> &'static str {
    match msg {
        Msg::CredentialEntered(_) => "CredentialEntered",
        Msg::ModeSelected(_) => "ModeSelected",
        Msg::InputChanged(_) => "InputChanged",
        Msg::PdfUploaded { .. } => "PdfUploaded",
        Msg::PdfExtracted { .. } => "PdfExtracted",
        Msg::SubmitClicked => "SubmitClicked",
        Msg::CompletionDone { .. } => "CompletionDone",
    }
}
