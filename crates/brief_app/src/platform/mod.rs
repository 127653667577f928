mod app;
mod effects;
pub mod logging;
mod session;
mod ui;

pub use app::{router, run_app, AppContext, ServerSettings};
pub use effects::EffectRunner;
pub use session::{Session, SessionStore, SESSION_COOKIE};
