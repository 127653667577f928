//! Brief app: the single-page web shell around the core state machine.
pub mod platform;
