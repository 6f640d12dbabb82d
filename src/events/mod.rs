//! Event types and observers.
//!
//! Events provide a decoupled way for systems to communicate without direct
//! dependencies between them.
//!
//! Submodules:
//! - [`switchdebug`] – toggle the debug overlay on/off
//! - [`tilecollision`] – notifications emitted by the arcade physics step
pub mod switchdebug;
pub mod tilecollision;
