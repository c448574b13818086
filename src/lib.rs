//! Navigation guard for single-page application sessions.
//!
//! SYSTEM CONTEXT
//! ==============
//! A router calls into [`navigation::Navigator`] once per route change. The
//! navigator asks [`gate::SessionGatekeeper`] whether the destination may be
//! entered; the gatekeeper consults the session's [`state::AuthState`] and,
//! when a token is present, the remote identity endpoint behind
//! [`identity::IdentityProvider`].

pub mod config;
pub mod error;
pub mod gate;
pub mod identity;
pub mod navigation;
pub mod state;

pub use gate::{Decision, Denial, Destination, RevalidationPolicy, SessionGatekeeper};
pub use navigation::{Navigation, Navigator};
pub use state::{AuthState, UserRecord};
