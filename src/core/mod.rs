//! Core: platform-agnostic building blocks shared by every front end
//!
//! Nothing in here performs I/O directly. Network calls go through
//! [`crate::client::Transport`], UI access through [`crate::app::Surface`],
//! and event wiring through [`binding::ControlHost`].

pub mod binding;
pub mod display;
pub mod endpoint;
pub mod history;
pub mod paths;
pub mod probe;
pub mod session;
