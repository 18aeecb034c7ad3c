//! Native front end: reqwest transport, terminal surface, tokio spawner

mod terminal;
mod transport;

pub use terminal::TerminalSurface;
pub use transport::HttpTransport;

use std::rc::Rc;

use crate::app::{LocalTask, Spawner};

/// Spawner backed by `tokio::task::spawn_local`. Must be called inside a `LocalSet`.
pub fn local_spawner() -> Spawner {
    Rc::new(|task: LocalTask| {
        tokio::task::spawn_local(task);
    })
}
