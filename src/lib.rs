//! Grid-based snake simulation.
//!
//! The engine ([`session::GameSession`] and the modules it builds on) is pure
//! and synchronous: it advances one tick per call and hands back a
//! [`session::Snapshot`]. [`manager::SessionManager`] adds restarts and the
//! persisted high score; the `renderer`, `ui` and `terminal_runtime` modules
//! are the terminal frontend used by the binary.

pub mod collision;
pub mod config;
pub mod error;
pub mod goal;
pub mod grid;
pub mod input;
pub mod logging;
pub mod manager;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
