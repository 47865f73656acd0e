//! Nibbles: a two-level terminal snake game.
//!
//! [`game::GameState`] is a pure state machine with no terminal I/O. The
//! binary drives it from key events and a tick timer and hands each
//! [`frame::TextFrame`] to the ratatui [`renderer`].

pub mod actor;
pub mod collectable;
pub mod config;
pub mod error;
pub mod frame;
pub mod game;
pub mod grid;
pub mod input;
pub mod level;
pub mod renderer;
pub mod terminal_runtime;
pub mod ui;
