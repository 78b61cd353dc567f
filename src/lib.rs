//! A slide-out drawer that hosts a data-entry form and coordinates its
//! asynchronous submission, for ratatui applications.
//!
//! The [`drawer`] module is the library proper. The remaining modules carry
//! the terminal runtime and the demo screen used by the binary.

pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod drawer;
pub mod form;
pub mod provider;
pub mod screen;
pub mod theme;
pub mod tui;
pub mod ui;

pub use theme::Theme;
