//! Terminal host for the carousel engine.
//!
//! One terminal column is one layout unit horizontally and one row is one
//! unit vertically. The engine never sees cells; this crate converts
//! between the two at the edges.

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod event;
pub mod images;
pub mod render;

pub use app::{App, run, run_app};
pub use cli::Cli;
