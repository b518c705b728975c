//! Terminal emulation core: byte-stream parser, cell grid, and executor.
//!
//! Dataflow: raw bytes -> [`parser::Parser`] -> [`parser::Command`] stream ->
//! [`executor::Executor`] -> mutations on [`grid::Grid`] + [`rendition::Rendition`]
//! (plus bytes written back to the PTY master for status reports).

pub mod executor;
pub mod grid;
pub mod palette;
pub mod parser;
pub mod rendition;

pub use executor::{Executor, ExecutorMode, ProtocolError, Reply};
pub use grid::{Cell, Grid};
pub use palette::{ColorSource, Palette, Pixel};
pub use parser::{Command, Parser};
pub use rendition::Rendition;
