//! The external collaborators `term-core` depends on: PTY provisioning,
//! shell detection, the key-to-bytes input encoder, and the
//! `Renderer`/`WindowSystem` trait definitions a concrete backend (see
//! `term-renderer`) implements.

pub mod input_encoder;
pub mod pty;
pub mod shell;
pub mod window;

pub use input_encoder::{encode_key, Key};
pub use pty::PtyHandle;
pub use shell::{detect_shell, shell_args};
pub use window::{CellMetrics, FontStyle, Renderer, WindowEvent, WindowSystem};
