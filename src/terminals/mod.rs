//! Platform-specific terminal implementations.
//!
//! This module provides [`Terminal`](crate::Terminal) trait implementations
//! for the platforms the shell runs on:
//!
//! - **Unix/Linux**: [`StdioTerminal`] using termios over process stdin/stdout
//!
//! Each implementation handles raw-mode setup/teardown and the chunked key
//! reads the decoder expects.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::StdioTerminal;
