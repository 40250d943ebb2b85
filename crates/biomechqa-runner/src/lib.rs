//! biomechqa-runner: drives the external QA script.
//!
//! [`framing`] decodes the script's newline-delimited JSON output without any
//! I/O; [`runner`] spawns the script, feeds its stdout through the decoder,
//! and races it against the configured time ceiling.

pub mod framing;
pub mod runner;

pub use framing::{Frame, FrameParser, Outcome, ParserState};
pub use runner::{QaBackend, RunnerConfig, ScriptRunner, DEFAULT_TIMEOUT};
