//! Frame output.
//!
//! Rendered frames leave the crate through a [`sink::FrameSink`]: kept in memory for tests,
//! written as a numbered PNG sequence, or piped into a system `ffmpeg` process.

/// MP4 output through a system `ffmpeg`.
pub mod ffmpeg;
/// Numbered PNG output.
pub mod png;
/// The sink contract.
pub mod sink;
