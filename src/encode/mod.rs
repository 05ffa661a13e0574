//! Encoding sinks.
//!
//! Sinks consume captured frames in order and are used by [`Camera::write_to_file`].
//!
//! [`Camera::write_to_file`]: crate::Camera::write_to_file

/// `ffmpeg`-based sinks (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
