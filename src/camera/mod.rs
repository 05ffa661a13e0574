//! Frame capture and playback.
//!
//! A [`Camera`](capture::Camera) rasterizes scene roots into a growing list of frames; a
//! [`Playback`](playback::Playback) cursor walks those frames according to a [`LoopBehavior`]
//! (`playback::LoopBehavior`).

/// Frame capture, PNG and MP4 export.
pub mod capture;
/// Loop stepping over captured frames.
pub mod playback;
