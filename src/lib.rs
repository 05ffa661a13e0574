//! Programation is a small 2D vector-graphics animation engine.
//!
//! A [`Scene`] holds a tree of [`Shape`]s, each carrying a local [`Transform`] and a stroke/fill
//! style. Path shapes store cubic bezier geometry as interleaved anchor/handle arrays. A
//! [`Camera`] rasterizes the tree once per captured frame, and the resulting frames can be
//! stepped through with a [`Playback`] cursor or encoded to MP4 through `ffmpeg`.
//!
//! - Build shapes with [`Shape::new`] and the kind constructors in [`scene::shapes`]
//! - Insert them into a [`Scene`] and wire the tree with [`Scene::add`]
//! - Capture frames with [`Camera::capture_frame`] and export with [`Camera::write_to_file`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame accumulation and loop stepping.
pub mod camera;
/// Encoding sinks (`ffmpeg` MP4 output).
pub mod encode;
/// Affine transforms, bezier math and path data.
pub mod geometry;
/// Drawing backends.
pub mod render;
/// Scene graph and shape kinds.
pub mod scene;
/// Colors and stroke/fill resolution.
pub mod style;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, Point, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ProgError, ProgResult};

pub use crate::camera::capture::{Camera, CameraConfig};
pub use crate::camera::playback::{LoopBehavior, Playback};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::geometry::path::PathData;
pub use crate::geometry::transform::Transform;
pub use crate::render::backend::{DrawState, FrameRGBA, Primitive, Renderer};
pub use crate::render::cpu::CpuRenderer;
pub use crate::render::recording::{RecordedEvent, RecordingRenderer};
pub use crate::scene::graph::{Scene, ShapeId};
pub use crate::scene::shape::{Shape, ShapeKind};
pub use crate::scene::vshape::{VShape, VShapeConfig};
pub use crate::style::color::{Color, ColorSpec};
pub use crate::style::paint::{Brush, Pen, StyleConfig};
