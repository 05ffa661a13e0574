use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::camera::playback::{LoopBehavior, Playback};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, DEF_HEIGHT, DEF_WIDTH, Fps, Rgba8Premul};
use crate::foundation::error::{ProgError, ProgResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuRenderer;
use crate::scene::graph::{Scene, ShapeId};
use crate::style::color::Color;

/// Camera settings. Every field has a default, so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Loop behavior for playback and looped export.
    pub loop_behavior: LoopBehavior,
    /// Opaque color behind every captured frame.
    pub background: Color,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: DEF_WIDTH,
            height: DEF_HEIGHT,
            loop_behavior: LoopBehavior::Loop,
            background: Color::BLACK,
        }
    }
}

impl CameraConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> ProgResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read camera config '{}'", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parse camera config '{}'", path.display()))?;
        Ok(cfg)
    }
}

/// Rasterizes scene roots into an ordered list of frames.
#[derive(Debug)]
pub struct Camera {
    config: CameraConfig,
    canvas: Canvas,
    frames: Vec<FrameRGBA>,
}

impl Camera {
    /// Create a camera, validating the frame size.
    pub fn new(config: CameraConfig) -> ProgResult<Self> {
        let canvas = Canvas::new(config.width, config.height)?;
        Ok(Self {
            config,
            canvas,
            frames: Vec::new(),
        })
    }

    /// Camera settings.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Frame size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Captured frames, oldest first.
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }

    /// Drop all captured frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// A frame filled with the configured background.
    pub fn background_frame(&self) -> FrameRGBA {
        let [r, g, b] = self.config.background.to_rgb8();
        FrameRGBA::filled(self.canvas, Rgba8Premul::from_straight_rgba(r, g, b, 255))
    }

    /// Draw `roots` in order over the background and store the frame. Returns its index.
    pub fn capture_frame(&mut self, scene: &Scene, roots: &[ShapeId]) -> ProgResult<usize> {
        let base = self.background_frame();
        self.capture_frame_over(scene, roots, base)
    }

    /// Draw `roots` in order over `background` and store the frame. Returns its index.
    #[tracing::instrument(skip(self, scene, roots, background), fields(roots = roots.len()))]
    pub fn capture_frame_over(
        &mut self,
        scene: &Scene,
        roots: &[ShapeId],
        background: FrameRGBA,
    ) -> ProgResult<usize> {
        if background.width != self.canvas.width || background.height != self.canvas.height {
            return Err(ProgError::invalid_argument(format!(
                "background is {}x{}, camera is {}x{}",
                background.width, background.height, self.canvas.width, self.canvas.height
            )));
        }
        let mut renderer = CpuRenderer::over(background)?;
        for &root in roots {
            scene.draw(root, &mut renderer)?;
        }
        let frame = renderer.finish()?;
        self.frames.push(frame);
        let index = self.frames.len() - 1;
        tracing::debug!(index, "captured frame");
        Ok(index)
    }

    /// A playback cursor over the captured frames.
    pub fn playback(&self) -> Playback {
        Playback::new(self.frames.len(), self.config.loop_behavior)
    }

    /// Frame indices in export order.
    ///
    /// With `show_loop` and [`LoopBehavior::Reverse`], the frames are followed by the same frames
    /// backwards.
    pub fn export_order(&self, show_loop: bool) -> Vec<usize> {
        let n = self.frames.len();
        let mut order: Vec<usize> = (0..n).collect();
        if show_loop && self.config.loop_behavior == LoopBehavior::Reverse {
            order.extend((0..n).rev());
        }
        order
    }

    /// Stream frames in [`export_order`](Self::export_order) into `sink`.
    pub fn write_to_sink<S: FrameSink + ?Sized>(
        &self,
        sink: &mut S,
        fps: Fps,
        show_loop: bool,
    ) -> ProgResult<()> {
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps,
        })?;
        for (idx, frame) in self.export_order(show_loop).into_iter().enumerate() {
            sink.push_frame(idx, &self.frames[frame])?;
        }
        sink.end()
    }

    /// Encode the captured frames to an MP4 file with `ffmpeg`.
    ///
    /// The video is written to `<name>.temp.mp4` next to `path` and renamed once encoding
    /// succeeds.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub fn write_to_file(&self, path: &Path, fps: Fps, show_loop: bool) -> ProgResult<()> {
        if path.extension().and_then(|e| e.to_str()) != Some("mp4") {
            return Err(ProgError::invalid_argument(format!(
                "only .mp4 output is supported, got '{}'",
                path.display()
            )));
        }
        if self.frames.is_empty() {
            return Err(ProgError::invalid_argument("no frames captured"));
        }
        ensure_parent_dir(path)?;

        let temp = temp_path(path)?;
        let [r, g, b] = self.config.background.to_rgb8();
        let mut opts = FfmpegSinkOpts::new(&temp);
        opts.bg_rgba = [r, g, b, 255];
        let mut sink = FfmpegSink::new(opts);
        if let Err(e) = self.write_to_sink(&mut sink, fps, show_loop) {
            drop(sink);
            let _ = std::fs::remove_file(&temp);
            return Err(e);
        }

        std::fs::rename(&temp, path)
            .with_context(|| format!("move '{}' to '{}'", temp.display(), path.display()))?;
        tracing::info!(frames = self.frames.len(), fps = fps.get(), "wrote video");
        Ok(())
    }

    /// Write captured frame `index` as a PNG.
    pub fn save_png(&self, index: usize, path: &Path) -> ProgResult<()> {
        let frame = self.frames.get(index).ok_or_else(|| {
            ProgError::invalid_argument(format!(
                "frame {index} out of range ({} captured)",
                self.frames.len()
            ))
        })?;
        ensure_parent_dir(path)?;
        let data = if frame.premultiplied {
            unpremultiply(&frame.data)
        } else {
            frame.data.clone()
        };
        image::save_buffer_with_format(
            path,
            &data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(index, path = %path.display(), "wrote frame");
        Ok(())
    }
}

fn temp_path(path: &Path) -> ProgResult<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ProgError::invalid_argument(format!("'{}' has no file name", path.display()))
        })?;
    Ok(path.with_file_name(format!("{stem}.temp.mp4")))
}

fn unpremultiply(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for px in src.chunks_exact(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        for &c in &px[..3] {
            let v = (u16::from(c) * 255 + a / 2) / a;
            out.push(v.min(255) as u8);
        }
        out.push(px[3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/camera/capture.rs"]
mod tests;
