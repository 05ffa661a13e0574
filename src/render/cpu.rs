use crate::foundation::core::{Affine, BezPath, Canvas};
use crate::foundation::error::{ProgError, ProgResult};
use crate::foundation::math::premul_over_in_place;
use crate::render::backend::{DrawState, FrameRGBA, Primitive, Renderer};

/// Raster backend powered by `vello_cpu`.
///
/// Draw calls are recorded into a `vello_cpu::RenderContext` and rasterized by [`finish`]. When a
/// base frame is given, the rasterized shapes are composited over it.
///
/// [`finish`]: CpuRenderer::finish
pub struct CpuRenderer {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    stack: Vec<DrawState>,
    base: Option<FrameRGBA>,
}

impl CpuRenderer {
    /// Renderer over a transparent canvas.
    pub fn new(canvas: Canvas) -> ProgResult<Self> {
        let (width, height) = surface_size(canvas)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            stack: Vec::new(),
            base: None,
        })
    }

    /// Renderer that draws on top of an existing premultiplied frame.
    pub fn over(base: FrameRGBA) -> ProgResult<Self> {
        let canvas = Canvas::new(base.width, base.height)?;
        if base.data.len() != canvas.rgba_len() {
            return Err(ProgError::invalid_argument(
                "base frame data size mismatch with width*height*4",
            ));
        }
        if !base.premultiplied {
            return Err(ProgError::invalid_argument(
                "base frame must be premultiplied",
            ));
        }
        let mut out = Self::new(canvas)?;
        out.base = Some(base);
        Ok(out)
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> ProgResult<FrameRGBA> {
        let (width, height) = surface_size(self.canvas)?;
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        match self.base.take() {
            Some(mut base) => {
                premul_over_in_place(&mut base.data, pixmap.data_as_u8_slice())?;
                Ok(base)
            }
            None => Ok(FrameRGBA {
                width: self.canvas.width,
                height: self.canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            }),
        }
    }
}

impl Renderer for CpuRenderer {
    fn push_state(&mut self, state: &DrawState) {
        self.stack.push(state.clone());
    }

    fn pop_state(&mut self) {
        self.stack.pop();
    }

    fn draw(&mut self, primitive: &Primitive) -> ProgResult<()> {
        let Some(state) = self.stack.last() else {
            return Err(ProgError::invalid_argument(
                "draw called without a pushed draw state",
            ));
        };
        let brush = state.brush.filter(|_| primitive.is_fillable());
        let pen = state.pen;
        if brush.is_none() && pen.is_none() {
            return Ok(());
        }
        let path = primitive.to_bez_path();
        if path.elements().is_empty() {
            return Ok(());
        }
        let cpu_path = bezpath_to_cpu(&path);

        self.ctx
            .set_transform(affine_to_cpu(state.transform.to_affine()));
        if let Some(brush) = brush {
            let [r, g, b, a] = brush.rgba8();
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            self.ctx.fill_path(&cpu_path);
        }
        if let Some(pen) = pen {
            let [r, g, b, a] = pen.rgba8();
            self.ctx
                .set_stroke(vello_cpu::kurbo::Stroke::new(pen.width));
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            self.ctx.stroke_path(&cpu_path);
        }
        Ok(())
    }
}

fn surface_size(canvas: Canvas) -> ProgResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| ProgError::invalid_argument("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| ProgError::invalid_argument("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
