use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use programation::render::backend::Bounds;
use programation::scene::shapes::{BezierCurve, Line, Polyline, SliceShape, Symbol};
use programation::{
    Camera, CameraConfig, Color, Fps, LoopBehavior, Point, Scene, Shape, ShapeId, ShapeKind,
    StyleConfig, Transform,
};

#[derive(Parser, Debug)]
#[command(name = "programation", version)]
struct Cli {
    /// Camera configuration JSON. Quality and loop flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of the demo animation as a PNG.
    Frame(FrameArgs),
    /// Render the demo animation as an MP4 (requires `ffmpeg`).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output size preset.
    #[arg(long, value_enum)]
    quality: Option<Quality>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = programation_fps())]
    fps: u32,

    /// Output size preset.
    #[arg(long, value_enum)]
    quality: Option<Quality>,

    /// Loop behavior; `reverse` appends the frames backwards.
    #[arg(long = "loop", value_enum)]
    loop_behavior: Option<LoopChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    fn size(self) -> (u32, u32) {
        match self {
            Self::Low => (320, 240),
            Self::Medium => (640, 480),
            Self::High => (1280, 720),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LoopChoice {
    Once,
    Loop,
    Reverse,
}

impl From<LoopChoice> for LoopBehavior {
    fn from(v: LoopChoice) -> Self {
        match v {
            LoopChoice::Once => Self::Once,
            LoopChoice::Loop => Self::Loop,
            LoopChoice::Reverse => Self::Reverse,
        }
    }
}

fn programation_fps() -> u32 {
    Fps::default().get()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base = match &cli.config {
        Some(path) => CameraConfig::from_json_file(path)?,
        None => CameraConfig::default(),
    };
    match cli.cmd {
        Command::Frame(args) => cmd_frame(base, args),
        Command::Render(args) => cmd_render(base, args),
    }
}

fn cmd_frame(mut config: CameraConfig, args: FrameArgs) -> anyhow::Result<()> {
    if let Some(q) = args.quality {
        (config.width, config.height) = q.size();
    }
    let camera = capture_demo(config)?;
    camera
        .save_png(args.frame, &args.out)
        .with_context(|| format!("save frame {} to '{}'", args.frame, args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(mut config: CameraConfig, args: RenderArgs) -> anyhow::Result<()> {
    if let Some(q) = args.quality {
        (config.width, config.height) = q.size();
    }
    if let Some(l) = args.loop_behavior {
        config.loop_behavior = l.into();
    }
    let fps = Fps::new(args.fps)?;
    let camera = capture_demo(config)?;
    write_video(&camera, &args.out, fps)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_video(camera: &Camera, out: &Path, fps: Fps) -> anyhow::Result<()> {
    camera
        .write_to_file(out, fps, true)
        .with_context(|| format!("encode '{}'", out.display()))
}

struct Demo {
    scene: Scene,
    group: ShapeId,
    sliced: ShapeId,
    polyline: ShapeId,
}

/// The demo: a group of primitives and bezier curves, rotated and squashed, plus a closed
/// smooth polyline whose first anchor drifts toward the center.
fn build_demo(w: f64, h: f64) -> anyhow::Result<Demo> {
    let mut scene = Scene::new();
    let bounds = Bounds::new(0.0, 0.0, w, h)?;

    let child_style = StyleConfig::default()
        .with_stroke(Some(Color::from_name("red")?), 2.0, 1.0)
        .with_fill(Some(Color::from_name("green")?), 1.0);
    let mut children = Vec::new();
    let kinds: Vec<ShapeKind> = vec![
        Line::new(Point::new(0.0, 0.0), Point::new(w, h))?.into(),
        Line::new(Point::new(0.0, h), Point::new(w, 0.0))?.into(),
        ShapeKind::Arc(SliceShape::new(bounds, 45, 135)),
        ShapeKind::Chord(SliceShape::new(bounds, 135, 225)),
        ShapeKind::PieSlice(SliceShape::new(bounds, 225, 315)),
        Symbol::new(format!(
            "M {} {} C {} {}, {} {}, {} {} Z",
            w / 2.0,
            h / 2.0,
            2.0 * w / 3.0,
            h / 3.0,
            5.0 * w / 6.0,
            2.0 * h / 3.0,
            w,
            h / 2.0
        ))?
        .into(),
    ];
    for kind in kinds {
        children.push(scene.insert(Shape::new(kind).with_style(child_style.clone())));
    }

    let curve = |color: Color, width: f64| -> anyhow::Result<(BezierCurve, StyleConfig)> {
        let c = BezierCurve::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, h),
            Point::new(w, h),
            Point::new(w, 0.0),
        )?;
        Ok((c, StyleConfig::default().with_stroke(Some(color), width, 1.0)))
    };
    let (b1, s1) = curve("#FF00FF".parse()?, 8.0)?;
    let (b2, s2) = curve(Color::from_name("aqua")?, 5.0)?;
    let (b3, s3) = curve(Color::rgb(1.0, 0.0, 0.0)?, 2.0)?;
    children.push(scene.insert(Shape::new(b1).with_style(s1)));
    let sliced = scene.insert(
        Shape::new(b2.with_slice(0.5).with_close_path(true)).with_style(s2),
    );
    children.push(sliced);
    children.push(scene.insert(Shape::new(b3.with_slice(0.25)).with_style(s3)));

    let mut transform = Transform::shift(w / 8.0, h / 8.0);
    transform.then_rotate_about(w / 2.0, h / 2.0, 180.0);
    let group = scene.insert_with_children(
        Shape::group()
            .with_name("demo")
            .with_style(child_style)
            .with_transform(Some(transform))
            .with_parent_transform(Some(Transform::resize_about(w / 2.0, h / 2.0, 1.0, 0.5))),
        &children,
    )?;

    let polyline = Polyline::new(
        vec![
            Point::new(w / 4.0, h / 4.0),
            Point::new(w / 2.0, 3.0 * h / 4.0),
            Point::new(3.0 * w / 4.0, h / 4.0),
        ],
        true,
        true,
    )?;
    let polyline = scene.insert(
        Shape::new(polyline)
            .with_style(StyleConfig::default().with_stroke(Some(Color::WHITE), 1.0, 1.0)),
    );

    Ok(Demo {
        scene,
        group,
        sliced,
        polyline,
    })
}

fn capture_demo(config: CameraConfig) -> anyhow::Result<Camera> {
    let (w, h) = (f64::from(config.width), f64::from(config.height));
    let mut camera = Camera::new(config)?;
    let mut demo = build_demo(w, h)?;
    let parts = programation_fps();

    for i in 0..=parts {
        let f = f64::from(i) / f64::from(parts);
        let f2 = f64::from(i + 1) / f64::from(parts + 1);

        if let Some(ShapeKind::BezierCurve(b)) =
            demo.scene.get_mut(demo.sliced).map(|s| &mut s.kind)
        {
            b.slice(f);
        }
        demo.scene.update_transform(
            demo.group,
            Some(Transform::resize_about(w / 2.0, h / 2.0, 2.0 * f2, f2)),
        )?;
        if let Some(ShapeKind::Polyline(p)) =
            demo.scene.get_mut(demo.polyline).map(|s| &mut s.kind)
        {
            p.set_anchor(0, Point::new(w / 2.0 * f2, h / 2.0 * f2))?;
        }
        camera.capture_frame(&demo.scene, &[demo.group, demo.polyline])?;
    }
    Ok(camera)
}
