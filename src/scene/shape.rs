use std::fmt;

use crate::geometry::transform::Transform;
use crate::render::backend::{DrawState, Primitive};
use crate::scene::graph::ShapeId;
use crate::scene::shapes::{BezierCurve, Line, Polyline, Rectangle, SliceShape, Symbol};
use crate::scene::vshape::VShape;
use crate::style::paint::{Brush, Pen, StyleConfig};

/// Geometry carried by a [`Shape`].
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// No geometry; only groups children.
    Group,
    /// Free-form bezier path.
    VShape(VShape),
    /// Path through a list of points.
    Polyline(Polyline),
    /// Closed rectangle path.
    Rectangle(Rectangle),
    /// Straight line.
    Line(Line),
    /// Open elliptic arc.
    Arc(SliceShape),
    /// Arc closed by its chord.
    Chord(SliceShape),
    /// Arc closed through the center.
    PieSlice(SliceShape),
    /// Raw SVG path.
    Symbol(Symbol),
    /// Sliceable cubic curve.
    BezierCurve(BezierCurve),
}

impl ShapeKind {
    /// Name used when a shape is not given one.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::VShape(_) => "VShape",
            Self::Polyline(_) => "Polyline",
            Self::Rectangle(_) => "Rectangle",
            Self::Line(_) => "Line",
            Self::Arc(_) => "Arc",
            Self::Chord(_) => "Chord",
            Self::PieSlice(_) => "PieSlice",
            Self::Symbol(_) => "Symbol",
            Self::BezierCurve(_) => "BezierCurve",
        }
    }

    /// Path geometry of the kinds that store bezier points.
    pub fn vshape(&self) -> Option<&VShape> {
        match self {
            Self::VShape(v) => Some(v),
            Self::Polyline(p) => Some(p.vshape()),
            Self::Rectangle(r) => Some(r.vshape()),
            _ => None,
        }
    }

    /// Mutable path geometry of the kinds that store bezier points.
    pub fn vshape_mut(&mut self) -> Option<&mut VShape> {
        match self {
            Self::VShape(v) => Some(v),
            Self::Polyline(p) => Some(p.vshape_mut()),
            Self::Rectangle(r) => Some(r.vshape_mut()),
            _ => None,
        }
    }

    /// What the shape draws itself, excluding children.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Group => None,
            Self::VShape(_) | Self::Polyline(_) | Self::Rectangle(_) => self
                .vshape()
                .filter(|v| v.has_points())
                .map(|v| Primitive::Path(v.path().clone())),
            Self::Line(l) => Some(Primitive::Line(l.bounds())),
            Self::Arc(s) => Some(Primitive::Arc {
                bounds: s.bounds,
                start: s.start_angle,
                end: s.end_angle,
            }),
            Self::Chord(s) => Some(Primitive::Chord {
                bounds: s.bounds,
                start: s.start_angle,
                end: s.end_angle,
            }),
            Self::PieSlice(s) => Some(Primitive::PieSlice {
                bounds: s.bounds,
                start: s.start_angle,
                end: s.end_angle,
            }),
            Self::Symbol(s) => Some(Primitive::Bez(s.bez_path().clone())),
            Self::BezierCurve(c) => c.primitive(),
        }
    }
}

impl From<VShape> for ShapeKind {
    fn from(v: VShape) -> Self {
        Self::VShape(v)
    }
}

impl From<Polyline> for ShapeKind {
    fn from(v: Polyline) -> Self {
        Self::Polyline(v)
    }
}

impl From<Rectangle> for ShapeKind {
    fn from(v: Rectangle) -> Self {
        Self::Rectangle(v)
    }
}

impl From<Line> for ShapeKind {
    fn from(v: Line) -> Self {
        Self::Line(v)
    }
}

impl From<Symbol> for ShapeKind {
    fn from(v: Symbol) -> Self {
        Self::Symbol(v)
    }
}

impl From<BezierCurve> for ShapeKind {
    fn from(v: BezierCurve) -> Self {
        Self::BezierCurve(v)
    }
}

/// Scene-graph node: geometry, style and a local transform.
///
/// Tree links and the cached transforms are owned by the [`Scene`](crate::Scene) the shape is
/// inserted into.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Display name; defaults to the kind's type name.
    pub name: String,
    /// Stroke and fill settings.
    pub style: StyleConfig,
    /// Local transform. `None` makes the shape use its parent's transform unchanged.
    pub transform: Option<Transform>,
    /// Geometry.
    pub kind: ShapeKind,
    pub(crate) parent_transform: Option<Transform>,
    pub(crate) global_transform: Transform,
    pub(crate) children: Vec<ShapeId>,
    pub(crate) parent: Option<ShapeId>,
}

impl Shape {
    /// A shape with default style and an identity local transform.
    pub fn new(kind: impl Into<ShapeKind>) -> Self {
        let kind = kind.into();
        Self {
            name: kind.type_name().to_owned(),
            style: StyleConfig::default(),
            transform: Some(Transform::IDENTITY),
            kind,
            parent_transform: None,
            global_transform: Transform::IDENTITY,
            children: Vec::new(),
            parent: None,
        }
    }

    /// An empty group.
    pub fn group() -> Self {
        Self::new(ShapeKind::Group)
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Set the local transform.
    pub fn with_transform(mut self, transform: Option<Transform>) -> Self {
        self.transform = transform;
        self
    }

    /// Set the transform inherited when the shape is a root.
    pub fn with_parent_transform(mut self, parent: Option<Transform>) -> Self {
        self.parent_transform = parent;
        self
    }

    /// Transform last received from the parent.
    pub fn parent_transform(&self) -> Option<Transform> {
        self.parent_transform
    }

    /// Cached result of the last propagation.
    pub fn global_transform(&self) -> Transform {
        self.global_transform
    }

    /// Children in draw order.
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    /// Owning shape, if any.
    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    /// Resolved stroke.
    pub fn pen(&self) -> Option<Pen> {
        self.style.pen()
    }

    /// Resolved fill.
    pub fn brush(&self) -> Option<Brush> {
        self.style.brush()
    }

    /// Global transform with the resolved pen and brush.
    pub fn draw_state(&self) -> DrawState {
        DrawState {
            transform: self.global_transform,
            pen: self.pen(),
            brush: self.brush(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shape.rs"]
mod tests;
