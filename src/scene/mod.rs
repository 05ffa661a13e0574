/// Shape arena, tree edits and traversals.
pub mod graph;
/// Scene-graph node and its kinds.
pub mod shape;
/// Concrete geometries.
pub mod shapes;
/// Bezier path shapes.
pub mod vshape;
