/// Bezier evaluation, splitting and slicing.
pub mod bezier;
/// Interleaved cubic path data and its string form.
pub mod path;
/// Smooth and flat handle computation.
pub mod spline;
/// Affine 2D transforms.
pub mod transform;
