/// Color parsing and normalization.
pub mod color;
/// Stroke/fill configuration and its resolution into pens and brushes.
pub mod paint;
