/// Renderer trait, draw state, primitives and frames.
pub mod backend;
/// CPU raster backend powered by `vello_cpu`.
pub mod cpu;
/// Renderer that records calls.
pub mod recording;
