//! Vertex and fragment data passed through the pipeline

use crate::math::Vec3;

/// Vertex in framebuffer space, produced by an upstream clipping stage
///
/// The attribute count `A` is fixed by the active shading program and is
/// identical across all vertices of a draw.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct ClippedVertex<const A: usize> {
    /// Position: x,y in pixel-grid units, z as normalized depth
    pub fb_position: Vec3,
    /// Reciprocal of the homogeneous clip-space w coordinate
    pub inv_w: f32,
    /// Shading attributes
    pub attributes: [f32; A],
}

impl<const A: usize> ClippedVertex<A> {
    pub fn new(fb_position: Vec3, inv_w: f32, attributes: [f32; A]) -> Self {
        ClippedVertex { fb_position, inv_w, attributes }
    }
}

/// A single covered pixel sample produced by rasterization
///
/// `fb_position.x` and `fb_position.y` always lie at a pixel center
/// (integer + 0.5); z and the attributes are interpolated between the
/// primitive's endpoints. Fragments are ephemeral: constructed, handed to
/// the fragment sink, and discarded.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Fragment<const A: usize> {
    /// Pixel center position and interpolated depth
    pub fb_position: Vec3,
    /// Interpolated shading attributes
    pub attributes: [f32; A],
}
