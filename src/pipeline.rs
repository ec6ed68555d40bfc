//! Pipeline compositor
//!
//! Wires rasterization, depth testing, shading, and blending together
//! under a configuration fixed at construction. The compositor holds no
//! mutable state between draw calls; the framebuffer it writes is handed
//! in per draw.

use log::{trace, warn};

use crate::color::{add_pix, blend_pix, Rgba8, Rgba32};
use crate::framebuffer::Framebuffer;
use crate::program::Program;
use crate::raster::{rasterize_line, rasterize_point};
use crate::vertex::{ClippedVertex, Fragment};

/// Primitive grouping of the incoming vertex stream
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum PrimitiveKind {
    Points,
    Lines,
    Triangles,
}
impl Default for PrimitiveKind {
    fn default() -> PrimitiveKind {
        PrimitiveKind::Lines
    }
}

/// Blend group of the pipeline mode
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum BlendMode {
    /// Write the shaded color as-is
    Replace,
    /// Add the shaded color, scaled by its alpha, saturating
    Add,
    /// Source-over compositing
    Over,
}
impl Default for BlendMode {
    fn default() -> BlendMode {
        BlendMode::Replace
    }
}

/// Depth-test group of the pipeline mode
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum DepthTest {
    Always,
    Never,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}
impl Default for DepthTest {
    fn default() -> DepthTest {
        DepthTest::Less
    }
}

/// Interpolation group of the pipeline mode
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum Interpolation {
    /// All attributes take the first (provoking) vertex's values
    Flat,
    /// Perspective-correct interpolation using inv_w
    Smooth,
    /// Linear interpolation in screen space
    NoPerspective,
}
impl Default for Interpolation {
    fn default() -> Interpolation {
        Interpolation::Smooth
    }
}

impl BlendMode {
    /// Combine a shaded color with the color already in the framebuffer
    pub fn blend(self, src: Rgba32, dst: Rgba8) -> Rgba8 {
        match self {
            BlendMode::Replace => src.into(),
            BlendMode::Add => add_pix(dst, src.into()),
            BlendMode::Over => blend_pix(dst, src.into()),
        }
    }
}

impl DepthTest {
    /// Compare an incoming fragment depth against the stored depth
    pub fn passes(self, new: f32, stored: f32) -> bool {
        match self {
            DepthTest::Always => true,
            DepthTest::Never => false,
            DepthTest::Less => new < stored,
            DepthTest::LessOrEqual => new <= stored,
            DepthTest::Greater => new > stored,
            DepthTest::GreaterOrEqual => new >= stored,
        }
    }
}

/// Mode flags of a pipeline: one value from each capability group
#[derive(Debug,Default,PartialEq,Copy,Clone)]
pub struct PipelineMode {
    pub blend: BlendMode,
    pub depth: DepthTest,
    pub interp: Interpolation,
}

impl PipelineMode {
    pub fn new(blend: BlendMode, depth: DepthTest, interp: Interpolation) -> Self {
        PipelineMode { blend, depth, interp }
    }
}

/// Configured rendering pipeline
///
/// The configuration triple of primitive kind, shading program, and mode
/// flags is resolved once at construction and is immutable afterwards;
/// `draw` may be called any number of times.
#[derive(Debug)]
pub struct Pipeline<P, const A: usize> {
    program: P,
    primitive: PrimitiveKind,
    mode: PipelineMode,
}

impl<P, const A: usize> Pipeline<P, A>
    where P: Program<A>
{
    pub fn new(primitive: PrimitiveKind, program: P, mode: PipelineMode) -> Self {
        Pipeline { program, primitive, mode }
    }

    /// Draw a clipped vertex stream into the framebuffer
    ///
    /// The stream is grouped by the configured primitive kind; for lines,
    /// consecutive pairs form a strip. Every produced fragment runs depth
    /// test, shading, and blending in order, short-circuiting on a failed
    /// depth test.
    pub fn draw(&self, fb: &mut Framebuffer, vertices: &[ClippedVertex<A>]) {
        trace!("draw: {} vertices as {:?}", vertices.len(), self.primitive);
        match self.primitive {
            PrimitiveKind::Points => {
                for v in vertices {
                    rasterize_point(v, |frag| self.process(fb, frag));
                }
            }
            PrimitiveKind::Lines => {
                for pair in vertices.windows(2) {
                    rasterize_line(&pair[0], &pair[1], self.mode.interp,
                                   |frag| self.process(fb, frag));
                }
            }
            PrimitiveKind::Triangles => {
                warn!("triangle rasterization is handled by an external stage; draw skipped");
            }
        }
    }

    fn process(&self, fb: &mut Framebuffer, frag: Fragment<A>) {
        let x = frag.fb_position.x.floor() as i64;
        let y = frag.fb_position.y.floor() as i64;
        // fragments outside the framebuffer are legal rasterizer output
        if !fb.contains(x, y) {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let z = frag.fb_position.z;
        if !self.mode.depth.passes(z, fb.depth(x, y)) {
            return;
        }
        let color = self.program.shade(&frag);
        let dst = fb.get(x, y);
        fb.set(x, y, self.mode.blend.blend(color, dst));
        fb.set_depth(x, y, z);
    }
}
