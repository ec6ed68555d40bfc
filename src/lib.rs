
/// How does this work
///    pipe = Pipeline::new( PrimitiveKind::Lines, program, mode )
///    pipe.draw( fb, vertices )
///  Draw Operations
///    group vertices into primitives (line strip: consecutive pairs)
///    rasterize_line(a, b, interp, emit)
///       axis-aligned: diamond slices along the run
///       general: column walk + diamond-exit test per candidate pixel
///    Output: Fragments at pixel centers with interpolated z/attributes
///  Per Fragment
///   bounds check -> depth test -> program.shade -> blend
///     write color + depth into the Framebuffer

pub mod math;
pub mod color;
pub mod vertex;
pub mod raster;
pub mod program;
pub mod pipeline;
pub mod framebuffer;

pub use crate::math::*;
pub use crate::color::*;
pub use crate::vertex::*;
pub use crate::raster::*;
pub use crate::program::*;
pub use crate::pipeline::*;
pub use crate::framebuffer::*;
