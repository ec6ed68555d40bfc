//! Shading programs
//!
//! A program turns one fragment's interpolated attributes into a color;
//! any uniforms live on the program value itself. The rasterizer and the
//! pipeline compositor are agnostic to a program's internals, they only
//! agree on the attribute count `A`.

use crate::color::Rgba32;
use crate::vertex::Fragment;

/// Capability of shading a fragment
pub trait Program<const A: usize> {
    /// Evaluate the program for one fragment
    fn shade(&self, frag: &Fragment<A>) -> Rgba32;
}

/// Ignores all attributes and outputs a fixed color
#[derive(Debug,Default,Copy,Clone)]
pub struct SolidColor {
    pub color: Rgba32,
}

impl SolidColor {
    pub fn new(color: Rgba32) -> Self {
        SolidColor { color }
    }
}

impl<const A: usize> Program<A> for SolidColor {
    fn shade(&self, _frag: &Fragment<A>) -> Rgba32 {
        self.color
    }
}

/// Interprets the first four attributes as r,g,b,a
#[derive(Debug,Default,Copy,Clone)]
pub struct AttributeColor;

impl Program<4> for AttributeColor {
    fn shade(&self, frag: &Fragment<4>) -> Rgba32 {
        let at = &frag.attributes;
        Rgba32::new(at[0], at[1], at[2], at[3])
    }
}
