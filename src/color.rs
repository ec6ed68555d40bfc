//! Colors and fixed point blending arithmetic

/// Convert an f32 [0,1] component to a u8 [0,255] component
///
/// Values are clamped before conversion
pub fn cu8(v: f32) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

/// Color as Red, Green, Blue, and Alpha, 8 bits per component
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
}

/// Color as Red, Green, Blue, and Alpha, f32 per component
///
/// Output type of shading programs; converted to [Rgba8] at the blend stage
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rgba32 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba32 {
    /// Create new color, components in [0,1]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba32 { r, g, b, a }
    }
}

impl From<Rgba32> for Rgba8 {
    fn from(c: Rgba32) -> Rgba8 {
        Rgba8::new(cu8(c.r), cu8(c.g), cu8(c.b), cu8(c.a))
    }
}

/// Interpolate a value between two end points using fixed point math
pub fn lerp_u8(p: u8, q: u8, a: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let v = if p > q { 1 } else { 0 };
    let (q,p,a) = (i32::from(q), i32::from(p), i32::from(a));
    let t0 : i32 = (q - p) * a + base_msb - v; // Signed multiplication
    let t1 : i32 = ((t0>>base_shift) + t0) >> base_shift;
    (p + t1) as u8
}

/// Multiply two u8 values using fixed point math
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32 = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}

/// Composite `c` over `p`
///
/// Color components are interpolated toward `c` by its alpha using
/// fixed point math
///
/// see [Alpha Compositing](https://en.wikipedia.org/wiki/Alpha_compositing)
pub fn blend_pix(p: Rgba8, c: Rgba8) -> Rgba8 {
    let red   = lerp_u8(p.r, c.r, c.a);
    let green = lerp_u8(p.g, c.g, c.a);
    let blue  = lerp_u8(p.b, c.b, c.a);
    let alpha = lerp_u8(p.a, c.a, c.a);
    Rgba8::new(red, green, blue, alpha)
}

/// Add `c`, scaled by its alpha, onto `p`
///
/// Components saturate at 255
pub fn add_pix(p: Rgba8, c: Rgba8) -> Rgba8 {
    let red   = p.r.saturating_add(multiply_u8(c.r, c.a));
    let green = p.g.saturating_add(multiply_u8(c.g, c.a));
    let blue  = p.b.saturating_add(multiply_u8(c.b, c.a));
    let alpha = p.a.saturating_add(c.a);
    Rgba8::new(red, green, blue, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn fixed_point_blending() {
        assert_eq!(lerp_u8(0, 255, 0), 0);
        assert_eq!(lerp_u8(0, 255, 255), 255);
        assert_eq!(lerp_u8(0, 255, 128), 128);
        assert_eq!(multiply_u8(255, 255), 255);
        assert_eq!(multiply_u8(255, 0), 0);
        assert_eq!(multiply_u8(128, 128), 64);

        let white = Rgba8::white();
        let clear_black = Rgba8::new(0,0,0,128);
        let mixed = blend_pix(white, clear_black);
        assert_eq!(mixed, Rgba8::new(127,127,127,191));

        let full = add_pix(Rgba8::new(200,200,200,255), Rgba8::new(200,200,200,255));
        assert_eq!(full, Rgba8::new(255,255,255,255));
    }
}
