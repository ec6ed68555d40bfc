//! Framebuffer with color and depth storage
//!
//! The pipeline's depth/blend stage reads and writes this; the rasterizer
//! itself never touches it.

use std::path::Path;

use crate::color::Rgba8;

/// Color and depth storage written by the pipeline
///
/// Color is stored as row-major RGBA8 with row 0 at the bottom, matching
/// the framebuffer-space convention of the rasterizer. Depth is one f32
/// per pixel, cleared to 1.0 (the far plane).
#[derive(Debug,Default)]
pub struct Framebuffer {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    data: Vec<u8>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Create a new framebuffer, cleared to black and far depth
    pub fn new(width: usize, height: usize) -> Self {
        if width == 0 || height == 0 {
            panic!("Cannot create framebuffer with 0 width or height");
        }
        let mut fb = Framebuffer {
            width, height,
            data: vec![0u8; width * height * 4],
            depth: vec![1.0; width * height],
        };
        fb.clear(Rgba8::black());
        fb
    }
    /// Reset every pixel to `color` and every depth to 1.0
    pub fn clear(&mut self, color: Rgba8) {
        for px in self.data.chunks_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
        self.depth.iter_mut().for_each(|d| *d = 1.0);
    }
    /// True if pixel (x,y) is within the framebuffer
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }
    /// Color at pixel (x,y)
    pub fn get(&self, x: usize, y: usize) -> Rgba8 {
        let i = self.index(x, y) * 4;
        Rgba8::new(self.data[i], self.data[i+1], self.data[i+2], self.data[i+3])
    }
    /// Set the color at pixel (x,y)
    pub fn set(&mut self, x: usize, y: usize, c: Rgba8) {
        let i = self.index(x, y) * 4;
        self.data[i]   = c.r;
        self.data[i+1] = c.g;
        self.data[i+2] = c.b;
        self.data[i+3] = c.a;
    }
    /// Stored depth at pixel (x,y)
    pub fn depth(&self, x: usize, y: usize) -> f32 {
        self.depth[self.index(x, y)]
    }
    /// Set the stored depth at pixel (x,y)
    pub fn set_depth(&mut self, x: usize, y: usize, z: f32) {
        let i = self.index(x, y);
        self.depth[i] = z;
    }
    /// Write the color contents to an image file
    ///
    /// Rows are flipped on the way out so the file has row 0 at the top.
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<(), std::io::Error> {
        let mut buf = Vec::with_capacity(self.data.len());
        for y in (0..self.height).rev() {
            let row = y * self.width * 4;
            buf.extend_from_slice(&self.data[row .. row + self.width * 4]);
        }
        image::save_buffer(filename, &buf,
                           self.width as u32, self.height as u32,
                           image::RGBA(8))
    }
}

/// Compare two image files pixel by pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, image::ImageError> {
    let img1 = image::open(f1)?.to_rgba();
    let img2 = image::open(f2)?.to_rgba();
    if img1.dimensions() != img2.dimensions() {
        return Ok(false);
    }
    let (d1, d2) = (img1.into_raw(), img2.into_raw());
    let mut flag = true;
    for (i, (v1, v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            println!("{}: {} {}", i, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}
