//! Line and point rasterization
//!
//! Lines are covered under the diamond-exit rule: every pixel owns the
//! diamond inscribed between its four edge midpoints, and a segment covers
//! the pixel only if it exits that diamond while travelling from its first
//! endpoint to its second. Splitting a polyline at any point on it then
//! yields exactly the same pixel set as the whole, with no pixel at the
//! joints covered twice and none skipped.

use crate::math::{lerp, Vec3};
use crate::pipeline::Interpolation;
use crate::vertex::{ClippedVertex, Fragment};

/// Rasterize a point primitive
///
/// Emits a single fragment at the center of the pixel containing the
/// vertex; attributes pass through unchanged.
pub fn rasterize_point<const A: usize, F>(v: &ClippedVertex<A>, mut emit: F)
    where F: FnMut(Fragment<A>)
{
    let x = v.fb_position.x.floor() + 0.5;
    let y = v.fb_position.y.floor() + 0.5;
    emit(Fragment {
        fb_position: Vec3::new(x, y, v.fb_position.z),
        attributes: v.attributes,
    });
}

/// Rasterize the line segment from `a` to `b`
///
/// Calls `emit` once per covered pixel with a fragment at that pixel's
/// center, depth and attributes interpolated at the center's projection
/// onto the segment. A pixel is covered exactly when some point of the
/// segment lies in its diamond and the endpoint `b` does not, which is the
/// same as the segment leaving the diamond travelling from `a` to `b`.
///
/// Pure function over its arguments: no state is retained across calls and
/// `emit` runs synchronously on the caller's stack. Emission order is
/// deterministic but otherwise unspecified. A zero-length segment emits
/// nothing.
pub fn rasterize_line<const A: usize, F>(a: &ClippedVertex<A>,
                                         b: &ClippedVertex<A>,
                                         interp: Interpolation,
                                         mut emit: F)
    where F: FnMut(Fragment<A>)
{
    // Geometry runs in f64 so that the half-open boundary comparisons stay
    // exact for pixel-aligned f32 inputs.
    let (ax, ay) = (f64::from(a.fb_position.x), f64::from(a.fb_position.y));
    let (bx, by) = (f64::from(b.fb_position.x), f64::from(b.fb_position.y));
    if ax == bx && ay == by {
        return;
    }
    let (dx, dy) = (bx - ax, by - ay);
    let len2 = dx * dx + dy * dy;

    let mut emit_at = |px: i64, py: i64| {
        let (cx, cy) = (px as f64 + 0.5, py as f64 + 0.5);
        let t = (((cx - ax) * dx + (cy - ay) * dy) / len2).max(0.0).min(1.0) as f32;
        let z = lerp(a.fb_position.z, b.fb_position.z, t);
        emit(Fragment {
            fb_position: Vec3::new(cx as f32, cy as f32, z),
            attributes: interpolate(a, b, t, interp),
        });
    };

    if ay == by {
        // Horizontal runs degenerate under the general walk, so resolve
        // them against per-pixel diamond slices. Only one row of diamonds
        // can touch the line: for fractional y the row containing it, for
        // integral y the row whose bottom corners lie on it (the row below
        // touches only at its unowned top corners).
        let row = ay.floor() as i64;
        let half = 0.5 - (ay - (row as f64 + 0.5)).abs();
        let (x0, x1) = if ax <= bx { (ax, bx) } else { (bx, ax) };
        for px in (x0.floor() as i64)..=(x1.floor() as i64) {
            let c = px as f64 + 0.5;
            let (lo, hi) = (c - half, c + half);
            // the slice keeps its left end and loses its right one,
            // matching the diamond's half-open boundary
            let touched = if half == 0.0 {
                x0 <= c && c <= x1
            } else {
                x0 < hi && x1 >= lo
            };
            if touched && !in_diamond(bx, by, px, row) {
                emit_at(px, row);
            }
        }
    } else if ax == bx {
        // Vertical runs, symmetric to the horizontal case, except that
        // whether a slice keeps its ends depends on which side of the
        // pixel center the line passes.
        let col = ax.floor() as i64;
        let cx = col as f64 + 0.5;
        let half = 0.5 - (ax - cx).abs();
        let (y0, y1) = if ay <= by { (ay, by) } else { (by, ay) };
        for py in (y0.floor() as i64)..=(y1.floor() as i64) {
            let c = py as f64 + 0.5;
            let (lo, hi) = (c - half, c + half);
            let touched = if half == 0.0 {
                y0 <= c && c <= y1
            } else if ax < cx {
                // both ends sit on the owned left edges
                y0 <= hi && y1 >= lo
            } else if ax == cx {
                // bottom corner in, top corner out
                y0 < hi && y1 >= lo
            } else {
                // both ends sit on the unowned right edges
                y0 < hi && y1 > lo
            };
            if touched && !in_diamond(bx, by, col, py) {
                emit_at(col, py);
            }
        }
    } else {
        // General case: walk the pixel columns the segment crosses and
        // test the rows it spans inside each column. A diamond fits inside
        // its pixel, so every touchable diamond shows up in this walk.
        let (x0, x1) = if ax <= bx { (ax, bx) } else { (bx, ax) };
        let slope = dy / dx;
        for px in (x0.floor() as i64)..=(x1.floor() as i64) {
            let lo = x0.max(px as f64);
            let hi = x1.min(px as f64 + 1.0);
            let yl = ay + (lo - ax) * slope;
            let yh = ay + (hi - ax) * slope;
            let (ymin, ymax) = if yl <= yh { (yl, yh) } else { (yh, yl) };
            for py in (ymin.floor() as i64)..=(ymax.floor() as i64) {
                if touches_diamond(ax, ay, dx, dy, px, py) && !in_diamond(bx, by, px, py) {
                    emit_at(px, py);
                }
            }
        }
    }
}

fn interpolate<const A: usize>(a: &ClippedVertex<A>,
                               b: &ClippedVertex<A>,
                               t: f32,
                               interp: Interpolation) -> [f32; A] {
    let mut out = [0.0; A];
    match interp {
        Interpolation::Flat => {
            // provoking vertex
            out = a.attributes;
        }
        Interpolation::Smooth => {
            let inv_w = lerp(a.inv_w, b.inv_w, t);
            for i in 0..A {
                out[i] = lerp(a.attributes[i] * a.inv_w,
                              b.attributes[i] * b.inv_w, t) / inv_w;
            }
        }
        Interpolation::NoPerspective => {
            for i in 0..A {
                out[i] = lerp(a.attributes[i], b.attributes[i], t);
            }
        }
    }
    out
}

/// True when a boundary offset from a pixel center is owned by that pixel
///
/// Of the points at taxicab distance exactly 0.5 from the center, the
/// diamond owns its left half (both left-facing edges with the left
/// corner between them) plus the bottom corner. The right half and the
/// top corner are left to the neighbors, so a shared corner is owned by
/// exactly one diamond.
fn owns_boundary(dx: f64, dy: f64) -> bool {
    dx < 0.0 || (dx == 0.0 && dy < 0.0)
}

/// Diamond membership for pixel (px,py), half-open per [owns_boundary]
fn in_diamond(x: f64, y: f64, px: i64, py: i64) -> bool {
    let dx = x - (px as f64 + 0.5);
    let dy = y - (py as f64 + 0.5);
    let s = dx.abs() + dy.abs();
    if s != 0.5 {
        return s < 0.5;
    }
    owns_boundary(dx, dy)
}

/// True if any point of the segment lies in the diamond of pixel (px,py)
///
/// The taxicab distance from the pixel center is convex and piecewise
/// linear along the segment, so its minimum sits at an endpoint or where
/// one of the two coordinate offsets changes sign. A minimum of exactly
/// 0.5 means the segment only grazes the boundary, and counts only if one
/// of the grazed candidate points is owned by the diamond.
fn touches_diamond(ax: f64, ay: f64, dx: f64, dy: f64, px: i64, py: i64) -> bool {
    let cx = px as f64 + 0.5;
    let cy = py as f64 + 0.5;
    let offset = |t: f64| (ax + dx * t - cx, ay + dy * t - cy);

    let mut ts = [0.0, 1.0, f64::NAN, f64::NAN];
    let tx = (cx - ax) / dx;
    if tx > 0.0 && tx < 1.0 {
        ts[2] = tx;
    }
    let ty = (cy - ay) / dy;
    if ty > 0.0 && ty < 1.0 {
        ts[3] = ty;
    }

    let mut min_s = f64::INFINITY;
    for &t in ts.iter().filter(|t| !t.is_nan()) {
        let (ox, oy) = offset(t);
        min_s = min_s.min(ox.abs() + oy.abs());
    }
    if min_s != 0.5 {
        return min_s < 0.5;
    }
    for &t in ts.iter().filter(|t| !t.is_nan()) {
        let (ox, oy) = offset(t);
        if ox.abs() + oy.abs() == 0.5 && owns_boundary(ox, oy) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::{in_diamond, touches_diamond};

    #[test]
    fn diamond_membership() {
        // interior and clearly outside
        assert!(in_diamond(1.5, 1.5, 1, 1));
        assert!(in_diamond(1.3, 1.4, 1, 1));
        assert!(!in_diamond(1.1, 1.1, 1, 1));
        // left and bottom corners are owned, right and top are not
        assert!(in_diamond(1.0, 1.5, 1, 1));
        assert!(in_diamond(1.5, 1.0, 1, 1));
        assert!(!in_diamond(2.0, 1.5, 1, 1));
        assert!(!in_diamond(1.5, 2.0, 1, 1));
        // left-facing edges are owned, right-facing ones are not
        assert!(in_diamond(1.25, 1.75, 1, 1));
        assert!(in_diamond(1.25, 1.25, 1, 1));
        assert!(!in_diamond(1.75, 1.75, 1, 1));
        assert!(!in_diamond(1.75, 1.25, 1, 1));
    }

    #[test]
    fn grazing_touch() {
        // along the top-left edge of (0,0): owned points all the way
        assert!(touches_diamond(0.0, 0.5, 0.5, 0.5, 0, 0));
        // along the top-right edge: no owned point at all
        assert!(!touches_diamond(0.5, 1.0, 0.5, -0.5, 0, 0));
        // ending exactly on the bottom corner
        assert!(touches_diamond(1.5, 1.5, 1.0, -0.5, 2, 1));
        // crossing straight through the interior
        assert!(touches_diamond(0.0, 0.0, 1.0, 1.0, 0, 0));
    }
}
