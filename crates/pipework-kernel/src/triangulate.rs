//! Ear-clipping triangulation of planar rings, used for solid caps.

use pipework_math::{Dir3, Point2, Point3};

use crate::face::PlaneFrame;

/// Triangulate a simple planar ring.
///
/// `normal` is the ring's winding normal. The returned index triples keep
/// that winding.
pub(crate) fn triangulate(ring: &[Point3], normal: &Dir3) -> Vec<[usize; 3]> {
    let n = ring.len();
    if n < 3 {
        return Vec::new();
    }
    let frame = PlaneFrame::new(ring[0], normal);
    let pts: Vec<Point2> = ring.iter().map(|p| frame.project(p)).collect();

    let mut idx: Vec<usize> = (0..n).collect();
    let mut tris = Vec::with_capacity(n - 2);
    while idx.len() > 3 {
        let m = idx.len();
        let ear = (0..m).find(|&i| {
            let (a, b, c) = (idx[(i + m - 1) % m], idx[i], idx[(i + 1) % m]);
            if orient(&pts[a], &pts[b], &pts[c]) <= 1e-12 {
                return false;
            }
            !idx.iter()
                .filter(|&&k| k != a && k != b && k != c)
                .any(|&k| in_triangle(&pts[k], &pts[a], &pts[b], &pts[c]))
        });
        match ear {
            Some(i) => {
                tris.push([idx[(i + m - 1) % m], idx[i], idx[(i + 1) % m]]);
                idx.remove(i);
            }
            None => {
                // nothing convex left; fan out what remains
                for k in 1..m - 1 {
                    tris.push([idx[0], idx[k], idx[k + 1]]);
                }
                return tris;
            }
        }
    }
    tris.push([idx[0], idx[1], idx[2]]);
    tris
}

fn orient(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn in_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}
