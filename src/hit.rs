//! Hit-testing: which country, if any, is under a surface-space point.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::store::GeometryStore;
use crate::transform::{MapTransform, Point};

/// Test which country (if any) contains `surface_pt`.
///
/// The point is inverse-mapped into reference space. Points outside the
/// reference bounding box are rejected in O(1) without touching any polygon.
/// Countries are scanned in store order — the deterministic tie-break when
/// authored outlines overlap — with a bounding-box pre-check per country and
/// per subpath before the even-odd ring test runs. A country's subpaths
/// (mainland plus islands) combine with logical OR.
#[must_use]
pub fn hit_test<'a>(surface_pt: Point, store: &'a GeometryStore, transform: &MapTransform) -> Option<&'a str> {
    let pt = transform.to_reference(surface_pt);

    if pt.x < 0.0 || pt.x > store.reference_width() || pt.y < 0.0 || pt.y > store.reference_height() {
        return None;
    }

    for (code, geometry) in store.iter() {
        if !geometry.bounds().contains(pt) {
            continue;
        }
        for subpath in geometry.subpaths() {
            if subpath.bounds().contains(pt) && point_in_ring(pt, subpath.ring()) {
                return Some(code);
            }
        }
    }
    None
}

/// Even-odd crossing test against a closed polygon ring.
///
/// Rings with fewer than three vertices are degenerate and contain nothing.
/// The rule is insensitive to the ring's winding direction.
#[must_use]
pub(crate) fn point_in_ring(pt: Point, ring: &[Point]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_cross = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x;
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
