//! Axis-aligned collision detection
//!
//! Keeps the four "no collision" branches with strict comparisons, so
//! rectangles that merely touch at an edge still count as overlapping.

use super::state::Body;

/// Axis-aligned bounding-box overlap test between two bodies.
///
/// Symmetric in its arguments. Boolean only; no overlap area is computed.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    // a is below b
    if a.pos.y > b.pos.y + b.size.y {
        return false;
    }
    // a is above b
    if a.pos.y + a.size.y < b.pos.y {
        return false;
    }
    // a is to the right of b
    if a.pos.x > b.pos.x + b.size.x {
        return false;
    }
    // a is to the left of b
    if a.pos.x + a.size.x < b.pos.x {
        return false;
    }
    true
}
