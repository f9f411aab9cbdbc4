use crate::core::models::grid::Cell;

/// `true` if `v` lies in the closed interval bounded by `a` and `b`, in either order.
///
/// A degenerate interval (`a == b`) contains only `a` itself.
#[inline]
pub fn is_between(v: i64, a: i64, b: i64) -> bool {
    a.min(b) <= v && v <= a.max(b)
}

/// Cross product of `(a - b)` and `(p - b)`; zero iff the three cells are collinear.
#[inline]
pub fn cross(p: Cell, a: Cell, b: Cell) -> i64 {
    let (px, py) = (p.x as i64, p.y as i64);
    let (ax, ay) = (a.x as i64, a.y as i64);
    let (bx, by) = (b.x as i64, b.y as i64);
    (ay - by) * (px - bx) - (ax - bx) * (py - by)
}

/// `true` if `p` lies on the closed segment from `a` to `b`.
///
/// Grid coordinates are integers, so the test is exact: `p` must be collinear with the endpoints
/// and inside the segment's bounding box.
#[inline]
pub fn is_on_segment(p: Cell, a: Cell, b: Cell) -> bool {
    cross(p, a, b) == 0
        && is_between(p.x as i64, a.x as i64, b.x as i64)
        && is_between(p.y as i64, a.y as i64, b.y as i64)
}
