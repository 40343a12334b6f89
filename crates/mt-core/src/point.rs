//! Integer world coordinates and exact segment geometry.
//!
//! Intersections live on an integer grid, so orientation and on-segment
//! predicates can be computed exactly with `i64` cross products, with no
//! epsilon tuning.  Coordinates on the order of tens of thousands stay far
//! from the `i64` overflow boundary.

/// A position on the integer world grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Segment predicates ────────────────────────────────────────────────────────

/// 2-D orientation of the triplet (a, b, c): positive for counter-clockwise,
/// negative for clockwise, zero for collinear.  `i64` intermediates keep the
/// cross product exact for all realistic coordinates.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> i64 {
    i64::from(b.x - a.x) * i64::from(c.y - a.y) - i64::from(b.y - a.y) * i64::from(c.x - a.x)
}

/// `true` if `c` lies within the axis-aligned bounding box of segment `ab`.
/// Only meaningful when `c` is already known to be collinear with `ab`.
#[inline]
fn on_segment(a: Point, b: Point, c: Point) -> bool {
    a.x.min(b.x) <= c.x && c.x <= a.x.max(b.x) && a.y.min(b.y) <= c.y && c.y <= a.y.max(b.y)
}

/// Test whether segment `p1→p2` properly intersects or collinearly overlaps
/// segment `q1→q2`.  Segments that merely share an endpoint do not count as
/// crossing.
pub fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    if q1 == p1 || q1 == p2 || q2 == p1 || q2 == p2 {
        return false;
    }

    let o1 = orient(p1, p2, q1);
    let o2 = orient(p1, p2, q2);
    let o3 = orient(q1, q2, p1);
    let o4 = orient(q1, q2, p2);

    // Proper intersection: endpoints of each segment straddle the other.
    if ((o1 > 0 && o2 < 0) || (o1 < 0 && o2 > 0)) && ((o3 > 0 && o4 < 0) || (o3 < 0 && o4 > 0)) {
        return true;
    }

    // Collinear overlap cases.
    if o1 == 0 && on_segment(p1, p2, q1) {
        return true;
    }
    if o2 == 0 && on_segment(p1, p2, q2) {
        return true;
    }
    if o3 == 0 && on_segment(q1, q2, p1) {
        return true;
    }
    if o4 == 0 && on_segment(q1, q2, p2) {
        return true;
    }

    false
}
