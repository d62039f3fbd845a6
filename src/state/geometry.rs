//! Target placement and the pointer/target overlap test.
//!
//! Coordinates are screen-style: origin at the track center, y growing
//! downwards, angle 0 pointing up and increasing clockwise. The overlap test
//! is an axis-aligned bounding-rect intersection of the rendered regions, a
//! deliberately generous hit window rather than an exact angular check.

use rand::Rng;

/// Fraction of the track radius at which the target zone is placed.
const TARGET_RADIUS_RATIO: f32 = 0.83;

/// Physical dimensions of the circular track, in render pixels.
#[derive(Debug, Clone, Copy)]
pub struct TrackGeometry {
    /// Radius of the track the pointer sweeps.
    pub radius: f32,
    /// Width of the rotating pointer rod.
    pub pointer_width: f32,
    /// Diameter of the circular target zone.
    pub target_diameter: f32,
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self {
            radius: 240.0,
            pointer_width: 12.0,
            target_diameter: 40.0,
        }
    }
}

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum x.
    pub left: f32,
    /// Minimum y (screen top).
    pub top: f32,
    /// Maximum x.
    pub right: f32,
    /// Maximum y (screen bottom).
    pub bottom: f32,
}

impl Rect {
    /// Rectangle centered on `(cx, cy)` with the given full extents.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            left: cx - width / 2.0,
            top: cy - height / 2.0,
            right: cx + width / 2.0,
            bottom: cy + height / 2.0,
        }
    }

    /// True unless one rectangle lies entirely above, below, left of, or
    /// right of the other. Touching edges count as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.top > other.bottom
            || self.right < other.left
            || self.bottom < other.top
            || self.left > other.right)
    }
}

/// Pick a fresh target angle, uniform over whole degrees in `[0, 360)`.
pub fn random_target_angle(rng: &mut impl Rng) -> u16 {
    rng.random_range(0..360)
}

/// Unit direction for a degree angle, with 0 pointing up (90 degree phase
/// offset folded into the conversion).
fn direction_for(angle_deg: f32) -> (f32, f32) {
    let rad = (angle_deg - 90.0).to_radians();
    (rad.cos(), rad.sin())
}

/// Offset of the target zone center from the track center.
pub fn target_offset(angle_deg: u16, geometry: &TrackGeometry) -> (f32, f32) {
    let (dx, dy) = direction_for(f32::from(angle_deg));
    let r = geometry.radius * TARGET_RADIUS_RATIO;
    (dx * r, dy * r)
}

/// Rendered bounds of the target zone once placed.
pub fn target_bounds(angle_deg: u16, geometry: &TrackGeometry) -> Rect {
    let (cx, cy) = target_offset(angle_deg, geometry);
    Rect::centered(cx, cy, geometry.target_diameter, geometry.target_diameter)
}

/// Rendered bounds of the pointer rod at its current angle.
///
/// The rod runs from the track center to the rim; its bounds are the AABB of
/// the four rotated corners.
pub fn pointer_bounds(angle_deg: f32, geometry: &TrackGeometry) -> Rect {
    let (dx, dy) = direction_for(angle_deg);
    // Perpendicular to the rod axis, scaled to half the rod width.
    let (px, py) = (-dy * geometry.pointer_width / 2.0, dx * geometry.pointer_width / 2.0);
    let (tx, ty) = (dx * geometry.radius, dy * geometry.radius);

    let corners = [
        (px, py),
        (-px, -py),
        (tx + px, ty + py),
        (tx - px, ty - py),
    ];

    let mut rect = Rect {
        left: f32::INFINITY,
        top: f32::INFINITY,
        right: f32::NEG_INFINITY,
        bottom: f32::NEG_INFINITY,
    };
    for (x, y) in corners {
        rect.left = rect.left.min(x);
        rect.top = rect.top.min(y);
        rect.right = rect.right.max(x);
        rect.bottom = rect.bottom.max(y);
    }
    rect
}

/// Hit test at the instant of a trigger press.
pub fn pointer_hits_target(pointer_angle_deg: f32, target_angle_deg: u16, geometry: &TrackGeometry) -> bool {
    pointer_bounds(pointer_angle_deg, geometry)
        .intersects(&target_bounds(target_angle_deg, geometry))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn random_angle_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let angle = random_target_angle(&mut rng);
            assert!(angle < 360);
        }
    }

    #[test]
    fn angle_zero_points_up() {
        let geometry = TrackGeometry::default();
        let (x, y) = target_offset(0, &geometry);
        assert!(x.abs() < 1e-3);
        assert!(y < 0.0, "screen-up means negative y, got {y}");
        assert!((y.abs() - geometry.radius * 0.83).abs() < 1e-3);
    }

    #[test]
    fn angle_ninety_points_right() {
        let geometry = TrackGeometry::default();
        let (x, y) = target_offset(90, &geometry);
        assert!(y.abs() < 1e-3);
        assert!((x - geometry.radius * 0.83).abs() < 1e-3);
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = Rect::centered(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::centered(20.0, 0.0, 10.0, 10.0)), "right");
        assert!(!a.intersects(&Rect::centered(-20.0, 0.0, 10.0, 10.0)), "left");
        assert!(!a.intersects(&Rect::centered(0.0, 20.0, 10.0, 10.0)), "below");
        assert!(!a.intersects(&Rect::centered(0.0, -20.0, 10.0, 10.0)), "above");
    }

    #[test]
    fn touching_edges_count_as_overlap() {
        let a = Rect::centered(0.0, 0.0, 10.0, 10.0);
        let b = Rect::centered(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn pointer_on_target_angle_is_a_hit() {
        let geometry = TrackGeometry::default();
        for angle in [0u16, 45, 90, 180, 270, 359] {
            assert!(
                pointer_hits_target(f32::from(angle), angle, &geometry),
                "aligned pointer should hit at {angle} degrees"
            );
        }
    }

    #[test]
    fn pointer_opposite_target_is_a_miss() {
        let geometry = TrackGeometry::default();
        assert!(!pointer_hits_target(180.0, 0, &geometry));
        assert!(!pointer_hits_target(270.0, 90, &geometry));
    }

    #[test]
    fn rect_test_is_generous_near_the_target() {
        // A pointer a few degrees off still clips the target's bounding
        // square; that slack is the intended feel.
        let geometry = TrackGeometry::default();
        assert!(pointer_hits_target(3.0, 0, &geometry));
        assert!(pointer_hits_target(357.0, 0, &geometry));
    }

    #[test]
    fn pointer_bounds_contain_center_and_tip() {
        let geometry = TrackGeometry::default();
        let bounds = pointer_bounds(45.0, &geometry);
        assert!(bounds.left <= 0.0 && bounds.right >= 0.0);
        assert!(bounds.top <= 0.0 && bounds.bottom >= 0.0);
        let (dx, dy) = ((45.0f32 - 90.0).to_radians().cos(), (45.0f32 - 90.0).to_radians().sin());
        let (tip_x, tip_y) = (dx * geometry.radius, dy * geometry.radius);
        assert!(bounds.left <= tip_x && bounds.right >= tip_x);
        assert!(bounds.top <= tip_y && bounds.bottom >= tip_y);
    }
}
