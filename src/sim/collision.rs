//! Collision detection and snap-to-grid placement
//!
//! The projectile never rests where it touched: it is moved to one of the two
//! diagonal hex positions next to the bubble it hit, chosen by which side of
//! that bubble it arrived from. Hits on the ceiling snap to the ceiling row.

use glam::Vec2;

use super::field::BubbleField;
use super::geometry::Geometry;

/// Where a settling projectile ends up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Landing {
    /// Crossed the top boundary; snapped to the ceiling row
    Ceiling(Vec2),
    /// Touched the bubble at `index`; snapped next to it
    Bubble { index: usize, pos: Vec2 },
}

impl Landing {
    pub fn pos(&self) -> Vec2 {
        match *self {
            Landing::Ceiling(pos) => pos,
            Landing::Bubble { pos, .. } => pos,
        }
    }
}

/// Diagonal hex position next to `anchor` on the side `from` approaches
///
/// Left/right follows the sign of `from.x - anchor.x`, up/down the sign of
/// `from.y - anchor.y`.
pub fn snap_position(geo: &Geometry, anchor: Vec2, from: Vec2) -> Vec2 {
    let offset = geo.snap_offset();
    let x = if from.x < anchor.x {
        anchor.x - offset.x
    } else {
        anchor.x + offset.x
    };
    let y = if from.y > anchor.y {
        anchor.y + offset.y
    } else {
        anchor.y - offset.y
    };
    Vec2::new(x, y)
}

/// Find the bubble a projectile at `pos` should attach to
///
/// A bubble is a candidate when within `contact_threshold`; it is accepted
/// only if its snap position is itself clear of every bubble. The closest
/// accepted candidate wins (ties keep the lower index).
pub fn check_collision(
    field: &BubbleField,
    geo: &Geometry,
    pos: Vec2,
    contact_threshold: f32,
) -> Option<usize> {
    let threshold_sq = contact_threshold * contact_threshold;
    let mut closest: Option<(usize, f32)> = None;

    for (index, bubble) in field.iter().enumerate() {
        let dist_sq = pos.distance_squared(bubble.pos);
        if dist_sq > threshold_sq {
            continue;
        }
        if closest.is_some_and(|(_, best)| dist_sq >= best) {
            continue;
        }

        let snap = snap_position(geo, bubble.pos, pos);
        let blocked = field
            .iter()
            .any(|other| other.pos.distance_squared(snap) < threshold_sq);
        if !blocked {
            closest = Some((index, dist_sq));
        }
    }

    closest.map(|(index, _)| index)
}

/// Ceiling landing spot for a projectile at `pos`.
///
/// The column is derived from `x` alone; ceiling occupancy is not checked.
pub fn resolve_out_of_bounds(geo: &Geometry, pos: Vec2) -> Vec2 {
    let d = geo.bubble_diameter;
    Vec2::new(
        (pos.x / d).floor() * d + geo.bubble_radius,
        geo.ceiling_row_y(),
    )
}

/// Whether the projectile's top edge has reached the ceiling
#[inline]
pub fn crossed_ceiling(geo: &Geometry, pos: Vec2) -> bool {
    pos.y + geo.bubble_radius >= geo.max_world_y
}

/// Whether the projectile is past either side wall
#[inline]
pub fn outside_walls(geo: &Geometry, pos: Vec2) -> bool {
    let (left, right) = geo.wall_bounds();
    pos.x < left || pos.x > right
}

/// Resolve where (if anywhere) a projectile at `pos` settles this tick
pub fn resolve_landing(field: &BubbleField, geo: &Geometry, pos: Vec2) -> Option<Landing> {
    if crossed_ceiling(geo, pos) {
        return Some(Landing::Ceiling(resolve_out_of_bounds(geo, pos)));
    }

    let index = check_collision(field, geo, pos, geo.contact_threshold)?;
    let anchor = field.get(index)?.pos;
    Some(Landing::Bubble {
        index,
        pos: snap_position(geo, anchor, pos),
    })
}
