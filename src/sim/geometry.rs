//! World geometry and hex-grid constants
//!
//! Every derived value (radius, thresholds, world Y bounds, launcher origin)
//! is computed in one place and replaced as a whole on viewport change, so a
//! tick never sees a half-updated set of constants.

use glam::Vec2;

use crate::consts::*;
use crate::settings::GameConfig;

/// Derived world geometry for one viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub min_world_x: f32,
    pub max_world_x: f32,
    pub min_world_y: f32,
    /// Ceiling line (bubbles hang from here)
    pub max_world_y: f32,
    pub world_width: f32,
    pub bubble_radius: f32,
    pub bubble_diameter: f32,
    /// Placement/firing contact distance
    pub contact_threshold: f32,
    /// Adjacency distance for cluster search (looser than contact)
    pub cluster_contact_threshold: f32,
    /// Ceiling to launcher distance
    pub world_height: f32,
    /// Ceiling to game-over line distance
    pub game_over_height: f32,
    /// Launcher anchor point
    pub origin: Vec2,
}

impl Geometry {
    /// Geometry for the config's initial viewport
    pub fn new(config: &GameConfig) -> Self {
        let ratio = aspect_ratio(config.viewport_width.max(1), config.viewport_height.max(1));
        Self::from_y_bounds(config, -ratio, ratio - config.top_margin)
    }

    /// Geometry for a viewport of `width` x `height` pixels.
    ///
    /// The view is always treated as portrait. Returns `None` for an empty
    /// viewport.
    pub fn for_viewport(config: &GameConfig, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let ratio = aspect_ratio(width, height);
        Some(Self::from_y_bounds(config, -ratio, ratio - config.top_margin))
    }

    /// Geometry with explicit world Y bounds
    pub fn from_y_bounds(config: &GameConfig, min_world_y: f32, max_world_y: f32) -> Self {
        let cols = config.cols.max(1) as f32;
        let rows = config.rows.max(1) as f32;

        let world_width = MAX_WORLD_X - MIN_WORLD_X;
        let bubble_radius = (world_width * 0.5) / cols;
        let bubble_diameter = bubble_radius * 2.0;
        let row_step = ALIGN_ANGLE.sin() * bubble_diameter;
        let world_height = bubble_radius + row_step * rows;
        let game_over_height = bubble_radius + row_step * (rows - 1.0);

        Self {
            min_world_x: MIN_WORLD_X,
            max_world_x: MAX_WORLD_X,
            min_world_y,
            max_world_y,
            world_width,
            bubble_radius,
            bubble_diameter,
            contact_threshold: bubble_diameter * CONTACT_FACTOR,
            cluster_contact_threshold: bubble_radius * CLUSTER_CONTACT_FACTOR,
            world_height,
            game_over_height,
            origin: Vec2::new(0.0, max_world_y - world_height),
        }
    }

    /// Vertical distance between two hex rows
    #[inline]
    pub fn row_step(&self) -> f32 {
        ALIGN_ANGLE.sin() * self.bubble_diameter
    }

    /// Offset from a bubble to its diagonal hex neighbours (unsigned)
    #[inline]
    pub fn snap_offset(&self) -> Vec2 {
        Vec2::new(
            self.bubble_diameter * ALIGN_ANGLE.cos(),
            self.bubble_diameter * ALIGN_ANGLE.sin(),
        )
    }

    /// Y of the top row of bubbles
    #[inline]
    pub fn ceiling_row_y(&self) -> f32 {
        self.max_world_y - self.bubble_radius
    }

    /// Components whose highest member is below this line are unsupported
    #[inline]
    pub fn anchor_line(&self) -> f32 {
        self.max_world_y - self.bubble_radius * ANCHOR_FACTOR
    }

    /// A bubble at or below this line ends the game
    #[inline]
    pub fn game_over_line(&self) -> f32 {
        self.max_world_y - self.game_over_height + self.bubble_radius * GAME_OVER_SLACK
    }

    /// Falling bubbles are gone once they drop below this line
    #[inline]
    pub fn floor_line(&self) -> f32 {
        self.min_world_y - self.bubble_radius
    }

    /// Projectile X range before it bounces
    #[inline]
    pub fn wall_bounds(&self) -> (f32, f32) {
        (
            self.min_world_x + self.bubble_radius,
            self.max_world_x - self.bubble_radius,
        )
    }

    /// Bomb selector icon, beside the launcher
    #[inline]
    pub fn bomb_icon(&self) -> Vec2 {
        Vec2::new(self.max_world_x - self.bubble_radius, self.origin.y)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    let view_width = width.min(height) as f32;
    let view_height = width.max(height) as f32;
    view_height / view_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_constants() {
        let geo = Geometry::from_y_bounds(&GameConfig::default(), -1.0, 1.0);
        assert!((geo.bubble_radius - 0.125).abs() < 1e-6);
        assert!((geo.bubble_diameter - 0.25).abs() < 1e-6);
        assert!((geo.contact_threshold - 0.225).abs() < 1e-6);
        assert!((geo.cluster_contact_threshold - 0.2625).abs() < 1e-6);
        assert!((geo.world_height - (0.125 + 3.0_f32.sqrt() / 2.0 * 0.25 * 12.0)).abs() < 1e-5);
        assert!((geo.origin.y - (1.0 - geo.world_height)).abs() < 1e-6);
        assert_eq!(geo.origin.x, 0.0);
    }

    #[test]
    fn test_viewport_is_portrait() {
        let config = GameConfig::default();
        let portrait = Geometry::for_viewport(&config, 1080, 1920).unwrap();
        let landscape = Geometry::for_viewport(&config, 1920, 1080).unwrap();
        assert_eq!(portrait, landscape);

        let ratio = 1920.0 / 1080.0;
        assert!((portrait.min_world_y + ratio).abs() < 1e-5);
        assert!((portrait.max_world_y - (ratio - 0.3)).abs() < 1e-5);
    }

    #[test]
    fn test_empty_viewport_rejected() {
        let config = GameConfig::default();
        assert!(Geometry::for_viewport(&config, 0, 100).is_none());
        assert!(Geometry::for_viewport(&config, 100, 0).is_none());
    }

    #[test]
    fn test_snap_offset_is_one_diameter() {
        let geo = Geometry::new(&GameConfig::default());
        assert!((geo.snap_offset().length() - geo.bubble_diameter).abs() < 1e-6);
        assert!((geo.snap_offset().y - geo.row_step()).abs() < 1e-6);
    }

    #[test]
    fn test_lines_are_ordered() {
        let geo = Geometry::new(&GameConfig::default());
        assert!(geo.ceiling_row_y() < geo.max_world_y);
        assert!(geo.anchor_line() < geo.ceiling_row_y());
        assert!(geo.game_over_line() < geo.anchor_line());
        assert!(geo.origin.y < geo.game_over_line());
        assert!(geo.floor_line() < geo.min_world_y);
    }

    proptest! {
        #[test]
        fn resize_is_idempotent(w in 1u32..4000, h in 1u32..4000, cols in 1u32..20) {
            let config = GameConfig { cols, ..Default::default() };
            let a = Geometry::for_viewport(&config, w, h);
            let b = Geometry::for_viewport(&config, w, h);
            prop_assert_eq!(a, b);
        }
    }
}
