//! Bubble Burst - A hex-grid bubble shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, collisions, clustering, game state)
//! - `input`: Command queue between input callbacks and the simulation tick
//! - `snapshot`: Read-only per-frame view handed to the renderer
//! - `engine`: Host-facing facade driving one tick per frame
//! - `settings`: Data-driven game tuning

pub mod engine;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use engine::Engine;
pub use input::{Command, CommandQueue, InputSender, command_queue};
pub use settings::GameConfig;
pub use snapshot::{FrameSnapshot, SnapshotBuffer};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World X bounds are fixed; only the Y extent follows the viewport
    pub const MIN_WORLD_X: f32 = -1.0;
    pub const MAX_WORLD_X: f32 = 1.0;

    /// Hex packing angle (60 degrees)
    pub const ALIGN_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Placement contact threshold, as a fraction of the bubble diameter
    pub const CONTACT_FACTOR: f32 = 0.9;
    /// Cluster adjacency threshold, as a multiple of the bubble radius
    pub const CLUSTER_CONTACT_FACTOR: f32 = 2.1;
    /// A component is anchored if any member reaches this many radii below the ceiling
    pub const ANCHOR_FACTOR: f32 = 1.01;
    /// Slack added to the game-over line, in radii
    pub const GAME_OVER_SLACK: f32 = 0.1;

    /// Falling bubbles drop this many times faster than the projectile flies
    pub const FALL_SPEED_FACTOR: f32 = 2.0;

    /// Number of distinct bubble colors
    pub const NUM_COLORS: usize = 4;
}

/// Unit heading for an aim angle.
///
/// Angle 0 points straight up; positive angles lean left.
#[inline]
pub fn aim_direction(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_direction() {
        let up = aim_direction(0.0);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y - 1.0).abs() < 1e-6);

        let left = aim_direction(0.5);
        assert!(left.x < 0.0);
        assert!(left.y > 0.0);
    }
}
