//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by field index)
//! - No rendering or platform dependencies

pub mod cluster;
pub mod collision;
pub mod field;
pub mod geometry;
pub mod state;
pub mod tick;

pub use cluster::{ClusterStatus, find_blast, find_cluster, find_floating};
pub use collision::{Landing, check_collision, resolve_landing, resolve_out_of_bounds};
pub use field::BubbleField;
pub use geometry::Geometry;
pub use state::{
    Bubble, BubbleType, GameMode, GameSession, GameState, Particle, Projectile,
};
pub use tick::{TickInput, tick};
