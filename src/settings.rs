//! Game tuning and configuration
//!
//! Loaded from JSON, with every field optional. Missing or malformed files
//! fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Grid ===
    /// Bubbles in a full row
    pub cols: u32,
    /// Rows between the ceiling and the launcher
    pub rows: u32,
    /// HUD band above the ceiling (world units)
    pub top_margin: f32,

    // === Projectile ===
    /// Distance travelled per tick (world units)
    pub velocity: f32,
    /// Aim angle clamp (radians, symmetric)
    pub aim_limit: f32,

    // === Rules ===
    /// Smallest same-color cluster that explodes
    pub min_cluster_size: usize,
    /// Ticks the explosion effect plays before bubbles start falling
    pub explode_ticks: u32,
    /// Score needed to earn one bomb
    pub points_per_bomb: u64,
    /// Bomb blast radius, in bubble diameters
    pub bomb_blast_diameters: f32,

    // === Viewport ===
    /// Viewport used until the host reports a resize
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 8,
            rows: 12,
            top_margin: 0.3,

            velocity: 0.04,
            aim_limit: 1.0,

            min_cluster_size: 3,
            explode_ticks: 50,
            points_per_bomb: 10,
            bomb_blast_diameters: 1.5,

            viewport_width: 1080,
            viewport_height: 1920,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load config from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would make the simulation degenerate
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.cols = self.cols.max(1);
        self.rows = self.rows.max(2);
        if !(self.velocity > 0.0) {
            self.velocity = defaults.velocity;
        }
        if !(self.aim_limit > 0.0) {
            self.aim_limit = defaults.aim_limit;
        }
        if !(self.top_margin >= 0.0) {
            self.top_margin = defaults.top_margin;
        }
        if !(self.bomb_blast_diameters >= 0.0) {
            self.bomb_blast_diameters = defaults.bomb_blast_diameters;
        }
        self.min_cluster_size = self.min_cluster_size.max(1);
        self.explode_ticks = self.explode_ticks.max(1);
        self.points_per_bomb = self.points_per_bomb.max(1);
        self.viewport_width = self.viewport_width.max(1);
        self.viewport_height = self.viewport_height.max(1);
        self
    }
}
