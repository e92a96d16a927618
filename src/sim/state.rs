//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cluster::ClusterStatus;
use super::field::BubbleField;
use super::geometry::Geometry;
use crate::consts::NUM_COLORS;
use crate::settings::GameConfig;

/// Current mode of the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Lay out the level's bubbles
    Initialize,
    /// Projectile loaded, waiting for the fire tap
    Ready,
    /// Projectile in flight
    Firing,
    /// Explosion effect playing
    Exploding,
    /// Unsupported bubbles dropping off the field
    Falling,
    /// Field reached the launcher (latched)
    GameOver,
    /// Field emptied, waiting for a tap to start the next level
    LevelClear,
}

/// Bubble color, or the bomb projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleType {
    Green,
    Red,
    Blue,
    Yellow,
    /// Clears everything within its blast radius; never placed in the field
    Bomb,
}

impl BubbleType {
    /// The placeable colors, in palette order
    pub const COLORS: [BubbleType; NUM_COLORS] = [
        BubbleType::Green,
        BubbleType::Red,
        BubbleType::Blue,
        BubbleType::Yellow,
    ];

    /// Color for a palette index (wraps)
    pub fn from_index(index: usize) -> Self {
        Self::COLORS[index % NUM_COLORS]
    }

    /// Pick a random color
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::COLORS[rng.random_range(0..NUM_COLORS)]
    }

    pub fn is_bomb(self) -> bool {
        self == BubbleType::Bomb
    }
}

/// A bubble resting in the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub pos: Vec2,
    pub kind: BubbleType,
}

impl Bubble {
    pub fn new(pos: Vec2, kind: BubbleType) -> Self {
        Self { pos, kind }
    }
}

/// The single active projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Flight angle (0 = straight up, flips sign on wall bounce)
    pub angle: f32,
    pub kind: BubbleType,
    /// Color to restore when the bomb selection is toggled off
    pub held: BubbleType,
}

impl Projectile {
    pub fn new(pos: Vec2, kind: BubbleType) -> Self {
        Self {
            pos,
            angle: 0.0,
            kind,
            held: kind,
        }
    }

    /// Advance one tick along the current angle
    pub fn advance(&mut self, velocity: f32) {
        self.pos += crate::aim_direction(self.angle) * velocity;
    }
}

/// One explosion burst entry (a removed bubble, or the detonated bomb)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub kind: BubbleType,
}

/// Score, level and bomb stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub level: u32,
    pub bomb_count: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            bomb_count: 0,
        }
    }
}

impl GameSession {
    /// Add points, granting a bomb for every `points_per_bomb` crossed.
    ///
    /// Returns the number of bombs granted.
    pub fn award(&mut self, points: u64, points_per_bomb: u64) -> u32 {
        let per_bomb = points_per_bomb.max(1);
        let before = self.score / per_bomb;
        self.score += points;
        let granted = (self.score / per_bomb - before) as u32;
        self.bomb_count += granted;
        granted
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Derived geometry for the current viewport
    pub geometry: Geometry,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub mode: GameMode,
    pub session: GameSession,
    /// Bubbles resting in (or falling from) the field
    pub field: BubbleField,
    /// Per-bubble tags from the last search pass (same length as `field` while falling)
    pub statuses: Vec<ClusterStatus>,
    /// Loaded projectile
    pub projectile: Projectile,
    /// Preview of the next projectile color
    pub on_deck: BubbleType,
    /// Aim angle reported by the player, clamped
    pub aim_angle: f32,
    /// Explosion burst for the current EXPLODING phase
    pub particles: Vec<Particle>,
    /// EXPLODING countdown, in ticks
    pub event_time: f32,
    /// Bomb position waiting to detonate on the first EXPLODING tick
    pub pending_blast: Option<Vec2>,
    /// Bubbles render grey once the game is over
    pub desaturated: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let geometry = Geometry::new(&config);
        let mut rng = Pcg32::seed_from_u64(seed);
        let loaded = BubbleType::random(&mut rng);
        let on_deck = BubbleType::random(&mut rng);

        Self {
            config,
            geometry,
            seed,
            rng,
            mode: GameMode::Initialize,
            session: GameSession::default(),
            field: BubbleField::new(),
            statuses: Vec::new(),
            projectile: Projectile::new(geometry.origin, loaded),
            on_deck,
            aim_angle: 0.0,
            particles: Vec::new(),
            event_time: 0.0,
            pending_blast: None,
            desaturated: false,
            time_ticks: 0,
        }
    }

    /// Lay out `level` bubbles from the top-left corner, wrapping rows into the hex pattern
    pub fn populate_level(&mut self) {
        let geo = self.geometry;
        let r = geo.bubble_radius;
        let d = geo.bubble_diameter;
        let eps = 0.001;

        let mut x = r;
        let mut y = r;
        for i in 0..self.session.level as usize {
            self.field.add(
                Vec2::new(geo.min_world_x + x, geo.max_world_y - y),
                BubbleType::from_index(i),
            );

            x += d;
            if x >= geo.world_width + r - eps {
                // Full row done, next row is shifted half a bubble
                x = d;
                y += geo.row_step();
            } else if x >= geo.world_width - eps {
                x = r;
                y += geo.row_step();
            }
        }
    }

    /// Load the next projectile at the launcher and roll a new preview
    pub fn load_next_projectile(&mut self) {
        let kind = self.on_deck;
        self.on_deck = BubbleType::random(&mut self.rng);
        self.projectile = Projectile::new(self.geometry.origin, kind);
    }

    /// Lowest bubble center, if any
    pub fn lowest_bubble_y(&self) -> Option<f32> {
        self.field.iter().map(|b| b.pos.y).reduce(f32::min)
    }

    /// Whether the hex field has reached the game-over line
    pub fn field_reached_launcher(&self) -> bool {
        self.lowest_bubble_y()
            .is_some_and(|y| y <= self.geometry.game_over_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_grants_bombs_per_threshold() {
        let mut session = GameSession::default();
        assert_eq!(session.award(7, 10), 0);
        assert_eq!(session.award(3, 10), 1);
        assert_eq!(session.award(25, 10), 2);
        assert_eq!(session.score, 35);
        assert_eq!(session.bomb_count, 3);
    }

    #[test]
    fn test_populate_single_bubble() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.populate_level();
        assert_eq!(state.field.count(), 1);
        let geo = state.geometry;
        let b = state.field.get(0).unwrap();
        assert!((b.pos.x - (geo.min_world_x + geo.bubble_radius)).abs() < 1e-6);
        assert!((b.pos.y - (geo.max_world_y - geo.bubble_radius)).abs() < 1e-6);
        assert_eq!(b.kind, BubbleType::Green);
    }

    #[test]
    fn test_populate_wraps_into_hex_rows() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.session.level = 16;
        state.populate_level();
        let geo = state.geometry;

        let rows: Vec<f32> = state.field.iter().map(|b| b.pos.y).collect();
        let top = geo.ceiling_row_y();
        let second = top - geo.row_step();
        let third = second - geo.row_step();

        // 8 in the first row, 7 in the shifted row, then a new full row
        assert!(rows[..8].iter().all(|y| (y - top).abs() < 1e-5));
        assert!(rows[8..15].iter().all(|y| (y - second).abs() < 1e-5));
        assert!((rows[15] - third).abs() < 1e-5);

        let shifted = state.field.get(8).unwrap();
        assert!((shifted.pos.x - (geo.min_world_x + geo.bubble_diameter)).abs() < 1e-5);

        // Colors cycle through the palette
        assert_eq!(state.field.get(4).unwrap().kind, BubbleType::Green);
        assert_eq!(state.field.get(5).unwrap().kind, BubbleType::Red);
    }

    #[test]
    fn test_load_next_projectile_promotes_preview() {
        let mut state = GameState::new(GameConfig::default(), 42);
        let preview = state.on_deck;
        state.projectile.pos = Vec2::new(0.5, 0.5);
        state.load_next_projectile();
        assert_eq!(state.projectile.kind, preview);
        assert_eq!(state.projectile.pos, state.geometry.origin);
        assert!(!state.on_deck.is_bomb());
    }

    #[test]
    fn test_same_seed_same_colors() {
        let mut a = GameState::new(GameConfig::default(), 99);
        let mut b = GameState::new(GameConfig::default(), 99);
        for _ in 0..20 {
            a.load_next_projectile();
            b.load_next_projectile();
            assert_eq!(a.projectile.kind, b.projectile.kind);
        }
    }

    #[test]
    fn test_empty_field_never_game_over() {
        let state = GameState::new(GameConfig::default(), 1);
        assert!(state.lowest_bubble_y().is_none());
        assert!(!state.field_reached_launcher());
    }
}
