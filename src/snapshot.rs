//! Read-only frame snapshot for rendering
//!
//! The renderer never touches [`GameState`]. After each tick the engine copies
//! what a frame needs into the back buffer of a [`SnapshotBuffer`] and flips
//! it, so a reader always sees one complete tick.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::{BubbleType, GameMode, GameState, Particle};

/// Colors for game elements
pub mod colors {
    use crate::sim::BubbleType;

    pub const GREEN: [f32; 4] = [0.537, 0.770, 0.223, 0.8];
    pub const RED: [f32; 4] = [0.770, 0.637, 0.223, 0.8];
    pub const BLUE: [f32; 4] = [0.637, 0.223, 0.770, 0.8];
    pub const YELLOW: [f32; 4] = [0.223, 0.637, 0.770, 0.8];
    pub const BOMB: [f32; 4] = [0.15, 0.15, 0.18, 0.9];
    /// Every bubble once the game is over
    pub const DESATURATED: [f32; 4] = [0.5, 0.5, 0.5, 0.5];
    pub const HUD_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GAME_OVER_TEXT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const LEVEL_CLEAR_TEXT: [f32; 4] = [0.0, 0.1, 1.0, 1.0];

    pub fn for_kind(kind: BubbleType) -> [f32; 4] {
        match kind {
            BubbleType::Green => GREEN,
            BubbleType::Red => RED,
            BubbleType::Blue => BLUE,
            BubbleType::Yellow => YELLOW,
            BubbleType::Bomb => BOMB,
        }
    }
}

/// Per-instance data for a bubble draw call
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BubbleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl BubbleInstance {
    pub const fn new(position: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            position: [position.x, position.y],
            radius,
            _pad: 0.0,
            color,
        }
    }
}

/// Per-instance data for an explosion particle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    /// Ticks since the burst started
    pub elapsed: f32,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Banner shown over the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    GameOver,
    LevelClear,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Banner::GameOver => "GameOver!",
            Banner::LevelClear => "Level Clear!",
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            Banner::GameOver => colors::GAME_OVER_TEXT,
            Banner::LevelClear => colors::LEVEL_CLEAR_TEXT,
        }
    }
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub bombs: u32,
    pub banner: Option<Banner>,
}

impl Hud {
    /// Score as five zero-padded digits
    pub fn score_text(&self) -> String {
        format!("{:05}", self.score)
    }

    pub fn level_text(&self) -> String {
        format!("Lv.{}", self.level)
    }
}

/// Projectile as drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub kind: BubbleType,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub mode: GameMode,
    pub bubble_radius: f32,
    /// Field bubbles; `positions`, `kinds` and `colors` always share a length
    pub positions: Vec<Vec2>,
    pub kinds: Vec<BubbleType>,
    pub colors: Vec<[f32; 4]>,
    /// Present in READY and FIRING
    pub projectile: Option<ProjectileView>,
    pub on_deck: BubbleType,
    /// Present in READY
    pub aim_angle: Option<f32>,
    pub launcher: Vec2,
    /// Burst entries, non-empty only while EXPLODING
    pub particles: Vec<Particle>,
    pub particle_elapsed: f32,
    pub bomb_icon: Vec2,
    pub hud: Hud,
}

impl Default for FrameSnapshot {
    fn default() -> Self {
        Self {
            tick: 0,
            mode: GameMode::Initialize,
            bubble_radius: 0.0,
            positions: Vec::new(),
            kinds: Vec::new(),
            colors: Vec::new(),
            projectile: None,
            on_deck: BubbleType::Green,
            aim_angle: None,
            launcher: Vec2::ZERO,
            particles: Vec::new(),
            particle_elapsed: 0.0,
            bomb_icon: Vec2::ZERO,
            hud: Hud::default(),
        }
    }
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut snapshot = Self::default();
        snapshot.fill_from(state);
        snapshot
    }

    /// Overwrite this snapshot from `state`, reusing its allocations
    pub fn fill_from(&mut self, state: &GameState) {
        let geo = &state.geometry;

        self.tick = state.time_ticks;
        self.mode = state.mode;
        self.bubble_radius = geo.bubble_radius;

        self.positions.clear();
        self.kinds.clear();
        self.colors.clear();
        for bubble in state.field.iter() {
            self.positions.push(bubble.pos);
            self.kinds.push(bubble.kind);
            self.colors.push(if state.desaturated {
                colors::DESATURATED
            } else {
                colors::for_kind(bubble.kind)
            });
        }

        self.projectile = match state.mode {
            GameMode::Ready | GameMode::Firing => Some(ProjectileView {
                pos: state.projectile.pos,
                kind: state.projectile.kind,
            }),
            _ => None,
        };
        self.on_deck = state.on_deck;
        self.aim_angle = (state.mode == GameMode::Ready).then_some(state.aim_angle);
        self.launcher = geo.origin;

        self.particles.clear();
        if state.mode == GameMode::Exploding {
            self.particles.extend_from_slice(&state.particles);
        }
        self.particle_elapsed = state.event_time;
        self.bomb_icon = geo.bomb_icon();

        self.hud = Hud {
            score: state.session.score,
            level: state.session.level,
            bombs: state.session.bomb_count,
            banner: match state.mode {
                GameMode::GameOver => Some(Banner::GameOver),
                GameMode::LevelClear => Some(Banner::LevelClear),
                _ => None,
            },
        };
    }

    /// Field bubbles plus the projectile, ready for `bytemuck::cast_slice`
    pub fn bubble_instances(&self) -> Vec<BubbleInstance> {
        let mut instances: Vec<BubbleInstance> = self
            .positions
            .iter()
            .zip(&self.colors)
            .map(|(pos, color)| BubbleInstance::new(*pos, self.bubble_radius, *color))
            .collect();
        if let Some(projectile) = self.projectile {
            instances.push(BubbleInstance::new(
                projectile.pos,
                self.bubble_radius,
                colors::for_kind(projectile.kind),
            ));
        }
        instances
    }

    pub fn particle_instances(&self) -> Vec<ParticleInstance> {
        self.particles
            .iter()
            .map(|p| ParticleInstance {
                position: [p.pos.x, p.pos.y],
                elapsed: self.particle_elapsed,
                radius: self.bubble_radius,
                color: colors::for_kind(p.kind),
            })
            .collect()
    }
}

/// Two snapshots: one being written, one being read
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuffer {
    buffers: [FrameSnapshot; 2],
    front: usize,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `state` into the back buffer, then make it the front
    pub fn publish(&mut self, state: &GameState) {
        let back = 1 - self.front;
        self.buffers[back].fill_from(state);
        self.front = back;
    }

    /// The most recently published snapshot
    pub fn front(&self) -> &FrameSnapshot {
        &self.buffers[self.front]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::{TickInput, tick};
    use proptest::prelude::*;

    fn ready_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 5);
        tick(&mut state, &TickInput::default());
        state
    }

    #[test]
    fn test_capture_ready() {
        let state = ready_state();
        let snap = FrameSnapshot::capture(&state);
        assert_eq!(snap.mode, GameMode::Ready);
        assert_eq!(snap.positions.len(), 1);
        assert_eq!(snap.colors[0], colors::GREEN);
        assert_eq!(snap.aim_angle, Some(0.0));
        assert!(snap.projectile.is_some());
        assert!(snap.particles.is_empty());
        assert_eq!(snap.hud.banner, None);
        assert_eq!(snap.bomb_icon, state.geometry.bomb_icon());
    }

    #[test]
    fn test_hud_text() {
        let hud = Hud {
            score: 42,
            level: 3,
            bombs: 4,
            banner: Some(Banner::GameOver),
        };
        assert_eq!(hud.score_text(), "00042");
        assert_eq!(hud.level_text(), "Lv.3");
        assert_eq!(Banner::GameOver.text(), "GameOver!");
        assert_eq!(Banner::LevelClear.text(), "Level Clear!");
    }

    #[test]
    fn test_game_over_is_grey_without_aim() {
        let mut state = ready_state();
        state.mode = GameMode::GameOver;
        state.desaturated = true;
        let snap = FrameSnapshot::capture(&state);
        assert!(snap.colors.iter().all(|c| *c == colors::DESATURATED));
        assert_eq!(snap.aim_angle, None);
        assert_eq!(snap.projectile, None);
        assert_eq!(snap.hud.banner, Some(Banner::GameOver));
    }

    #[test]
    fn test_instances_cast_to_bytes() {
        let state = ready_state();
        let snap = FrameSnapshot::capture(&state);
        let instances = snap.bubble_instances();
        // Field bubble plus the loaded projectile
        assert_eq!(instances.len(), 2);
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<BubbleInstance>());
        assert_eq!(std::mem::size_of::<BubbleInstance>(), 32);
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
    }

    #[test]
    fn test_particle_instances_while_exploding() {
        let mut state = ready_state();
        state.mode = GameMode::Exploding;
        state.event_time = 7.0;
        state.particles = vec![
            Particle {
                pos: Vec2::new(0.25, 0.5),
                kind: BubbleType::Blue,
            },
            Particle {
                pos: Vec2::new(-0.25, 0.5),
                kind: BubbleType::Bomb,
            },
        ];

        let snap = FrameSnapshot::capture(&state);
        let instances = snap.particle_instances();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].position, [0.25, 0.5]);
        assert_eq!(instances[0].color, colors::BLUE);
        assert_eq!(instances[1].color, colors::BOMB);
        for instance in &instances {
            assert_eq!(instance.elapsed, 7.0);
            assert_eq!(instance.radius, state.geometry.bubble_radius);
        }

        // Outside EXPLODING the burst is hidden
        state.mode = GameMode::Falling;
        assert!(FrameSnapshot::capture(&state).particle_instances().is_empty());
    }

    #[test]
    fn test_buffer_flips() {
        let mut state = ready_state();
        let mut buffer = SnapshotBuffer::new();
        buffer.publish(&state);
        assert_eq!(buffer.front().tick, 1);

        tick(&mut state, &TickInput::default());
        buffer.publish(&state);
        assert_eq!(buffer.front().tick, 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn arrays_stay_in_lock_step(seed in any::<u64>(), aims in prop::collection::vec(-1.0f32..1.0, 1..6)) {
            let mut state = ready_state();
            state.session.level = (seed % 24) as u32 + 1;
            state.field.clear();
            state.populate_level();

            let mut buffer = SnapshotBuffer::new();
            for aim in aims {
                let input = TickInput { aim_angle: Some(aim), fire: true, ..Default::default() };
                tick(&mut state, &input);
                for _ in 0..300 {
                    tick(&mut state, &TickInput::default());
                    buffer.publish(&state);
                    let snap = buffer.front();
                    prop_assert_eq!(snap.positions.len(), state.field.count());
                    prop_assert_eq!(snap.kinds.len(), snap.positions.len());
                    prop_assert_eq!(snap.colors.len(), snap.positions.len());
                    if snap.mode != GameMode::Exploding {
                        prop_assert!(snap.particles.is_empty());
                    }
                }
            }
        }
    }
}
