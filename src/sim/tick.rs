//! Simulation tick
//!
//! Core game loop that advances the state machine one step:
//! INITIALIZE → READY → FIRING → EXPLODING → FALLING → READY / GAME_OVER / LEVEL_CLEAR.
//!
//! Player input is applied first, then the current mode runs exactly once.

use glam::Vec2;

use super::cluster::{self, ClusterStatus};
use super::collision::{outside_walls, resolve_landing};
use super::field::descending;
use super::geometry::Geometry;
use super::state::{BubbleType, GameMode, GameState, Particle};
use crate::consts::FALL_SPEED_FACTOR;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Latest aim angle (last write wins)
    pub aim_angle: Option<f32>,
    /// Fire / continue tap (latched)
    pub fire: bool,
    /// Latest tap position for the bomb selector (world units)
    pub bomb_select: Option<Vec2>,
    /// Latest viewport size in pixels
    pub resize: Option<(u32, u32)>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if let Some((width, height)) = input.resize {
        state.on_resize(width, height);
    }
    if let Some(angle) = input.aim_angle {
        state.report_aim_angle(angle);
    }
    if let Some(pos) = input.bomb_select {
        state.report_bomb_select_tap(pos);
    }
    if input.fire {
        state.report_fire_tap();
    }

    match state.mode {
        GameMode::Initialize => {
            state.populate_level();
            log::info!(
                "Level {} started with {} bubbles",
                state.session.level,
                state.field.count()
            );
            set_ready_state(state);
        }
        GameMode::Firing => step_firing(state),
        GameMode::Exploding => step_exploding(state),
        GameMode::Falling => step_falling(state),
        GameMode::Ready | GameMode::GameOver | GameMode::LevelClear => {}
    }
}

impl GameState {
    /// Recompute all derived geometry for a new viewport.
    ///
    /// Returns false (and changes nothing) for an empty viewport.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        let Some(geometry) = Geometry::for_viewport(&self.config, width, height) else {
            log::warn!("Ignoring resize to empty viewport {}x{}", width, height);
            return false;
        };
        self.geometry = geometry;
        if self.mode == GameMode::Ready {
            self.projectile.pos = geometry.origin;
        }
        true
    }

    /// Update the aim angle (READY only), clamped to the configured limit
    pub fn report_aim_angle(&mut self, angle: f32) {
        if self.mode != GameMode::Ready || !angle.is_finite() {
            return;
        }
        let limit = self.config.aim_limit;
        self.aim_angle = angle.clamp(-limit, limit);
    }

    /// Fire in READY; start the next level in LEVEL_CLEAR; otherwise ignored
    pub fn report_fire_tap(&mut self) {
        match self.mode {
            GameMode::Ready => {
                if self.projectile.kind.is_bomb() {
                    self.session.bomb_count = self.session.bomb_count.saturating_sub(1);
                }
                self.projectile.pos = self.geometry.origin;
                self.projectile.angle = self.aim_angle;
                self.mode = GameMode::Firing;
            }
            GameMode::LevelClear => {
                self.session.level += 1;
                self.mode = GameMode::Initialize;
            }
            _ => {}
        }
    }

    /// Toggle the loaded projectile between its color and a bomb (READY only)
    ///
    /// A tap inside the bomb icon arms a bomb when one is in stock; any other
    /// tap (or a second tap on the icon) restores the held color.
    pub fn report_bomb_select_tap(&mut self, pos: Vec2) {
        if self.mode != GameMode::Ready {
            return;
        }
        let geo = &self.geometry;
        let hit = pos.distance(geo.bomb_icon()) <= geo.bubble_radius;
        let projectile = &mut self.projectile;

        if hit && !projectile.kind.is_bomb() && self.session.bomb_count > 0 {
            projectile.held = projectile.kind;
            projectile.kind = BubbleType::Bomb;
        } else if projectile.kind.is_bomb() {
            projectile.kind = projectile.held;
        }
    }
}

fn step_firing(state: &mut GameState) {
    let geo = state.geometry;
    let projectile = &mut state.projectile;
    projectile.advance(state.config.velocity);

    // Flips every tick while outside, not just on entry
    if outside_walls(&geo, projectile.pos) {
        projectile.angle = -projectile.angle;
    }

    let Some(landing) = resolve_landing(&state.field, &geo, projectile.pos) else {
        return;
    };

    if projectile.kind.is_bomb() {
        state.pending_blast = Some(projectile.pos);
        log::debug!("Bomb detonating at {:?}", projectile.pos);
    } else {
        let index = state.field.add(landing.pos(), projectile.kind);
        log::debug!(
            "{:?} bubble settled at {:?} (index {})",
            projectile.kind,
            landing.pos(),
            index
        );
    }

    state.particles.clear();
    state.event_time = 0.0;
    state.mode = GameMode::Exploding;
}

fn step_exploding(state: &mut GameState) {
    if state.event_time < 1.0 {
        resolve_explosion(state);
    }
    state.event_time += 1.0;

    if state.particles.is_empty() || state.event_time >= state.config.explode_ticks as f32 {
        state.mode = GameMode::Falling;
    }
}

/// Run the explosion and falling searches once for the settled projectile
fn resolve_explosion(state: &mut GameState) {
    let geo = state.geometry;
    let config = &state.config;
    state.particles.clear();

    let exploding = match state.pending_blast.take() {
        Some(center) => {
            state.particles.push(Particle {
                pos: center,
                kind: BubbleType::Bomb,
            });
            let radius = config.bomb_blast_diameters * geo.bubble_diameter;
            cluster::find_blast(&state.field, center, radius)
        }
        None => match state.field.count().checked_sub(1) {
            Some(newest) => cluster::find_cluster(
                &state.field,
                newest,
                geo.cluster_contact_threshold,
                config.min_cluster_size,
            ),
            None => Vec::new(),
        },
    };

    let removed = state.field.remove_indices(&descending(exploding));
    if !removed.is_empty() {
        log::debug!("Exploded {} bubbles", removed.len());
    }
    state.particles.extend(removed.iter().map(|b| Particle {
        pos: b.pos,
        kind: b.kind,
    }));

    state.statuses = cluster::find_floating(
        &state.field,
        geo.cluster_contact_threshold,
        geo.anchor_line(),
    );
    let falling = state
        .statuses
        .iter()
        .filter(|s| **s == ClusterStatus::Falling)
        .count();
    if falling > 0 {
        log::debug!("{} unsupported bubbles falling", falling);
    }

    let points = (removed.len() + falling) as u64;
    let granted = state.session.award(points, config.points_per_bomb);
    if granted > 0 {
        log::info!(
            "Score {} - earned {} bomb(s), {} in stock",
            state.session.score,
            granted,
            state.session.bomb_count
        );
    }
}

fn step_falling(state: &mut GameState) {
    let geo = state.geometry;
    let fall = state.config.velocity * FALL_SPEED_FACTOR;

    let mut highest: Option<f32> = None;
    for (index, status) in state.statuses.iter().enumerate() {
        if *status != ClusterStatus::Falling {
            continue;
        }
        if let Some(bubble) = state.field.get_mut(index) {
            bubble.pos.y -= fall;
            highest = Some(highest.map_or(bubble.pos.y, |h| h.max(bubble.pos.y)));
        }
    }

    if highest.is_some_and(|y| y >= geo.floor_line()) {
        return;
    }

    let gone: Vec<usize> = state
        .statuses
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == ClusterStatus::Falling)
        .map(|(index, _)| index)
        .collect();
    state.field.remove_indices(&descending(gone));
    state.statuses.clear();
    set_ready_state(state);
}

/// Settle into READY, unless the field reached the launcher or was cleared
fn set_ready_state(state: &mut GameState) {
    state.particles.clear();

    if state.field_reached_launcher() {
        state.mode = GameMode::GameOver;
        state.desaturated = true;
        log::info!(
            "Game over at level {} with score {}",
            state.session.level,
            state.session.score
        );
    } else if state.field.is_empty() {
        state.mode = GameMode::LevelClear;
        log::info!("Level {} clear", state.session.level);
    } else {
        state.load_next_projectile();
        state.mode = GameMode::Ready;
    }
}
