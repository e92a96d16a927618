//! Host-facing facade
//!
//! Owns the simulation state, the consumer end of the command queue and the
//! snapshot buffer. The host calls [`Engine::frame`] once per rendered frame
//! and hands [`Engine::snapshot`] to its renderer.

use crate::input::{CommandQueue, InputSender, command_queue};
use crate::settings::GameConfig;
use crate::sim::{GameMode, GameState, tick};
use crate::snapshot::{FrameSnapshot, SnapshotBuffer};

pub struct Engine {
    state: GameState,
    queue: CommandQueue,
    snapshots: SnapshotBuffer,
}

impl Engine {
    /// Start a session; the returned sender feeds player input to it
    pub fn new(config: GameConfig, seed: u64) -> (Self, InputSender) {
        let (sender, queue) = command_queue();
        let state = GameState::new(config, seed);
        log::info!("New session (seed {})", seed);

        let mut snapshots = SnapshotBuffer::new();
        snapshots.publish(&state);

        (
            Self {
                state,
                queue,
                snapshots,
            },
            sender,
        )
    }

    /// Apply queued input, run one tick and publish the result
    pub fn frame(&mut self) -> &FrameSnapshot {
        let input = self.queue.drain();
        tick(&mut self.state, &input);
        self.snapshots.publish(&self.state);
        self.snapshots.front()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> &FrameSnapshot {
        self.snapshots.front()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn is_game_over(&self) -> bool {
        self.state.mode == GameMode::GameOver
    }
}
