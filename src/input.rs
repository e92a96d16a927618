//! Input command queue
//!
//! Host callbacks (touch, resize) may run on another thread than the frame
//! loop. They push [`Command`]s through an [`InputSender`]; the simulation
//! drains the [`CommandQueue`] once at the start of each tick, so the live
//! state only ever has one writer.

use std::sync::mpsc;

use glam::Vec2;

use crate::sim::TickInput;

/// A single player or host event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Aim angle in radians (0 = straight up, positive leans left)
    Aim(f32),
    /// Fire in READY, continue in LEVEL_CLEAR
    Fire,
    /// Tap in world coordinates, checked against the bomb icon
    SelectBomb(Vec2),
    /// Viewport size in pixels
    Resize { width: u32, height: u32 },
}

/// Create a connected sender/queue pair
pub fn command_queue() -> (InputSender, CommandQueue) {
    let (tx, rx) = mpsc::channel();
    (InputSender { tx }, CommandQueue { rx })
}

/// Producer half, cheap to clone into host callbacks
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::Sender<Command>,
}

impl InputSender {
    /// Queue a command; dropped silently once the simulation is gone
    pub fn send(&self, command: Command) {
        if self.tx.send(command).is_err() {
            log::trace!("Simulation gone, dropping {:?}", command);
        }
    }

    pub fn report_aim_angle(&self, radians: f32) {
        self.send(Command::Aim(radians));
    }

    pub fn report_fire_tap(&self) {
        self.send(Command::Fire);
    }

    pub fn report_bomb_select_tap(&self, pos: Vec2) {
        self.send(Command::SelectBomb(pos));
    }

    pub fn on_resize(&self, width: u32, height: u32) {
        self.send(Command::Resize { width, height });
    }
}

/// Consumer half, owned by the simulation
#[derive(Debug)]
pub struct CommandQueue {
    rx: mpsc::Receiver<Command>,
}

impl CommandQueue {
    /// Collapse everything queued since the last tick into one input.
    ///
    /// Last write wins for aim, bomb tap and resize; fire is latched.
    pub fn drain(&self) -> TickInput {
        let mut input = TickInput::default();
        for command in self.rx.try_iter() {
            match command {
                Command::Aim(angle) => input.aim_angle = Some(angle),
                Command::Fire => input.fire = true,
                Command::SelectBomb(pos) => input.bomb_select = Some(pos),
                Command::Resize { width, height } => input.resize = Some((width, height)),
            }
        }
        input
    }
}

/// Convert a pixel position (origin top-left, Y down) to world coordinates.
///
/// The shorter viewport side spans the world's X range. Returns `None` for an
/// empty viewport.
pub fn screen_to_world(pixel: Vec2, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    let (w, h) = (width as f32, height as f32);
    let scale = 2.0 / w.min(h);
    Some(Vec2::new(pixel.x - w * 0.5, h * 0.5 - pixel.y) * scale)
}

/// Aim angle that points the launcher at `origin` towards `target`
pub fn aim_angle_towards(origin: Vec2, target: Vec2) -> f32 {
    let delta = target - origin;
    (-delta.x).atan2(delta.y)
}
