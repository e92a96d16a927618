//! Bubble Burst headless driver
//!
//! Plays a seeded session with a simple aiming policy and logs HUD changes.
//!
//! Usage: `bubble-burst [CONFIG.json] [--seed N] [--levels N] [--frames N]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    native::run(std::env::args().skip(1).collect());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use bubble_burst::input::aim_angle_towards;
    use bubble_burst::sim::GameMode;
    use bubble_burst::snapshot::{FrameSnapshot, Hud};
    use bubble_burst::{Engine, GameConfig};

    struct Options {
        config: Option<PathBuf>,
        seed: u64,
        levels: u32,
        frames: u64,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                config: None,
                seed: 0x5eed,
                levels: 3,
                frames: 200_000,
            }
        }
    }

    fn parse_args(args: Vec<String>) -> Options {
        let mut options = Options::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seed" => parse_next(&mut iter, &arg, &mut options.seed),
                "--levels" => parse_next(&mut iter, &arg, &mut options.levels),
                "--frames" => parse_next(&mut iter, &arg, &mut options.frames),
                _ => options.config = Some(PathBuf::from(arg)),
            }
        }
        options
    }

    fn parse_next<T: std::str::FromStr>(
        iter: &mut impl Iterator<Item = String>,
        flag: &str,
        target: &mut T,
    ) {
        match iter.next().map(|v| v.parse::<T>()) {
            Some(Ok(value)) => *target = value,
            _ => log::warn!("Ignoring {} without a valid value", flag),
        }
    }

    /// Aim at the lowest bubble matching the loaded color, else straight up
    fn choose_aim(snapshot: &FrameSnapshot) -> f32 {
        let Some(projectile) = snapshot.projectile else {
            return 0.0;
        };
        snapshot
            .positions
            .iter()
            .zip(&snapshot.kinds)
            .filter(|(_, kind)| **kind == projectile.kind)
            .map(|(pos, _)| *pos)
            .min_by(|a, b| a.y.total_cmp(&b.y))
            .map_or(0.0, |target| aim_angle_towards(snapshot.launcher, target))
    }

    fn log_hud(hud: &Hud) {
        log::info!(
            "{}  {}  bombs: {}",
            hud.score_text(),
            hud.level_text(),
            hud.bombs
        );
    }

    pub fn run(args: Vec<String>) {
        let options = parse_args(args);
        let config = options
            .config
            .as_deref()
            .map(GameConfig::load)
            .unwrap_or_default();

        log::info!("Bubble Burst (headless) starting...");
        let (mut engine, input) = Engine::new(config, options.seed);
        let mut last_hud = engine.snapshot().hud;

        for _ in 0..options.frames {
            let snapshot = engine.frame();
            let hud = snapshot.hud;

            match snapshot.mode {
                GameMode::Ready => {
                    if hud.bombs > 0 && snapshot.positions.len() > 12 {
                        input.report_bomb_select_tap(snapshot.bomb_icon);
                    }
                    input.report_aim_angle(choose_aim(snapshot));
                    input.report_fire_tap();
                }
                GameMode::LevelClear => {
                    if hud.level >= options.levels {
                        log_hud(&hud);
                        log::info!("Played {} level(s)", hud.level);
                        return;
                    }
                    input.report_fire_tap();
                }
                GameMode::GameOver => {
                    log_hud(&hud);
                    if let Some(banner) = hud.banner {
                        log::info!("{}", banner.text());
                    }
                    return;
                }
                _ => {}
            }

            if hud != last_hud {
                log_hud(&hud);
                last_hud = hud;
            }
        }

        log::info!("Stopped after {} frames", options.frames);
    }
}
