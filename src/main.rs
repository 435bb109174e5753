//! Tower Builder entry point
//!
//! Native builds have no renderer; this runs a headless demo game with the
//! autoplay AI and logs the result. Set `RUST_LOG=debug` to watch every drop.
//!
//! Usage: `tower-builder [seed] [max_seconds]`

use std::time::{SystemTime, UNIX_EPOCH};

use tower_builder::app::MenuAction;
use tower_builder::audio::AudioManager;
use tower_builder::consts::SIM_DT;
use tower_builder::persistence::JsonStore;
use tower_builder::sim::GameEvent;
use tower_builder::{App, AppContext, Driver, Screen, SessionEvent, Tuning};

/// Stop the demo after this much simulated time if the AI never misses
const DEFAULT_MAX_SECONDS: f32 = 120.0;

fn main() {
    env_logger::init();
    log::info!("Tower Builder (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let max_seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_MAX_SECONDS);

    let ctx = AppContext::with_store(
        Tuning::default(),
        AudioManager::default(),
        JsonStore::from_env(),
    );
    let mut driver = Driver::new(App::new(ctx, seed));
    driver.idle_mode = true;
    driver.push(SessionEvent::Menu(MenuAction::StartGame));

    let max_frames = (max_seconds / SIM_DT) as u64;
    for _ in 0..max_frames {
        driver.push(SessionEvent::Frame { dt: SIM_DT });
        for event in driver.run_pending() {
            if let GameEvent::BlockPlaced { tower_len, score, .. } = event {
                log::debug!("Tower {tower_len} blocks, score {score}");
            }
        }
        if !driver.app.is_playing() {
            break;
        }
    }

    let snapshot = driver.snapshot();
    match driver.app.screen {
        Screen::GameOver { score } => {
            println!(
                "Game over: {} blocks, score {}, best {}",
                snapshot.tower.len(),
                score,
                driver.app.ctx.high_score()
            );
        }
        _ => {
            println!(
                "Stopped after {max_seconds}s: {} blocks, score {}, speed {:.2}",
                snapshot.tower.len(),
                snapshot.score,
                snapshot.speed
            );
        }
    }
}
