//! Headless particle backdrop run
//!
//! Usage: backdrop_demo [config.toml]
//! Seed comes from PULSE_BACKDROP_SEED (default 42).

use anyhow::{Context, Result};
use pulse_backdrop::{FieldConfig, ParticleBackdrop};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const FRAMES: u32 = 180;
const TOGGLE_EVERY: u32 = 60;
const FRAME_DT: Duration = Duration::from_micros(16_667);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => FieldConfig::load(&path)
            .with_context(|| format!("loading field config from {}", path))?,
        None => FieldConfig::default(),
    };

    let seed = match std::env::var("PULSE_BACKDROP_SEED") {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("PULSE_BACKDROP_SEED is not a u64: {}", raw))?,
        Err(_) => 42,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let mut backdrop = ParticleBackdrop::new(&config, &mut rng)?;
    log::info!(
        "Particle backdrop ready: {} particles, seed {}",
        backdrop.field().count(),
        seed
    );

    for frame in 0..FRAMES {
        if frame % TOGGLE_EVERY == 0 {
            let playing = !backdrop.is_playing();
            log::info!("Frame {}: playback {}", frame, if playing { "on" } else { "off" });
            backdrop.set_playing(playing);
        }

        let rotation = backdrop.frame(FRAME_DT)?;
        log::trace!("Frame {}: yaw {:.5} pitch {:.5}", frame, rotation.yaw, rotation.pitch);
    }

    let vertices = backdrop.render_data().len();
    log::info!("Prepared {} vertices for upload", vertices);

    println!("{}", serde_json::to_string_pretty(&backdrop.stats())?);
    Ok(())
}
