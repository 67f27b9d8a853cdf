//! # Dotted Text Demo
//!
//! Runs the effect headless in real time on a software surface and prints
//! an ASCII preview each time the particles settle on a text.
//!
//! ```text
//! dotted_text_demo [config.toml]
//! RUST_LOG=dotmorph=debug dotted_text_demo
//! ```

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use dotmorph::{DottedText, DottedTextConfig, MorphEvent};
use dotmorph_render::SoftwareSurface;
use tracing::{error, info};

const CANVAS_WIDTH: u32 = 480;
const CANVAS_HEIGHT: u32 = 160;
const PREVIEW_COLS: u32 = 96;
const PREVIEW_ROWS: u32 = 24;

/// One full rotation through the configured texts.
fn demo_run_time(config: &DottedTextConfig) -> Duration {
    let rotations = u32::try_from(config.texts.len().max(1)).unwrap_or(u32::MAX);
    config.text_interval().saturating_mul(rotations)
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = match std::env::args().nth(1) {
        Some(path) => match DottedTextConfig::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                error!(%path, "failed to load configuration: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => DottedTextConfig::default(),
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    DOTMORPH DEMO v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Canvas:   {CANVAS_WIDTH}x{CANVAS_HEIGHT}");
    println!("  FPS:      {}", config.fps);
    println!("  Texts:    {:?}", config.texts);
    println!();

    let run_time = demo_run_time(&config);
    let frame_time = config.frame_interval();

    let surface = SoftwareSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut effect = match DottedText::new(config, surface, CANVAS_WIDTH, CANVAS_HEIGHT) {
        Ok(effect) => effect,
        Err(e) => {
            error!("failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };
    let events = effect.events();

    let started = Instant::now();
    let mut last = started;
    let mut previewed = false;

    while started.elapsed() < run_time {
        thread::sleep(frame_time);
        let now = Instant::now();
        effect.advance(now - last);
        last = now;

        for event in events.drain() {
            match event {
                MorphEvent::TextChanged { text, target_count, .. } => {
                    println!("▶ \"{text}\" ({target_count} targets)");
                    previewed = false;
                }
                MorphEvent::Reconciled(report) => {
                    println!(
                        "  reconciled: {} created, {} reused, {} retired -> {} active, {} pooled",
                        report.created, report.reused, report.retired, report.active, report.pooled
                    );
                }
                MorphEvent::Stopped => {}
            }
        }

        if !previewed && effect.system().is_settled() {
            println!("{}", effect.surface().to_ascii(PREVIEW_COLS, PREVIEW_ROWS));
            previewed = true;
        }
    }

    effect.stop();
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "demo finished");
    println!("{}", effect.stats());

    ExitCode::SUCCESS
}
