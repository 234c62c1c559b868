//! Kite Drift entry point
//!
//! Native builds run a headless demo: the autopilot flies the kite at a fixed
//! 60 Hz frame rate, contacts come from the built-in AABB sweep, and every game
//! over is folded into the records file before the next run starts.
//!
//! Usage: `kite-drift [seed] [seconds]`
//! - `KITE_TUNING`: path to a tuning JSON file
//! - `KITE_RECORDS`: path to the records file

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use kite_drift::persistence::JsonFileStore;
    use kite_drift::sim::{GameEvent, TickInput, autopilot};
    use kite_drift::{RecordStore, Session, Tuning};

    env_logger::init();
    log::info!("Kite Drift (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(120.0);

    let tuning = match std::env::var("KITE_TUNING") {
        Ok(path) => Tuning::load_or_default(Path::new(&path)),
        Err(_) => Tuning::default(),
    };
    let store = match std::env::var("KITE_RECORDS") {
        Ok(path) => JsonFileStore::new(path),
        Err(_) => JsonFileStore::default_location(),
    };
    log::info!("Records file: {}", store.path().display());

    let mut session = Session::new(seed, tuning, store);
    let frames = (seconds * 60.0).max(0.0) as u64;
    // Runs restart on a fresh clock, so game time is tracked per run
    let mut run_start = 0u64;
    let mut runs = 0u32;

    for frame in 1..=frames {
        let now = (frame - run_start) as f64 / 60.0;
        session.set_control_held(autopilot::decide(session.state()));
        session.update(&TickInput::at(now));
        session.resolve_contacts();

        let game_over = session
            .drain_events()
            .into_iter()
            .any(|e| matches!(e, GameEvent::GameOver));
        if game_over {
            runs += 1;
            if let Some(summary) = session.frame().summary {
                println!(
                    "Run {}: score {:.0}, charms {}{}",
                    runs,
                    summary.final_score,
                    session.state().charm_count,
                    if summary.new_high_score { " (new best!)" } else { "" }
                );
            }
            session.restart();
            run_start = frame;
        }
    }

    let last = session.frame();
    println!(
        "Unfinished run: score {:.0}, charms {}",
        last.score, last.charm_count
    );
    let records = session.store().load();
    println!(
        "Best {:.0}, lifetime charms {} over {} finished run(s)",
        records.high_score, records.total_charms, runs
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Session` directly; nothing to do here
}
