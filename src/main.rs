//! Balloon Pop headless demo
//!
//! Plays one session with a simple bot and prints the final snapshot.
//! Usage: `balloon-pop [easy|medium|hard] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use balloon_pop::sim::{FixedStepDriver, GameEvent, GameSession};
    use balloon_pop::{Difficulty, SessionConfig};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = match args.next() {
        Some(arg) => match Difficulty::from_str(&arg) {
            Some(d) => d,
            None => {
                eprintln!("unknown difficulty '{}', expected easy|medium|hard", arg);
                std::process::exit(2);
            }
        },
        None => Difficulty::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let config = SessionConfig::new(difficulty).with_seed(seed);
    let mut session = match GameSession::start(config) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Cannot start session: {}", err);
            std::process::exit(1);
        }
    };
    log::info!("Balloon Pop (headless) - {} seed {}", difficulty.as_str(), seed);

    let mut driver = FixedStepDriver::default();
    let frame = Duration::from_millis(100);
    let mut frames: u64 = 0;

    while !session.has_returned_to_menu() {
        frames += 1;

        // Bot: every 0.7 s try a wrong balloon first, then the target
        if frames % 7 == 0 {
            if let Some(round) = session.round() {
                let target = round.target;
                let wrong = round.alive().find(|b| b.number != target).map(|b| b.id);
                let hit = round.alive().find(|b| b.number == target).map(|b| b.id);
                if frames % 21 == 0 {
                    if let Some(id) = wrong {
                        session.on_pop(id);
                    }
                } else if let Some(id) = hit {
                    session.on_pop(id);
                }
            }
        }

        driver.pump(&mut session, frame);

        for event in session.drain_events() {
            if let GameEvent::SessionEnded { score, reason } = event {
                println!("Session ended ({:?}) - score {}", reason, score);
            }
            log::debug!("{:?} -> {:?}", event, event.cues());
        }
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize snapshot: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a web shell; no standalone entry point
}
