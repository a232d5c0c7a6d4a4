use anyhow::Context;
use serde_json::to_string_pretty;
use signa_orchestrator::{RecordingObserver, Session, SessionConfig};

/// Usage: `translate [session.json] <text...>`; defaults to the shared fixture session.
fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let cfg_path = match args.first() {
        Some(a) if a.ends_with(".json") => std::path::PathBuf::from(args.remove(0)),
        _ => signa_test_fixtures::fixtures_root().join("session.json"),
    };
    let text = if args.is_empty() {
        "Hola, ahora gracias".to_string()
    } else {
        args.join(" ")
    };

    let cfg = SessionConfig::from_path(&cfg_path)
        .with_context(|| format!("loading {}", cfg_path.display()))?;
    let mut session = Session::from_config(cfg)?.with_observer(RecordingObserver::default());

    let tokens = session.submit(&text)?;
    println!("{text:?} -> {tokens}");

    let mut frames = 0;
    loop {
        let frame = session.step(1.0 / 30.0)?;
        frames += 1;
        for event in &frame.events {
            println!("[{:>4}] {}", frame.epoch, serde_json::to_string(event)?);
        }
        if frame.events.iter().any(|e| {
            matches!(e, signa_animation_core::SequencerEvent::Completed)
        }) || frames > 10_000
        {
            println!("final pose:\n{}", to_string_pretty(&frame.changes)?);
            break;
        }
    }
    Ok(())
}
