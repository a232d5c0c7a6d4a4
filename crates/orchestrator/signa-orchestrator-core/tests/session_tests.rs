use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use signa_animation_core::{FsClipSource, MemoryClipSource, SequencerConfig, SequencerState};
use signa_gloss_core::{Dictionary, TranslateError};
use signa_orchestrator::{RecordingObserver, Session, SessionConfig};
use signa_test_fixtures::{clips, dictionaries, fixtures_root};

fn fixture_session() -> (Session, Rc<RefCell<RecordingObserver>>) {
    let dict = Dictionary::from_path(dictionaries::path("lsp-basic").unwrap()).unwrap();
    let seen = Rc::new(RefCell::new(RecordingObserver::default()));
    let session = Session::new(
        Arc::new(dict),
        SequencerConfig::default(),
        FsClipSource::new(fixtures_root()),
    )
    .with_observer(Rc::clone(&seen));
    (session, seen)
}

fn run_until_complete<S: signa_animation_core::ClipSource>(session: &mut Session<S>, dt: f32) -> usize {
    for step in 0..2000 {
        let frame = session.step(dt).expect("step ok");
        if frame.events.iter().any(|e| {
            matches!(e, signa_animation_core::SequencerEvent::Completed)
        }) {
            return step;
        }
    }
    panic!("session never completed");
}

/// it should translate, play and report every gloss to the observer
#[test]
fn submit_plays_and_notifies_observer() {
    let (mut session, seen) = fixture_session();
    let tokens = session.submit("Hola gracias").unwrap();
    assert_eq!(tokens.as_strs(), vec!["HOLA", "GRACIAS"]);

    run_until_complete(&mut session, 1.0 / 60.0);

    let seen = seen.borrow();
    assert_eq!(
        seen.changes,
        vec![("HOLA".to_string(), 0), ("GRACIAS".to_string(), 1)]
    );
    assert!(seen.skipped.is_empty());
    assert_eq!(seen.completions, 1);
    assert_eq!(session.sequencer().state(), SequencerState::Idle);
}

/// it should report blank and empty input without disturbing playback
#[test]
fn advisories_leave_playback_alone() {
    let (mut session, seen) = fixture_session();
    session.submit("hola").unwrap();
    session.step(0.1).unwrap();
    let before = session.playback().clone();

    assert_eq!(session.submit("   "), Err(TranslateError::InputEmpty));
    assert_eq!(
        session.submit("el de la"),
        Err(TranslateError::NoTranslatableContent)
    );
    assert_eq!(session.playback(), &before);
    assert_eq!(seen.borrow().changes.len(), 1);
}

/// it should restart cleanly when new text arrives mid-sentence
#[test]
fn resubmission_supersedes_the_current_queue() {
    let (mut session, seen) = fixture_session();
    session.submit("ahora hola").unwrap();
    for _ in 0..10 {
        session.step(0.1).unwrap();
    }
    session.submit("gracias").unwrap();
    run_until_complete(&mut session, 0.1);

    let seen = seen.borrow();
    assert_eq!(seen.changes.first(), Some(&("AHORA".to_string(), 0)));
    assert_eq!(seen.changes.last(), Some(&("GRACIAS".to_string(), 0)));
    assert!(!seen.changes.contains(&("HOLA".to_string(), 1)));
    assert_eq!(seen.completions, 1, "the superseded queue never completes");
}

/// it should keep loaded clips cached across reset
#[test]
fn reset_keeps_the_clip_cache() {
    let dict = Dictionary::from_entries([("HOLA", "mem/hola")]);
    let mut src = MemoryClipSource::new();
    src.insert_json("mem/hola", &clips::json("hola").unwrap());
    let mut session = Session::new(Arc::new(dict), SequencerConfig::default(), src);

    session.submit("hola").unwrap();
    run_until_complete(&mut session, 0.1);
    session.reset();
    let frame = session.step(0.1).unwrap();
    assert!(frame.events.is_empty());
    assert_eq!(frame.state, SequencerState::Idle);

    session.submit("hola hola").unwrap();
    run_until_complete(&mut session, 0.1);
    assert_eq!(session.source().fetch_count("mem/hola"), 1);
}

/// it should reject nonsensical frame times
#[test]
fn step_rejects_bad_dt() {
    let (mut session, _) = fixture_session();
    assert!(session.step(-0.1).is_err());
    assert!(session.step(f32::NAN).is_err());
    assert_eq!(session.epoch, 0);
    assert_eq!(session.step(0.0).unwrap().epoch, 1);
}

/// it should build a working session from a config file next to the fixtures
#[test]
fn session_from_config_file() {
    let cfg = SessionConfig::from_path(fixtures_root().join("session.json")).unwrap();
    assert!(cfg.dictionary.ends_with("dictionary.json"));
    assert_eq!(cfg.sequencer.fade_duration, 0.2);

    let mut session = Session::from_config(cfg).unwrap();
    assert_eq!(session.dictionary().len(), 6);
    session.submit("Ahora").unwrap();
    let steps = run_until_complete(&mut session, 0.1);
    // 1 s clip at half speed.
    assert!((19..=22).contains(&steps), "completed after {steps} steps");
}

/// it should not announce tokens from a queue that was reset before the next frame
#[test]
fn reset_before_step_silences_the_cleared_queue() {
    let (mut session, seen) = fixture_session();
    session.submit("hola gracias").unwrap();
    session.reset();
    let frame = session.step(0.02).unwrap();

    assert!(frame.events.is_empty());
    assert!(frame.changes.is_empty());
    assert_eq!(*seen.borrow(), RecordingObserver::default());
}
