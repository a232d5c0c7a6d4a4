use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use signa_animation_core::{FsClipSource, Sequencer, SequencerConfig};
use signa_gloss_core::{Dictionary, Token, TokenSequence};
use signa_test_fixtures::{dictionaries, fixtures_root};

fn bench_sequencer_step(c: &mut Criterion) {
    let dict = Arc::new(
        Dictionary::from_path(dictionaries::path("lsp-basic").expect("fixture dictionary"))
            .expect("dictionary parses"),
    );
    let queue: TokenSequence = ["HOLA", "AHORA", "LETTER_A", "GRACIAS", "LETTER_O"]
        .iter()
        .map(|t| Token::new(*t).expect("valid token"))
        .collect();

    // Warm the clip cache so the loop measures mixing and sequencing only.
    let mut seq = Sequencer::new(dict, SequencerConfig::default());
    let mut src = FsClipSource::new(fixtures_root());
    seq.load_queue(queue.clone());
    for _ in 0..600 {
        seq.fulfill_with(&mut src);
        if seq.update(1.0 / 60.0).completed() {
            break;
        }
    }

    c.bench_function("sequencer_step_60hz", |b| {
        seq.load_queue(queue.clone());
        b.iter(|| {
            let out = seq.update(black_box(1.0 / 60.0));
            black_box(out.changes.len());
            if out.completed() {
                seq.load_queue(queue.clone());
            }
        })
    });
}

criterion_group!(benches, bench_sequencer_step);
criterion_main!(benches);
