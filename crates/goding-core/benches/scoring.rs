use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use goding_core::bank::load_builtin;
use goding_core::scoring::{score_all, winning_category};
use goding_core::session::{AnswerSet, AssessmentSession};

fn full_answers(len: usize, option: usize) -> AnswerSet {
    let mut answers = AnswerSet::new(len);
    for pos in 0..len {
        answers.set(pos, option);
    }
    answers
}

fn bench_score_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_all");
    let bank = load_builtin().unwrap();

    group.bench_function("first_options", |b| {
        let answers = full_answers(bank.len(), 0);
        b.iter(|| score_all(black_box(&bank), black_box(&answers)))
    });

    group.bench_function("second_options", |b| {
        let answers = full_answers(bank.len(), 1);
        b.iter(|| score_all(black_box(&bank), black_box(&answers)))
    });

    group.bench_function("winning_category", |b| {
        b.iter(|| winning_category(black_box(&[2, 6, 4, 6, 8, 0])))
    });

    group.finish();
}

fn bench_session_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    let bank = Arc::new(load_builtin().unwrap());
    let answers = vec![1; bank.len()];

    group.bench_function("replay_full_test", |b| {
        b.iter(|| {
            let mut session = AssessmentSession::new(Arc::clone(&bank)).unwrap();
            session.replay(black_box(&answers)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_score_all, bench_session_replay);
criterion_main!(benches);
