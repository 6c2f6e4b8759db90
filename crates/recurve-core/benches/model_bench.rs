//! Recurve Model Benchmarks
//!
//! Benchmarks for the pure retention math using Criterion.
//! Run with: cargo bench -p recurve-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recurve_core::{
    project_decay_curve, retrievability, score_to_grade, update_on_grade, Grade, ScheduledReview,
};

fn bench_retrievability(c: &mut Criterion) {
    c.bench_function("retrievability", |b| {
        b.iter(|| {
            for days in 0..30 {
                black_box(retrievability(black_box(12.5), days as f64));
            }
        })
    });
}

fn bench_update_on_grade(c: &mut Criterion) {
    let grades = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    c.bench_function("update_on_grade", |b| {
        b.iter(|| {
            for grade in grades {
                black_box(update_on_grade(black_box(5.0), black_box(5.0), grade, 3.0).unwrap());
            }
        })
    });
}

fn bench_score_to_grade(c: &mut Criterion) {
    c.bench_function("score_to_grade", |b| {
        b.iter(|| {
            for i in 0..100 {
                black_box(score_to_grade(i as f64 / 100.0));
            }
        })
    });
}

fn bench_project_year_curve(c: &mut Criterion) {
    let reviews: Vec<ScheduledReview> = (1..12)
        .map(|month| ScheduledReview {
            day: month * 30,
            stability: 2.0 * month as f64,
        })
        .collect();

    c.bench_function("project_365d_11_reviews", |b| {
        b.iter(|| {
            black_box(project_decay_curve(black_box(2.0), 365, &reviews));
        })
    });
}

criterion_group!(
    benches,
    bench_retrievability,
    bench_update_on_grade,
    bench_score_to_grade,
    bench_project_year_curve
);
criterion_main!(benches);
