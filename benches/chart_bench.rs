//! Benchmarks for chart derivation and the prediction wire format
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use predictdash::chart::{derive_impact_chart, derive_input_chart, ChartSet};
use predictdash::features::FeatureSet;
use predictdash::prediction::{parse_prediction, PredictionRequest};
use predictdash::session::{Session, SessionConfig};
use predictdash::{PredictionClient, PredictionConfig};
use std::sync::Arc;

fn bench_charts(c: &mut Criterion) {
    let mut group = c.benchmark_group("charts");
    let values = FeatureSet::with_defaults().values();

    group.bench_function("input_chart", |b| {
        b.iter(|| derive_input_chart(black_box(&values)))
    });

    group.bench_function("impact_chart", |b| {
        b.iter(|| derive_impact_chart(black_box(values.len())))
    });

    group.bench_function("chart_set", |b| {
        b.iter(|| ChartSet::derive(black_box(&values)))
    });

    group.finish();
}

fn bench_wire(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire");
    let values = FeatureSet::with_defaults().values();

    group.bench_function("encode_request", |b| {
        b.iter(|| {
            serde_json::to_vec(&PredictionRequest {
                features: black_box(&values),
            })
            .unwrap()
        })
    });

    group.bench_function("parse_number", |b| {
        b.iter(|| parse_prediction(black_box(r#"{"prediction": 23.75}"#)).unwrap())
    });

    group.bench_function("parse_string", |b| {
        b.iter(|| parse_prediction(black_box(r#"{"prediction": "approved"}"#)).unwrap())
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    let client = PredictionClient::new(PredictionConfig::new("http://127.0.0.1:9/predict")).unwrap();
    let session = Session::new(Arc::new(client), SessionConfig::default());

    group.bench_function("set_feature", |b| {
        let mut value = 0.0;
        b.iter(|| {
            value += 1.0;
            session.set_feature(black_box(3), black_box(value)).unwrap()
        })
    });

    group.bench_function("charts", |b| b.iter(|| session.charts()));

    group.finish();
}

criterion_group!(benches, bench_charts, bench_wire, bench_session);
criterion_main!(benches);
