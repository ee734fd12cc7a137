use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use score_predictor::match_feed::{encode_predictions_json, parse_match_records_json};
use score_predictor::model_params::ModelParams;
use score_predictor::score_model::predict_matches;
use score_predictor::state::{MatchRecord, TeamSide};

fn sample_records(n: usize) -> Vec<MatchRecord> {
    (0..n)
        .map(|idx| {
            let home_id = (idx * 2) as i64;
            let strength = 60.0 + (idx % 35) as f64;
            MatchRecord::new(
                TeamSide::new(home_id, strength)
                    .with_gd((idx % 11) as f64 - 5.0)
                    .with_name("Home FC"),
                TeamSide::new(home_id + 1, 95.0 - (idx % 29) as f64).with_name("Away FC"),
            )
        })
        .collect()
}

fn bench_predict_batch(c: &mut Criterion) {
    let records = sample_records(1_000);
    let params = ModelParams::default();
    c.bench_function("predict_batch_1000", |b| {
        b.iter(|| {
            let preds = predict_matches(black_box(&records), &params).unwrap();
            black_box(preds.len());
        })
    });
}

fn bench_json_roundtrip(c: &mut Criterion) {
    let raw = serde_json::to_string(&sample_records(1_000)).unwrap();
    let params = ModelParams::default();
    c.bench_function("json_decode_predict_encode_1000", |b| {
        b.iter(|| {
            let records = parse_match_records_json(black_box(&raw)).unwrap();
            let preds = predict_matches(&records, &params).unwrap();
            let out = encode_predictions_json(&preds, false).unwrap();
            black_box(out.len());
        })
    });
}

criterion_group!(benches, bench_predict_batch, bench_json_roundtrip);
criterion_main!(benches);
