//! # Follower Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sim_if::RecognitionObject;
use util::module::State;
use veh_lib::follower::{select_object, FollowCtrl, InputData, Params, Target};

fn follow_ctrl_benchmark(c: &mut Criterion) {
    let params = Params::default();

    // A leader weaving in and out of the hold band
    let inputs: Vec<InputData> = (0..1000)
        .map(|i| {
            let t = i as f64 * 0.032;
            let object = RecognitionObject {
                position: [1.5 * t.sin(), 0.0, -(5.5 + 2.0 * (0.3 * t).cos())],
                model: String::from("car"),
                ..Default::default()
            };

            InputData {
                target: Target::from_object(&object, params.camera_mounting_offset_m).ok()
            }
        })
        .collect();

    let mut ctrl = FollowCtrl::default();
    ctrl.init(params).unwrap();

    c.bench_function("FollowCtrl::proc x1000", |b| {
        b.iter(|| {
            for input in inputs.iter() {
                black_box(ctrl.proc(black_box(input)).unwrap());
            }
        })
    });

    let objects: Vec<RecognitionObject> = (0..8)
        .map(|i| RecognitionObject {
            id: i,
            position: [i as f64, 0.0, -10.0],
            model: format!("model_{}", i),
            ..Default::default()
        })
        .collect();

    c.bench_function("select_object", |b| {
        b.iter(|| select_object(black_box(&objects), Some("model_7")).unwrap())
    });
}

criterion_group!(benches, follow_ctrl_benchmark);
criterion_main!(benches);
