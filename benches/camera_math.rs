use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use glcam::camera::{PositionCamera, PositionCameraf};
use glcam::matrix::MatrixCalc;

/// Benchmark: full model matrix rebuild from camera state
fn bench_model_matrix(c: &mut Criterion) {
    let mut mc = MatrixCalc::new();
    let lookat = Vec3::new(10.0, 0.0, 20.0);
    let eye = Vec3::new(10.0, 60.0, 100.0);
    let dir = Vec2::new(53.0, 12.0);

    c.bench_function("model_matrix_perspective", |b| {
        b.iter(|| {
            mc.calculate_model_matrix(
                black_box(lookat),
                black_box(eye),
                black_box(dir),
                black_box(0.0),
            );
            black_box(mc.projection_model_matrix())
        })
    });

    mc.set_perspective_mode(false);
    c.bench_function("model_matrix_orthographic", |b| {
        b.iter(|| {
            mc.calculate_model_matrix(
                black_box(lookat),
                black_box(eye),
                black_box(dir),
                black_box(0.0),
            );
            black_box(mc.projection_model_matrix())
        })
    });
}

/// Benchmark: window/clip/overlay coordinate conversions
fn bench_coordinate_conversions(c: &mut Criterion) {
    let mut mc = MatrixCalc::new();
    mc.resize_viewport(1920, 1080);
    let window = Vec2::new(1234.0, 567.0);

    c.bench_function("window_to_clip", |b| {
        b.iter(|| black_box(mc.window_to_clip(black_box(window))))
    });
    c.bench_function("window_to_screen_coord", |b| {
        b.iter(|| black_box(mc.window_to_screen_coord(black_box(window))))
    });
}

/// Benchmark: slew ticks while all three animation channels are active
fn bench_do_slew(c: &mut Criterion) {
    let mut group = c.benchmark_group("do_slew");
    for ticks in [1u64, 60, 600] {
        group.bench_with_input(BenchmarkId::from_parameter(ticks), &ticks, |b, &ticks| {
            b.iter(|| {
                let mut cam: PositionCameraf =
                    PositionCamera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 100.0));
                cam.go_to(Vec3::new(500.0, 0.0, 0.0), 10.0, 0.0);
                cam.go_to_zoom(8.0, 10.0);
                cam.pan(Vec2::new(45.0, 120.0), 10.0);
                for _ in 0..ticks {
                    cam.do_slew(black_box(16));
                }
                black_box(cam.lookat())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_model_matrix,
    bench_coordinate_conversions,
    bench_do_slew,
);

criterion_main!(benches);
