//! Benchmarks for slide construction and the per-frame apply path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use glide_mesh::{grid, tube, MeshSelection};
use glide_slide::{build_double_side, SlideContainer, SlideParams, SlideSession};

fn ring_selection(segments: u32, ring: u32) -> MeshSelection {
    let mut sel = MeshSelection::new();
    for i in 0..segments {
        sel.select_edge(ring * segments + i, ring * segments + (i + 1) % segments);
    }
    sel
}

fn bench_build(c: &mut Criterion) {
    let mesh = grid(64, 64);
    let mut sel = MeshSelection::new();
    let column: Vec<u32> = (0..=64u32).map(|j| j * 65 + 32).collect();
    sel.select_path(&column);

    c.bench_function("build_grid_column_64", |b| {
        b.iter(|| build_double_side(black_box(&mesh), black_box(&sel)))
    });

    let mesh = tube(128, 8, 1.0);
    let sel = ring_selection(128, 4);
    c.bench_function("build_tube_ring_128", |b| {
        b.iter(|| build_double_side(black_box(&mesh), black_box(&sel)))
    });
}

fn bench_apply(c: &mut Criterion) {
    let mesh = tube(128, 8, 1.0);
    let sel = ring_selection(128, 4);
    let data = build_double_side(&mesh, &sel).unwrap();
    let mut session = SlideSession {
        params: SlideParams::default(),
        containers: vec![SlideContainer {
            mesh,
            data: Some(data),
        }],
    };

    let mut factor = 0.0f32;
    c.bench_function("apply_tube_ring_128", |b| {
        b.iter(|| {
            // Sweep the factor so successive frames touch both sides.
            factor = if factor > 0.9 { -0.9 } else { factor + 0.1 };
            session.set_factor(black_box(factor));
        })
    });

    session.params = SlideParams {
        use_even: true,
        ..SlideParams::default()
    };
    let tc = &mut session.containers[0];
    glide_slide::calc_even(tc.data.as_mut().unwrap(), &TopView, Vec2::ZERO);

    c.bench_function("apply_tube_ring_128_even", |b| {
        b.iter(|| {
            factor = if factor > 0.9 { -0.9 } else { factor + 0.1 };
            session.set_factor(black_box(factor));
        })
    });
}

struct TopView;

impl glide_slide::Viewport for TopView {
    fn project(&self, co: glam::Vec3) -> Vec2 {
        Vec2::new(co.x, co.y)
    }
}

criterion_group!(benches, bench_build, bench_apply);
criterion_main!(benches);
