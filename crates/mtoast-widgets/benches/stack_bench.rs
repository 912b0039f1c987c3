//! Benchmarks for stacking and the show/dismiss cycle.
//!
//! Run with: cargo bench -p mtoast-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mtoast_core::{ToastOptions, ToastPosition, share};
use mtoast_web::HeadlessSurface;
use mtoast_widgets::{StackGeometry, ToastManager, compute_stack};
use std::hint::black_box;

// ============================================================================
// Stack computation
// ============================================================================

fn bench_compute_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack/compute");

    for len in [1usize, 5, 50] {
        let geometry = StackGeometry {
            position: ToastPosition::TopLeft,
            max_rendered: len,
            ..StackGeometry::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| black_box(compute_stack(&geometry, black_box(len))));
        });
    }

    group.finish();
}

// ============================================================================
// Manager lifecycle
// ============================================================================

fn bench_show_dismiss(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager/lifecycle");

    group.bench_function("show_reveal_dismiss_detach", |b| {
        let mut mgr = ToastManager::new(share(HeadlessSurface::new()));
        b.iter(|| {
            let id = mgr.info("benchmark", ToastOptions::new()).ok();
            mgr.pump();
            if let Some(id) = id {
                mgr.dismiss(&id);
            }
            mgr.advance(300);
            black_box(mgr.len());
        });
    });

    group.bench_function("show_at_rendered_cap", |b| {
        let mut mgr = ToastManager::new(share(HeadlessSurface::new()));
        for _ in 0..5 {
            let _ = mgr.info("filler", ToastOptions::new().auto_dismiss(0));
        }
        b.iter(|| {
            let _ = black_box(mgr.info("evicting", ToastOptions::new().auto_dismiss(0)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_compute_stack, bench_show_dismiss);
criterion_main!(benches);
