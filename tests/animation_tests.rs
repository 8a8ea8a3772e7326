//! Integration tests for trajectory generation, chunking and frame animation.
//!
//! These drive the public API the same way the viewer does, with plain
//! `Vec3`s or recording targets standing in for the GPU instances.

use std::sync::atomic::{AtomicUsize, Ordering};

use lorenz_wave::animator::interpolate;
use lorenz_wave::{generate, plan, Animator, FramePhase, Positionable, Trajectory, Vec3};
use rand::Rng;

/// Target that remembers how often it was written.
#[derive(Debug, Clone, Default)]
struct Probe {
    position: Vec3,
    writes: u32,
}

impl Positionable for Probe {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.writes += 1;
    }
}

// ============================================================================
// Generator
// ============================================================================

#[test]
fn test_generate_lengths() {
    for n in [0, 1, 2, 3, 17, 30_000] {
        assert_eq!(generate(n).len(), n);
    }
}

#[test]
fn test_generate_three_points_by_hand() {
    let t = generate(3);

    let (h, a, b, c) = (0.01_f32, 10.0_f32, 28.0_f32, 8.0_f32 / 3.0);
    let mut state = (0.1_f32, 0.0_f32, 0.0_f32);
    for i in 0..3 {
        let (x0, y0, z0) = state;
        state = (
            x0 + h * a * (y0 - x0),
            y0 + h * (x0 * (b - z0) - y0),
            z0 + h * (x0 * y0 - c * z0),
        );
        assert_eq!(t[i], Vec3::new(state.0, state.1, state.2), "point {}", i);
    }

    assert!((t[0] - Vec3::new(0.09, 0.028, 0.0)).abs().max_element() < 1e-6);
}

#[test]
fn test_generate_repeatable() {
    assert_eq!(generate(10_000), generate(10_000));
}

// ============================================================================
// Chunk Planner
// ============================================================================

#[test]
fn test_plan_matches_worked_example() {
    let p = plan(10, 4);
    assert_eq!(p.len(), 4);
    assert_eq!(p.ranges(), &[0..2, 2..4, 4..6, 6..10]);
}

#[test]
fn test_plan_partition_property() {
    let mut rng = rand::thread_rng();
    for _ in 0..1_000 {
        let total = rng.gen_range(0..10_000usize);
        let workers = rng.gen_range(1..33usize);
        let p = plan(total, workers);

        assert!(p.len() <= workers);
        let mut seen = vec![0u8; total];
        for r in p.ranges() {
            for i in r.clone() {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "total={} workers={}", total, workers);

        for pair in p.ranges().windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}

// ============================================================================
// Animator
// ============================================================================

#[test]
fn test_ten_points_four_workers() {
    let trajectory = generate(10);
    let mut animator = Animator::new(trajectory.clone(), 4, 100);
    assert_eq!(animator.chunks().ranges(), &[0..2, 2..4, 4..6, 6..10]);

    let mut probes = vec![Probe::default(); 10];
    let report = animator.advance(&mut probes);
    assert!(!report.snapped);

    // advance() returned, so every worker has joined
    let t = 1.0 / 100.0;
    for i in 0..9 {
        assert_eq!(probes[i].writes, 1, "index {}", i);
        assert_eq!(probes[i].position, interpolate(trajectory[i], trajectory[i + 1], t));
    }
    assert_eq!(probes[9].writes, 0);
    assert_eq!(probes[9].position, Vec3::ZERO);
}

#[test]
fn test_last_point_only_moves_on_snap() {
    let mut animator = Animator::new(generate(10), 4, 5);
    let mut probes = vec![Probe::default(); 10];

    for _ in 0..4 {
        animator.advance(&mut probes);
    }
    assert_eq!(probes[9].writes, 0);

    let report = animator.advance(&mut probes);
    assert!(report.snapped);
    assert_eq!(probes[9].writes, 1);
    assert_eq!(probes[9].position, animator.trajectory()[9]);
}

#[test]
fn test_phase_wraps_after_full_cycle() {
    let steps = 8;
    let mut animator = Animator::new(generate(64), 3, steps);
    let mut points = vec![Vec3::ZERO; 64];

    for expected in 1..steps {
        let report = animator.advance(&mut points);
        assert!(!report.snapped);
        assert_eq!(report.step, expected);
    }
    assert_eq!(animator.phase().step(), steps);

    let report = animator.advance(&mut points);
    assert!(report.snapped);
    assert_eq!(report.step, 1);
    assert_eq!(animator.phase().step(), 2);

    for _ in 0..steps * 3 {
        let phase = animator.phase();
        assert!(phase.step() >= 1 && phase.step() <= phase.steps());
        animator.advance(&mut points);
    }
}

#[test]
fn test_snap_pass_is_exact() {
    let animator = Animator::new(generate(1_000), 4, 100);
    let mut points = vec![Vec3::splat(f32::NAN); 1_000];

    animator.snap_pass(&mut points);
    assert_eq!(points.as_slice(), animator.trajectory().points());
}

#[test]
fn test_interpolation_reaches_next_point_at_last_step() {
    let animator = Animator::new(generate(500), 4, 100);
    let p = animator.trajectory().points();
    let mut points = vec![Vec3::ZERO; 500];

    animator.interpolate_pass(&mut points, FramePhase { step: 100, steps: 100 });
    for i in 0..499 {
        assert_eq!(points[i], p[i] + (p[i + 1] - p[i]));
    }
}

#[test]
fn test_interpolation_moves_toward_successor() {
    let trajectory = Trajectory::from(vec![Vec3::ZERO, Vec3::new(10.0, -20.0, 40.0)]);
    let animator = Animator::new(trajectory, 2, 4);
    let mut points = vec![Vec3::ZERO; 2];

    let mut last_distance = f32::INFINITY;
    for step in 1..=4 {
        animator.interpolate_pass(&mut points, FramePhase { step, steps: 4 });
        let distance = points[0].distance(Vec3::new(10.0, -20.0, 40.0));
        assert!(distance < last_distance);
        last_distance = distance;
    }
    assert_eq!(last_distance, 0.0);
}

#[test]
fn test_worker_count_does_not_change_result() {
    let trajectory = generate(5_003);
    let mut reference = vec![Vec3::ZERO; 5_003];
    let mut single = Animator::new(trajectory.clone(), 1, 37);
    for _ in 0..100 {
        single.advance(&mut reference);
    }

    for threads in [2, 3, 4, 7, 16] {
        let mut points = vec![Vec3::ZERO; 5_003];
        let mut animator = Animator::new(trajectory.clone(), threads, 37);
        for _ in 0..100 {
            animator.advance(&mut points);
        }
        assert_eq!(points, reference, "threads={}", threads);
    }
}

#[test]
fn test_each_pass_runs_one_worker_per_chunk() {
    let p = plan(100, 4);
    let mut items = vec![0u32; 100];
    let workers = AtomicUsize::new(0);
    let threads = std::sync::Mutex::new(std::collections::HashSet::new());

    p.for_each_mut(&mut items, |_, chunk| {
        workers.fetch_add(1, Ordering::SeqCst);
        threads.lock().unwrap().insert(std::thread::current().id());
        for item in chunk {
            *item += 1;
        }
    });

    assert_eq!(workers.load(Ordering::SeqCst), 4);
    assert_eq!(threads.lock().unwrap().len(), 4);
    assert!(items.iter().all(|&n| n == 1));
}
