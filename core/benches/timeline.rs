use criterion::{Criterion, criterion_group, criterion_main};
use fusebox_core::{Direction, GameConfig, GameEngine, TimerPolicy};
use std::hint::black_box;

/// Simulated frame length when the browser drives the clock.
const FRAME_MS: u64 = 16;

fn run_minute(config: GameConfig, seed: u64) -> GameEngine {
    let mut engine = GameEngine::new(config, seed);
    let mut step = 0usize;
    while engine.now() < 60_000 {
        if engine.advance(FRAME_MS).is_game_over() {
            engine.reset_game();
        }
        step += 1;
        if step % 8 == 0 {
            engine.move_in(Direction::ALL[step / 8 % Direction::ALL.len()]);
        }
    }
    engine
}

fn bench_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline");

    group.bench_function("default_minute", |b| {
        b.iter(|| run_minute(black_box(GameConfig::default()), black_box(7)))
    });

    let dense = GameConfig::new(32)
        .with_timings(3000, 500, 20)
        .with_timer_policy(TimerPolicy::RunToCompletion);
    group.bench_function("dense_minute", |b| {
        b.iter(|| run_minute(black_box(dense), black_box(7)))
    });

    group.finish();
}

criterion_group!(benches, bench_timeline);
criterion_main!(benches);
