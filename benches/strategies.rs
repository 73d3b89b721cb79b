use criterion::{criterion_group, criterion_main, Criterion};
use mirchi_ludo::{GameConfig, GameMode, GameSession, GameState, StepOutcome, StrategyKind};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

/// Mid-game positions where each AI seat holds a live roll.
fn corpus() -> Vec<GameState> {
    let mut states = Vec::new();
    let mut config = GameConfig::for_testing(4242).with_mode(GameMode::Mirchi);
    config.default_strategy = StrategyKind::Aggressive;
    let Ok(mut session) = GameSession::new(config) else {
        return states;
    };
    while states.len() < 64 {
        if session.state().has_live_roll() {
            states.push(session.state().clone());
        }
        match session.step() {
            Ok(StepOutcome::GameOver) | Err(_) => break,
            Ok(_) => {}
        }
        if !session.state().has_live_roll() {
            session.roll();
        }
    }
    states
}

fn bench_select_move(c: &mut Criterion) {
    let states = corpus();
    for kind in StrategyKind::ALL {
        let strategy = kind.build();
        let mut rng = StdRng::seed_from_u64(7);
        c.bench_function(&format!("select_move/{}", kind), |b| {
            b.iter(|| {
                let mut acc = 0usize;
                for state in &states {
                    let color = state.current_player;
                    if let Some(choice) =
                        strategy.select_move(&state.eligible_pawns, color, state, &mut rng)
                    {
                        acc += choice.pawn_id + usize::from(choice.move_backwards);
                    }
                }
                black_box(acc)
            })
        });
    }
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("session/run_to_completion", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut session = GameSession::new(GameConfig::for_testing(seed)).ok();
            black_box(session.as_mut().and_then(|s| s.run_to_completion().ok()))
        })
    });
}

criterion_group!(benches, bench_select_move, bench_full_game);
criterion_main!(benches);
