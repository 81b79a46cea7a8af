use featherquest_game::Difficulty;
use featherquest_tester::{SimConfig, build_report, run_game};

#[test]
fn seeded_games_hold_invariants_across_difficulties() {
    for (seed, difficulty) in [
        (11u64, Difficulty::Easy),
        (22, Difficulty::Medium),
        (33, Difficulty::Hard),
    ] {
        let cfg = SimConfig {
            seed,
            players: 3,
            difficulty,
            max_actions: 4_000,
            accuracy: 0.5,
        };
        let outcome = run_game(&cfg).expect("no invariant violations");
        assert!(outcome.actions <= 4_000);
        assert!(outcome.questions_asked > 0, "bots saw questions");
    }
}

#[test]
fn perfect_accuracy_games_reach_game_over() {
    let mut finished = 0;
    for seed in [5u64, 6, 7, 8, 9] {
        let cfg = SimConfig {
            seed,
            players: 2,
            difficulty: Difficulty::Medium,
            max_actions: 20_000,
            accuracy: 1.0,
        };
        let outcome = run_game(&cfg).expect("no invariant violations");
        if outcome.finished {
            finished += 1;
            assert!(outcome.winner.is_some());
        }
    }
    assert!(finished >= 1, "hub-seeking perfect bots should finish");
}

#[test]
fn report_covers_every_requested_seed() {
    let outcomes: Vec<_> = [101u64, 102]
        .into_iter()
        .map(|seed| {
            run_game(&SimConfig {
                seed,
                players: 2,
                difficulty: Difficulty::Medium,
                max_actions: 1_000,
                accuracy: 0.7,
            })
            .expect("sim runs clean")
        })
        .collect();
    let reports = build_report(&outcomes);
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|report| report.games == 1));
}
