use featherquest_game::{
    Action, BOARD_SPACES, CATEGORY_COUNT, GamePhase, GameState, QuestionBank, Settings, board,
    reduce,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const HUBS: [usize; 6] = [8, 24, 40, 56, 72, 88];

fn fresh_game(seed: u64, players: usize) -> GameState {
    let state = GameState::new(seed, Settings::default(), QuestionBank::builtin());
    let names = (0..players).map(|i| format!("Bot {i}")).collect();
    let ages = vec![20u8; players];
    let state = reduce(
        &state,
        Action::SetPlayers {
            count: players,
            names,
            ages,
        },
        0,
    );
    reduce(&state, Action::StartGame, 0)
}

fn assert_invariants(state: &GameState) {
    for player in &state.players {
        assert!(player.position < BOARD_SPACES, "position out of bounds");
        assert!(
            player.correct_streak == 0 || player.wrong_streak == 0,
            "both streaks nonzero for {}",
            player.name
        );
    }
    if state.answer_revealed {
        assert!(
            state.current_question.is_some(),
            "revealed answer without a question"
        );
    }
    if state.phase == GamePhase::Question {
        assert!(
            state.current_question.is_some(),
            "question phase without a question"
        );
    }
    if let Some(winner) = state.winner {
        assert!(
            state.players[winner].has_all_feathers(),
            "winner missing feathers"
        );
    }
}

/// Roll a die value that walks the current player onto the nearest hub when
/// one is in reach, otherwise a plain 6.
fn hub_seeking_roll(position: usize) -> u8 {
    for hub in HUBS {
        if hub > position && hub - position <= 6 {
            return (hub - position) as u8;
        }
    }
    6
}

#[test]
fn hub_seeker_collects_six_feathers_and_wins() {
    let mut state = fresh_game(0xF00D, 2);
    let mut now: u64 = 0;
    for _ in 0..4_000 {
        // Answer outside the speed-bonus window so movement stays on the
        // scripted hub-to-hub walk.
        now += 5_000;
        state = match state.phase {
            GamePhase::Playing => {
                let position = state.players[state.current_player].position;
                reduce(
                    &state,
                    Action::RollDice {
                        value: hub_seeking_roll(position),
                        bonus: 0,
                        catchup_bonus: 0,
                    },
                    now,
                )
            }
            GamePhase::HubChoice => {
                let player = &state.players[state.current_player];
                let missing = player
                    .feathers
                    .iter()
                    .position(|feather| !feather)
                    .expect("a player in hub choice always misses a feather");
                reduce(&state, Action::ChooseHubCategory { category: missing }, now)
            }
            GamePhase::Event => reduce(
                &state,
                Action::ResolveEvent {
                    target_player: None,
                    bonus_value: Some(2),
                },
                now,
            ),
            GamePhase::Question => {
                if state.answer_revealed {
                    reduce(&state, Action::NextTurn, now)
                } else {
                    let answer = state
                        .current_question
                        .as_ref()
                        .map(|question| question.answer.clone())
                        .unwrap();
                    reduce(&state, Action::Answer { answer }, now)
                }
            }
            GamePhase::GameOver => break,
            GamePhase::Setup => unreachable!("game already started"),
        };
        assert_invariants(&state);
    }
    assert_eq!(state.phase, GamePhase::GameOver, "game should finish");
    let winner = state.winner.expect("winner set");
    assert!(state.players[winner].has_all_feathers());
    assert!(state.turn_history.iter().any(|entry| entry.text.contains("wins")));
}

#[test]
fn random_bot_never_breaks_invariants() {
    for seed in [1u64, 7, 42, 1337] {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut state = fresh_game(seed, 3);
        let mut now: u64 = 0;
        for _ in 0..2_500 {
            now += u64::from(rng.gen_range(500..6_000u32));
            state = match state.phase {
                GamePhase::Playing => reduce(
                    &state,
                    Action::RollDice {
                        value: rng.gen_range(1..=6),
                        bonus: 0,
                        catchup_bonus: 0,
                    },
                    now,
                ),
                GamePhase::HubChoice => reduce(
                    &state,
                    Action::ChooseHubCategory {
                        category: rng.gen_range(0..CATEGORY_COUNT),
                    },
                    now,
                ),
                GamePhase::Event => reduce(
                    &state,
                    Action::ResolveEvent {
                        target_player: Some(rng.gen_range(0..state.players.len())),
                        bonus_value: Some(rng.gen_range(1..=6)),
                    },
                    now,
                ),
                GamePhase::Question => {
                    if state.answer_revealed {
                        if rng.gen_bool(0.5) {
                            let penalized = reduce(
                                &state,
                                Action::PenaltyMove {
                                    value: rng.gen_range(1..=6),
                                },
                                now,
                            );
                            reduce(&penalized, Action::NextTurn, now)
                        } else {
                            reduce(&state, Action::NextTurn, now)
                        }
                    } else if rng.gen_bool(0.2) {
                        reduce(&state, Action::UseHint, now)
                    } else if rng.gen_bool(0.1) {
                        reduce(&state, Action::TimerExpired, now)
                    } else {
                        let question = state.current_question.as_ref().unwrap();
                        let pick = rng.gen_range(0..question.options.len());
                        let answer = question.options[pick].clone();
                        reduce(&state, Action::Answer { answer }, now)
                    }
                }
                GamePhase::GameOver => break,
                GamePhase::Setup => unreachable!("game already started"),
            };
            assert_invariants(&state);
        }
    }
}

#[test]
fn random_hub_choice_can_be_refused_without_stalling() {
    // A player who keeps asking for categories they already earned must
    // stay in hub choice; picking a missing one always proceeds.
    let mut state = fresh_game(3, 2);
    state.players[0].feathers = [true, false, false, false, false, false];
    state.players[0].position = 6;
    state = reduce(
        &state,
        Action::RollDice {
            value: 2,
            bonus: 0,
            catchup_bonus: 0,
        },
        0,
    );
    assert_eq!(state.phase, GamePhase::HubChoice);
    let refused = reduce(&state, Action::ChooseHubCategory { category: 0 }, 0);
    assert_eq!(refused.phase, GamePhase::HubChoice);
    let accepted = reduce(&refused, Action::ChooseHubCategory { category: 1 }, 0);
    assert_eq!(accepted.phase, GamePhase::Question);
}

#[test]
fn board_reference_matches_generation() {
    let shared = board();
    assert_eq!(shared.len(), BOARD_SPACES);
    assert_eq!(shared, featherquest_game::generate_board().as_slice());
    for hub in HUBS {
        assert!(shared[hub].is_hub());
    }
}

#[test]
fn turn_history_grows_monotonically() {
    let mut state = fresh_game(99, 2);
    let mut seen = state.turn_history.len();
    let mut now = 0;
    for _ in 0..200 {
        now += 1_000;
        state = match state.phase {
            GamePhase::Playing => reduce(
                &state,
                Action::RollDice {
                    value: 3,
                    bonus: 0,
                    catchup_bonus: 0,
                },
                now,
            ),
            GamePhase::HubChoice => reduce(&state, Action::ChooseHubCategory { category: 5 }, now),
            GamePhase::Event => reduce(
                &state,
                Action::ResolveEvent {
                    target_player: None,
                    bonus_value: Some(1),
                },
                now,
            ),
            GamePhase::Question => {
                if state.answer_revealed {
                    reduce(&state, Action::NextTurn, now)
                } else {
                    reduce(&state, Action::TimerExpired, now)
                }
            }
            _ => break,
        };
        assert!(state.turn_history.len() >= seen, "history shrank");
        seen = state.turn_history.len();
    }
}
