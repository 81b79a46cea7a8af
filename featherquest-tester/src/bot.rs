//! Random-legal-action bot and per-transition invariant checks.

use anyhow::{Result, bail};
use featherquest_game::{
    Action, BOARD_SPACES, CATEGORY_COUNT, Difficulty, GamePhase, GameState, QuestionBank,
    Settings, reduce,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub seed: u64,
    pub players: usize,
    pub difficulty: Difficulty,
    /// Safety valve: a game still unfinished after this many actions is
    /// reported rather than looped forever.
    pub max_actions: usize,
    /// Probability the bot answers a question correctly.
    pub accuracy: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            players: 2,
            difficulty: Difficulty::Medium,
            max_actions: 20_000,
            accuracy: 0.6,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SimOutcome {
    pub seed: u64,
    pub finished: bool,
    pub winner: Option<usize>,
    pub turns: u32,
    pub actions: usize,
    pub questions_asked: u32,
    pub no_question_skips: u32,
}

fn check_invariants(state: &GameState) -> Result<()> {
    for player in &state.players {
        if player.position >= BOARD_SPACES {
            bail!("player {} left the board at {}", player.name, player.position);
        }
        if player.correct_streak > 0 && player.wrong_streak > 0 {
            bail!("player {} carries both streaks", player.name);
        }
    }
    if state.phase == GamePhase::Question && state.current_question.is_none() {
        bail!("question phase entered without a question");
    }
    if let Some(winner) = state.winner {
        let Some(player) = state.players.get(winner) else {
            bail!("winner index {winner} out of range");
        };
        if !player.has_all_feathers() {
            bail!("winner {} is missing feathers", player.name);
        }
    }
    Ok(())
}

/// Hub positions mirror the fixed board layout.
const HUBS: [usize; 6] = [8, 24, 40, 56, 72, 88];

/// Walk onto a hub whenever one is within dice reach; otherwise roll
/// randomly. Without this bias games drift past the last hub and can no
/// longer be won, which is exactly the stall the tester should not produce
/// on its own.
fn seek_roll<R: Rng>(position: usize, rng: &mut R) -> u8 {
    for hub in HUBS {
        if hub > position && hub - position <= 6 {
            return (hub - position) as u8;
        }
    }
    rng.gen_range(1..=6)
}

fn pick_action<R: Rng>(state: &GameState, rng: &mut R, accuracy: f64) -> Action {
    match state.phase {
        GamePhase::Playing => Action::RollDice {
            value: seek_roll(state.players[state.current_player].position, rng),
            bonus: 0,
            catchup_bonus: 0,
        },
        GamePhase::HubChoice => {
            let player = &state.players[state.current_player];
            let missing: Vec<usize> = (0..CATEGORY_COUNT)
                .filter(|category| !player.feathers[*category])
                .collect();
            if missing.is_empty() {
                return Action::NextTurn;
            }
            let category = missing[rng.gen_range(0..missing.len())];
            Action::ChooseHubCategory { category }
        }
        GamePhase::Event => Action::ResolveEvent {
            target_player: Some(rng.gen_range(0..state.players.len())),
            bonus_value: Some(rng.gen_range(1..=6)),
        },
        GamePhase::Question => {
            if state.answer_revealed {
                let wrong = state.selected_answer.as_deref()
                    != state
                        .current_question
                        .as_ref()
                        .map(|question| question.answer.as_str());
                // One penalty roll after a miss, then hand the turn over.
                if wrong && !state.message.contains("Penalty") && rng.gen_bool(0.7) {
                    return Action::PenaltyMove {
                        value: rng.gen_range(1..=6),
                    };
                }
                return Action::NextTurn;
            }
            if rng.gen_bool(0.1) && state.players[state.current_player].hints > 0 {
                return Action::UseHint;
            }
            if rng.gen_bool(0.05) {
                return Action::TimerExpired;
            }
            let Some(question) = state.current_question.as_ref() else {
                return Action::NextTurn;
            };
            let answer = if rng.gen_bool(accuracy) {
                question.answer.clone()
            } else {
                question.options[rng.gen_range(0..question.options.len())].clone()
            };
            Action::Answer { answer }
        }
        GamePhase::GameOver | GamePhase::Setup => Action::NextTurn,
    }
}

/// Play one full game. Fails fast on any invariant violation.
///
/// # Errors
///
/// Returns an error when a transition produces a state that breaks a core
/// invariant.
pub fn run_game(cfg: &SimConfig) -> Result<SimOutcome> {
    let mut rng = ChaCha20Rng::seed_from_u64(cfg.seed ^ 0x5EED_B07);
    let mut settings = Settings::default();
    settings.set_difficulty(cfg.difficulty);
    let state = GameState::new(cfg.seed, settings, QuestionBank::builtin());
    let names = (0..cfg.players).map(|i| format!("Bot {i}")).collect();
    let ages = (0..cfg.players)
        .map(|i| if i % 2 == 0 { 10 } else { 30 })
        .collect();
    let mut state = reduce(
        &state,
        Action::SetPlayers {
            count: cfg.players,
            names,
            ages,
        },
        0,
    );
    state = reduce(&state, Action::StartGame, 0);

    let mut now: u64 = 0;
    let mut actions = 0;
    let mut skips = 0u32;
    // Perfect-accuracy acceptance runs answer outside the speed-bonus
    // window; the extra movement would otherwise carry bots past hubs they
    // still need.
    let min_gap = if cfg.accuracy >= 1.0 { 4_500 } else { 500 };
    while state.phase != GamePhase::GameOver && actions < cfg.max_actions {
        now += u64::from(rng.gen_range(min_gap..9_000u32));
        let action = pick_action(&state, &mut rng, cfg.accuracy);
        log::debug!("seed {} action {} -> {:?}", cfg.seed, actions, action);
        let next = reduce(&state, action, now);
        check_invariants(&next)?;
        if next.asked.len() < state.asked.len() {
            bail!(
                "asked history shrank from {} to {}",
                state.asked.len(),
                next.asked.len()
            );
        }
        if next.message.contains("No questions!") {
            skips += 1;
        }
        state = next;
        actions += 1;
    }

    let questions_asked = state.game_stats.iter().map(|stats| stats.questions).sum();
    Ok(SimOutcome {
        seed: cfg.seed,
        finished: state.phase == GamePhase::GameOver,
        winner: state.winner,
        turns: state.turn_count,
        actions,
        questions_asked,
        no_question_skips: skips,
    })
}
