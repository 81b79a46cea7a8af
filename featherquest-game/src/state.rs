//! Game state data model.
//!
//! `GameState` is a plain value: every transition clones it, mutates the
//! clone through the reducer helpers, and hands the fresh value back. The
//! previous state is never touched, so callers can keep snapshots for
//! undo/replay. Runtime-only resources (RNG, loaded bank) are excluded from
//! serialization and rehydrated after load.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;

use crate::board::EventKind;
use crate::constants::{CATEGORY_COUNT, MAX_PLAYERS, PLAYER_COLORS, PLAYER_EMOJIS};
use crate::data::{Question, QuestionBank, Tier};
use crate::settings::Settings;
use crate::stats::{LifetimeStats, PlayerGameStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Setup,
    Playing,
    Question,
    HubChoice,
    Event,
    GameOver,
}

/// One player's token and tallies. Color and emoji are cosmetic and play no
/// part in core logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub age: u8,
    pub color: String,
    pub emoji: String,
    #[serde(default)]
    pub position: usize,
    #[serde(default)]
    pub feathers: [bool; CATEGORY_COUNT],
    #[serde(default)]
    pub hints: u8,
    #[serde(default)]
    pub wrong_streak: u32,
    #[serde(default)]
    pub correct_streak: u32,
}

impl Player {
    pub(crate) fn new(id: usize, name: String, age: u8, hints: u8) -> Self {
        Self {
            id,
            name,
            age,
            color: PLAYER_COLORS[id % MAX_PLAYERS].to_string(),
            emoji: PLAYER_EMOJIS[id % MAX_PLAYERS].to_string(),
            position: 0,
            feathers: [false; CATEGORY_COUNT],
            hints,
            wrong_streak: 0,
            correct_streak: 0,
        }
    }

    #[must_use]
    pub fn has_all_feathers(&self) -> bool {
        self.feathers.iter().all(|feather| *feather)
    }
}

/// One line of the append-only turn log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEntry {
    pub player: usize,
    pub text: String,
}

/// A fire-and-forget signal that a piece of state should be written to
/// durable storage. Drained by the caller between transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistRequest {
    Settings,
    Stats,
    Questions,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameState {
    #[serde(default)]
    pub phase: GamePhase,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub current_player: usize,
    #[serde(default)]
    pub dice_value: u8,
    /// Position before the current roll; penalty rollback anchors here.
    #[serde(default)]
    pub pre_roll_position: usize,
    #[serde(default)]
    pub current_question: Option<Question>,
    #[serde(default)]
    pub current_category: Option<usize>,
    #[serde(default)]
    pub question_tier: Tier,
    /// Whether the current question was earned through a hub choice.
    #[serde(default)]
    pub hub_quiz: bool,
    #[serde(default)]
    pub selected_answer: Option<String>,
    #[serde(default)]
    pub answer_revealed: bool,
    /// Option indices removed by hints for the active question.
    #[serde(default)]
    pub eliminated_options: SmallVec<[usize; 4]>,
    /// Prompts asked so far this game. Append-only.
    #[serde(default)]
    pub asked: HashSet<String>,
    #[serde(default)]
    pub current_event: Option<EventKind>,
    #[serde(default)]
    pub double_or_nothing: bool,
    #[serde(default)]
    pub winner: Option<usize>,
    /// User-facing text, replaced on every transition that says something.
    #[serde(default)]
    pub message: String,
    /// Streak milestone banner, cleared at turn end.
    #[serde(default)]
    pub streak_reward: Option<String>,
    #[serde(default)]
    pub turn_history: Vec<TurnEntry>,
    #[serde(default)]
    pub game_stats: Vec<PlayerGameStats>,
    /// Caller clock reading when the current question was presented, ms.
    #[serde(default)]
    pub question_started_at: u64,
    #[serde(default)]
    pub turn_count: u32,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub lifetime: LifetimeStats,
    #[serde(default)]
    pub editor_open: bool,
    #[serde(default)]
    pub stats_open: bool,
    #[serde(default)]
    pub settings_open: bool,
    #[serde(default)]
    pub persist_requests: Vec<PersistRequest>,
    #[serde(default)]
    pub seed: u64,
    #[serde(skip)]
    pub bank: Option<QuestionBank>,
    #[serde(skip)]
    pub rng: Option<ChaCha20Rng>,
}

impl GameState {
    /// Fresh setup-phase state wired to a bank and a seeded RNG.
    #[must_use]
    pub fn new(seed: u64, settings: Settings, bank: QuestionBank) -> Self {
        Self {
            settings,
            seed,
            bank: Some(bank),
            rng: Some(ChaCha20Rng::seed_from_u64(seed)),
            message: "Welcome to Featherquest! Add players to begin.".to_string(),
            ..Self::default()
        }
    }

    /// Reattach runtime resources after deserialization.
    #[must_use]
    pub fn rehydrate(mut self, bank: QuestionBank) -> Self {
        self.rng = Some(ChaCha20Rng::seed_from_u64(self.seed));
        self.bank = Some(bank);
        self
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub(crate) fn current_player_mut(&mut self) -> Option<&mut Player> {
        self.players.get_mut(self.current_player)
    }

    pub(crate) fn current_player_name(&self) -> String {
        self.current_player()
            .map_or_else(|| "Player".to_string(), |player| player.name.clone())
    }

    pub(crate) fn push_history(&mut self, text: &str) {
        self.turn_history.push(TurnEntry {
            player: self.current_player,
            text: text.to_string(),
        });
    }

    /// Drop everything scoped to the question just played.
    pub(crate) fn clear_question_transients(&mut self) {
        self.current_question = None;
        self.current_category = None;
        self.hub_quiz = false;
        self.selected_answer = None;
        self.answer_revealed = false;
        self.eliminated_options.clear();
        self.current_event = None;
        self.double_or_nothing = false;
        self.streak_reward = None;
    }
}
