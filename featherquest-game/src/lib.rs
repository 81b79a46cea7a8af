//! Featherquest Game Engine
//!
//! Platform-agnostic core game logic for the Featherquest trivia board game.
//! This crate provides the board, question bank, and the pure game state
//! machine without UI or platform-specific dependencies.

pub mod actions;
pub mod board;
pub mod constants;
pub mod data;
pub mod reducer;
pub mod selector;
pub mod settings;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use actions::Action;
pub use board::{EventKind, Space, board, generate_board};
pub use constants::{
    BOARD_SPACES, CATEGORY_COUNT, KEY_QUESTIONS, KEY_SETTINGS, KEY_STATS, MAX_PLAYERS, MIN_PLAYERS,
};
pub use data::{BankError, CATEGORIES, CategoryInfo, Question, QuestionBank, Tier, category_index};
pub use reducer::reduce;
pub use selector::{SelectionRequest, select_question};
pub use settings::{Difficulty, Settings};
pub use state::{GamePhase, GameState, PersistRequest, Player, TurnEntry};
pub use stats::{CategoryTotals, LifetimeStats, PlayerGameStats};

/// Trait for abstracting question-bank loading.
/// Platform-specific implementations should provide this.
pub trait BankLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the question bank from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the bank cannot be loaded or parsed.
    fn load_bank(&self) -> Result<QuestionBank, Self::Error>;
}

/// Trait for abstracting durable key-value storage. Implementations fail
/// silently: a missing or unwritable store must never affect gameplay.
pub trait KeyValueStore {
    /// Read a stored value, `None` when absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    /// Write a value. Failures are swallowed.
    fn save(&self, key: &str, value: &str);
}

/// Main engine wiring the core to its platform collaborators.
pub struct GameEngine<L, S>
where
    L: BankLoader,
    S: KeyValueStore,
{
    loader: L,
    store: S,
}

impl<L, S> GameEngine<L, S>
where
    L: BankLoader,
    S: KeyValueStore,
{
    /// Create a new engine with the provided loader and store.
    pub const fn new(loader: L, store: S) -> Self {
        Self { loader, store }
    }

    /// Resolve the active question bank: a persisted custom bank wins over
    /// the loader's default.
    ///
    /// # Errors
    ///
    /// Returns an error if no persisted bank exists and the loader fails.
    pub fn load_bank(&self) -> Result<QuestionBank, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        if let Some(json) = self.store.load(constants::KEY_QUESTIONS)
            && let Ok(bank) = QuestionBank::from_json(&json)
        {
            return Ok(bank);
        }
        self.loader.load_bank().map_err(Into::into)
    }

    /// Load persisted settings, falling back to defaults.
    #[must_use]
    pub fn load_settings(&self) -> Settings {
        self.store
            .load(constants::KEY_SETTINGS)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Load persisted lifetime statistics, falling back to empty.
    #[must_use]
    pub fn load_stats(&self) -> LifetimeStats {
        self.store
            .load(constants::KEY_STATS)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Build a fresh setup-phase game from persisted data.
    ///
    /// # Errors
    ///
    /// Returns an error if the question bank cannot be loaded.
    pub fn new_game(&self, seed: u64) -> Result<GameState, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let bank = self.load_bank()?;
        let mut state = GameState::new(seed, self.load_settings(), bank);
        state.lifetime = self.load_stats();
        Ok(state)
    }

    /// Write out whatever the last transition asked to persist. Clears the
    /// request list; storage failures are silent by contract.
    pub fn flush(&self, state: &mut GameState) {
        for request in std::mem::take(&mut state.persist_requests) {
            match request {
                PersistRequest::Settings => {
                    if let Ok(json) = serde_json::to_string(&state.settings) {
                        self.store.save(constants::KEY_SETTINGS, &json);
                    }
                }
                PersistRequest::Stats => {
                    if let Ok(json) = serde_json::to_string(&state.lifetime) {
                        self.store.save(constants::KEY_STATS, &json);
                    }
                }
                PersistRequest::Questions => {
                    if let Some(bank) = state.bank.as_ref()
                        && let Ok(json) = bank.to_json()
                    {
                        self.store.save(constants::KEY_QUESTIONS, &json);
                    }
                }
            }
        }
    }
}
