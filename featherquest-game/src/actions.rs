//! The closed set of actions the reducer accepts.

use serde::{Deserialize, Serialize};

use crate::data::QuestionBank;
use crate::settings::Difficulty;

/// Everything the presentation layer can ask the game to do. Dice values,
/// bonus rolls and swap targets arrive pre-resolved: the UI owns animations
/// and pickers, the reducer owns consequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetPlayers {
        count: usize,
        names: Vec<String>,
        ages: Vec<u8>,
    },
    SetDifficulty {
        difficulty: Difficulty,
    },
    StartGame,
    RollDice {
        value: u8,
        #[serde(default)]
        bonus: u8,
        #[serde(default)]
        catchup_bonus: u8,
    },
    ChooseHubCategory {
        category: usize,
    },
    ResolveEvent {
        #[serde(default)]
        target_player: Option<usize>,
        #[serde(default)]
        bonus_value: Option<u8>,
    },
    Answer {
        answer: String,
    },
    TimerExpired,
    UseHint,
    PenaltyMove {
        value: u8,
    },
    NextTurn,
    ToggleEditor,
    ToggleStats,
    ToggleSettings,
    UpdateQuestions {
        questions: QuestionBank,
    },
    Reset,
}
