//! User-tunable game settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Hints each player starts the game with.
    #[must_use]
    pub const fn starting_hints(self) -> u8 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
        }
    }

    /// Question timer length in seconds.
    #[must_use]
    pub const fn timer_secs(self) -> u32 {
        match self {
            Difficulty::Easy => 25,
            Difficulty::Medium => 20,
            Difficulty::Hard => 15,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(()),
        }
    }
}

fn default_sound() -> bool {
    true
}

fn default_timer() -> bool {
    true
}

fn default_timer_secs() -> u32 {
    Difficulty::Medium.timer_secs()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_sound")]
    pub sound: bool,
    #[serde(default = "default_timer")]
    pub timer: bool,
    #[serde(default = "default_timer_secs")]
    pub timer_secs: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            timer: true,
            timer_secs: default_timer_secs(),
            difficulty: Difficulty::default(),
        }
    }
}

impl Settings {
    /// Apply a difficulty change, keeping the timer length in sync.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.timer_secs = difficulty.timer_secs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_drives_hints_and_timer() {
        assert_eq!(Difficulty::Easy.starting_hints(), 3);
        assert_eq!(Difficulty::Medium.starting_hints(), 2);
        assert_eq!(Difficulty::Hard.starting_hints(), 1);
        assert_eq!(Difficulty::Medium.timer_secs(), 20);
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.sound);
        assert_eq!(settings.timer_secs, 20);
    }

    #[test]
    fn set_difficulty_updates_timer() {
        let mut settings = Settings::default();
        settings.set_difficulty(Difficulty::Hard);
        assert_eq!(settings.timer_secs, 15);
        assert_eq!(settings.difficulty, Difficulty::Hard);
    }
}
