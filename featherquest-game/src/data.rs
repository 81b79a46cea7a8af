//! Question bank data model and loading.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::CATEGORY_COUNT;

/// Presentation metadata for one category. The core only cares about the
/// index and name; color and emoji ride along for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub short: &'static str,
    pub color: &'static str,
    pub emoji: &'static str,
}

pub const CATEGORIES: [CategoryInfo; CATEGORY_COUNT] = [
    CategoryInfo { name: "Animals", short: "ANI", color: "#76b041", emoji: "🦜" },
    CategoryInfo { name: "Science", short: "SCI", color: "#17bebb", emoji: "🔬" },
    CategoryInfo { name: "Geography", short: "GEO", color: "#ffc914", emoji: "🗺️" },
    CategoryInfo { name: "History", short: "HIS", color: "#e4572e", emoji: "🏺" },
    CategoryInfo { name: "Sports", short: "SPO", color: "#2e86ab", emoji: "⚽" },
    CategoryInfo { name: "Arts", short: "ART", color: "#a846a0", emoji: "🎨" },
];

/// Look up a category index by its display name.
#[must_use]
pub fn category_index(name: &str) -> Option<usize> {
    CATEGORIES
        .iter()
        .position(|category| category.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    /// Map a die face to the question tier it demands.
    #[must_use]
    pub const fn from_dice(value: u8) -> Self {
        match value {
            0..=2 => Tier::Easy,
            3..=4 => Tier::Medium,
            _ => Tier::Hard,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Tier::Easy),
            "medium" => Ok(Tier::Medium),
            "hard" => Ok(Tier::Hard),
            _ => Err(()),
        }
    }
}

fn default_age_min() -> u8 {
    8
}

/// A single trivia question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    /// Two options render as true/false; more as multiple choice.
    pub options: Vec<String>,
    /// Must be a member of `options`.
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun_fact: Option<String>,
    #[serde(default)]
    pub tier: Tier,
    /// Minimum player age allowed to see this question (8 or 15).
    #[serde(default = "default_age_min")]
    pub age_min: u8,
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question '{prompt}' is invalid: {reason}")]
    InvalidQuestion { prompt: String, reason: String },
}

/// All questions, partitioned by category index. Serializes as a JSON
/// object keyed by category name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBank {
    categories: [Vec<Question>; CATEGORY_COUNT],
}

impl Serialize for QuestionBank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(CATEGORY_COUNT))?;
        for (index, questions) in self.categories.iter().enumerate() {
            map.serialize_entry(CATEGORIES[index].name, questions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QuestionBank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: HashMap<String, Vec<Question>> = HashMap::deserialize(deserializer)?;
        let mut categories: [Vec<Question>; CATEGORY_COUNT] = Default::default();
        for (name, questions) in raw {
            let index = category_index(&name).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown category '{name}'"))
            })?;
            categories[index] = questions;
        }
        Ok(Self { categories })
    }
}

impl QuestionBank {
    /// Create an empty bank (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a bank from per-category question lists.
    #[must_use]
    pub fn from_categories(categories: [Vec<Question>; CATEGORY_COUNT]) -> Self {
        Self { categories }
    }

    /// Load a bank from its JSON form: an object keyed by category name.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed, names an unknown
    /// category, or contains a structurally invalid question.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let bank: Self = serde_json::from_str(json)?;
        for questions in &bank.categories {
            for question in questions {
                validate_question(question)?;
            }
        }
        Ok(bank)
    }

    /// Serialize back to the JSON object form, keyed by category name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The starter bank embedded with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(include_str!("../assets/questions.json"))
            .unwrap_or_else(|_| Self::empty())
    }

    #[must_use]
    pub fn category(&self, index: usize) -> &[Question] {
        self.categories
            .get(index)
            .map_or(&[], |questions| questions.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_question(question: &Question) -> Result<(), BankError> {
    if question.options.len() < 2 {
        return Err(BankError::InvalidQuestion {
            prompt: question.prompt.clone(),
            reason: "needs at least two options".to_string(),
        });
    }
    if !question.options.contains(&question.answer) {
        return Err(BankError::InvalidQuestion {
            prompt: question.prompt.clone(),
            reason: "answer is not one of the options".to_string(),
        });
    }
    Ok(())
}
