//! Per-game and lifetime statistics.

use serde::{Deserialize, Serialize};

use crate::constants::CATEGORY_COUNT;

/// Counters for one player within a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerGameStats {
    pub questions: u32,
    pub correct: u32,
    pub best_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryTotals {
    #[serde(default)]
    pub asked: u32,
    #[serde(default)]
    pub correct: u32,
}

/// Aggregate statistics persisted across games. Fire-and-forget: losing
/// these never affects game correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LifetimeStats {
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub questions_answered: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub per_category: [CategoryTotals; CATEGORY_COUNT],
}

impl LifetimeStats {
    pub(crate) fn record_asked(&mut self, category: usize) {
        if let Some(totals) = self.per_category.get_mut(category) {
            totals.asked += 1;
        }
    }

    pub(crate) fn record_answered(&mut self, category: usize, correct: bool) {
        self.questions_answered += 1;
        if correct {
            self.correct_answers += 1;
        }
        if correct && let Some(totals) = self.per_category.get_mut(category) {
            totals.correct += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_stats_roundtrip_json() {
        let mut stats = LifetimeStats::default();
        stats.record_asked(3);
        stats.record_answered(3, true);
        stats.record_answered(3, false);
        stats.games_played = 2;
        let json = serde_json::to_string(&stats).unwrap();
        let reloaded: LifetimeStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, reloaded);
        assert_eq!(reloaded.per_category[3].asked, 1);
        assert_eq!(reloaded.per_category[3].correct, 1);
        assert_eq!(reloaded.questions_answered, 2);
    }

    #[test]
    fn empty_json_decodes_to_defaults() {
        let stats: LifetimeStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, LifetimeStats::default());
    }

    #[test]
    fn out_of_range_category_is_ignored() {
        let mut stats = LifetimeStats::default();
        stats.record_asked(99);
        stats.record_answered(99, true);
        assert_eq!(stats.questions_answered, 1);
        assert_eq!(stats.correct_answers, 1);
        assert!(stats.per_category.iter().all(|totals| totals.asked == 0));
    }
}
