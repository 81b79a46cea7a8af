//! Question selection logic.
//!
//! Narrows the category pool through a cascade of filters, relaxing the
//! soft ones (tier, asked-history) whenever they would empty the pool. The
//! age gate is the one hard filter: it is never relaxed.

#[cfg(debug_assertions)]
use crate::constants::DEBUG_ENV_VAR;
use crate::data::{CATEGORIES, Question, QuestionBank, Tier};
use rand::Rng;
use std::collections::HashSet;

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

pub struct SelectionRequest<'a> {
    pub bank: &'a QuestionBank,
    pub category: usize,
    pub tier: Tier,
    pub player_age: u8,
    pub asked: &'a HashSet<String>,
}

fn filter_tier<'a>(pool: &[&'a Question], tier: Tier) -> Vec<&'a Question> {
    let tiered: Vec<&Question> = pool
        .iter()
        .copied()
        .filter(|question| question.tier == tier)
        .collect();
    if tiered.is_empty() { pool.to_vec() } else { tiered }
}

fn filter_age<'a>(pool: &[&'a Question], player_age: u8) -> Vec<&'a Question> {
    pool.iter()
        .copied()
        .filter(|question| question.age_min <= player_age)
        .collect()
}

fn filter_fresh<'a>(pool: &[&'a Question], asked: &HashSet<String>) -> Vec<&'a Question> {
    let fresh: Vec<&Question> = pool
        .iter()
        .copied()
        .filter(|question| !asked.contains(&question.prompt))
        .collect();
    if fresh.is_empty() { pool.to_vec() } else { fresh }
}

/// Select one question for the given category, tier, player age and
/// asked-history. Returns `None` when no age-appropriate question exists in
/// the category; the caller degrades to a skipped turn.
pub fn select_question<R: Rng>(
    request: &SelectionRequest<'_>,
    rng: Option<&mut R>,
) -> Option<Question> {
    let pool: Vec<&Question> = request.bank.category(request.category).iter().collect();

    if debug_log_enabled() {
        println!(
            "Question selection | category:{} tier:{} age:{} pool:{}",
            CATEGORIES
                .get(request.category)
                .map_or("?", |category| category.name),
            request.tier,
            request.player_age,
            pool.len()
        );
    }

    if pool.is_empty() {
        return None;
    }

    let tiered = filter_tier(&pool, request.tier);
    let aged = filter_age(&tiered, request.player_age);
    if aged.is_empty() {
        return None;
    }
    let candidates = filter_fresh(&aged, request.asked);

    let index = match rng {
        Some(rng) => rng.gen_range(0..candidates.len()),
        None => 0,
    };
    candidates.get(index).map(|question| (*question).clone())
}
