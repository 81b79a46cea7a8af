//! Aggregation and rendering of simulation outcomes.

use colored::Colorize;
use serde::Serialize;

use crate::bot::SimOutcome;

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub seed: u64,
    pub games: usize,
    pub finished: usize,
    pub avg_turns: f64,
    pub avg_actions: f64,
    pub total_questions: u32,
    pub no_question_skips: u32,
}

/// Collapse per-game outcomes into one report row per seed.
#[must_use]
pub fn build_report(outcomes: &[SimOutcome]) -> Vec<SeedReport> {
    let mut seeds: Vec<u64> = outcomes.iter().map(|outcome| outcome.seed).collect();
    seeds.sort_unstable();
    seeds.dedup();

    seeds
        .into_iter()
        .map(|seed| {
            let rows: Vec<&SimOutcome> = outcomes
                .iter()
                .filter(|outcome| outcome.seed == seed)
                .collect();
            let games = rows.len();
            let finished = rows.iter().filter(|outcome| outcome.finished).count();
            let turn_sum: u32 = rows.iter().map(|outcome| outcome.turns).sum();
            let action_sum: usize = rows.iter().map(|outcome| outcome.actions).sum();
            SeedReport {
                seed,
                games,
                finished,
                avg_turns: f64::from(turn_sum) / games.max(1) as f64,
                avg_actions: action_sum as f64 / games.max(1) as f64,
                total_questions: rows.iter().map(|outcome| outcome.questions_asked).sum(),
                no_question_skips: rows.iter().map(|outcome| outcome.no_question_skips).sum(),
            }
        })
        .collect()
}

pub fn render_console(reports: &[SeedReport], verbose: bool) {
    println!("{}", "Featherquest playability report".bold());
    for report in reports {
        let status = if report.finished == report.games {
            format!("{}/{} finished", report.finished, report.games).green()
        } else {
            format!("{}/{} finished", report.finished, report.games).yellow()
        };
        println!(
            "  seed {:>8}: {} | avg turns {:.1} | questions {}",
            report.seed, status, report.avg_turns, report.total_questions
        );
        if verbose {
            println!(
                "    avg actions {:.1}, no-question skips {}",
                report.avg_actions, report.no_question_skips
            );
        }
    }
}

/// JSON form for machine consumption.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(reports: &[SeedReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}
