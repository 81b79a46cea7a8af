//! The game state machine.
//!
//! `reduce` is the single entry point: given the current state, one action
//! and the caller's clock, it returns the next state. It is total: every
//! declared action is handled in every phase, and an action issued in a
//! phase where it makes no sense leaves the state unchanged.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::actions::Action;
use crate::board::{EventKind, board};
use crate::constants::{
    BOARD_SPACES, CATEGORY_COUNT, CATCHUP_WRONG_STREAK, DICE_MAX, DICE_MIN,
    DOUBLE_OR_NOTHING_STAKE, EVENT_HINT_GIFT, HINT_OPTIONS_REMOVED, KNOCKBACK_SPACES, MAX_PLAYERS,
    MIN_PLAYERS, SHORTCUT_SPACES, SPEED_BONUS_SPACES, SPEED_BONUS_WINDOW_MS,
    STREAK_HINT_THRESHOLD, STREAK_MOVE_BONUS, STREAK_MOVE_THRESHOLD, TAILWIND_SPACES,
};
use crate::data::{CATEGORIES, Question, QuestionBank, Tier};
use crate::selector::{SelectionRequest, select_question};
use crate::settings::Difficulty;
use crate::state::{GamePhase, GameState, PersistRequest, Player};
use crate::stats::PlayerGameStats;

/// Apply one action to the game. The input state is never mutated; the
/// returned value is a fresh state reflecting the transition.
#[must_use]
pub fn reduce(state: &GameState, action: Action, now_ms: u64) -> GameState {
    let mut next = state.clone();
    // Persist requests describe the transition that produced them.
    next.persist_requests.clear();
    match action {
        Action::SetPlayers { count, names, ages } => next.set_players(count, &names, &ages),
        Action::SetDifficulty { difficulty } => next.set_difficulty(difficulty),
        Action::StartGame => next.start_game(),
        Action::RollDice {
            value,
            bonus,
            catchup_bonus,
        } => next.roll_dice(value, bonus, catchup_bonus, now_ms),
        Action::ChooseHubCategory { category } => next.choose_hub_category(category, now_ms),
        Action::ResolveEvent {
            target_player,
            bonus_value,
        } => next.resolve_event(target_player, bonus_value, now_ms),
        Action::Answer { answer } => next.answer(Some(answer), now_ms),
        Action::TimerExpired => next.answer(None, now_ms),
        Action::UseHint => next.use_hint(),
        Action::PenaltyMove { value } => next.penalty_move(value),
        Action::NextTurn => next.next_turn(),
        Action::ToggleEditor => next.editor_open = !next.editor_open,
        Action::ToggleStats => next.stats_open = !next.stats_open,
        Action::ToggleSettings => next.settings_open = !next.settings_open,
        Action::UpdateQuestions { questions } => next.update_questions(questions),
        Action::Reset => next = next.reset(),
    }
    next
}

impl GameState {
    fn set_players(&mut self, count: usize, names: &[String], ages: &[u8]) {
        if self.phase != GamePhase::Setup {
            return;
        }
        let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        let hints = self.settings.difficulty.starting_hints();
        self.players = (0..count)
            .map(|index| {
                let name = names
                    .get(index)
                    .filter(|name| !name.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("Player {}", index + 1));
                let age = ages.get(index).copied().unwrap_or(8);
                Player::new(index, name, age, hints)
            })
            .collect();
        self.game_stats = vec![PlayerGameStats::default(); count];
        self.message = format!("{count} players ready. Start when set!");
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.set_difficulty(difficulty);
        if self.phase == GamePhase::Setup {
            let hints = difficulty.starting_hints();
            for player in &mut self.players {
                player.hints = hints;
            }
        }
        self.persist_requests.push(PersistRequest::Settings);
        self.message = format!("Difficulty set to {difficulty}.");
    }

    fn start_game(&mut self) {
        if self.phase != GamePhase::Setup {
            return;
        }
        if self.players.len() < MIN_PLAYERS {
            self.message = format!("Need at least {MIN_PLAYERS} players to start.");
            return;
        }
        self.phase = GamePhase::Playing;
        self.current_player = 0;
        self.turn_count = 0;
        self.winner = None;
        self.push_history("Game started.");
        self.message = format!("Game on! {} rolls first.", self.current_player_name());
    }

    fn roll_dice(&mut self, value: u8, bonus: u8, catchup_bonus: u8, now_ms: u64) {
        if self.phase != GamePhase::Playing || self.winner.is_some() || self.players.is_empty() {
            return;
        }
        let value = value.clamp(DICE_MIN, DICE_MAX);
        self.dice_value = value;
        let player = &self.players[self.current_player];
        // Catch-up mechanic: a long wrong streak forces easy questions.
        let tier = if player.wrong_streak >= CATCHUP_WRONG_STREAK {
            Tier::Easy
        } else {
            Tier::from_dice(value)
        };
        self.question_tier = tier;
        self.pre_roll_position = player.position;
        let steps = value as usize + bonus as usize + catchup_bonus as usize;
        let new_position = (self.pre_roll_position + steps).min(BOARD_SPACES - 1);
        self.players[self.current_player].position = new_position;

        let space = &board()[new_position];
        let name = self.current_player_name();
        if let Some(hub) = space.hub {
            self.phase = GamePhase::HubChoice;
            self.message = format!(
                "{name} rolled {value} and reached the {} hub! Choose a category for a feather.",
                CATEGORIES[hub].name
            );
        } else if let Some(kind) = space.event {
            self.phase = GamePhase::Event;
            self.current_event = Some(kind);
            self.message = format!(
                "{name} rolled {value} and hit an event space: {}!",
                kind.label()
            );
        } else if self.try_question(space.category, tier, false, now_ms) {
            self.message = format!(
                "{name} rolled {value} to space {new_position}. {} question ({tier})!",
                CATEGORIES[space.category].name
            );
        } else {
            self.skip_no_question();
        }
    }

    fn choose_hub_category(&mut self, category: usize, now_ms: u64) {
        if self.phase != GamePhase::HubChoice || category >= CATEGORY_COUNT {
            return;
        }
        let already_earned = self
            .current_player()
            .is_some_and(|player| player.feathers[category]);
        if already_earned {
            self.message = format!(
                "You already hold the {} feather — pick a different category.",
                CATEGORIES[category].name
            );
            return;
        }
        let tier = self.question_tier;
        if self.try_question(category, tier, true, now_ms) {
            self.message = format!(
                "{} chose {} — {tier} question for the feather!",
                self.current_player_name(),
                CATEGORIES[category].name
            );
        } else {
            self.skip_no_question();
        }
    }

    fn resolve_event(
        &mut self,
        target_player: Option<usize>,
        bonus_value: Option<u8>,
        now_ms: u64,
    ) {
        if self.phase != GamePhase::Event {
            return;
        }
        let Some(kind) = self.current_event else {
            return;
        };
        let name = self.current_player_name();
        let event_text = match kind {
            EventKind::HintGift => {
                if let Some(player) = self.current_player_mut() {
                    player.hints += EVENT_HINT_GIFT;
                }
                format!("Hint Gift! {name} pockets an extra hint.")
            }
            EventKind::Tailwind => {
                self.move_current_forward(TAILWIND_SPACES);
                format!("Tailwind! {name} glides {TAILWIND_SPACES} spaces ahead.")
            }
            EventKind::Shortcut => {
                self.move_current_forward(SHORTCUT_SPACES);
                format!("Shortcut! {name} skips {SHORTCUT_SPACES} spaces ahead.")
            }
            EventKind::Swap => match target_player {
                Some(target) if target != self.current_player && target < self.players.len() => {
                    let own = self.players[self.current_player].position;
                    let theirs = self.players[target].position;
                    self.players[self.current_player].position = theirs;
                    self.players[target].position = own;
                    format!("Swap! {name} trades places with {}.", self.players[target].name)
                }
                _ => "Swap fizzles — no one to trade with.".to_string(),
            },
            EventKind::BonusRoll => {
                let extra = bonus_value.map_or(0, |value| value.clamp(DICE_MIN, DICE_MAX)) as usize;
                self.move_current_forward(extra);
                format!("Bonus Roll! {name} moves {extra} more.")
            }
            EventKind::DoubleOrNothing => {
                self.double_or_nothing = true;
                self.question_tier = Tier::Hard;
                format!(
                    "Double or Nothing! Answer right for +{DOUBLE_OR_NOTHING_STAKE}, wrong for -{DOUBLE_OR_NOTHING_STAKE}."
                )
            }
        };
        self.current_event = None;
        self.push_history(&event_text);

        let position = self
            .current_player()
            .map_or(0, |player| player.position);
        let space = &board()[position];
        if let Some(hub) = space.hub {
            self.phase = GamePhase::HubChoice;
            self.message = format!(
                "{event_text} {name} arrives at the {} hub — choose a category for a feather.",
                CATEGORIES[hub].name
            );
        } else {
            let tier = self.question_tier;
            if self.try_question(space.category, tier, false, now_ms) {
                self.message = format!(
                    "{event_text} {} question ({tier})!",
                    CATEGORIES[space.category].name
                );
            } else {
                self.skip_no_question();
                self.message = format!("{event_text} {}", self.message);
            }
        }
    }

    fn answer(&mut self, submitted: Option<String>, now_ms: u64) {
        if self.phase != GamePhase::Question || self.answer_revealed {
            return;
        }
        let Some(question) = self.current_question.clone() else {
            return;
        };
        let timed_out = submitted.is_none();
        let correct = submitted.as_deref() == Some(question.answer.as_str());
        self.selected_answer = submitted;
        self.answer_revealed = true;

        let category = self.current_category.unwrap_or(0);
        self.lifetime.record_answered(category, correct);

        // Streak bookkeeping happens on every answer, gamble or not.
        let streak = {
            let Some(player) = self.current_player_mut() else {
                return;
            };
            if correct {
                player.correct_streak += 1;
                player.wrong_streak = 0;
            } else {
                player.wrong_streak += 1;
                player.correct_streak = 0;
            }
            player.correct_streak
        };
        if let Some(stats) = self.game_stats.get_mut(self.current_player) {
            if correct {
                stats.correct += 1;
            }
            stats.best_streak = stats.best_streak.max(streak);
        }

        let message = if self.double_or_nothing {
            self.resolve_gamble(correct, timed_out)
        } else if correct {
            self.resolve_correct(&question, streak, now_ms)
        } else if timed_out {
            format!("Time's up! The answer was {}.", question.answer)
        } else {
            format!("Wrong! The answer was {}.", question.answer)
        };
        self.push_history(&message);
        self.message = message;
    }

    /// The ±6 gamble replaces normal scoring entirely.
    fn resolve_gamble(&mut self, correct: bool, timed_out: bool) -> String {
        if correct {
            self.move_current_forward(DOUBLE_OR_NOTHING_STAKE);
            format!("DOUBLE OR NOTHING: Correct! +{DOUBLE_OR_NOTHING_STAKE} spaces!")
        } else {
            if let Some(player) = self.current_player_mut() {
                player.position = player.position.saturating_sub(DOUBLE_OR_NOTHING_STAKE);
            }
            let text = format!("DOUBLE OR NOTHING: Wrong! -{DOUBLE_OR_NOTHING_STAKE} spaces!");
            if timed_out {
                format!("Time's up! {text}")
            } else {
                text
            }
        }
    }

    fn resolve_correct(&mut self, question: &Question, streak: u32, now_ms: u64) -> String {
        let mut parts = vec!["Correct!".to_string()];

        if streak == STREAK_HINT_THRESHOLD {
            if let Some(player) = self.current_player_mut() {
                player.hints += 1;
            }
            let banner = format!("{STREAK_HINT_THRESHOLD} in a row! +1 Hint!");
            parts.push(banner.clone());
            self.streak_reward = Some(banner);
        } else if streak == STREAK_MOVE_THRESHOLD {
            self.move_current_forward(STREAK_MOVE_BONUS);
            let banner = format!("{STREAK_MOVE_THRESHOLD} in a row! +{STREAK_MOVE_BONUS} spaces!");
            parts.push(banner.clone());
            self.streak_reward = Some(banner);
        }

        if now_ms.saturating_sub(self.question_started_at) <= SPEED_BONUS_WINDOW_MS {
            self.move_current_forward(SPEED_BONUS_SPACES);
            parts.push("SPEED BONUS +1!".to_string());
        }

        if self.hub_quiz
            && let Some(category) = self.current_category
            && let Some(player) = self.players.get_mut(self.current_player)
        {
            player.feathers[category] = true;
            parts.push(format!("The {} feather is yours!", CATEGORIES[category].name));
            if player.has_all_feathers() {
                self.winner = Some(self.current_player);
                parts.push("All six feathers collected!".to_string());
            }
        }

        let final_position = self
            .current_player()
            .map_or(0, |player| player.position);
        if final_position > 0 {
            let mut bumped = Vec::new();
            for index in 0..self.players.len() {
                if index != self.current_player && self.players[index].position == final_position {
                    self.players[index].position =
                        self.players[index].position.saturating_sub(KNOCKBACK_SPACES);
                    bumped.push(self.players[index].name.clone());
                }
            }
            if !bumped.is_empty() {
                parts.push(format!(
                    "{} knocked back {KNOCKBACK_SPACES} spaces!",
                    bumped.join(" and ")
                ));
            }
        }

        if let Some(fact) = &question.fun_fact {
            parts.push(fact.clone());
        }
        parts.join(" ")
    }

    fn use_hint(&mut self) {
        if self.phase != GamePhase::Question || self.answer_revealed {
            return;
        }
        let Some(question) = self.current_question.clone() else {
            return;
        };
        if self.current_player().is_none_or(|player| player.hints == 0) {
            return;
        }
        let mut candidates = Vec::new();
        for (index, option) in question.options.iter().enumerate() {
            if option != &question.answer && !self.eliminated_options.contains(&index) {
                candidates.push(index);
            }
        }
        if candidates.is_empty() {
            return;
        }
        let removed = candidates.len().min(HINT_OPTIONS_REMOVED);
        if let Some(rng) = self.rng.as_mut() {
            // Partial Fisher-Yates: only the removed prefix needs shuffling.
            for slot in 0..removed {
                let pick = rng.gen_range(slot..candidates.len());
                candidates.swap(slot, pick);
            }
        }
        for index in candidates.into_iter().take(removed) {
            self.eliminated_options.push(index);
        }
        if let Some(player) = self.current_player_mut() {
            player.hints -= 1;
        }
        self.message = format!("Hint used! {removed} wrong option(s) eliminated.");
    }

    fn penalty_move(&mut self, value: u8) {
        if self.phase != GamePhase::Question || !self.answer_revealed {
            return;
        }
        // Rollback anchors to the pre-roll position: the player loses what
        // this turn gained, never more.
        let target = self.pre_roll_position.saturating_sub(value as usize);
        if let Some(player) = self.current_player_mut() {
            player.position = target;
        }
        let text = format!(
            "Penalty roll {value}! {} slides back to space {target}.",
            self.current_player_name()
        );
        self.push_history(&text);
        self.message = text;
    }

    fn next_turn(&mut self) {
        if let Some(winner) = self.winner {
            if self.phase != GamePhase::GameOver {
                self.lifetime.games_played += 1;
                self.persist_requests.push(PersistRequest::Stats);
                let name = self
                    .players
                    .get(winner)
                    .map_or_else(|| "Player".to_string(), |player| player.name.clone());
                let text = format!("{name} wins the game!");
                self.push_history(&text);
                self.message = text;
            }
            self.phase = GamePhase::GameOver;
            return;
        }
        if matches!(self.phase, GamePhase::Setup | GamePhase::GameOver) {
            return;
        }
        self.advance_turn();
        self.message = format!("{}'s turn.", self.current_player_name());
    }

    fn update_questions(&mut self, bank: QuestionBank) {
        self.bank = Some(bank);
        self.persist_requests.push(PersistRequest::Questions);
        self.message = "Question bank updated.".to_string();
    }

    fn reset(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            lifetime: self.lifetime.clone(),
            seed: self.seed,
            bank: self.bank.clone(),
            rng: Some(ChaCha20Rng::seed_from_u64(self.seed)),
            message: "New game! Add players to begin.".to_string(),
            ..Self::default()
        }
    }

    // Shared movement/turn plumbing ----------------------------------------

    fn move_current_forward(&mut self, spaces: usize) {
        if let Some(player) = self.current_player_mut() {
            player.position = (player.position + spaces).min(BOARD_SPACES - 1);
        }
    }

    fn advance_turn(&mut self) {
        self.clear_question_transients();
        if self.players.is_empty() {
            return;
        }
        self.current_player = (self.current_player + 1) % self.players.len();
        self.turn_count += 1;
        self.phase = GamePhase::Playing;
    }

    /// Degrade to a skipped turn when no question can be posed.
    fn skip_no_question(&mut self) {
        self.push_history("No questions available.");
        self.advance_turn();
        self.message = format!("No questions! Next turn: {}.", self.current_player_name());
    }

    /// Present a question in `category` at `tier` for the current player.
    /// Returns false when the category has nothing selectable.
    fn try_question(&mut self, category: usize, tier: Tier, from_hub: bool, now_ms: u64) -> bool {
        let player_age = self
            .current_player()
            .map_or(8, |player| player.age);
        let picked = {
            let Some(bank) = self.bank.as_ref() else {
                return false;
            };
            let request = SelectionRequest {
                bank,
                category,
                tier,
                player_age,
                asked: &self.asked,
            };
            select_question(&request, self.rng.as_mut())
        };
        let Some(question) = picked else {
            return false;
        };
        self.asked.insert(question.prompt.clone());
        self.current_question = Some(question);
        self.current_category = Some(category);
        self.question_tier = tier;
        self.hub_quiz = from_hub;
        self.selected_answer = None;
        self.answer_revealed = false;
        self.eliminated_options.clear();
        self.question_started_at = now_ms;
        self.phase = GamePhase::Question;
        if let Some(stats) = self.game_stats.get_mut(self.current_player) {
            stats.questions += 1;
        }
        self.lifetime.record_asked(category);
        true
    }
}
