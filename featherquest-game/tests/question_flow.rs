use featherquest_game::{
    Action, CATEGORY_COUNT, GamePhase, GameState, Question, QuestionBank, Settings, Tier, reduce,
};

fn question(prompt: &str, tier: Tier, age_min: u8) -> Question {
    Question {
        prompt: prompt.to_string(),
        options: vec!["yes".to_string(), "no".to_string()],
        answer: "yes".to_string(),
        fun_fact: None,
        tier,
        age_min,
    }
}

fn game_with_bank(bank: QuestionBank, ages: Vec<u8>) -> GameState {
    let state = GameState::new(11, Settings::default(), bank);
    let count = ages.len();
    let state = reduce(
        &state,
        Action::SetPlayers {
            count,
            names: Vec::new(),
            ages,
        },
        0,
    );
    reduce(&state, Action::StartGame, 0)
}

#[test]
fn under_age_player_skips_gated_category() {
    // Category 3 (position 3 = History) holds only teen-gated questions.
    let mut categories: [Vec<Question>; CATEGORY_COUNT] = Default::default();
    categories[3] = vec![question("teen-only", Tier::Easy, 15)];
    let bank = QuestionBank::from_categories(categories);
    let state = game_with_bank(bank, vec![9, 9]);

    let state = reduce(
        &state,
        Action::RollDice {
            value: 3,
            bonus: 0,
            catchup_bonus: 0,
        },
        0,
    );
    assert_eq!(state.phase, GamePhase::Playing, "no question phase entered");
    assert!(state.message.contains("No questions!"));
    assert_eq!(state.current_player, 1);
}

#[test]
fn adult_player_sees_gated_question() {
    let mut categories: [Vec<Question>; CATEGORY_COUNT] = Default::default();
    categories[3] = vec![question("teen-only", Tier::Easy, 15)];
    let bank = QuestionBank::from_categories(categories);
    let state = game_with_bank(bank, vec![30, 30]);

    let state = reduce(
        &state,
        Action::RollDice {
            value: 3,
            bonus: 0,
            catchup_bonus: 0,
        },
        0,
    );
    assert_eq!(state.phase, GamePhase::Question);
    assert_eq!(
        state.current_question.as_ref().map(|q| q.prompt.as_str()),
        Some("teen-only")
    );
}

#[test]
fn exhausted_category_falls_back_to_repeats() {
    // One question in the landing category: the second visit repeats it
    // rather than stalling the game.
    let mut categories: [Vec<Question>; CATEGORY_COUNT] = Default::default();
    categories[3] = vec![question("only-one", Tier::Medium, 8)];
    let bank = QuestionBank::from_categories(categories);
    let mut state = game_with_bank(bank, vec![20, 20]);

    for _ in 0..2 {
        state.players[state.current_player].position = 0;
        state = reduce(
            &state,
            Action::RollDice {
                value: 3,
                bonus: 0,
                catchup_bonus: 0,
            },
            0,
        );
        assert_eq!(state.phase, GamePhase::Question);
        assert_eq!(
            state.current_question.as_ref().map(|q| q.prompt.as_str()),
            Some("only-one")
        );
        state = reduce(
            &state,
            Action::Answer {
                answer: "yes".to_string(),
            },
            10_000,
        );
        state = reduce(&state, Action::NextTurn, 0);
    }
    assert!(state.asked.contains("only-one"));
    assert_eq!(state.asked.len(), 1);
}

#[test]
fn updated_bank_takes_effect_next_question() {
    let mut categories: [Vec<Question>; CATEGORY_COUNT] = Default::default();
    categories[3] = vec![question("from-old-bank", Tier::Medium, 8)];
    let state = game_with_bank(QuestionBank::from_categories(categories), vec![20, 20]);

    let mut replacement: [Vec<Question>; CATEGORY_COUNT] = Default::default();
    replacement[3] = vec![question("from-new-bank", Tier::Medium, 8)];
    let state = reduce(
        &state,
        Action::UpdateQuestions {
            questions: QuestionBank::from_categories(replacement),
        },
        0,
    );

    let state = reduce(
        &state,
        Action::RollDice {
            value: 3,
            bonus: 0,
            catchup_bonus: 0,
        },
        0,
    );
    assert_eq!(
        state.current_question.as_ref().map(|q| q.prompt.as_str()),
        Some("from-new-bank")
    );
}

#[test]
fn tier_preference_follows_dice() {
    let mut categories: [Vec<Question>; CATEGORY_COUNT] = Default::default();
    categories[3] = vec![
        question("easy-q", Tier::Easy, 8),
        question("medium-q", Tier::Medium, 8),
        question("hard-q", Tier::Hard, 8),
    ];
    // Category 1 mirrors it for the second landing spot.
    categories[1] = vec![
        question("easy-b", Tier::Easy, 8),
        question("medium-b", Tier::Medium, 8),
        question("hard-b", Tier::Hard, 8),
    ];
    let mut state = game_with_bank(QuestionBank::from_categories(categories), vec![20, 20]);

    state.players[0].position = 0;
    let rolled = reduce(
        &state,
        Action::RollDice {
            value: 3,
            bonus: 0,
            catchup_bonus: 0,
        },
        0,
    );
    assert_eq!(rolled.question_tier, Tier::Medium);
    assert_eq!(
        rolled.current_question.as_ref().map(|q| q.tier),
        Some(Tier::Medium)
    );

    state.players[0].position = 2;
    let rolled = reduce(
        &state,
        Action::RollDice {
            value: 5,
            bonus: 0,
            catchup_bonus: 0,
        },
        0,
    );
    assert_eq!(rolled.question_tier, Tier::Hard);
    assert_eq!(
        rolled.players[0].position, 7,
        "landed on an ordinary space"
    );
    assert_eq!(
        rolled.current_question.as_ref().map(|q| q.tier),
        Some(Tier::Hard)
    );
}
