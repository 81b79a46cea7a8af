//! Centralized balance and tuning constants for Featherquest game logic.
//!
//! These values define the deterministic math for the core rules. Keeping
//! them together ensures that gameplay can only be adjusted via code changes
//! reviewed in version control, rather than through external JSON assets.

// Board layout --------------------------------------------------------------
pub const BOARD_SPACES: usize = 100;
pub const CATEGORY_COUNT: usize = 6;
/// Fixed hub positions, spaced to roughly divide the board into sixths.
pub(crate) const HUB_POSITIONS: [usize; CATEGORY_COUNT] = [8, 24, 40, 56, 72, 88];
/// Every Nth non-hub interior position becomes an event space.
pub(crate) const EVENT_INTERVAL: usize = 5;

// Players -------------------------------------------------------------------
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub(crate) const PLAYER_COLORS: [&str; MAX_PLAYERS] = ["#e4572e", "#17bebb", "#ffc914", "#76b041"];
pub(crate) const PLAYER_EMOJIS: [&str; MAX_PLAYERS] = ["🦉", "🦆", "🦅", "🐧"];

// Dice ----------------------------------------------------------------------
pub(crate) const DICE_MIN: u8 = 1;
pub(crate) const DICE_MAX: u8 = 6;
/// Wrong answers in a row before rolls are forced down to easy questions.
pub(crate) const CATCHUP_WRONG_STREAK: u32 = 3;

// Streak rewards ------------------------------------------------------------
pub(crate) const STREAK_HINT_THRESHOLD: u32 = 3;
pub(crate) const STREAK_MOVE_THRESHOLD: u32 = 5;
pub(crate) const STREAK_MOVE_BONUS: usize = 3;

// Answer scoring ------------------------------------------------------------
pub(crate) const SPEED_BONUS_WINDOW_MS: u64 = 4_000;
pub(crate) const SPEED_BONUS_SPACES: usize = 1;
pub(crate) const KNOCKBACK_SPACES: usize = 3;
pub(crate) const DOUBLE_OR_NOTHING_STAKE: usize = 6;

// Events --------------------------------------------------------------------
pub(crate) const TAILWIND_SPACES: usize = 3;
pub(crate) const SHORTCUT_SPACES: usize = 5;
pub(crate) const EVENT_HINT_GIFT: u8 = 1;

// Hints ---------------------------------------------------------------------
pub(crate) const HINT_OPTIONS_REMOVED: usize = 2;

// Persistence keys ----------------------------------------------------------
pub const KEY_SETTINGS: &str = "featherquest.settings";
pub const KEY_STATS: &str = "featherquest.stats";
pub const KEY_QUESTIONS: &str = "featherquest.questions";

// Diagnostics ---------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "FEATHERQUEST_DEBUG_LOGS";
