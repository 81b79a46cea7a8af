//! Deterministic board generation.
//!
//! The board is a fixed sequence of 100 spaces sampled along a smooth curve
//! through hand-placed waypoints. The curve only feeds rendering (token
//! coordinates and facing angles); gameplay semantics come from the hub and
//! event assignments, which depend purely on fixed constants.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::constants::{BOARD_SPACES, CATEGORY_COUNT, EVENT_INTERVAL, HUB_POSITIONS};

/// Waypoints for the display curve, in abstract board units.
/// Chosen so the path winds across the play field without self-crossing.
const WAYPOINTS: [(f32, f32); 14] = [
    (6.0, 88.0),
    (18.0, 72.0),
    (36.0, 80.0),
    (54.0, 70.0),
    (70.0, 78.0),
    (86.0, 64.0),
    (78.0, 46.0),
    (60.0, 40.0),
    (42.0, 48.0),
    (24.0, 40.0),
    (12.0, 26.0),
    (30.0, 14.0),
    (54.0, 18.0),
    (78.0, 10.0),
];

/// The six special-space effects, in their fixed cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    HintGift,
    Tailwind,
    Shortcut,
    Swap,
    BonusRoll,
    DoubleOrNothing,
}

pub(crate) const EVENT_CYCLE: [EventKind; 6] = [
    EventKind::HintGift,
    EventKind::Tailwind,
    EventKind::Shortcut,
    EventKind::Swap,
    EventKind::BonusRoll,
    EventKind::DoubleOrNothing,
];

impl EventKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            EventKind::HintGift => "hint_gift",
            EventKind::Tailwind => "tailwind",
            EventKind::Shortcut => "shortcut",
            EventKind::Swap => "swap",
            EventKind::BonusRoll => "bonus_roll",
            EventKind::DoubleOrNothing => "double_or_nothing",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            EventKind::HintGift => "Hint Gift",
            EventKind::Tailwind => "Tailwind",
            EventKind::Shortcut => "Shortcut",
            EventKind::Swap => "Swap",
            EventKind::BonusRoll => "Bonus Roll",
            EventKind::DoubleOrNothing => "Double or Nothing",
        }
    }
}

/// One space on the board. Coordinates and angle are render-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub position: usize,
    pub x: f32,
    pub y: f32,
    /// Facing toward the next space, radians.
    pub angle: f32,
    /// Question category asked when landing here (0-5).
    pub category: usize,
    /// Hub index when this space is one of the six category hubs.
    pub hub: Option<usize>,
    pub event: Option<EventKind>,
}

impl Space {
    #[must_use]
    pub const fn is_hub(&self) -> bool {
        self.hub.is_some()
    }

    #[must_use]
    pub const fn is_event(&self) -> bool {
        self.event.is_some()
    }
}

fn catmull_rom(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), p3: (f32, f32), t: f32) -> (f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let blend = |a: f32, b: f32, c: f32, d: f32| {
        0.5 * ((2.0 * b) + (-a + c) * t + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    (
        blend(p0.0, p1.0, p2.0, p3.0),
        blend(p0.1, p1.1, p2.1, p3.1),
    )
}

fn waypoint(index: isize) -> (f32, f32) {
    let clamped = index.clamp(0, WAYPOINTS.len() as isize - 1) as usize;
    WAYPOINTS[clamped]
}

fn curve_point(t_global: f32) -> (f32, f32) {
    let segments = (WAYPOINTS.len() - 1) as f32;
    let scaled = (t_global * segments).min(segments - 1e-4);
    let segment = scaled.floor() as isize;
    let t = scaled - segment as f32;
    catmull_rom(
        waypoint(segment - 1),
        waypoint(segment),
        waypoint(segment + 1),
        waypoint(segment + 2),
        t,
    )
}

const fn hub_index_at(position: usize) -> Option<usize> {
    let mut i = 0;
    while i < HUB_POSITIONS.len() {
        if HUB_POSITIONS[i] == position {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Build the full board. Deterministic: identical output on every call.
#[must_use]
pub fn generate_board() -> Vec<Space> {
    let mut spaces = Vec::with_capacity(BOARD_SPACES);
    let mut event_cursor = 0usize;
    for position in 0..BOARD_SPACES {
        let t = position as f32 / (BOARD_SPACES - 1) as f32;
        let (x, y) = curve_point(t);
        let hub = hub_index_at(position);
        let category = hub.unwrap_or(position % CATEGORY_COUNT);
        let interior = position > 0 && position < BOARD_SPACES - 1;
        let event = if hub.is_none() && interior && position % EVENT_INTERVAL == 0 {
            let kind = EVENT_CYCLE[event_cursor % EVENT_CYCLE.len()];
            event_cursor += 1;
            Some(kind)
        } else {
            None
        };
        spaces.push(Space {
            position,
            x,
            y,
            angle: 0.0,
            category,
            hub,
            event,
        });
    }
    for position in 0..BOARD_SPACES {
        let (nx, ny) = if position + 1 < BOARD_SPACES {
            (spaces[position + 1].x, spaces[position + 1].y)
        } else {
            (spaces[position].x, spaces[position].y)
        };
        let space = &mut spaces[position];
        space.angle = (ny - space.y).atan2(nx - space.x);
    }
    spaces
}

/// Shared board instance, generated once on first use.
#[must_use]
pub fn board() -> &'static [Space] {
    static BOARD: OnceLock<Vec<Space>> = OnceLock::new();
    BOARD.get_or_init(generate_board)
}
