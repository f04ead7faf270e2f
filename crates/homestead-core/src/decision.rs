//! Intent source trait and simple implementations.
//!
//! Before each frame the runner asks an [`IntentSource`] what the player
//! wants to do. In the browser the source is the UI turning clicks into
//! [`Intent`]s; headless runs use a scripted farmer, and tests use
//! [`StubIntentSource`] or [`ScriptedIntents`].

use std::collections::VecDeque;

use homestead_types::Intent;

use crate::game::Game;

/// A source of player intents.
pub trait IntentSource {
    /// Intents to apply before the next frame, in order.
    ///
    /// `game` is read-only: sources decide, the runner applies.
    fn collect_intents(&mut self, game: &Game) -> Vec<Intent>;
}

/// A source that never acts. The world runs on its own.
#[derive(Debug, Clone, Default)]
pub struct StubIntentSource;

impl StubIntentSource {
    /// Create a new stub intent source.
    pub const fn new() -> Self {
        Self
    }
}

impl IntentSource for StubIntentSource {
    fn collect_intents(&mut self, _game: &Game) -> Vec<Intent> {
        Vec::new()
    }
}

/// Intents queued for specific days.
///
/// Each intent is released on the first frame whose day is at least the
/// day it was scheduled for.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIntents {
    queue: VecDeque<(u32, Intent)>,
}

impl ScriptedIntents {
    /// Create an empty script.
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Schedule `intent` for `day`. Days must be scheduled in order.
    #[must_use]
    pub fn on_day(mut self, day: u32, intent: Intent) -> Self {
        self.queue.push_back((day, intent));
        self
    }

    /// Whether every scheduled intent has been released.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl IntentSource for ScriptedIntents {
    fn collect_intents(&mut self, game: &Game) -> Vec<Intent> {
        let today = game.clock().day();
        let mut due = Vec::new();
        while let Some(&(day, intent)) = self.queue.front() {
            if day > today {
                break;
            }
            due.push(intent);
            self.queue.pop_front();
        }
        due
    }
}
