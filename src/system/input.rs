use super::clock::Clock;
use crate::input::events::{InputEvent, KeyCode};
use std::collections::VecDeque;

/// Abstraction over host input.
/// Implementations: ScriptedInput (testing), AutoplayInput (demo).
pub trait InputSource {
    /// Next pending event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Replays events at fixed clock times.
pub struct ScriptedInput<C: Clock> {
    clock: C,
    /// `(clock ms, event)`, ascending.
    events: VecDeque<(u64, InputEvent)>,
}

impl<C: Clock> ScriptedInput<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            events: VecDeque::new(),
        }
    }

    /// Queues `event` for clock time `at`, keeping the script in time order.
    pub fn push(&mut self, at: u64, event: InputEvent) -> &mut Self {
        let idx = self.events.partition_point(|(t, _)| *t <= at);
        self.events.insert(idx, (at, event));
        self
    }

    pub fn key_down(&mut self, at: u64, code: KeyCode) -> &mut Self {
        self.push(at, InputEvent::key_down(code))
    }

    pub fn key_up(&mut self, at: u64, code: KeyCode) -> &mut Self {
        self.push(at, InputEvent::key_up(code))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl<C: Clock> InputSource for ScriptedInput<C> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        let now = self.clock.now_millis();
        match self.events.front() {
            Some((at, _)) if *at <= now => self.events.pop_front().map(|(_, e)| e),
            _ => None,
        }
    }
}
