use super::events::KeyCode;
use crate::error::{EngineError, Result};
use crate::models::engine::Lane;
use crate::models::settings::KeyConfig;
use std::collections::HashMap;

/// What a bound key does during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Lane(Lane),
    /// Pause while playing, abandon while paused, leave the result screen.
    Pause,
    /// Resume from the pause screen.
    Confirm,
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    binds: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    pub fn from_config(keys: &KeyConfig) -> Result<Self> {
        let mut bindings = Self {
            binds: HashMap::new(),
        };
        for (lane, label) in Lane::ALL.iter().zip(&keys.lanes) {
            bindings.bind(label, Action::Lane(*lane))?;
        }
        bindings.bind(&keys.pause, Action::Pause)?;
        bindings.bind(&keys.confirm, Action::Confirm)?;
        Ok(bindings)
    }

    fn bind(&mut self, label: &str, action: Action) -> Result<()> {
        let code = KeyCode::parse(label)
            .ok_or_else(|| EngineError::Config(format!("unknown key name {:?}", label)))?;
        if let Some(previous) = self.binds.insert(code, action) {
            return Err(EngineError::Config(format!(
                "key {} bound to both {:?} and {:?}",
                code, previous, action
            )));
        }
        Ok(())
    }

    pub fn resolve(&self, code: KeyCode) -> Option<Action> {
        self.binds.get(&code).copied()
    }

    /// Reverse lookup, used to script input.
    pub fn key_for(&self, action: Action) -> Option<KeyCode> {
        self.binds
            .iter()
            .find_map(|(code, bound)| (*bound == action).then_some(*code))
    }
}
