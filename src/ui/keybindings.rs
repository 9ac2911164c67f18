use std::collections::HashMap;

use winit::keyboard::KeyCode;

/// Menu actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Fire the apply callback of the selected widget.
    Apply,
}

/// Configurable key map. Several keys may share an action.
pub struct KeyBindings {
    map: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    /// Arrow keys plus WASD for movement, Enter/Space to apply.
    pub fn defaults() -> Self {
        let mut kb = Self {
            map: HashMap::new(),
        };
        kb.bind(KeyCode::ArrowUp, Action::MoveUp);
        kb.bind(KeyCode::ArrowDown, Action::MoveDown);
        kb.bind(KeyCode::ArrowLeft, Action::MoveLeft);
        kb.bind(KeyCode::ArrowRight, Action::MoveRight);
        kb.bind(KeyCode::Enter, Action::Apply);
        kb.bind(KeyCode::KeyW, Action::MoveUp);
        kb.bind(KeyCode::KeyS, Action::MoveDown);
        kb.bind(KeyCode::KeyA, Action::MoveLeft);
        kb.bind(KeyCode::KeyD, Action::MoveRight);
        kb.bind(KeyCode::Space, Action::Apply);
        kb
    }

    /// Map `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.map.insert(key, action);
    }

    pub fn unbind(&mut self, key: KeyCode) -> Option<Action> {
        self.map.remove(&key)
    }

    pub fn lookup(&self, key: KeyCode) -> Option<Action> {
        self.map.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::defaults()
    }
}
