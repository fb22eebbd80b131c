use crate::protocol::Outbound;

/// Keyboard input as the surface sees it, independent of terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKey {
    Escape,
    Enter,
    Backspace,
    Space,
    Control,
    Shift,
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Other,
}

/// Movement / interact keys kept away from the world while the surface is open
pub const CAPTURED_CHARS: [char; 6] = ['w', 'a', 's', 'd', 'e', 'q'];

impl SurfaceKey {
    pub fn is_game_key(&self) -> bool {
        match self {
            SurfaceKey::Space | SurfaceKey::Control | SurfaceKey::Shift => true,
            SurfaceKey::Char(c) => CAPTURED_CHARS.contains(&c.to_ascii_lowercase()),
            _ => false,
        }
    }
}

/// Input-capture hook, installed for exactly as long as the surface is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputCapture {
    installed: bool,
}

impl InputCapture {
    pub fn install(&mut self) {
        self.installed = true;
    }

    pub fn remove(&mut self) {
        self.installed = false;
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn intercepts(&self, key: SurfaceKey) -> bool {
        self.installed && key.is_game_key()
    }
}

/// What came of a key press
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyOutcome {
    pub outbound: Vec<Outbound>,
    /// Whether the key should still reach the surrounding environment
    pub propagate: bool,
}

impl KeyOutcome {
    pub fn pass_through() -> Self {
        Self {
            outbound: Vec::new(),
            propagate: true,
        }
    }

    pub fn swallowed(outbound: Vec<Outbound>) -> Self {
        Self {
            outbound,
            propagate: false,
        }
    }
}
