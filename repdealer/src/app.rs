use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode, MouseEvent};
use ratatui::Frame;
use tachyonfx::Duration;
use tracing::debug;

use repdealer_core::{post_all, Outbound, Surface, SurfaceKey};

use crate::effects::{self, FxManager};
use crate::link::HostLink;
use crate::screens::dealer::DealerScreen;
use crate::screens::idle::IdleScreen;
use crate::screens::Screen;

/// Main application state
pub struct App {
    pub surface: Surface,
    pub link: Box<dyn HostLink>,
    pub tick: u64,
    pub fx: FxManager,
    was_visible: bool,
    was_loading: bool,

    // Screens
    pub dealer: DealerScreen,
    pub idle: IdleScreen,
}

impl App {
    pub fn new(surface: Surface, link: Box<dyn HostLink>) -> Self {
        let idle = IdleScreen::new(link.name());
        Self {
            surface,
            link,
            tick: 0,
            fx: FxManager::default(),
            was_visible: false,
            was_loading: false,
            dealer: DealerScreen::new(),
            idle,
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.surface.is_visible() {
            self.dealer.render(frame, &self.surface, self.tick);
        } else {
            self.idle.render(frame, &self.surface, self.tick);
        }

        // Apply all tachyonfx effects on top of rendered content
        let tick_duration = Duration::from_millis(33); // ~30fps
        let buf = frame.buffer_mut();
        self.fx.process_effects(tick_duration, buf, area);
    }

    /// Handle key event. Returns true if should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let outcome = self.surface.handle_key(surface_key(&key));
        self.post(outcome.outbound);
        if !outcome.propagate {
            return false;
        }

        let action = if self.surface.is_visible() {
            self.dealer.handle_key(key, &self.surface)
        } else {
            self.idle.handle_key(key, &self.surface)
        };
        self.process_action(action)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.surface.is_visible() {
            return;
        }
        let action = self.dealer.handle_mouse(mouse, &self.surface);
        self.process_action(action);
    }

    pub fn handle_resize(&mut self, _w: u16, _h: u16) {
        // Ratatui handles resize automatically
    }

    /// How long the loop may wait for input: one animation frame, or less when
    /// a surface timer is due sooner
    pub fn poll_timeout(&self, now: Instant) -> std::time::Duration {
        let frame = std::time::Duration::from_millis(33);
        self.surface
            .next_deadline()
            .map_or(frame, |due| due.saturating_duration_since(now).min(frame))
    }

    pub fn tick(&mut self) {
        self.tick += 1;
        let now = Instant::now();

        while let Some(message) = self.link.try_recv(now) {
            debug!(kind = message.kind(), "handling host message");
            let outbound = self.surface.handle_inbound(message);
            self.post(outbound);
        }
        let outbound = self.surface.tick(now);
        self.post(outbound);

        // Visibility changes drive the transition effects
        let visible = self.surface.is_visible();
        if visible != self.was_visible {
            let effect = if visible {
                effects::surface_open()
            } else {
                effects::world_return()
            };
            self.fx.add_unique_effect(effects::TRANSITION, effect);
            self.was_visible = visible;
        }

        let loading = self.surface.is_loading();
        if loading != self.was_loading {
            if loading {
                self.fx
                    .add_unique_effect(effects::LOADING_PULSE, effects::loading_pulse());
            } else {
                self.fx.cancel_unique_effect(effects::LOADING_PULSE);
            }
            self.was_loading = loading;
        }
    }

    fn post(&mut self, outbound: Vec<Outbound>) {
        let resource = self.surface.config().resource_name.clone();
        post_all(&mut *self.link, &resource, outbound);
    }

    /// Process a screen action. Returns true if should quit.
    fn process_action(&mut self, action: Option<ScreenAction>) -> bool {
        match action {
            Some(ScreenAction::Quit) => return true,
            Some(ScreenAction::Select(index)) => {
                self.surface.select(index);
            }
            Some(ScreenAction::Give) => {
                if self.surface.confirm(Instant::now()).is_ok() {
                    self.fx
                        .add_unique_effect(effects::GIVE_FLASH, effects::give_flash());
                }
            }
            Some(ScreenAction::Cancel) => {
                if let Ok(outbound) = self.surface.cancel() {
                    self.post(outbound);
                }
            }
            Some(ScreenAction::Environment(c)) => {
                self.link.environment_key(c, Instant::now());
            }
            None => {}
        }

        false
    }
}

/// Actions that screens can return
#[derive(Debug, Clone)]
pub enum ScreenAction {
    Quit,
    Select(usize),
    /// Give the highlighted card
    Give,
    Cancel,
    /// Key meant for the world behind the dealer
    Environment(char),
}

/// Terminal key as the surface sees it
pub fn surface_key(key: &KeyEvent) -> SurfaceKey {
    match key.code {
        KeyCode::Esc => SurfaceKey::Escape,
        KeyCode::Enter => SurfaceKey::Enter,
        KeyCode::Backspace => SurfaceKey::Backspace,
        KeyCode::Char(' ') => SurfaceKey::Space,
        KeyCode::Char(c) => SurfaceKey::Char(c),
        KeyCode::Up => SurfaceKey::Up,
        KeyCode::Down => SurfaceKey::Down,
        KeyCode::Left => SurfaceKey::Left,
        KeyCode::Right => SurfaceKey::Right,
        KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl) => {
            SurfaceKey::Control
        }
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            SurfaceKey::Shift
        }
        _ => SurfaceKey::Other,
    }
}
