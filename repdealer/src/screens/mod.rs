pub mod dealer;
pub mod idle;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use repdealer_core::Surface;

use crate::app::ScreenAction;

/// Trait for app screens
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, surface: &Surface, tick: u64);
    fn handle_key(&mut self, key: KeyEvent, surface: &Surface) -> Option<ScreenAction>;
}
