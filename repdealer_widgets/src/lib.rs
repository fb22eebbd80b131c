pub mod action_buttons;
pub mod card;
pub mod grid;
pub mod header;
pub mod icon;
pub mod popup;
pub mod preview;
pub mod theme;

pub use theme::Theme;
