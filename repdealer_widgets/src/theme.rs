use ratatui::style::Color;

/// Street-dealer color theme for the surface
pub struct Theme;

impl Theme {
    // Backgrounds
    pub const BG: Color = Color::Rgb(13, 17, 23);
    pub const PANEL_BG: Color = Color::Rgb(24, 26, 36);
    pub const OVERLAY_BG: Color = Color::Rgb(8, 10, 14);

    // Card tiles
    pub const CARD_BORDER: Color = Color::Rgb(108, 117, 125);
    pub const CARD_SELECTED: Color = Color::Rgb(255, 214, 10);
    pub const CARD_SENDING: Color = Color::Rgb(76, 201, 240);

    // Reputation and stacks
    pub const REP_COLOR: Color = Color::Rgb(6, 214, 160);
    pub const STACK_COLOR: Color = Color::Rgb(230, 57, 70);
    pub const ICON_COLOR: Color = Color::Rgb(255, 183, 3);

    // Buttons
    pub const GIVE_COLOR: Color = Color::Rgb(6, 214, 160);
    pub const CANCEL_COLOR: Color = Color::Rgb(230, 57, 70);

    // UI elements
    pub const GOLD: Color = Color::Rgb(255, 183, 3);
    pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
    pub const BRIGHT_TEXT: Color = Color::Rgb(255, 255, 255);
    pub const MUTED_TEXT: Color = Color::Rgb(160, 160, 180);
}
