use ratatui::style::Color;
use tachyonfx::fx;
use tachyonfx::{Effect, EffectManager, Interpolation, Motion};

/// Keyed effect manager; one running effect per key
pub type FxManager = EffectManager<&'static str>;

pub const TRANSITION: &str = "transition";
pub const LOADING_PULSE: &str = "loading_pulse";
pub const GIVE_FLASH: &str = "give_flash";

const DARK: Color = Color::Rgb(13, 17, 23);

/// Dealer sweeps in from the left when the host opens it
pub fn surface_open() -> Effect {
    fx::sweep_in(
        Motion::LeftToRight,
        8,
        2,
        DARK,
        (400, Interpolation::CubicOut),
    )
}

/// The world view materializes again after the dealer closes
pub fn world_return() -> Effect {
    fx::coalesce((450, Interpolation::CubicOut))
}

/// Slow dim/brighten while the host is working
pub fn loading_pulse() -> Effect {
    let shift = fx::hsl_shift_fg([0.0, -0.2, -0.2], (700, Interpolation::SineInOut));
    fx::repeating(fx::ping_pong(shift))
}

/// Quick teal flash when a give is confirmed
pub fn give_flash() -> Effect {
    let teal = Color::Rgb(6, 214, 160);
    let to = fx::fade_to_fg(teal, (150, Interpolation::QuadOut));
    let back = fx::fade_from_fg(teal, (450, Interpolation::QuadIn));
    fx::sequence(&[to, back])
}
