use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use repdealer_core::Surface;
use repdealer_widgets::theme::Theme;

use crate::app::ScreenAction;
use crate::demo::INTERACT_KEY;
use crate::screens::Screen;

/// What the player sees while the dealer is closed
pub struct IdleScreen {
    pub host_name: String,
    last_key: Option<char>,
}

impl IdleScreen {
    pub fn new(host_name: String) -> Self {
        Self {
            host_name,
            last_key: None,
        }
    }
}

impl Screen for IdleScreen {
    fn render(&mut self, frame: &mut Frame, _surface: &Surface, _tick: u64) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

        let chunks = Layout::vertical([
            Constraint::Percentage(35),
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        let walked = match self.last_key {
            Some(c) => format!("You pressed '{}'. The street carries on.", c),
            None => "The corner is quiet.".to_string(),
        };
        let lines = vec![
            Line::from(Span::styled(
                "~ Grove Street, late ~",
                Style::default()
                    .fg(Theme::GOLD)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(walked, Style::default().fg(Theme::MUTED_TEXT))),
            Line::from(""),
            Line::from(Span::styled(
                format!("host: {}", self.host_name),
                Style::default().fg(Theme::DIM_TEXT),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled(INTERACT_KEY.to_string(), Style::default().fg(Theme::GOLD)),
            Span::styled("] Talk to the dealer  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("q", Style::default().fg(Theme::GOLD)),
            Span::styled("] Quit", Style::default().fg(Theme::DIM_TEXT)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }

    fn handle_key(&mut self, key: KeyEvent, _surface: &Surface) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Char('q') => Some(ScreenAction::Quit),
            KeyCode::Char(c) => {
                self.last_key = Some(c);
                Some(ScreenAction::Environment(c))
            }
            _ => None,
        }
    }
}
