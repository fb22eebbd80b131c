use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use repdealer_core::{DisplayMode, Surface};
use repdealer_widgets::action_buttons::{ActionButtonsWidget, ButtonHit};
use repdealer_widgets::grid::CardGridWidget;
use repdealer_widgets::header::HeaderWidget;
use repdealer_widgets::popup::PopupWidget;
use repdealer_widgets::preview::PreviewWidget;
use repdealer_widgets::theme::Theme;

use crate::app::ScreenAction;
use crate::screens::Screen;

const PREVIEW_WIDTH: u16 = 30;

/// The open dealer: header, card grid, preview, buttons
pub struct DealerScreen {
    grid_area: Rect,
    buttons_area: Rect,
    columns: usize,
}

impl DealerScreen {
    pub fn new() -> Self {
        Self {
            grid_area: Rect::default(),
            buttons_area: Rect::default(),
            columns: 1,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, surface: &Surface) -> Option<ScreenAction> {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return None;
        };
        let session = surface.session()?;
        let (col, row) = (mouse.column, mouse.row);

        let grid = CardGridWidget::new(session.catalog.cards()).selected(session.selection.index());
        if let Some(i) = grid.hit_test(self.grid_area, col, row) {
            return Some(ScreenAction::Select(i));
        }
        match ActionButtonsWidget::hit_test(self.buttons_area, col, row)? {
            ButtonHit::Give => Some(ScreenAction::Give),
            ButtonHit::Cancel => Some(ScreenAction::Cancel),
        }
    }
}

impl Screen for DealerScreen {
    fn render(&mut self, frame: &mut Frame, surface: &Surface, tick: u64) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

        let Some(session) = surface.session() else {
            return;
        };

        // header | gap | body | buttons | help
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(
            HeaderWidget::new(session.catalog.len(), session.catalog.stats()),
            chunks[0],
        );

        let body = Layout::horizontal([Constraint::Min(0), Constraint::Length(PREVIEW_WIDTH)])
            .split(chunks[2]);
        self.grid_area = body[0];
        self.columns = CardGridWidget::columns(body[0].width);

        match session.catalog.display_mode() {
            DisplayMode::Empty => frame.render_widget(PopupWidget::empty_catalog(), body[0]),
            DisplayMode::Cards => {
                let grid = CardGridWidget::new(session.catalog.cards())
                    .selected(session.selection.index())
                    .sending(session.request.sent_index())
                    .dimmed(session.is_loading());
                frame.render_widget(grid, body[0]);
            }
        }

        let preview = session.preview();
        frame.render_widget(PreviewWidget::new(preview.as_ref()), body[1]);

        self.buttons_area = chunks[3];
        frame.render_widget(
            ActionButtonsWidget::new(session.confirm_enabled(), session.cancel_enabled()),
            chunks[3],
        );

        let help = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("\u{2190}\u{2191}\u{2192}\u{2193}", Style::default().fg(Theme::GOLD)),
            Span::styled("/", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("1-9", Style::default().fg(Theme::GOLD)),
            Span::styled("] Pick  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("Enter", Style::default().fg(Theme::GOLD)),
            Span::styled("] Give  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("Bksp", Style::default().fg(Theme::GOLD)),
            Span::styled("] Cancel  [", Style::default().fg(Theme::DIM_TEXT)),
            Span::styled("Esc", Style::default().fg(Theme::GOLD)),
            Span::styled("] Leave", Style::default().fg(Theme::DIM_TEXT)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[4]);

        if session.is_loading() {
            frame.render_widget(PopupWidget::loading(tick), area);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, surface: &Surface) -> Option<ScreenAction> {
        let session = surface.session()?;
        match key.code {
            KeyCode::Enter => Some(ScreenAction::Give),
            KeyCode::Backspace => Some(ScreenAction::Cancel),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).map(|d| d as usize - 1)?;
                Some(ScreenAction::Select(index))
            }
            // not ours and not captured: the world still gets it
            KeyCode::Char(c) => Some(ScreenAction::Environment(c)),
            code => navigate(
                session.selection.index(),
                code,
                self.columns,
                session.catalog.len(),
            )
            .map(ScreenAction::Select),
        }
    }
}

/// Arrow-key movement through a row-major grid. `None` when the key doesn't
/// move anywhere.
pub fn navigate(
    selected: Option<usize>,
    code: KeyCode,
    columns: usize,
    len: usize,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let is_arrow = matches!(
        code,
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down
    );
    let Some(i) = selected else {
        return is_arrow.then_some(0);
    };
    let columns = columns.max(1);
    let target = match code {
        KeyCode::Left => i.checked_sub(1)?,
        KeyCode::Right => i + 1,
        KeyCode::Up => i.checked_sub(columns)?,
        KeyCode::Down => i + columns,
        _ => return None,
    };
    (target < len).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use repdealer_core::{Card, Inbound, PlayerStats};

    fn open_surface(cards: Vec<Card>) -> Surface {
        let mut surface = Surface::default();
        surface.handle_inbound(Inbound::Show {
            cards: Some(cards),
            stats: Some(PlayerStats::new(4, 70)),
        });
        surface
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_navigate_grid() {
        assert_eq!(navigate(None, KeyCode::Right, 3, 5), Some(0));
        assert_eq!(navigate(None, KeyCode::Char('x'), 3, 5), None);
        assert_eq!(navigate(Some(0), KeyCode::Right, 3, 5), Some(1));
        assert_eq!(navigate(Some(0), KeyCode::Left, 3, 5), None);
        assert_eq!(navigate(Some(1), KeyCode::Down, 3, 5), Some(4));
        assert_eq!(navigate(Some(2), KeyCode::Down, 3, 5), None);
        assert_eq!(navigate(Some(4), KeyCode::Up, 3, 5), Some(1));
        assert_eq!(navigate(Some(4), KeyCode::Right, 3, 5), None);
        assert_eq!(navigate(None, KeyCode::Down, 3, 0), None);
    }

    #[test]
    fn test_digit_keys_select() {
        let surface = open_surface(vec![Card::new("Grove Street Pass", 10)]);
        let mut screen = DealerScreen::new();
        let action = screen.handle_key(KeyEvent::from(KeyCode::Char('3')), &surface);
        assert!(matches!(action, Some(ScreenAction::Select(2))));
        let action = screen.handle_key(KeyEvent::from(KeyCode::Enter), &surface);
        assert!(matches!(action, Some(ScreenAction::Give)));
    }

    #[test]
    fn test_unhandled_chars_go_to_the_world() {
        let surface = open_surface(vec![Card::new("Grove Street Pass", 10)]);
        let mut screen = DealerScreen::new();
        let action = screen.handle_key(KeyEvent::from(KeyCode::Char('x')), &surface);
        assert!(matches!(action, Some(ScreenAction::Environment('x'))));
        let action = screen.handle_key(KeyEvent::from(KeyCode::Char('0')), &surface);
        assert!(matches!(action, Some(ScreenAction::Environment('0'))));
    }

    #[test]
    fn test_render_cards_and_totals() {
        let surface = open_surface(vec![
            Card::new("Grove Street Pass", 10),
            Card::new("Vagos Token", 25).quantity(3),
        ]);
        let mut screen = DealerScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, &surface, 0))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("REPUTATION DEALER"));
        assert!(text.contains("Total Rep: 70"));
        assert!(text.contains("Vagos Token"));
        assert!(text.contains("Give Card"));
        assert!(text.contains("Pick a card"));
    }

    #[test]
    fn test_render_empty_catalog() {
        let surface = open_surface(Vec::new());
        let mut screen = DealerScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, &surface, 0))
            .unwrap();
        assert!(screen_text(&terminal).contains("No Cards"));
    }

    #[test]
    fn test_click_selects_card() {
        let surface = open_surface(vec![
            Card::new("Grove Street Pass", 10),
            Card::new("Vagos Token", 25),
        ]);
        let mut screen = DealerScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, &surface, 0))
            .unwrap();

        let cards = surface.session().unwrap().catalog.cards();
        let rect = CardGridWidget::new(cards)
            .card_rect(screen.grid_area, 1)
            .unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x + 2,
            row: rect.y + 2,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert!(matches!(
            screen.handle_mouse(click, &surface),
            Some(ScreenAction::Select(1))
        ));
    }
}
