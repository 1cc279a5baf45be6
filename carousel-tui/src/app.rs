//! Application state and the terminal event loop.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use carousel_core::prelude::*;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent,
        KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::cli::Cli;
use crate::event::{EventSource, event_source_from_env};
use crate::images::SwatchImages;
use crate::render::render_tiles;

/// Frame interval while something is moving.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);
/// Poll interval while idle.
const IDLE_FRAME: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    last_column: u16,
    moved: bool,
}

/// Terminal host state around a [`Carousel`].
#[derive(Debug)]
pub struct App<P: ImageProvider = SwatchImages> {
    carousel: Carousel<P>,
    viewport: Rect,
    drag: Option<DragState>,
    message: Option<StatusMessage>,
    animating: bool,
    quit: bool,
}

impl<P: ImageProvider> App<P> {
    pub fn new(carousel: Carousel<P>) -> Self {
        Self {
            carousel,
            viewport: Rect::default(),
            drag: None,
            message: None,
            animating: false,
            quit: false,
        }
    }

    pub fn carousel(&self) -> &Carousel<P> {
        &self.carousel
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Area the carousel occupied during the last draw.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// How long the loop may wait for input before the next frame is due.
    pub fn poll_interval(&self) -> Duration {
        if self.animating || self.carousel.surface().is_dragging() {
            ANIMATION_FRAME
        } else {
            IDLE_FRAME
        }
    }

    fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    fn record_tap(&mut self, outcome: TapOutcome) {
        match outcome {
            TapOutcome::PrimaryAction(item) => {
                self.set_message(
                    MessageKind::Action,
                    format!("Primary action: {}", item.title()),
                );
            }
            TapOutcome::Recentering { item, .. } => {
                self.set_message(
                    MessageKind::Info,
                    format!("Selected {}", item.title()),
                );
            }
        }
    }

    /// Apply one input event. Returns true when the app should exit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Picked up by the next draw.
            Event::Resize(_, _) => {}
            _ => {}
        }
        self.quit
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.carousel.update(CarouselMessage::SelectPrevious);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.carousel.update(CarouselMessage::SelectNext);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.tap_centered(),
            KeyCode::Char('r') => {
                let next = match self.carousel.config().size_class {
                    SizeClass::Compact => SizeClass::Regular,
                    SizeClass::Regular => SizeClass::Compact,
                };
                self.carousel
                    .update(CarouselMessage::SizeClassChanged(next));
                self.set_message(MessageKind::Info, format!("{next:?} layout"));
            }
            _ => {}
        }
    }

    /// Tap whatever sits closest to the center, exactly as a click on it
    /// would.
    fn tap_centered(&mut self) {
        let Some(item) = self.carousel.centered_item().cloned() else {
            return;
        };
        let Some(frame) = self.carousel.surface().frame_of(item.id()) else {
            return;
        };
        let outcome = self.carousel.update(CarouselMessage::Tap { item, frame });
        if let Some(outcome) = outcome {
            self.record_tap(outcome);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.contains(mouse.column, mouse.row) {
                    self.drag = Some(DragState {
                        last_column: mouse.column,
                        moved: false,
                    });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(drag) = self.drag.as_mut() else {
                    return;
                };
                let dx = f32::from(mouse.column) - f32::from(drag.last_column);
                if dx == 0.0 {
                    return;
                }
                let first_move = !drag.moved;
                drag.last_column = mouse.column;
                drag.moved = true;
                if first_move {
                    self.carousel.update(CarouselMessage::DragStarted);
                }
                self.carousel.update(CarouselMessage::DraggedBy(dx));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                if drag.moved {
                    self.carousel.update(CarouselMessage::DragEnded);
                    return;
                }
                if !self.contains(mouse.column, mouse.row) {
                    return;
                }
                // Cell centers, in carousel units.
                let x = f32::from(mouse.column - self.viewport.x) + 0.5;
                let y = f32::from(mouse.row - self.viewport.y) + 0.5;
                if let Some(outcome) =
                    self.carousel.update(CarouselMessage::TapAt { x, y })
                {
                    self.record_tap(outcome);
                }
            }
            _ => {}
        }
    }

    fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.viewport.x
            && column < self.viewport.right()
            && row >= self.viewport.y
            && row < self.viewport.bottom()
    }

    /// Lay out and draw one frame at `now`.
    pub fn draw(&mut self, f: &mut ratatui::Frame, now: Instant) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Min(3),
                    Constraint::Length(3),
                ]
                .as_ref(),
            )
            .split(f.size());
        let (header, body, footer) = (rows[0], rows[1], rows[2]);

        self.viewport = body;
        self.carousel.update(CarouselMessage::Resized {
            width: f32::from(body.width),
            height: f32::from(body.height),
        });
        let tiles = self.carousel.frame(now);
        self.animating = self.carousel.surface().is_animating();

        let selected = self
            .carousel
            .selected()
            .map_or("none".to_string(), |item| item.title().to_string());
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Videos",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   selected: {selected}")),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(title, header);

        render_tiles(f, body, &tiles);

        let status = match &self.message {
            Some(message) => {
                let color = match message.kind {
                    MessageKind::Info => Color::Cyan,
                    MessageKind::Action => Color::Green,
                };
                Line::from(Span::styled(
                    message.text.clone(),
                    Style::default().fg(color),
                ))
            }
            None => Line::from(Span::styled(
                "←/→ select · Enter play · r layout · q quit",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(
            Paragraph::new(status).block(Block::default().borders(Borders::TOP)),
            footer,
        );
    }
}

/// Drive `app` until it quits, drawing before every input poll.
pub fn run_app<B: Backend, P: ImageProvider>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
    source: &mut dyn EventSource,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f, Instant::now()))?;

        if let Some(ev) = source.next(app.poll_interval())?
            && app.handle_event(ev)
        {
            log::debug!("carousel: quit requested");
            return Ok(());
        }
    }
}

/// Entry point of the `carousel` binary once logging is set up.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli
        .runtime_config()
        .resolve(cli.size_class())
        .context("invalid carousel options")?;
    let carousel = Carousel::new(config, video_seed(), SwatchImages::default())
        .context("build carousel")?;
    let mut app = App::new(carousel);

    let mut source = event_source_from_env()?;
    let scripted = source.is_scripted();

    let mut stdout = io::stdout();
    if !scripted {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut *source);

    if !scripted {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ScriptEventSource;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> [Event; 2] {
        let at = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        [
            at(MouseEventKind::Down(MouseButton::Left)),
            at(MouseEventKind::Up(MouseButton::Left)),
        ]
    }

    fn app() -> App<SwatchImages> {
        let carousel = Carousel::new(
            CarouselConfig::default(),
            video_seed(),
            SwatchImages::with_latency(1),
        )
        .unwrap();
        App::new(carousel)
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(90, 16)).unwrap()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App, now: Instant) {
        terminal.draw(|f| app.draw(f, now)).unwrap();
    }

    #[test]
    fn first_frame_shows_the_first_item_centered() {
        let mut app = app();
        let mut terminal = terminal();
        draw(&mut terminal, &mut app, Instant::now());

        assert_eq!(app.viewport(), Rect::new(0, 3, 90, 10));
        assert_eq!(app.carousel().surface().centered_index(), Some(0));
        assert!(screen(&terminal).contains("▶ 1"));
    }

    #[test]
    fn enter_on_the_centered_tile_runs_the_primary_action() {
        let mut app = app();
        let mut terminal = terminal();
        draw(&mut terminal, &mut app, Instant::now());

        app.handle_event(key(KeyCode::Enter));
        assert_eq!(
            app.message().map(|m| m.text.as_str()),
            Some("Primary action: 1")
        );
        draw(&mut terminal, &mut app, Instant::now());
        assert!(screen(&terminal).contains("Primary action: 1"));
    }

    #[test]
    fn clicking_a_side_tile_recenters_it() {
        let mut app = app();
        let mut terminal = terminal();
        let t0 = Instant::now();
        draw(&mut terminal, &mut app, t0);

        // Item 1 occupies roughly columns 60..89 while item 0 is centered.
        for ev in click(75, 8) {
            app.handle_event(ev);
        }
        assert_eq!(
            app.carousel().selected().map(CarouselItem::title),
            Some("2")
        );

        draw(&mut terminal, &mut app, t0);
        draw(&mut terminal, &mut app, t0 + Duration::from_secs(1));
        assert_eq!(app.carousel().surface().centered_index(), Some(1));
        assert!(screen(&terminal).contains("▶ 2"));
    }

    #[test]
    fn arrows_walk_the_row() {
        let mut app = app();
        let mut terminal = terminal();
        let t0 = Instant::now();
        draw(&mut terminal, &mut app, t0);

        for step in 1..=3u64 {
            app.handle_event(key(KeyCode::Right));
            let at = t0 + Duration::from_secs(step);
            draw(&mut terminal, &mut app, at);
            draw(&mut terminal, &mut app, at + Duration::from_millis(500));
        }
        assert_eq!(app.carousel().surface().centered_index(), Some(3));

        app.handle_event(key(KeyCode::Left));
        let at = t0 + Duration::from_secs(10);
        draw(&mut terminal, &mut app, at);
        draw(&mut terminal, &mut app, at + Duration::from_millis(500));
        assert_eq!(app.carousel().surface().centered_index(), Some(2));
    }

    #[test]
    fn dragging_left_snaps_to_the_next_item() {
        let mut app = app();
        let mut terminal = terminal();
        let t0 = Instant::now();
        draw(&mut terminal, &mut app, t0);

        let at = |kind, column| {
            Event::Mouse(MouseEvent {
                kind,
                column,
                row: 8,
                modifiers: KeyModifiers::NONE,
            })
        };
        app.handle_event(at(MouseEventKind::Down(MouseButton::Left), 60));
        app.handle_event(at(MouseEventKind::Drag(MouseButton::Left), 40));
        assert!(app.carousel().surface().is_dragging());
        app.handle_event(at(MouseEventKind::Up(MouseButton::Left), 40));
        assert!(app.carousel().selected().is_none());

        draw(&mut terminal, &mut app, t0);
        draw(&mut terminal, &mut app, t0 + Duration::from_secs(1));
        assert_eq!(app.carousel().surface().centered_index(), Some(1));
    }

    #[test]
    fn r_toggles_the_wide_layout() {
        let mut app = app();
        let mut terminal = terminal();
        draw(&mut terminal, &mut app, Instant::now());
        let compact = app.carousel().surface().metrics().item_width;

        app.handle_event(key(KeyCode::Char('r')));
        draw(&mut terminal, &mut app, Instant::now());
        assert!(app.carousel().surface().metrics().item_width < compact);
        assert_eq!(app.carousel().config().size_class, SizeClass::Regular);
    }

    #[test]
    fn scripted_session_runs_to_completion() {
        let mut source =
            ScriptEventSource::parse("right\nwait:400\nenter\nq\n").unwrap();
        let mut app = app();
        let mut terminal = terminal();

        run_app(&mut terminal, &mut app, &mut source).unwrap();
        assert!(app.should_quit());
        assert_eq!(
            app.message().map(|m| m.text.as_str()),
            Some("Primary action: 2")
        );
    }
}
