//! Input sources for the terminal loop.

use std::{
    fs::File,
    io::Write,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};

/// Environment variable naming a script file to replay instead of reading
/// the terminal.
pub const SCRIPT_ENV: &str = "CAROUSEL_TUI_SCRIPT";
/// Optional file receiving every replayed event.
pub const TRACE_ENV: &str = "CAROUSEL_TUI_TRACE";

/// Source of input events so tests can drive the TUI without a real tty.
pub trait EventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>>;
    fn is_scripted(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptStep {
    Event(Event),
    Wait(Duration),
}

/// Scripted event source driven by a line-oriented DSL:
///   left|right|h|l|enter|space|r|q
///   click:<col>,<row>
///   drag:<col>,<row>,<dx>
///   resize:<cols>,<rows>
///   wait:<ms>
/// Lines beginning with # are ignored. Blank lines are skipped.
/// When events are exhausted, we fail fast to avoid hangs.
#[derive(Debug)]
pub struct ScriptEventSource {
    steps: Vec<ScriptStep>,
    cursor: usize,
    exhausted_at: Option<Instant>,
    trace: Option<File>,
}

impl ScriptEventSource {
    pub fn from_path(path: PathBuf, trace_path: Option<PathBuf>) -> Result<Self> {
        let contents =
            std::fs::read_to_string(&path).context("read scripted TUI input")?;
        let mut source = Self::parse(&contents)?;
        source.trace = trace_path
            .map(|p| File::create(p).context("create tui trace file"))
            .transpose()?;
        Ok(source)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut push_key = |code: KeyCode| {
                steps.push(ScriptStep::Event(Event::Key(KeyEvent {
                    code,
                    modifiers: KeyModifiers::NONE,
                    kind: KeyEventKind::Press,
                    state: KeyEventState::NONE,
                })));
            };

            match line {
                "left" | "h" => push_key(KeyCode::Left),
                "right" | "l" => push_key(KeyCode::Right),
                "enter" => push_key(KeyCode::Enter),
                "space" => push_key(KeyCode::Char(' ')),
                "r" => push_key(KeyCode::Char('r')),
                "q" | "quit" => push_key(KeyCode::Char('q')),
                _ => {
                    let bad = || {
                        anyhow!(
                            "unrecognized TUI script token at line {}: {}",
                            idx + 1,
                            line
                        )
                    };
                    let (verb, args) = line.split_once(':').ok_or_else(bad)?;
                    let numbers: Vec<i32> = args
                        .split(',')
                        .map(|n| n.trim().parse::<i32>())
                        .collect::<Result<_, _>>()
                        .map_err(|_| bad())?;
                    match (verb, numbers.as_slice()) {
                        ("click", &[col, row]) => {
                            let (col, row) = (to_cell(col), to_cell(row));
                            steps.push(mouse(MouseEventKind::Down(MouseButton::Left), col, row));
                            steps.push(mouse(MouseEventKind::Up(MouseButton::Left), col, row));
                        }
                        ("drag", &[col, row, dx]) => {
                            let (start, row) = (to_cell(col), to_cell(row));
                            let end = to_cell(col + dx);
                            steps.push(mouse(MouseEventKind::Down(MouseButton::Left), start, row));
                            steps.push(mouse(MouseEventKind::Drag(MouseButton::Left), end, row));
                            steps.push(mouse(MouseEventKind::Up(MouseButton::Left), end, row));
                        }
                        ("resize", &[cols, rows]) => {
                            steps.push(ScriptStep::Event(Event::Resize(to_cell(cols), to_cell(rows))));
                        }
                        ("wait", &[ms]) => {
                            steps.push(ScriptStep::Wait(Duration::from_millis(ms.max(0) as u64)));
                        }
                        _ => return Err(bad()),
                    }
                }
            }
        }

        Ok(Self {
            steps,
            cursor: 0,
            exhausted_at: None,
            trace: None,
        })
    }

    pub fn remaining(&self) -> usize {
        self.steps.len().saturating_sub(self.cursor)
    }
}

fn to_cell(n: i32) -> u16 {
    n.clamp(0, i32::from(u16::MAX)) as u16
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> ScriptStep {
    ScriptStep::Event(Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }))
}

impl EventSource for ScriptEventSource {
    fn next(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        let Some(step) = self.steps.get(self.cursor).cloned() else {
            // Allow a short grace period before failing to avoid tight loop.
            match self.exhausted_at {
                Some(ea) => {
                    if ea.elapsed() > Duration::from_secs(1) {
                        return Err(anyhow!(
                            "scripted TUI input exhausted before the carousel quit"
                        ));
                    }
                }
                None => self.exhausted_at = Some(Instant::now()),
            }
            std::thread::sleep(Duration::from_millis(25));
            return Ok(None);
        };
        self.cursor += 1;

        match step {
            ScriptStep::Wait(duration) => {
                std::thread::sleep(duration);
                Ok(None)
            }
            ScriptStep::Event(ev) => {
                if let Some(trace) = self.trace.as_mut() {
                    let _ = writeln!(trace, "{:?}", ev);
                }
                Ok(Some(ev))
            }
        }
    }

    fn is_scripted(&self) -> bool {
        true
    }
}

pub fn event_source_from_env() -> Result<Box<dyn EventSource>> {
    if let Ok(path) = std::env::var(SCRIPT_ENV) {
        let trace = std::env::var(TRACE_ENV).ok();
        let src = ScriptEventSource::from_path(
            PathBuf::from(path),
            trace.map(PathBuf::from),
        )?;
        Ok(Box::new(src))
    } else {
        Ok(Box::new(CrosstermEventSource))
    }
}
