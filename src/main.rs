pub mod event_log;
pub mod pattern;
pub mod runtime;
pub mod scene;
pub mod session;
pub mod trail;
pub mod ui;
pub mod util;

use crate::{
    pattern::GazePattern,
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner, SharedTicker, Ticker},
    session::{
        Nudge, Session, MONITORS_DEFAULT, MONITORS_MAX, MONITORS_MIN, SPEED_DEFAULT_MS,
        SPEED_MAX_MS, SPEED_MIN_MS, SPEED_STEP_MS,
    },
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Instant,
};

const AIM_STEP: f64 = 0.05;

/// animated gaze-tracking dashboard for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "An animated dashboard that sweeps a simulated gaze point across a grid of virtual monitors, with live-adjustable movement patterns, tick speed and monitor count."
)]
pub struct Cli {
    /// tick interval in milliseconds
    #[clap(short = 's', long, value_parser = clap::value_parser!(u64).range(SPEED_MIN_MS..=SPEED_MAX_MS), default_value_t = SPEED_DEFAULT_MS)]
    speed: u64,

    /// number of virtual monitors in the grid
    #[clap(short = 'm', long, value_parser = clap::value_parser!(u8).range(i64::from(MONITORS_MIN)..=i64::from(MONITORS_MAX)), default_value_t = MONITORS_DEFAULT)]
    monitors: u8,

    /// gaze movement pattern
    #[clap(short = 'p', long, value_enum, default_value_t = GazePattern::Mouse)]
    pattern: GazePattern,

    /// begin simulating immediately instead of waiting for 's'
    #[clap(long)]
    autostart: bool,
}

/// Ties the simulation session to the wall clock the TUI runs on.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub epoch: Instant,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let mut session = Session::new(cli.speed, cli.monitors, cli.pattern);
        if cli.autostart {
            session.start();
        }

        Self {
            session,
            epoch: Instant::now(),
        }
    }

    /// Seconds since the app came up; drives every simulation tick.
    pub fn now_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli);
    let ticker = SharedTicker::new(app.session.speed_ms);
    let runner = Runner::new(CrosstermEventSource::new(), ticker.clone());
    start_tui(&mut terminal, &mut app, &runner, &ticker)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
    ticker: &SharedTicker,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            AppEvent::Tick => {
                app.session.tick(app.now_secs());
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if handle_key(&mut app.session, key) == KeyOutcome::Quit {
                    break;
                }
                // keep the tick interval in step with the chosen speed
                ticker.set_interval_ms(app.session.speed_ms);
            }
        }
    }

    Ok(())
}

fn handle_key(session: &mut Session, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
    // ctrl+c to quit
    {
        return KeyOutcome::Quit;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('s') => session.start(),
        KeyCode::Char('p') => session.pause(),
        KeyCode::Char('x') => session.stop(),
        KeyCode::Char('r') => session.reset(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            session.set_speed(session.speed_ms + SPEED_STEP_MS)
        }
        KeyCode::Char('-') => session.set_speed(session.speed_ms.saturating_sub(SPEED_STEP_MS)),
        KeyCode::Char(']') => session.set_monitor_count(session.monitor_count + 1),
        KeyCode::Char('[') => session.set_monitor_count(session.monitor_count.saturating_sub(1)),
        KeyCode::Tab => session.set_pattern(session.pattern.cycled()),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(pattern) = GazePattern::from_digit(c) {
                session.set_pattern(pattern);
            }
        }
        KeyCode::Left => match session.pattern {
            GazePattern::Mouse => session.set_mouse_target(session.mouse_target_x - AIM_STEP),
            GazePattern::Keyboard => session.nudge_keyboard(Nudge::Left),
            _ => {}
        },
        KeyCode::Right => match session.pattern {
            GazePattern::Mouse => session.set_mouse_target(session.mouse_target_x + AIM_STEP),
            GazePattern::Keyboard => session.nudge_keyboard(Nudge::Right),
            _ => {}
        },
        KeyCode::Up => {
            if session.pattern == GazePattern::Mouse {
                session.set_mouse_y(session.mouse_y - AIM_STEP);
            }
        }
        KeyCode::Down => {
            if session.pattern == GazePattern::Mouse {
                session.set_mouse_y(session.mouse_y + AIM_STEP);
            }
        }
        _ => {}
    }

    KeyOutcome::Continue
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
