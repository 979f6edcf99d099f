mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use countdown::{
    logging,
    preset::Preset,
    runtime::{CrosstermEventSource, Runner, TimerEvent, TimerEventSource},
    session_log::SessionLog,
    timer::TimerEngine,
};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Instant,
};

/// countdown timer tui with fixed presets and a session log
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A single-screen countdown timer. Pick one of six presets (3, 5, 10, 15, 25, 30 minutes), start, pause and reset it, and keep a log of the last 20 sessions for as long as the program runs."
)]
pub struct Cli {
    /// preset to load at startup, e.g. "10" or "25 min"; anything else loads 5 minutes
    #[clap(short = 'p', long, default_value = "5")]
    preset: String,

    /// file that receives diagnostic logs (filter with COUNTDOWN_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// write the session log to stdout on exit
    #[clap(long, value_enum)]
    print_log: Option<LogFormat>,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub engine: TimerEngine,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let mut engine = TimerEngine::new();
        engine.select_preset_label(&cli.preset);
        Self { engine }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.engine.select_preset(Preset::ALL[idx]);
            }
            KeyCode::Char('s') => {
                self.engine.start();
            }
            KeyCode::Char('p') => {
                self.engine.pause();
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.engine.toggle(),
            KeyCode::Char('r') => self.engine.reset(),
            _ => {}
        }
        Flow::Continue
    }

    /// Apply whatever ticks are due at `now`
    pub fn on_tick(&mut self, now: Instant) {
        self.engine.poll(now);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = logging::resolve_path(cli.log_file.clone()).and_then(|path| {
        logging::init(&path)
            .map_err(|err| eprintln!("logging disabled: {}: {}", path.display(), err))
            .ok()
    });

    let mut app = App::new(&cli);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let outcome = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &outcome {
        tracing::error!(%err, "event loop failed");
    }
    outcome?;

    if let Some(format) = cli.print_log {
        print_session_log(app.engine.log(), format, &mut io::stdout().lock())?;
    }
    tracing::info!(sessions = app.engine.log().len(), "exiting");

    Ok(())
}

fn start_tui<B: Backend, E: TimerEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step(app.engine.time_until_tick(Instant::now())) {
            TimerEvent::Tick => app.on_tick(Instant::now()),
            TimerEvent::Resize => {}
            TimerEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Oldest first, so the most recent session ends up next to the prompt
fn print_session_log<W: Write>(
    log: &SessionLog,
    format: LogFormat,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    match format {
        LogFormat::Text => {
            for entry in log.entries().rev() {
                writeln!(out, "{}", entry)?;
            }
        }
        LogFormat::Json => {
            let entries: Vec<_> = log.entries().rev().collect();
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
