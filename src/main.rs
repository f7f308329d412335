#![warn(clippy::all, clippy::pedantic)]

use std::fs::OpenOptions;
use std::io;
use std::os::fd::AsRawFd;
use std::thread;

use anyhow::Context;
use blockfall::app::{App, AppResult};
use blockfall::config::{Config, LoggingConfig, loader};
use blockfall::input::{self, GameEvent};
use blockfall::ui::{self, Scene};
use crossbeam_channel::Sender;
use crossterm::{
    event::{
        self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{error, info, warn};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    let (config, config_error) = match loader::load_config_from_file() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config.logging)?;
    info!("Starting blockfall");

    if let Some(e) = config_error {
        error!("Failed to load configuration, using defaults: {e}");
    } else {
        info!("Configuration loaded successfully");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Key release events are needed to cancel key repeat
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        warn!("Terminal does not report key releases, using terminal key repeat");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &config, release_events);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }
    info!("Exiting blockfall");

    res
}

// The TUI owns stdout, so stderr is pointed at the log file before the logger starts
fn init_logging(logging: &LoggingConfig) -> AppResult<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&logging.file)
        .with_context(|| format!("failed to create log file {}", logging.file))?;

    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call; dup2 only
    // replaces the process's stderr descriptor
    if unsafe { libc::dup2(log_file_fd, stderr_fd) } == -1 {
        return Err(io::Error::last_os_error()).context("failed to redirect stderr");
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&logging.level))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    Ok(())
}

fn spawn_input_thread(sender: Sender<GameEvent>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            loop {
                let event = match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        error!("Failed to read terminal event: {e}");
                        let _ = sender.send(GameEvent::Quit);
                        return;
                    }
                };
                if let Some(game_event) = input::translate(&event) {
                    if sender.send(game_event).is_err() {
                        return;
                    }
                }
            }
        })
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    release_events: bool,
) -> AppResult<()> {
    let mut app = App::new(config)?;
    app.set_key_repeat(release_events);

    let mut scene = Scene::with_keys(&config.keys);
    app.present(&mut scene);
    terminal.draw(|f| ui::render(f, &scene))?;

    // The input thread blocks in `event::read` and is torn down with the process
    let _input = spawn_input_thread(app.sender())?;

    while !app.should_quit {
        if app.step(&mut scene) > 0 {
            terminal.draw(|f| ui::render(f, &scene))?;
        }
    }

    Ok(())
}
