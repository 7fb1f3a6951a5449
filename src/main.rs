#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{Sender, unbounded};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info, warn};

use tilefall::config::{Config, loader};
use tilefall::coordinator::Coordinator;
use tilefall::input::{InputEvent, Keymap};
use tilefall::sound::{AudioState, LogBackend};
use tilefall::ui::TerminalRenderer;

const INPUT_POLL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    // Create log file and redirect stderr to it
    let log_path = "tilefall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("failed to create log file {log_path}"))?;

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting tilefall");

    // Bad configuration stops us before the terminal is touched
    let config = match loader::load_config_from_file() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return Err(e).context("failed to load configuration");
        }
    };
    info!("Configuration loaded successfully");

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let res = run(&config);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }
    res
}

fn run(config: &Config) -> Result<()> {
    let renderer = TerminalRenderer::new(config.window.scaling_factor)?;

    let audio = match AudioState::new(Box::new(LogBackend)) {
        Ok(mut audio) => {
            audio.set_volumes(config.audio.soundtrack_volume, config.audio.effects_volume);
            audio
        }
        Err(e) => {
            warn!("Audio disabled: {e}");
            AudioState::disabled()
        }
    };

    let (sender, receiver) = unbounded();
    let coordinator = Coordinator::start(config, Box::new(renderer), audio, receiver)?;

    let pumped = pump_input(&coordinator, &config.keymap, &sender);
    coordinator.join()?;
    pumped
}

// Feeds key presses to the logic loop until the engine stops
fn pump_input(
    coordinator: &Coordinator,
    keymap: &Keymap,
    sender: &Sender<InputEvent>,
) -> Result<()> {
    while coordinator.is_running() {
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(input) = keymap.event_for(key.code) {
                if sender.send(input).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}
