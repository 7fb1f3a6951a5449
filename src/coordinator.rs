#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, error, info, warn};

use crate::app::{GameSession, SessionSettings};
use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::game::CLOCK_RESOLUTION_US;
use crate::input::InputEvent;
use crate::render::{Renderer, Snapshot};
use crate::sound::AudioState;
use crate::spawner::RandomGenerator;
use crate::systems::{gravity_system, input_system, start_session, sync_soundtrack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    Stop,
}

/// Keep-running flag for one loop, separate from the gameplay lock so that
/// shutdown never has to wait on it.
#[derive(Debug)]
pub struct LoopControl {
    name: &'static str,
    status: Mutex<LoopStatus>,
    wake: Condvar,
}

impl LoopControl {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            status: Mutex::new(LoopStatus::Continue),
            wake: Condvar::new(),
        }
    }

    #[must_use]
    pub fn keep_running(&self) -> bool {
        self.status
            .lock()
            .is_ok_and(|status| *status == LoopStatus::Continue)
    }

    /// Sleeps for up to `timeout`, returning early on stop.
    pub fn wait(&self, timeout: Duration) -> EngineResult<LoopStatus> {
        let status = self
            .status
            .lock()
            .map_err(|_| EngineError::LockFailure(self.name))?;
        let (status, _) = self
            .wake
            .wait_timeout_while(status, timeout, |s| *s == LoopStatus::Continue)
            .map_err(|_| EngineError::LockFailure(self.name))?;
        Ok(*status)
    }

    pub fn stop(&self) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        *status = LoopStatus::Stop;
        self.wake.notify_all();
    }
}

/// Elapsed time published by the clock loop.
#[derive(Debug)]
pub struct ClockState {
    start: Instant,
    elapsed_us: AtomicU64,
}

impl ClockState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed_us: AtomicU64::new(0),
        }
    }

    pub fn sample(&self) {
        let micros = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.elapsed_us.store(micros, Ordering::Release);
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_us.load(Ordering::Acquire))
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

/// Loop cadences, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTimings {
    pub frame: Duration,
    pub logic_tick: Duration,
    pub clock_resolution: Duration,
}

impl From<&Config> for LoopTimings {
    fn from(config: &Config) -> Self {
        Self {
            frame: config.timing.frame_interval(),
            logic_tick: config.timing.logic_tick(),
            clock_resolution: Duration::from_micros(CLOCK_RESOLUTION_US),
        }
    }
}

pub struct SharedState {
    pub session: RwLock<GameSession>,
    pub clock: ClockState,
    pub clock_control: LoopControl,
    pub logic_control: LoopControl,
    pub render_control: LoopControl,
}

impl SharedState {
    fn new(session: GameSession) -> Self {
        Self {
            session: RwLock::new(session),
            clock: ClockState::new(),
            clock_control: LoopControl::new("clock"),
            logic_control: LoopControl::new("logic"),
            render_control: LoopControl::new("render"),
        }
    }

    pub fn stop_all(&self) {
        self.clock_control.stop();
        self.render_control.stop();
        self.logic_control.stop();
    }
}

type LoopHandle = JoinHandle<EngineResult<()>>;

/// Owns the three engine threads and the state they share.
pub struct Coordinator {
    shared: Arc<SharedState>,
    clock: Option<LoopHandle>,
    render: Option<LoopHandle>,
    logic: Option<LoopHandle>,
}

impl Coordinator {
    /// Builds a session from `config` and starts the clock, logic and render loops.
    pub fn start(
        config: &Config,
        renderer: Box<dyn Renderer>,
        audio: AudioState,
        input: Receiver<InputEvent>,
    ) -> EngineResult<Self> {
        let settings = SessionSettings::from(config);
        let mut session = GameSession::new(settings, Box::new(RandomGenerator::new()));
        session.flags.soundtrack = config.audio.soundtrack;
        start_session(&mut session)?;
        Self::launch(session, LoopTimings::from(config), renderer, audio, input)
    }

    /// Starts the loops over an already prepared session.
    pub fn launch(
        session: GameSession,
        timings: LoopTimings,
        renderer: Box<dyn Renderer>,
        audio: AudioState,
        input: Receiver<InputEvent>,
    ) -> EngineResult<Self> {
        let mut coordinator = Self {
            shared: Arc::new(SharedState::new(session)),
            clock: None,
            render: None,
            logic: None,
        };

        let shared = Arc::clone(&coordinator.shared);
        match spawn_loop("clock", move || clock_loop(&shared, timings.clock_resolution)) {
            Ok(handle) => coordinator.clock = Some(handle),
            Err(e) => return Err(coordinator.abort(e)),
        }

        let shared = Arc::clone(&coordinator.shared);
        match spawn_loop("logic", move || {
            logic_loop(&shared, timings.logic_tick, audio, &input)
        }) {
            Ok(handle) => coordinator.logic = Some(handle),
            Err(e) => return Err(coordinator.abort(e)),
        }

        let shared = Arc::clone(&coordinator.shared);
        match spawn_loop("render", move || render_loop(&shared, timings.frame, renderer)) {
            Ok(handle) => coordinator.render = Some(handle),
            Err(e) => return Err(coordinator.abort(e)),
        }

        info!("Engine loops started");
        Ok(coordinator)
    }

    // Unwinds a partial start; the spawn error wins over anything the started loops report
    fn abort(mut self, err: io::Error) -> EngineError {
        error!("Failed to start engine thread: {err}");
        if let Err(e) = self.teardown() {
            warn!("Error while unwinding a failed start: {e}");
        }
        EngineError::SyncFailure(err)
    }

    pub fn stop(&self) {
        info!("Stopping engine loops");
        self.shared.stop_all();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.logic_control.keep_running()
    }

    #[must_use]
    pub fn shared(&self) -> &Arc<SharedState> {
        &self.shared
    }

    /// Stops every loop, waits for them and releases the session's tiles.
    /// Returns the first error any loop exited with.
    pub fn join(mut self) -> EngineResult<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> EngineResult<()> {
        self.shared.stop_all();

        let mut first_error = None;
        for (name, handle) in [
            ("clock", self.clock.take()),
            ("render", self.render.take()),
            ("logic", self.logic.take()),
        ] {
            let Some(handle) = handle else { continue };
            let result = handle.join().unwrap_or_else(|_| {
                Err(EngineError::SyncFailure(io::Error::other(format!(
                    "{name} loop panicked"
                ))))
            });
            if let Err(e) = result {
                debug!("{name} loop exited with {e}");
                first_error.get_or_insert(e);
            }
        }

        let mut session = self
            .shared
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        session.queue.flush();
        session.grid.clear();
        session.current = None;
        session.held = None;
        drop(session);
        info!("Engine stopped");

        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if self.clock.is_some() || self.render.is_some() || self.logic.is_some() {
            if let Err(e) = self.teardown() {
                error!("Engine error during shutdown: {e}");
            }
        }
    }
}

fn spawn_loop<F>(name: &str, body: F) -> io::Result<LoopHandle>
where
    F: FnOnce() -> EngineResult<()> + Send + 'static,
{
    thread::Builder::new().name(name.into()).spawn(body)
}

// Any loop failing takes the whole engine down with it
fn finish(shared: &SharedState, name: &str, result: EngineResult<()>) -> EngineResult<()> {
    if let Err(e) = &result {
        error!("{name} loop failed: {e}");
        shared.stop_all();
    } else {
        debug!("{name} loop exited");
    }
    result
}

fn clock_loop(shared: &SharedState, resolution: Duration) -> EngineResult<()> {
    finish(shared, "clock", run_clock(shared, resolution))
}

fn run_clock(shared: &SharedState, resolution: Duration) -> EngineResult<()> {
    loop {
        shared.clock.sample();
        if shared.clock_control.wait(resolution)? == LoopStatus::Stop {
            return Ok(());
        }
    }
}

fn logic_loop(
    shared: &SharedState,
    tick: Duration,
    mut audio: AudioState,
    input: &Receiver<InputEvent>,
) -> EngineResult<()> {
    let result = run_logic(shared, tick, &mut audio, input);
    audio.shutdown();
    finish(shared, "logic", result)
}

// Sole writer of the session. Input is drained in arrival order before gravity.
fn run_logic(
    shared: &SharedState,
    tick: Duration,
    audio: &mut AudioState,
    input: &Receiver<InputEvent>,
) -> EngineResult<()> {
    let mut last = shared.clock.elapsed();
    loop {
        if shared.logic_control.wait(tick)? == LoopStatus::Stop {
            return Ok(());
        }
        let now = shared.clock.elapsed();
        let delta = now.saturating_sub(last);
        last = now;

        let mut session = shared
            .session
            .write()
            .map_err(|_| EngineError::LockFailure("session"))?;
        for event in input.try_iter() {
            input_system(&mut session, event, audio)?;
        }
        gravity_system(&mut session, delta, audio)?;
        sync_soundtrack(&mut session, audio);
        let running = session.flags.running;
        drop(session);

        if !running {
            shared.stop_all();
            return Ok(());
        }
    }
}

fn render_loop(
    shared: &SharedState,
    frame: Duration,
    renderer: Box<dyn Renderer>,
) -> EngineResult<()> {
    finish(shared, "render", run_render(shared, frame, renderer))
}

fn run_render(
    shared: &SharedState,
    frame: Duration,
    mut renderer: Box<dyn Renderer>,
) -> EngineResult<()> {
    loop {
        // The read guard lives only as long as the copy
        let snapshot = {
            let session = shared
                .session
                .read()
                .map_err(|_| EngineError::LockFailure("session"))?;
            Snapshot::capture(&session)
        };
        renderer.draw(&snapshot)?;
        if shared.render_control.wait(frame)? == LoopStatus::Stop {
            return Ok(());
        }
    }
}
