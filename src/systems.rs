#![warn(clippy::all, clippy::pedantic)]

use std::iter;
use std::time::Duration;

use log::{debug, info, trace};

use crate::app::{GameSession, MovementSpeed};
use crate::components::{Grid, Position, Rotation, Tile, TileColor};
use crate::error::{EngineError, EngineResult};
use crate::game::{
    LEVEL_SPEEDUP, MIN_FALL_INTERVAL_MS, SOUNDTRACKS_AMOUNT, STARTING_LEVEL, TILE_SIZE,
};
use crate::input::{Action, InputEvent};
use crate::kicks::kick_offsets;
use crate::scoring::ScoreEvent;
use crate::sound::{AudioState, SoundEffect};

const VOLUME_STEP: u8 = 8;

/// What a lock did to the board and the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    pub cleared_rows: Vec<usize>,
    // Cells travelled by a hard drop right before the lock
    pub dropped: u32,
    pub score_delta: i64,
    pub combo: u32,
    pub game_over: bool,
}

/// Result of feeding an action to the active piece. Only `Locked` changes
/// anything beyond the piece itself; `Blocked`, `Ignored` and `Rejected` leave
/// the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved,
    Rotated,
    Held,
    Blocked,
    Ignored,
    Rejected,
    Locked(LockReport),
}

/// Gravity interval at `level`, 15% faster per level with a floor.
#[must_use]
pub fn level_fall_interval(base: Duration, level: u32) -> Duration {
    let steps = i32::try_from(level.saturating_sub(STARTING_LEVEL)).unwrap_or(i32::MAX);
    let floor = Duration::from_millis(MIN_FALL_INTERVAL_MS).min(base);
    base.mul_f64(LEVEL_SPEEDUP.powi(steps)).max(floor)
}

#[must_use]
pub fn spawn_position(grid: &Grid) -> Position {
    let width = i32::try_from(grid.width()).unwrap_or(i32::MAX);
    let box_size = i32::try_from(TILE_SIZE).unwrap_or(4);
    Position {
        x: (width - box_size) / 2,
        y: 0,
    }
}

/// Rows `tile` can still fall before it rests on something.
#[must_use]
pub fn drop_distance(grid: &Grid, tile: &Tile) -> u32 {
    let mut distance = 0;
    while grid.can_place(
        tile.shape,
        tile.rotation,
        tile.position.offset(0, i32::try_from(distance + 1).unwrap_or(i32::MAX)),
    ) {
        distance += 1;
    }
    distance
}

/// The active tile moved to where it would land, for the renderer.
#[must_use]
pub fn ghost_of(session: &GameSession) -> Option<Tile> {
    let tile = session.current?;
    let distance = drop_distance(&session.grid, &tile);
    Some(Tile {
        color: TileColor::Ghost,
        position: tile.position.offset(0, i32::try_from(distance).unwrap_or(i32::MAX)),
        ..tile
    })
}

/// Tops the queue up to the configured lookahead.
pub fn refill_queue(session: &mut GameSession) -> EngineResult<()> {
    while session.queue.len() < session.settings.lookahead {
        let tile = session.generator.next_tile();
        session.queue.enqueue(tile)?;
    }
    Ok(())
}

fn next_from_queue(session: &mut GameSession) -> EngineResult<Tile> {
    match session.queue.dequeue() {
        Ok(tile) => Ok(tile),
        // Only reachable with a zero lookahead
        Err(EngineError::Empty) => Ok(session.generator.next_tile()),
        Err(e) => Err(e),
    }
}

fn at_spawn(grid: &Grid, tile: Tile) -> Tile {
    Tile {
        rotation: Rotation::SPAWN,
        position: spawn_position(grid),
        ..tile
    }
}

// Puts `tile` at the spawn point. A blocked spawn ends the game.
fn activate(session: &mut GameSession, tile: Tile) -> bool {
    let tile = at_spawn(&session.grid, tile);

    if session.grid.can_place_tile(&tile) {
        debug!("Spawned {tile}");
        session.current = Some(tile);
        true
    } else {
        info!("Spawn blocked, game over with score {}", session.state.score);
        session.current = None;
        session.game_over = true;
        session.flags.playing = false;
        false
    }
}

/// Activates the next queued tile. Returns false when the spawn is blocked.
pub fn spawn_tile(session: &mut GameSession) -> EngineResult<bool> {
    let tile = next_from_queue(session)?;
    let spawned = activate(session, tile);
    refill_queue(session)?;
    Ok(spawned)
}

/// Fills the queue and brings the first tile into play.
pub fn start_session(session: &mut GameSession) -> EngineResult<()> {
    session.flags.playing = true;
    session.game_over = false;
    refill_queue(session)?;
    spawn_tile(session)?;
    info!(
        "Session started on a {}x{} grid",
        session.grid.width(),
        session.grid.height()
    );
    Ok(())
}

/// Discards the current game and starts a fresh one.
pub fn reset_session(session: &mut GameSession) -> EngineResult<()> {
    session.queue.flush();
    session.grid.clear();
    session.current = None;
    session.held = None;
    session.can_hold = true;
    session.state.reset();
    session.drop_timer = Duration::ZERO;
    session.flags.paused = false;
    session.flags.speed = MovementSpeed::Normal;
    start_session(session)
}

pub fn apply_action(
    session: &mut GameSession,
    action: Action,
    audio: &AudioState,
) -> EngineResult<ActionOutcome> {
    if !session.flags.accepts_gameplay() {
        return Ok(ActionOutcome::Rejected);
    }
    let Some(tile) = session.current else {
        return Ok(ActionOutcome::Rejected);
    };

    trace!("{action:?} on {tile}");
    match action {
        Action::MoveLeft => Ok(shift(session, tile, -1, SoundEffect::MoveLeft, audio)),
        Action::MoveRight => Ok(shift(session, tile, 1, SoundEffect::MoveRight, audio)),
        Action::MoveDown => step_down(session, tile, true, audio),
        Action::DropHard => hard_drop(session, tile, audio),
        Action::RotateClockwise => Ok(rotate(session, tile, true, audio)),
        Action::RotateCounterClockwise => Ok(rotate(session, tile, false, audio)),
        Action::Hold => hold(session, tile, audio),
    }
}

fn shift(
    session: &mut GameSession,
    tile: Tile,
    dx: i32,
    effect: SoundEffect,
    audio: &AudioState,
) -> ActionOutcome {
    let candidate = tile.position.offset(dx, 0);
    if !session.grid.can_place(tile.shape, tile.rotation, candidate) {
        return ActionOutcome::Blocked;
    }
    session.current = Some(Tile {
        position: candidate,
        ..tile
    });
    audio.play_effect(effect);
    ActionOutcome::Moved
}

// One row down. Player-driven steps score as soft drop; a blocked step locks.
fn step_down(
    session: &mut GameSession,
    tile: Tile,
    player_driven: bool,
    audio: &AudioState,
) -> EngineResult<ActionOutcome> {
    let candidate = tile.position.offset(0, 1);
    if !session.grid.can_place(tile.shape, tile.rotation, candidate) {
        return handle_piece_lock(session, tile, 0, audio).map(ActionOutcome::Locked);
    }

    session.current = Some(Tile {
        position: candidate,
        ..tile
    });
    if player_driven {
        let rules = session.settings.rules;
        session.state.apply(ScoreEvent::SoftDrop { cells: 1 }, &rules);
        session.drop_timer = Duration::ZERO;
        audio.play_effect(SoundEffect::MoveDown);
    }
    Ok(ActionOutcome::Moved)
}

fn hard_drop(
    session: &mut GameSession,
    tile: Tile,
    audio: &AudioState,
) -> EngineResult<ActionOutcome> {
    let distance = drop_distance(&session.grid, &tile);
    let landed = Tile {
        position: tile
            .position
            .offset(0, i32::try_from(distance).unwrap_or(i32::MAX)),
        ..tile
    };

    let rules = session.settings.rules;
    session.state.apply(ScoreEvent::HardDrop { cells: distance }, &rules);
    audio.play_effect(SoundEffect::HardDrop);
    debug!("Hard drop of {distance} rows");

    handle_piece_lock(session, landed, distance, audio).map(ActionOutcome::Locked)
}

// Square pieces have a single orientation, so rotating one does nothing at
// all (no timer reset either).
fn rotate(
    session: &mut GameSession,
    tile: Tile,
    clockwise: bool,
    audio: &AudioState,
) -> ActionOutcome {
    if tile.shape.orientations() < 4 {
        return ActionOutcome::Ignored;
    }

    let target = if clockwise {
        tile.rotation.clockwise()
    } else {
        tile.rotation.counter_clockwise()
    };

    let kicks = kick_offsets(tile.shape, tile.rotation, target);
    for &(dx, dy) in kicks.iter().chain(iter::once(&(0, 0))) {
        let candidate = tile.position.offset(dx, dy);
        if session.grid.can_place(tile.shape, target, candidate) {
            session.current = Some(Tile {
                rotation: target,
                position: candidate,
                ..tile
            });
            audio.play_effect(if clockwise {
                SoundEffect::RotateClockwise
            } else {
                SoundEffect::RotateCounterClockwise
            });
            return ActionOutcome::Rotated;
        }
    }

    ActionOutcome::Blocked
}

fn hold(session: &mut GameSession, tile: Tile, audio: &AudioState) -> EngineResult<ActionOutcome> {
    if !session.can_hold {
        return Ok(ActionOutcome::Ignored);
    }

    let stowed = Tile {
        rotation: Rotation::SPAWN,
        position: Position::default(),
        ..tile
    };

    if let Some(previous) = session.held {
        let incoming = at_spawn(&session.grid, previous);
        if !session.grid.can_place_tile(&incoming) {
            return Ok(ActionOutcome::Blocked);
        }
        session.current = Some(incoming);
        session.held = Some(stowed);
    } else {
        // First hold: the next queued tile takes over, so it has to fit first
        let upcoming = match session.queue.front() {
            Some(tile) => *tile,
            None => {
                let tile = session.generator.next_tile();
                session.queue.enqueue(tile)?;
                tile
            }
        };
        let incoming = at_spawn(&session.grid, upcoming);
        if !session.grid.can_place_tile(&incoming) {
            return Ok(ActionOutcome::Blocked);
        }
        next_from_queue(session)?;
        session.current = Some(incoming);
        session.held = Some(stowed);
        refill_queue(session)?;
    }

    session.can_hold = false;
    session.drop_timer = Duration::ZERO;
    let rules = session.settings.rules;
    session.state.apply(ScoreEvent::Hold, &rules);
    audio.play_effect(SoundEffect::Hold);
    debug!("Held {:?}", tile.shape);
    Ok(ActionOutcome::Held)
}

/// Writes `tile` into the grid, clears rows, scores, and spawns the next tile.
pub fn handle_piece_lock(
    session: &mut GameSession,
    tile: Tile,
    dropped: u32,
    audio: &AudioState,
) -> EngineResult<LockReport> {
    debug!("Locking {tile}");
    session.grid.lock(&tile);
    session.current = None;

    let cleared_rows = session.grid.clear_full_rows();
    let rules = session.settings.rules;
    let score_delta = session.state.apply(
        ScoreEvent::Lock {
            lines: cleared_rows.len(),
        },
        &rules,
    );

    audio.play_effect(SoundEffect::Lock);
    if !cleared_rows.is_empty() {
        audio.play_effect(SoundEffect::LineClear);
        info!(
            "Cleared {} lines {:?}, combo {}, score {}",
            cleared_rows.len(),
            cleared_rows,
            session.state.combo,
            session.state.score
        );
    }

    session.can_hold = true;
    session.drop_timer = Duration::ZERO;
    let spawned = spawn_tile(session)?;

    Ok(LockReport {
        cleared_rows,
        dropped,
        score_delta,
        combo: session.state.combo,
        game_over: !spawned,
    })
}

/// Advances gravity by `elapsed`. Returns the lock it caused, if any.
pub fn gravity_system(
    session: &mut GameSession,
    elapsed: Duration,
    audio: &AudioState,
) -> EngineResult<Option<LockReport>> {
    if !session.flags.accepts_gameplay() {
        return Ok(None);
    }

    session.drop_timer = session.drop_timer.saturating_add(elapsed);
    let interval = session.fall_interval().max(Duration::from_millis(1));

    while session.drop_timer >= interval {
        session.drop_timer -= interval;
        let Some(tile) = session.current else {
            return Ok(None);
        };
        trace!("Gravity step for {tile}");
        if let ActionOutcome::Locked(report) = step_down(session, tile, false, audio)? {
            return Ok(Some(report));
        }
    }

    Ok(None)
}

/// Handles one event from the input pump.
pub fn input_system(
    session: &mut GameSession,
    event: InputEvent,
    audio: &mut AudioState,
) -> EngineResult<Option<ActionOutcome>> {
    match event {
        InputEvent::Action(action) => return apply_action(session, action, audio).map(Some),
        InputEvent::TogglePause => {
            if session.flags.playing {
                session.flags.paused = !session.flags.paused;
                info!("Paused: {}", session.flags.paused);
            }
        }
        InputEvent::Quit => {
            info!("Quit requested");
            session.flags.running = false;
        }
        InputEvent::Restart => reset_session(session)?,
        InputEvent::CycleSoundtrack => {
            session.flags.soundtrack = (session.flags.soundtrack + 1) % SOUNDTRACKS_AMOUNT;
        }
        InputEvent::ToggleSpeed(speed) => {
            if session.flags.accepts_gameplay() {
                session.flags.speed = if session.flags.speed == speed {
                    MovementSpeed::Normal
                } else {
                    speed
                };
                debug!("Movement speed {:?}", session.flags.speed);
            }
        }
        InputEvent::VolumeUp => {
            let (music, effects) = (audio.music_volume(), audio.effects_volume());
            audio.set_volumes(
                music.saturating_add(VOLUME_STEP),
                effects.saturating_add(VOLUME_STEP),
            );
        }
        InputEvent::VolumeDown => {
            let (music, effects) = (audio.music_volume(), audio.effects_volume());
            audio.set_volumes(
                music.saturating_sub(VOLUME_STEP),
                effects.saturating_sub(VOLUME_STEP),
            );
        }
    }
    Ok(None)
}

/// Starts the selected soundtrack if it is not the one already playing.
pub fn sync_soundtrack(session: &mut GameSession, audio: &AudioState) {
    let selected = session.flags.soundtrack;
    if session.flags.soundtrack_now_playing != Some(selected) && audio.play_soundtrack(selected) {
        session.flags.soundtrack_now_playing = Some(selected);
    }
}
