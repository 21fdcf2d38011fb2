/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle) and returns a brand-new
/// `GameSession`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::{
    GameConfig, HighScorePolicy, CAMERA_SPEED, DRONE_INITIAL_SPAWN_CHANCE, DRONE_LIFETIME_MS,
    DRONE_MIN_SEPARATION, DRONE_PLACEMENT_TRIES, DRONE_RAMP_INTERVAL_MS, DRONE_SPAWN_ATTEMPT_MS,
    DRONE_SPAWN_OFFSET, DRONE_VELOCITY_X, DRONE_Y_MAX, DRONE_Y_MIN, MAX_DRONES, PARALLAX_FACTORS,
    PIPE_CENTER_MAX, PIPE_CENTER_MIN, PIPE_GAP, PIPE_PRUNE_MARGIN, PIPE_SEGMENT_SIZE,
    PIPE_SPAWN_INTERVAL_MS, PIPE_SPAWN_OFFSET, PLAYER_BODY_H, PLAYER_BODY_W, PLAYER_LEFT_MARGIN,
    PLAYER_SPEED_LEFT, PLAYER_SPEED_RIGHT, PLAYER_SPEED_VERTICAL, PLAYER_START_X,
    PLAYER_START_Y, WORLD_WIDTH,
};
use crate::entities::{
    Camera, Drone, Facing, GameSession, GameStatus, InputState, ParallaxLayer, PipePair,
    PipeSegment, Player, SegmentKind,
};
use crate::schedule::{Scheduler, TimerEvent};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session: player at the start position, no obstacles, the
/// three periodic timers armed.
pub fn init_session(config: GameConfig, high_score: u32) -> GameSession {
    let mut scheduler = Scheduler::new();
    scheduler.every(PIPE_SPAWN_INTERVAL_MS, TimerEvent::SpawnPipes);
    scheduler.every(DRONE_RAMP_INTERVAL_MS, TimerEvent::RampDifficulty);
    scheduler.every(DRONE_SPAWN_ATTEMPT_MS, TimerEvent::DroneSpawnAttempt);

    GameSession {
        config,
        status: GameStatus::Running,
        camera: Camera {
            scroll_x: 0.0,
            width: config.view_width,
            height: config.view_height,
        },
        layers: PARALLAX_FACTORS
            .iter()
            .map(|&speed_factor| ParallaxLayer {
                speed_factor,
                offset: 0.0,
            })
            .collect(),
        player: Player {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            vx: 0.0,
            vy: 0.0,
            facing: Facing::Right,
            tinted: false,
        },
        pipe_pairs: Vec::new(),
        drones: Vec::new(),
        next_drone_id: 0,
        last_drone_y: 0.0,
        drone_spawn_chance: DRONE_INITIAL_SPAWN_CHANCE,
        score: 0,
        high_score,
        scheduler,
        frame: 0,
    }
}

/// Throw the finished session away and start a new one.
///
/// Only a crashed session can be restarted; a running one is returned as is.
pub fn restart(state: &GameSession) -> GameSession {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    let high_score = match state.config.high_score_policy {
        HighScorePolicy::Keep => state.high_score,
        HighScorePolicy::Reset => 0,
    };
    init_session(state.config, high_score)
}

// ── Per-frame step (nearly pure — RNG is injected) ──────────────────────────

/// Advance the session by one frame of `dt_ms` milliseconds.
///
/// Order: due timer events, physics integration, overlap checks, then the
/// frame update (parallax, camera, steering, left clamp, scoring).  A crash
/// ends the frame before the update, so the crash frame neither scrolls nor
/// scores.  A crashed session is returned unchanged.
pub fn step(
    state: &GameSession,
    input: &InputState,
    dt_ms: u64,
    rng: &mut impl Rng,
) -> GameSession {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Timers ────────────────────────────────────────────────────────────
    for event in next.scheduler.advance(dt_ms) {
        dispatch(&mut next, event, rng);
    }

    // ── 2. Physics ───────────────────────────────────────────────────────────
    integrate(&mut next, dt_ms as f32 / 1000.0);

    // ── 3. Overlaps ──────────────────────────────────────────────────────────
    if player_collides(&next) {
        enter_game_over(&mut next);
        return next;
    }

    // ── 4. Frame update ──────────────────────────────────────────────────────
    scroll(&mut next);
    steer(&mut next.player, input);
    clamp_to_camera(&mut next);
    award_passed_pipes(&mut next);
    prune_passed_pipes(&mut next);

    next
}

// ── Timer events ─────────────────────────────────────────────────────────────

/// Apply one timer event.  Nothing happens once the game is over.
pub fn handle_timer_event(
    state: &GameSession,
    event: TimerEvent,
    rng: &mut impl Rng,
) -> GameSession {
    let mut next = state.clone();
    dispatch(&mut next, event, rng);
    next
}

fn dispatch(s: &mut GameSession, event: TimerEvent, rng: &mut impl Rng) {
    if s.status == GameStatus::GameOver {
        return;
    }
    match event {
        TimerEvent::SpawnPipes => {
            let center_y = rng.gen_range(PIPE_CENTER_MIN..=PIPE_CENTER_MAX) as f32;
            add_pipe_pair(s, center_y);
        }
        TimerEvent::RampDifficulty => {
            s.drone_spawn_chance = s.drone_spawn_chance.saturating_sub(1).max(1);
        }
        TimerEvent::DroneSpawnAttempt => {
            if s.drones.len() < MAX_DRONES && drone_spawn_roll(s.drone_spawn_chance, rng) {
                add_drone(s, rng);
            }
        }
        TimerEvent::DroneExpired { id } => {
            // The drone may already be gone.
            if let Some(idx) = s.drones.iter().position(|d| d.id == id) {
                s.drones.remove(idx);
            }
        }
    }
}

// ── Pipes ────────────────────────────────────────────────────────────────────

/// Spawn a pipe pair around a random centre just past the right edge.
pub fn spawn_pipe_pair(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    handle_timer_event(state, TimerEvent::SpawnPipes, rng)
}

/// Spawn a pipe pair whose gap is centred on `center_y`.
pub fn spawn_pipe_pair_at(state: &GameSession, center_y: f32) -> GameSession {
    let mut next = state.clone();
    if next.status == GameStatus::Running {
        add_pipe_pair(&mut next, center_y);
    }
    next
}

fn add_pipe_pair(s: &mut GameSession, center_y: f32) {
    let x = s.camera.right_edge() + PIPE_SPAWN_OFFSET;
    let top_edge = center_y - PIPE_GAP / 2.0;
    let bottom_edge = center_y + PIPE_GAP / 2.0;

    let mut segments = build_pipe_column(x, top_edge, true, s.config.view_height);
    segments.extend(build_pipe_column(x, bottom_edge, false, s.config.view_height));

    s.pipe_pairs.push(PipePair {
        x,
        center_y,
        scored: false,
        segments,
    });
}

/// Lay out one stack of tube segments at column `x`.
///
/// The top stack runs down from y = 0 and ends with a flipped cap whose
/// bottom sits on `edge_y`.  The bottom stack starts with a cap at `edge_y`
/// and fills down to `view_height`.
pub fn build_pipe_column(
    x: f32,
    edge_y: f32,
    is_top: bool,
    view_height: f32,
) -> Vec<PipeSegment> {
    let size = PIPE_SEGMENT_SIZE;
    let mut segments = Vec::new();

    if is_top {
        let mut y = 0.0;
        while y < edge_y - size + 2.0 {
            segments.push(PipeSegment {
                x,
                y,
                kind: SegmentKind::Middle,
                flipped: false,
            });
            y += size;
        }
        segments.push(PipeSegment {
            x,
            y: edge_y - size,
            kind: SegmentKind::End,
            flipped: true,
        });
    } else {
        let mut y = edge_y + size;
        while y < view_height {
            segments.push(PipeSegment {
                x,
                y,
                kind: SegmentKind::Middle,
                flipped: false,
            });
            y += size;
        }
        segments.push(PipeSegment {
            x,
            y: edge_y,
            kind: SegmentKind::End,
            flipped: false,
        });
    }

    segments
}

// ── Drones ───────────────────────────────────────────────────────────────────

/// Spawn one drone unconditionally (no cap, no roll).
pub fn spawn_drone(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    let mut next = state.clone();
    if next.status == GameStatus::Running {
        add_drone(&mut next, rng);
    }
    next
}

fn add_drone(s: &mut GameSession, rng: &mut impl Rng) {
    let y = pick_drone_y(s.last_drone_y, rng);
    s.last_drone_y = y;

    let id = s.next_drone_id;
    s.next_drone_id += 1;

    s.drones.push(Drone {
        id,
        x: s.camera.right_edge() + DRONE_SPAWN_OFFSET,
        y,
        vx: DRONE_VELOCITY_X,
        spawned_at_ms: s.scheduler.now_ms(),
    });
    s.scheduler.after(DRONE_LIFETIME_MS, TimerEvent::DroneExpired { id });
}

/// One spawn attempt: true with probability `1 / chance`.
pub fn drone_spawn_roll(chance: u32, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=chance.max(1)) == 1
}

/// Pick a drone height at least `DRONE_MIN_SEPARATION` away from `last_y`,
/// giving up after `DRONE_PLACEMENT_TRIES` draws and keeping the last one.
pub fn pick_drone_y(last_y: f32, rng: &mut impl Rng) -> f32 {
    let mut tries = 0;
    loop {
        let y = rng.gen_range(DRONE_Y_MIN..=DRONE_Y_MAX) as f32;
        tries += 1;
        if (y - last_y).abs() >= DRONE_MIN_SEPARATION || tries >= DRONE_PLACEMENT_TRIES {
            return y;
        }
    }
}

// ── Frame update helpers ─────────────────────────────────────────────────────

fn integrate(s: &mut GameSession, dt_secs: f32) {
    let p = &mut s.player;
    p.x += p.vx * dt_secs;
    p.y += p.vy * dt_secs;

    // World bounds: the collision box stays inside the world.
    let half_w = PLAYER_BODY_W / 2.0;
    let half_h = PLAYER_BODY_H / 2.0;
    p.x = p.x.clamp(half_w, WORLD_WIDTH - half_w);
    p.y = p.y.clamp(half_h, (s.config.view_height - half_h).max(half_h));

    for drone in &mut s.drones {
        drone.x += drone.vx * dt_secs;
    }
}

fn scroll(s: &mut GameSession) {
    for layer in &mut s.layers {
        layer.offset += layer.speed_factor * CAMERA_SPEED;
    }
    let max_scroll = (WORLD_WIDTH - s.camera.width).max(0.0);
    s.camera.scroll_x = (s.camera.scroll_x + CAMERA_SPEED).min(max_scroll);
}

fn steer(player: &mut Player, input: &InputState) {
    if input.left {
        player.vx = -PLAYER_SPEED_LEFT;
        player.facing = Facing::Left;
    } else if input.right {
        player.vx = PLAYER_SPEED_RIGHT;
        player.facing = Facing::Right;
    } else {
        player.vx = 0.0;
    }

    player.vy = if input.up {
        -PLAYER_SPEED_VERTICAL
    } else if input.down {
        PLAYER_SPEED_VERTICAL
    } else {
        0.0
    };
}

fn clamp_to_camera(s: &mut GameSession) {
    let left_limit = s.camera.scroll_x + PLAYER_LEFT_MARGIN;
    if s.player.x < left_limit {
        s.player.x = left_limit;
    }
}

fn award_passed_pipes(s: &mut GameSession) {
    let player_x = s.player.x;
    for pair in &mut s.pipe_pairs {
        if !pair.scored && pair.x < player_x {
            pair.scored = true;
            s.score += 1;
        }
    }
}

/// Scored pairs well behind the camera can never matter again.
fn prune_passed_pipes(s: &mut GameSession) {
    let cutoff = s.camera.scroll_x - PIPE_PRUNE_MARGIN;
    s.pipe_pairs
        .retain(|pair| !(pair.scored && pair.x + PIPE_SEGMENT_SIZE < cutoff));
}

// ── Collisions & game over ───────────────────────────────────────────────────

/// True if the player's box overlaps any pipe segment or drone.
pub fn player_collides(state: &GameSession) -> bool {
    let body = state.player.body();
    let hits_pipe = state
        .pipe_pairs
        .iter()
        .flat_map(|pair| pair.segments.iter())
        .any(|seg| seg.body().overlaps(&body));
    hits_pipe || state.drones.iter().any(|d| d.body().overlaps(&body))
}

/// Crash the player.  Calling this on a finished session changes nothing.
pub fn trigger_game_over(state: &GameSession) -> GameSession {
    let mut next = state.clone();
    enter_game_over(&mut next);
    next
}

fn enter_game_over(s: &mut GameSession) {
    if s.status == GameStatus::GameOver {
        return;
    }
    s.status = GameStatus::GameOver;
    s.player.tinted = true;
    s.high_score = s.high_score.max(s.score);
}

// ── HUD ──────────────────────────────────────────────────────────────────────

pub fn score_text(state: &GameSession) -> String {
    format!("Score: {}    High: {}", state.score, state.high_score)
}
