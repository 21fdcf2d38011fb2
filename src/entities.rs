/// All game entity types — pure data and geometry, no game rules.

use crate::config::{
    GameConfig, DRONE_BODY_H, DRONE_BODY_W, PIPE_SEGMENT_SIZE, PLAYER_BODY_H, PLAYER_BODY_W,
};
use crate::schedule::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Aabb {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict intersection: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

/// A looping sprite animation; only the frame count and rate matter here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub frames: u32,
    pub fps: u32,
}

pub const BIRD_FLY: Animation = Animation { frames: 4, fps: 8 };
pub const DRONE_IDLE: Animation = Animation { frames: 4, fps: 6 };

impl Animation {
    /// Frame shown `elapsed_ms` after the animation started.
    pub fn frame_at(&self, elapsed_ms: u64) -> u32 {
        if self.frames == 0 {
            return 0;
        }
        ((elapsed_ms * self.fps as u64 / 1000) % self.frames as u64) as u32
    }
}

// ── Background ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxLayer {
    /// Fraction of the camera speed this layer scrolls at.
    pub speed_factor: f32,
    /// Accumulated horizontal tile offset.
    pub offset: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub scroll_x: f32,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn right_edge(&self) -> f32 {
        self.scroll_x + self.width
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Centre of the sprite.
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    /// Set once the player has crashed.
    pub tinted: bool,
}

impl Player {
    pub fn body(&self) -> Aabb {
        Aabb::centered(self.x, self.y, PLAYER_BODY_W, PLAYER_BODY_H)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Middle,
    End,
}

/// One immovable tube tile, positioned by its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct PipeSegment {
    pub x: f32,
    pub y: f32,
    pub kind: SegmentKind,
    /// Drawn upside down (the cap of the top stack).
    pub flipped: bool,
}

impl PipeSegment {
    pub fn body(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            w: PIPE_SEGMENT_SIZE,
            h: PIPE_SEGMENT_SIZE,
        }
    }
}

/// A gap between a top and a bottom stack of segments.
#[derive(Clone, Debug, PartialEq)]
pub struct PipePair {
    /// Spawn x; passing it scores.
    pub x: f32,
    pub center_y: f32,
    pub scored: bool,
    pub segments: Vec<PipeSegment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drone {
    pub id: u64,
    /// Centre of the sprite.
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    /// Scheduler time at which the drone appeared.
    pub spawned_at_ms: u64,
}

impl Drone {
    pub fn body(&self) -> Aabb {
        Aabb::centered(self.x, self.y, DRONE_BODY_W, DRONE_BODY_H)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Directional keys held during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One play-through, from the first frame to the crash.  Cloneable so pure
/// update functions can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub config: GameConfig,
    pub status: GameStatus,
    pub camera: Camera,
    pub layers: Vec<ParallaxLayer>,
    pub player: Player,
    pub pipe_pairs: Vec<PipePair>,
    pub drones: Vec<Drone>,
    pub next_drone_id: u64,
    /// y of the most recently spawned drone, used to spread drones out.
    pub last_drone_y: f32,
    /// Spawn attempts succeed with probability `1 / drone_spawn_chance`.
    pub drone_spawn_chance: u32,
    pub score: u32,
    pub high_score: u32,
    pub scheduler: Scheduler,
    pub frame: u64,
}
