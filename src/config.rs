/// Gameplay tuning and session configuration.
///
/// World units are the scene's pixel units; the terminal renderer scales
/// them down to cells.

// ── World & camera ───────────────────────────────────────────────────────────

/// Width shared by the camera and physics bounds (effectively infinite).
pub const WORLD_WIDTH: f32 = 999_999.0;

/// Camera auto-scroll, in world units per frame.
pub const CAMERA_SPEED: f32 = 2.0;

/// Speed factor of each background layer, far to near.
pub const PARALLAX_FACTORS: [f32; 5] = [0.02, 0.06, 0.12, 0.25, 0.4];

// ── Sprites ──────────────────────────────────────────────────────────────────

pub const SPRITE_SCALE: f32 = 3.0;

const BIRD_FRAME: f32 = 32.0;
const DRONE_FRAME: f32 = 48.0;
const TUBE_FRAME: f32 = 32.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START_X: f32 = 100.0;
pub const PLAYER_START_Y: f32 = 200.0;

/// Collision box: half the frame wide, 40 % of it tall, scaled.
pub const PLAYER_BODY_W: f32 = BIRD_FRAME * 0.5 * SPRITE_SCALE;
pub const PLAYER_BODY_H: f32 = BIRD_FRAME * 0.4 * SPRITE_SCALE;

pub const PLAYER_SPEED_LEFT: f32 = 150.0;
pub const PLAYER_SPEED_RIGHT: f32 = 200.0;
pub const PLAYER_SPEED_VERTICAL: f32 = 200.0;

/// Minimum distance between the camera's left edge and the player.
pub const PLAYER_LEFT_MARGIN: f32 = 50.0;

// ── Pipes ────────────────────────────────────────────────────────────────────

pub const PIPE_GAP: f32 = 180.0;
pub const PIPE_CENTER_MIN: i32 = 100;
pub const PIPE_CENTER_MAX: i32 = 350;
pub const PIPE_SPAWN_INTERVAL_MS: u64 = 9_000;

/// Distance past the camera's right edge at which pipes appear.
pub const PIPE_SPAWN_OFFSET: f32 = 100.0;

/// Side length of one middle or end segment.
pub const PIPE_SEGMENT_SIZE: f32 = TUBE_FRAME * SPRITE_SCALE;

/// Scored pairs further than this behind the camera are dropped.
pub const PIPE_PRUNE_MARGIN: f32 = 200.0;

// ── Drones ───────────────────────────────────────────────────────────────────

pub const MAX_DRONES: usize = 10;
pub const DRONE_INITIAL_SPAWN_CHANCE: u32 = 2;
pub const DRONE_RAMP_INTERVAL_MS: u64 = 15_000;
pub const DRONE_SPAWN_ATTEMPT_MS: u64 = 1_000;
pub const DRONE_LIFETIME_MS: u64 = 10_000;
pub const DRONE_VELOCITY_X: f32 = -100.0;
pub const DRONE_Y_MIN: i32 = 50;
pub const DRONE_Y_MAX: i32 = 400;
pub const DRONE_MIN_SEPARATION: f32 = 100.0;
pub const DRONE_PLACEMENT_TRIES: u32 = 10;
pub const DRONE_SPAWN_OFFSET: f32 = 50.0;

pub const DRONE_BODY_W: f32 = DRONE_FRAME * 0.4 * SPRITE_SCALE;
pub const DRONE_BODY_H: f32 = DRONE_FRAME * 0.5 * SPRITE_SCALE;

// ── Session ──────────────────────────────────────────────────────────────────

/// What a restart does with the in-memory high score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HighScorePolicy {
    /// Carry the high score into the new session.
    #[default]
    Keep,
    /// Start the new session from zero, like a full scene reload.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// Visible world width; also the distance from the camera's left to right edge.
    pub view_width: f32,
    /// World height. Pipes fill down to this line.
    pub view_height: f32,
    pub high_score_policy: HighScorePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            view_width: 960.0,
            view_height: 540.0,
            high_score_policy: HighScorePolicy::Keep,
        }
    }
}
