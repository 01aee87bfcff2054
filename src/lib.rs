//! Bomb Blitz - a terminal arcade dodge-and-shoot game.
//!
//! Core modules:
//! - `entities`: pure data types for every game object
//! - `compute`: pure per-tick game logic
//! - `display`: crossterm rendering layer

pub mod compute;
pub mod display;
pub mod entities;

/// Fixed session configuration, read once at startup.
pub mod consts {
    use std::time::Duration;

    /// Logical playfield width.
    pub const FIELD_WIDTH: i32 = 1100;
    /// Logical playfield height.
    pub const FIELD_HEIGHT: i32 = 650;

    /// Bombs spawned at session start.  Never replenished: the count
    /// only decreases as bombs are shot down.
    pub const NUM_BOMBS: usize = 5;

    /// Per-tick displacement magnitude shared by the player, beams and
    /// bombs.
    pub const STEP: i32 = 5;

    /// Inset from every playfield edge for initial bomb placement, so
    /// no bomb starts flush against a wall.
    pub const SPAWN_MARGIN: i32 = 50;

    pub const BOMB_RADIUS: i32 = 10;
    pub const BOMB_COLOR: (u8, u8, u8) = (255, 0, 0);

    /// Player bounding square side.
    pub const PLAYER_SIZE: i32 = 60;
    /// Initial player center.
    pub const PLAYER_START: (i32, i32) = (300, 200);

    pub const BEAM_WIDTH: i32 = 50;
    pub const BEAM_HEIGHT: i32 = 10;

    pub const EXPLOSION_SIZE: i32 = 40;
    /// Explosion lifetime in ticks.
    pub const EXPLOSION_LIFE: u32 = 20;

    /// Points per bomb destroyed.
    pub const SCORE_PER_BOMB: u32 = 1;

    /// Fixed tick rate, the sole pacing mechanism.
    pub const TICKS_PER_SECOND: u64 = 50;

    /// How long the final frame stays on screen after a game over.
    pub const GAME_OVER_HOLD: Duration = Duration::from_secs(1);
}
