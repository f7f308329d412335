#![warn(clippy::all, clippy::pedantic)]

// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Where a piece's canonical shape is placed when it enters play
pub const SPAWN_COLUMN_OFFSET: i32 = 3;
pub const SPAWN_ROW_OFFSET: i32 = -2;

// Number of distinct tetromino kinds (and therefore the size of one bag)
pub const BAG_SIZE: usize = 7;

// Default timing in milliseconds
pub const GRAVITY_INTERVAL_MS: u64 = 1000;
pub const REPEAT_DELAY_MS: u64 = 200;
pub const REPEAT_INTERVAL_MS: u64 = 80;

// Preview queue
pub const DEFAULT_PREVIEW_COUNT: usize = 3;
pub const MAX_PREVIEW_COUNT: usize = BAG_SIZE;
