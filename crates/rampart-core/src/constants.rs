//! Simulation constants and tuning parameters.

/// Default fixed tick rate used by the runner (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Tolerance when comparing scheduled due times against the clock,
/// absorbing float drift from summing `DT`.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Playfield ---

pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;

/// Waypoints of the classic route.
pub const CLASSIC_PATH: [(f64, f64); 6] = [
    (50.0, 300.0),
    (200.0, 300.0),
    (200.0, 150.0),
    (500.0, 150.0),
    (500.0, 450.0),
    (700.0, 450.0),
];

/// Minimum distance between a tower and any path segment.
pub const PATH_CLEARANCE: f64 = 25.0;

/// Click radius for hitting an existing tower.
pub const TOWER_HIT_RADIUS: f64 = 20.0;

// --- Session ---

pub const STARTING_GOLD: u32 = 75;
pub const STARTING_CASTLE_HEALTH: i32 = 100;

/// Removal refunds this fraction of the tower's build cost (floored).
pub const REMOVAL_REFUND_FRACTION: f64 = 0.5;

/// Auto-clear delay for a tower's range highlight (seconds).
pub const SELECTION_TIMEOUT_SECS: f64 = 5.0;

// --- Waves ---

/// Every Nth wave is a single-boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 10;

/// Every Nth wave (dragon waves aside) forces knights.
pub const KNIGHT_WAVE_INTERVAL: u32 = 5;

/// A level spans this many waves.
pub const WAVES_PER_LEVEL: u32 = 20;

/// Delay between consecutive spawns within a wave (seconds).
pub const SPAWN_STAGGER_SECS: f64 = 1.0;

/// Delay before the next wave after a regular clear (seconds).
pub const NEXT_WAVE_DELAY_SECS: f64 = 3.0;

/// Delay before the next wave after a level-up (seconds).
pub const LEVEL_UP_DELAY_SECS: f64 = 5.0;

/// How long the level-complete banner stays up (seconds).
pub const LEVEL_COMPLETE_DISPLAY_SECS: f64 = 5.0;

pub const BASE_ENEMY_COUNT: u32 = 3;

// --- Boss ---

pub const BOSS_BASE_HEALTH: f64 = 50.0;
pub const BOSS_HEALTH_PER_WAVE: f64 = 5.0;
pub const BOSS_BASE_DAMAGE: u32 = 20;
pub const BOSS_BASE_REWARD: u32 = 100;
pub const BOSS_REWARD_PER_WAVE: u32 = 5;
pub const BOSS_SPEED: f64 = 40.0;
pub const BOSS_SIZE: f64 = 40.0;

// --- Movement ---

/// Distance at which an enemy counts as having reached a waypoint.
pub const WAYPOINT_EPSILON: f64 = 5.0;

/// Default enemy walking speed (units/second).
pub const ENEMY_BASE_SPEED: f64 = 100.0;

// --- Projectiles ---

pub const PROJECTILE_SPEED: f64 = 300.0;

/// Distance at which a projectile resolves against its target.
pub const PROJECTILE_HIT_RADIUS: f64 = 5.0;

// --- Special effects ---

pub const FREEZE_SLOW_FACTOR: f64 = 0.5;
pub const FREEZE_DURATION_SECS: f64 = 2.0;
pub const SPLASH_RADIUS: f64 = 40.0;
pub const SPLASH_DAMAGE_FRACTION: f64 = 0.5;
pub const CHAIN_JUMPS: u32 = 2;
pub const CHAIN_RANGE: f64 = 60.0;
pub const CHAIN_DAMAGE_FALLOFF: f64 = 0.5;

// --- Upgrades ---

pub const MAX_TOWER_LEVEL: u8 = 3;

/// Range multiplier applied on reaching the top level.
pub const MAX_LEVEL_RANGE_FACTOR: f64 = 1.3;

// --- Floating text ---

pub const FLOATING_TEXT_LIFE: f64 = 1.0;

/// Life lost per second.
pub const FLOATING_TEXT_FADE_RATE: f64 = 2.0;

/// Upward drift (units/second).
pub const FLOATING_TEXT_RISE_SPEED: f64 = 30.0;

/// Offset of the castle-hit text from the path end.
pub const CASTLE_TEXT_OFFSET: (f64, f64) = (30.0, -30.0);

pub const CASTLE_HIT_COLOR: &str = "#FF5722";
