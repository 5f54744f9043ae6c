//! Game state and core simulation types
//!
//! Everything mutable lives on `GameState` — no module-level timers or
//! counters, so two engine instances are fully independent.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;

/// Current phase of the whole game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed, waiting for the first start command
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended (lives reached 0); start re-enters Running
    Ended,
}

/// Axis-aligned bounding box, y grows downward (canvas convention)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub jumping: bool,
    pub grounded: bool,
    pub on_platform: bool,
    pub can_double_jump: bool,
    pub has_double_jumped: bool,
}

impl Player {
    fn at_spawn(ground_y: f32) -> Self {
        Self {
            x: PLAYER_SPAWN_X,
            y: ground_y - PLAYER_HEIGHT,
            w: PLAYER_WIDTH,
            h: PLAYER_HEIGHT,
            vel_x: 0.0,
            vel_y: 0.0,
            jumping: false,
            grounded: true,
            on_platform: false,
            can_double_jump: false,
            has_double_jumped: false,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Ground,
    Flying,
    Moving,
    Spike,
}

/// A scrolling hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
    /// Scored exactly once, when the trailing edge first crosses the player
    pub passed: bool,
    /// Oscillation state, meaningful only for `Moving`
    pub vel_y: f32,
    pub origin_y: f32,
    pub move_range: f32,
}

/// Platform variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Static,
    Moving,
}

/// A platform the player can land on (solid from above only)
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    pub passed: bool,
    pub vel_y: f32,
    pub origin_y: f32,
    pub move_range: f32,
}

/// Power-up variants (serialized names match the collector schema)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    Speed,
    Invincibility,
    DoubleJump,
    ScoreMultiplier,
}

impl PowerUpKind {
    /// Effect duration once collected
    pub fn duration_ms(&self) -> f64 {
        match self {
            PowerUpKind::Speed => 5000.0,
            PowerUpKind::Invincibility => 4000.0,
            PowerUpKind::DoubleJump => 8000.0,
            PowerUpKind::ScoreMultiplier => 6000.0,
        }
    }

    /// Display color (CSS)
    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "#00FF00",
            PowerUpKind::Invincibility => "#FFD700",
            PowerUpKind::DoubleJump => "#00BFFF",
            PowerUpKind::ScoreMultiplier => "#FF69B4",
        }
    }

    /// Single-letter glyph drawn on the tile
    pub fn symbol(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "S",
            PowerUpKind::Invincibility => "I",
            PowerUpKind::DoubleJump => "J",
            PowerUpKind::ScoreMultiplier => "X",
        }
    }

    /// HUD badge label
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "Speed Boost",
            PowerUpKind::Invincibility => "Invincible",
            PowerUpKind::DoubleJump => "Double Jump",
            PowerUpKind::ScoreMultiplier => "2x Score",
        }
    }
}

/// A collectible power-up tile
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub collected: bool,
}

/// An installed power-up modifier; reverts when its duration elapses
#[derive(Debug, Clone, Copy)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub duration_ms: f64,
    pub started_at: f64,
}

impl ActiveEffect {
    /// Whole seconds remaining, for the HUD badge
    pub fn secs_left(&self, now_ms: f64) -> i64 {
        ((self.duration_ms - (now_ms - self.started_at)) / 1000.0).ceil() as i64
    }
}

/// Dust kicked up while the player runs along the ground
#[derive(Debug, Clone, Copy)]
pub struct SmokeParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life fraction in 0..=1
    pub life: f32,
}

/// Jump flavor, for telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpKind {
    Single,
    Double,
}

/// Cumulative per-run counters carried on every telemetry event
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub started_at: f64,
    pub total_jumps: u32,
    pub total_powerups_collected: u32,
    pub total_obstacles_avoided: u32,
}

/// Structured telemetry emitted by the simulation, drained by the host.
///
/// Tags and field names match the collector's event schema.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        high_score: u64,
    },
    PlayerJumped {
        jump_type: JumpKind,
        score: u64,
        total_jumps: u32,
    },
    PlayerTookDamage {
        lives_remaining: u8,
        score: u64,
    },
    PlayerDied {
        final_score: u64,
        total_jumps: u32,
        total_powerups_collected: u32,
        total_obstacles_avoided: u32,
    },
    PowerupCollected {
        powerup_type: PowerUpKind,
        score: u64,
        total_powerups_collected: u32,
    },
    PowerupActivated {
        powerup_type: PowerUpKind,
        score: u64,
    },
    PowerupExpired {
        powerup_type: PowerUpKind,
        score: u64,
    },
    ObstacleAvoided {
        obstacle_type: ObstacleKind,
        score: u64,
        total_obstacles_avoided: u32,
    },
    PlatformUsed {
        platform_type: PlatformKind,
        score: u64,
    },
    ScoreMilestone {
        milestone_score: u64,
        score: u64,
        total_jumps: u32,
    },
    HighScoreAchieved {
        high_score: u64,
        previous_high_score: u64,
        game_duration_seconds: f64,
        total_jumps: u32,
        total_powerups_collected: u32,
        total_obstacles_avoided: u32,
    },
    GameEnded {
        final_score: u64,
        lives_remaining: u8,
        game_duration_seconds: f64,
        high_score: u64,
        total_jumps: u32,
        total_powerups_collected: u32,
        total_obstacles_avoided: u32,
        game_speed: f32,
        is_new_high_score: bool,
    },
}

/// Score thresholds that fire a one-shot milestone event
pub const SCORE_MILESTONES: [u64; 9] = [100, 250, 500, 1000, 2500, 5000, 10000, 25000, 50000];

/// Milestone first crossed between two consecutive scores, if any
pub fn check_milestone_reached(previous: u64, current: u64) -> Option<u64> {
    SCORE_MILESTONES
        .iter()
        .copied()
        .find(|&m| previous < m && current >= m)
}

/// Complete engine state for one game instance
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,

    /// Viewport dimensions (entities spawn at `view_w`, cull left of 0)
    pub view_w: f32,
    pub view_h: f32,
    /// Top of the ground strip; the player's feet never pass below it
    pub ground_y: f32,

    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub game_speed: f32,
    pub score_multiplier: u64,
    /// Power-up invincibility (distinct from the post-hit grace window)
    pub invincible: bool,
    /// Remaining post-hit grace, counted down GRACE_TICK_MS per tick
    pub grace_ms: f64,

    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub platforms: Vec<Platform>,
    pub power_ups: Vec<PowerUp>,
    pub effects: Vec<ActiveEffect>,
    pub particles: Vec<SmokeParticle>,

    /// Wall-clock spawn timers. Deliberately NOT suspended while the host
    /// skips ticks: resuming after a long pause produces catch-up spawns.
    pub last_obstacle_at: f64,
    pub last_platform_at: f64,
    pub last_powerup_at: f64,
    pub obstacle_interval: f64,
    pub platform_interval: f64,
    pub powerup_interval: f64,

    pub stats: Stats,
    pub previous_score: u64,
    /// Best score seen this session, seeded from persistent storage on start
    pub high_score: u64,

    /// Telemetry queue, drained by the host each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an engine instance for a viewport. Stays in `NotStarted`
    /// until the first start command.
    pub fn new(seed: u64, view_w: f32, view_h: f32) -> Self {
        let ground_y = view_h - GROUND_MARGIN;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            view_w,
            view_h,
            ground_y,
            phase: GamePhase::NotStarted,
            score: 0,
            lives: MAX_LIVES,
            game_speed: BASE_GAME_SPEED,
            score_multiplier: 1,
            invincible: false,
            grace_ms: 0.0,
            player: Player::at_spawn(ground_y),
            obstacles: Vec::new(),
            platforms: Vec::new(),
            power_ups: Vec::new(),
            effects: Vec::new(),
            particles: Vec::new(),
            last_obstacle_at: 0.0,
            last_platform_at: 0.0,
            last_powerup_at: 0.0,
            obstacle_interval: OBSTACLE_INTERVAL_MS,
            platform_interval: PLATFORM_INTERVAL_MS,
            powerup_interval: POWERUP_INTERVAL_MS,
            stats: Stats::default(),
            previous_score: 0,
            high_score: 0,
            events: Vec::new(),
        }
    }

    /// Start or restart a run. Re-entrant: clears and reseeds every
    /// collection regardless of prior state.
    pub fn start(&mut self, now_ms: f64, high_score: u64) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.lives = MAX_LIVES;
        self.game_speed = BASE_GAME_SPEED;
        self.score_multiplier = 1;
        self.invincible = false;
        self.grace_ms = 0.0;
        self.player = Player::at_spawn(self.ground_y);
        self.obstacles.clear();
        self.platforms.clear();
        self.power_ups.clear();
        self.effects.clear();
        self.particles.clear();
        self.last_obstacle_at = now_ms;
        self.last_platform_at = now_ms;
        self.last_powerup_at = now_ms;
        self.obstacle_interval = OBSTACLE_INTERVAL_MS;
        self.platform_interval = PLATFORM_INTERVAL_MS;
        self.powerup_interval = POWERUP_INTERVAL_MS;
        self.stats = Stats {
            started_at: now_ms,
            ..Stats::default()
        };
        self.previous_score = 0;
        self.high_score = high_score;

        self.events.push(GameEvent::GameStarted { high_score });
    }

    /// Effect of the given kind, if currently active
    pub fn effect(&self, kind: PowerUpKind) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Take the queued telemetry events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_first_crossing_only() {
        assert_eq!(check_milestone_reached(90, 105), Some(100));
        assert_eq!(check_milestone_reached(100, 105), None);
        assert_eq!(check_milestone_reached(240, 505), Some(250));
        assert_eq!(check_milestone_reached(0, 0), None);
    }

    #[test]
    fn test_new_state_not_started() {
        let state = GameState::new(7, 800.0, 400.0);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.lives, crate::consts::MAX_LIVES);
        assert_eq!(state.ground_y, 360.0);
        assert!(state.player.grounded);
        assert_eq!(state.player.y, 360.0 - crate::consts::PLAYER_HEIGHT);
    }

    #[test]
    fn test_start_emits_game_started() {
        let mut state = GameState::new(7, 800.0, 400.0);
        state.start(1000.0, 42);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.high_score, 42);
        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::GameStarted { high_score: 42 }]
        ));
        assert!(state.events.is_empty());
    }
}
