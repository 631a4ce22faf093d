use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::grid::GridWorld;
use crate::prng::Mulberry32;

// ── Primitives ──────────────────────────────────────────────

pub type AgentId = usize;
pub type Tick = u32;
pub type Seed = u32;

/// 24-bit RGB territory colour, written as `#RRGGBB` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        let invalid = || ConfigError::InvalidColor {
            text: text.to_string(),
        };
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(hex, 16).map(Color).map_err(|_| invalid())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Color::parse(&text)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

/// One grid slot: `None` is unclaimed.
pub type Cell = Option<Color>;

// ── Input ───────────────────────────────────────────────────

/// Resolved movement intent, each axis in {-1, 0, 1}.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub vx: i8,
    pub vy: i8,
}

pub const IDLE: Intent = Intent { vx: 0, vy: 0 };

/// The eight headings in NPC scoring order (axis first, then diagonals).
pub const DIRECTIONS: [Intent; 8] = [
    Intent { vx: 1, vy: 0 },
    Intent { vx: -1, vy: 0 },
    Intent { vx: 0, vy: 1 },
    Intent { vx: 0, vy: -1 },
    Intent { vx: 1, vy: 1 },
    Intent { vx: 1, vy: -1 },
    Intent { vx: -1, vy: 1 },
    Intent { vx: -1, vy: -1 },
];

pub const AXIS_DIRECTIONS: [Intent; 4] = [
    Intent { vx: 1, vy: 0 },
    Intent { vx: -1, vy: 0 },
    Intent { vx: 0, vy: 1 },
    Intent { vx: 0, vy: -1 },
];

impl Intent {
    /// Clamps arbitrary integers to their sign, so callers can pass raw deltas.
    pub fn new(vx: i32, vy: i32) -> Self {
        Intent {
            vx: vx.signum() as i8,
            vy: vy.signum() as i8,
        }
    }

    pub fn is_idle(self) -> bool {
        self.vx == 0 && self.vy == 0
    }

    /// Quarter turn clockwise in screen space (y grows downward).
    pub fn turned_right(self) -> Self {
        Intent {
            vx: -self.vy,
            vy: self.vx,
        }
    }

    pub fn turned_left(self) -> Self {
        Intent {
            vx: self.vy,
            vy: -self.vx,
        }
    }
}

// ── Match rules ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Insane,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Insane => write!(f, "insane"),
        }
    }
}

/// Per-difficulty NPC tuning, looked up with [`npc_profile`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NpcProfile {
    pub base_speed: f64,
    pub power_up_seek_chance: f64,
    pub power_up_recheck_ticks: i32,
    pub straight_run_ticks: i32,
    pub look_ahead: i32,
    pub enemy_cell_score: i32,
    pub rearm_base_ticks: i32,
}

// ── Power-ups ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerUpKind {
    Swap,
    Speed,
    Freeze,
    Bomb,
}

pub const POWER_UP_KINDS: [PowerUpKind; 4] = [
    PowerUpKind::Swap,
    PowerUpKind::Speed,
    PowerUpKind::Freeze,
    PowerUpKind::Bomb,
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub kind: PowerUpKind,
}

// ── Agent ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcState {
    /// Ticks left before the next steering decision.
    pub direction_change_timer: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Control {
    Human,
    Npc(NpcState),
}

/// HUD icon state, always derived from agent timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Effect {
    Speed,
    Frozen,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub color: Color,
    pub x: f64,
    pub y: f64,
    pub velocity: Intent,
    pub base_speed: f64,
    pub current_speed: f64,
    /// Applied to `base_speed` while `speed_timer > 0`.
    pub speed_multiplier: f64,
    pub speed_timer: i32,
    pub respawning: bool,
    pub respawn_timer: i32,
    pub frozen: bool,
    pub freeze_timer: i32,
    pub control: Control,
}

// ── Config ──────────────────────────────────────────────────

/// Insane-mode rubber-banding knobs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheatConfig {
    pub chance_per_tick: f64,
    /// Fraction of triggered events that are speed bursts; the rest teleport.
    pub speed_burst_share: f64,
    pub speed_multiplier: f64,
    pub speed_burst_ticks: i32,
    /// Full width of the square the teleport lands in, centred on the human.
    pub teleport_jitter: f64,
}

impl Default for CheatConfig {
    fn default() -> Self {
        Self {
            chance_per_tick: CHEAT_CHANCE_PER_TICK,
            speed_burst_share: CHEAT_SPEED_BURST_SHARE,
            speed_multiplier: CHEAT_SPEED_MULTIPLIER,
            speed_burst_ticks: CHEAT_SPEED_BURST_TICKS,
            teleport_jitter: CHEAT_TELEPORT_JITTER,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub seed: Seed,
    /// Arena is `grid_size` × `grid_size` cells.
    pub grid_size: u32,
    pub npc_count: u32,
    pub difficulty: Difficulty,
    pub human_color: Color,
    pub duration_secs: u32,
    pub cheats: CheatConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            grid_size: DEFAULT_GRID_SIZE,
            npc_count: DEFAULT_NPC_COUNT,
            difficulty: Difficulty::Normal,
            human_color: DEFAULT_HUMAN_COLOR,
            duration_secs: DEFAULT_DURATION_SECS,
            cheats: CheatConfig::default(),
        }
    }
}

// ── Match state ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub tick: Tick,
    pub grid: GridWorld,
    /// Agent order is capture order; the human sits at index 0 by convention.
    pub agents: Vec<Agent>,
    pub power_ups: Vec<PowerUp>,
    pub next_power_up_id: u32,
    pub rng: Mulberry32,
    pub remaining_secs: u32,
    pub match_over: bool,
    pub config: MatchConfig,
}

// ── Tick events ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub a: AgentId,
    pub b: AgentId,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub agent: AgentId,
    pub power_up_id: u32,
    pub kind: PowerUpKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub picker: AgentId,
    pub target: AgentId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub agent: AgentId,
    pub cells: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheatKind {
    SpeedBurst,
    Teleport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatEvent {
    pub agent: AgentId,
    pub kind: CheatKind,
}

/// Facts produced by one tick, for collaborators (particles, kill feed, sound).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickEvents {
    pub tick: Tick,
    pub spawned: Vec<PowerUp>,
    pub pickups: Vec<Pickup>,
    pub swaps: Vec<Swap>,
    pub collisions: Vec<Collision>,
    pub cheats: Vec<CheatEvent>,
    pub captures: Vec<Capture>,
}
