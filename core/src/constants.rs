use crate::types::{Color, Difficulty, NpcProfile};

// All durations are in ticks at 60 Hz unless noted.

// Clock
pub const TICK_RATE: u32 = 60;

// Arena
pub const MIN_GRID_SIZE: u32 = 8;
pub const MAX_GRID_SIZE: u32 = 256;
/// Sizes offered by the match menu.
pub const GRID_SIZES: [u32; 6] = [8, 16, 32, 64, 128, 256];
/// Agents are kept this far from the arena edge.
pub const EDGE_MARGIN: f64 = 0.5;

// Match defaults
pub const DEFAULT_GRID_SIZE: u32 = 32;
pub const DEFAULT_NPC_COUNT: u32 = 1;
// Human plus NPCs never outnumber the corner spawn slots
pub const MIN_NPC_COUNT: u32 = 1;
pub const MAX_NPC_COUNT: u32 = 3;
pub const DEFAULT_DURATION_SECS: u32 = 60;
pub const DEFAULT_HUMAN_COLOR: Color = Color(0x00FF99);

pub const PALETTE: [Color; 10] = [
    Color(0xFF0055), // neon pink
    Color(0x00FF99), // neon green
    Color(0x00FFFF), // cyan
    Color(0xFFCC00), // gold
    Color(0xBE00FF), // purple
    Color(0xFF3300), // orange red
    Color(0x0066FF), // blue
    Color(0xFF00CC), // magenta
    Color(0xCCFF00), // lime
    Color(0xFFFFFF), // white
];

// Spawning
/// Distance of the corner spawn slots from the arena edge, in cells.
pub const SPAWN_INSET: i64 = 5;
pub const SPAWN_SLOT_COUNT: usize = 4;
/// Half-width of the square painted around each agent at match start.
pub const SAFE_ZONE_RADIUS: i64 = 1;
pub const HUMAN_BASE_SPEED: f64 = 0.15;

// Collision / respawn
pub const COLLISION_RADIUS: f64 = 0.6;
pub const RESPAWN_TICKS: i32 = 120;

// Power-ups
pub const POWER_UP_SPAWN_INTERVAL_TICKS: u32 = 3 * TICK_RATE;
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.3;
pub const MAX_ACTIVE_POWER_UPS: usize = 5;
pub const PICKUP_RADIUS: f64 = 0.8;
pub const SPEED_BOOST_TICKS: i32 = 300;
pub const SPEED_BOOST_MULTIPLIER: f64 = 2.0;
pub const FREEZE_TICKS: i32 = 300;
pub const BOMB_RADIUS: i64 = 4;
/// Insane NPCs aim SWAP at the human this often when the human is alive.
pub const SWAP_TARGET_HUMAN_CHANCE: f64 = 0.7;
pub const SWAP_TARGET_LEADER_CHANCE: f64 = 0.5;

// NPC steering
pub const NPC_INITIAL_TIMER_BASE: i32 = 30;
pub const NPC_INITIAL_TIMER_SPAN: i32 = 30;
pub const STRAIGHT_RUN_JITTER_TICKS: i32 = 10;
pub const EMPTY_CELL_SCORE: i32 = 10;
pub const OWN_CELL_SCORE: i32 = 5;
pub const OFF_GRID_SCORE: i32 = -100;

// Insane-mode cheats (defaults for `CheatConfig`)
pub const CHEAT_CHANCE_PER_TICK: f64 = 0.005;
pub const CHEAT_SPEED_BURST_SHARE: f64 = 4.0 / 7.0;
pub const CHEAT_SPEED_MULTIPLIER: f64 = 3.0;
pub const CHEAT_SPEED_BURST_TICKS: i32 = 2 * TICK_RATE as i32;
pub const CHEAT_TELEPORT_JITTER: f64 = 10.0;

pub fn npc_profile(difficulty: Difficulty) -> NpcProfile {
    match difficulty {
        Difficulty::Normal => NpcProfile {
            base_speed: 0.12,
            power_up_seek_chance: 0.3,
            power_up_recheck_ticks: 10,
            straight_run_ticks: 30,
            look_ahead: 3,
            enemy_cell_score: -5,
            rearm_base_ticks: 25,
        },
        Difficulty::Insane => NpcProfile {
            base_speed: 0.18,
            power_up_seek_chance: 0.95,
            power_up_recheck_ticks: 5,
            straight_run_ticks: 40,
            look_ahead: 5,
            enemy_cell_score: 15,
            rearm_base_ticks: 15,
        },
    }
}
