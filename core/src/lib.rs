pub mod agent;
pub mod collision;
pub mod constants;
pub mod error;
pub mod grid;
pub mod init;
pub mod npc;
pub mod powerups;
pub mod prng;
pub mod snapshot;
pub mod step;
pub mod types;

pub use agent::{clamp_to_arena, spawn_slot};
pub use collision::{agents_collide, resolve_collisions};
pub use constants::*;
pub use error::ConfigError;
pub use grid::GridWorld;
pub use init::*;
pub use npc::{maybe_cheat, update_npc};
pub use powerups::{apply_power_up, resolve_pickups, try_spawn_power_up};
pub use prng::*;
pub use snapshot::{AgentView, ScoreEntry, Snapshot};
pub use step::{countdown_second, step, step_mut, Match};
pub use types::*;
