use crate::collision::resolve_collisions;
use crate::constants::*;
use crate::error::ConfigError;
use crate::init::create_initial_state;
use crate::npc::{maybe_cheat, update_npc};
use crate::powerups::{resolve_pickups, try_spawn_power_up};
use crate::snapshot::Snapshot;
use crate::types::*;

/// Core per-tick transition, in place.
///
/// Sub-step order:
///  0. Early return if match_over
///  1. Advance tick
///  2. Resolve timers (respawn, speed, freeze)
///  3. Power-up spawner (every POWER_UP_SPAWN_INTERVAL_TICKS)
///  4. Apply human intent
///  5. NPC decisions
///  6. Integrate positions
///  7. Power-up pickups + effects
///  8. Collisions + respawn
///  9. Insane-mode cheat events
/// 10. Paint occupied cells
/// 11. Enclosure capture, per active agent in order
pub fn step_mut(state: &mut MatchState, human: Intent) -> TickEvents {
    // 0. Early return if match is already over
    if state.match_over {
        return TickEvents {
            tick: state.tick,
            ..TickEvents::default()
        };
    }

    // 1. Advance tick
    state.tick += 1;
    let mut events = TickEvents {
        tick: state.tick,
        ..TickEvents::default()
    };
    let cols = state.grid.cols();
    let rows = state.grid.rows();

    // 2. Timers
    for a in state.agents.iter_mut() {
        a.tick_timers();
    }

    // 3. Spawner
    if state.tick % POWER_UP_SPAWN_INTERVAL_TICKS == 0 {
        if let Some(pu) = try_spawn_power_up(state) {
            events.spawned.push(pu);
        }
    }

    // 4. Human intent
    if let Some(h) = state.agents.iter_mut().find(|a| a.is_human()) {
        h.velocity = if h.is_active() && !h.frozen { human } else { IDLE };
    }

    // 5. NPC decisions
    let profile = npc_profile(state.config.difficulty);
    for a in state.agents.iter_mut() {
        update_npc(a, &state.grid, &state.power_ups, &profile, &mut state.rng);
    }

    // 6. Movement
    for a in state.agents.iter_mut() {
        a.integrate(cols, rows);
    }

    // 7. Pickups
    resolve_pickups(state, &mut events);

    // 8. Collisions
    events.collisions = resolve_collisions(&mut state.agents, cols, rows);

    // 9. Cheats
    if state.config.difficulty == Difficulty::Insane {
        let cheats = state.config.cheats;
        if let Some(ev) = maybe_cheat(&mut state.agents, &cheats, cols, rows, &mut state.rng) {
            events.cheats.push(ev);
        }
    }

    // 10. Paint
    for a in state.agents.iter().filter(|a| a.is_active()) {
        state.grid.paint(a.x, a.y, a.color);
    }

    // 11. Capture (later agents see earlier agents' conversions)
    for (idx, a) in state.agents.iter().enumerate() {
        if !a.is_active() {
            continue;
        }
        let cells = state.grid.capture_enclosed(a.color);
        if cells > 0 {
            tracing::debug!(agent = idx, cells, "region captured");
            events.captures.push(Capture { agent: idx, cells });
        }
    }

    events
}

/// Pure form of [`step_mut`]: leaves `prev` untouched.
pub fn step(prev: &MatchState, human: Intent) -> (MatchState, TickEvents) {
    let mut next = prev.clone();
    let events = step_mut(&mut next, human);
    (next, events)
}

/// 1 Hz match clock. Returns true on the call that ends the match.
pub fn countdown_second(state: &mut MatchState) -> bool {
    if state.match_over {
        return false;
    }
    state.remaining_secs = state.remaining_secs.saturating_sub(1);
    if state.remaining_secs == 0 {
        state.match_over = true;
        return true;
    }
    false
}

/// Owns one running match. Each call borrows the state for its full
/// duration, so consumers only ever see whole ticks; dropping the `Match`
/// cancels it.
#[derive(Clone, Debug)]
pub struct Match {
    state: MatchState,
    paused: bool,
}

impl Match {
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        let state = create_initial_state(&config)?;
        tracing::info!(
            seed = config.seed,
            grid = config.grid_size,
            npcs = config.npc_count,
            difficulty = %config.difficulty,
            "match started"
        );
        Ok(Self {
            state,
            paused: false,
        })
    }

    /// Runs one tick unless paused.
    pub fn tick(&mut self, human: Intent) -> TickEvents {
        if self.paused {
            return TickEvents {
                tick: self.state.tick,
                ..TickEvents::default()
            };
        }
        step_mut(&mut self.state, human)
    }

    pub fn countdown_second(&mut self) -> bool {
        if self.paused {
            return false;
        }
        let ended = countdown_second(&mut self.state);
        if ended {
            let winner = self.state.winner();
            tracing::info!(tick = self.state.tick, ?winner, "match over");
        }
        ended
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.state.match_over
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Starts over from the same config and seed.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.state = create_initial_state(&self.state.config)?;
        self.paused = false;
        Ok(())
    }
}
