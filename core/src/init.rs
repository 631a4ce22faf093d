use crate::agent::spawn_slot;
use crate::constants::*;
use crate::error::ConfigError;
use crate::grid::GridWorld;
use crate::prng::Mulberry32;
use crate::types::*;

impl MatchConfig {
    /// Rejects configurations no match can start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSizeOutOfRange {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        if !(MIN_NPC_COUNT..=MAX_NPC_COUNT).contains(&self.npc_count) {
            return Err(ConfigError::NpcCountOutOfRange {
                count: self.npc_count,
                min: MIN_NPC_COUNT,
                max: MAX_NPC_COUNT,
            });
        }
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.human_color.0 > 0xFF_FFFF {
            return Err(ConfigError::InvalidColor {
                text: format!("{:#X}", self.human_color.0),
            });
        }

        let c = &self.cheats;
        for (field, value) in [
            ("cheats.chance_per_tick", c.chance_per_tick),
            ("cheats.speed_burst_share", c.speed_burst_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }
        for (field, value) in [
            ("cheats.speed_multiplier", c.speed_multiplier),
            ("cheats.speed_burst_ticks", c.speed_burst_ticks as f64),
            ("cheats.teleport_jitter", c.teleport_jitter),
        ] {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveCheatValue { field, value });
            }
        }
        Ok(())
    }
}

/// NPC colours: the palette without the human's colour, shuffled once.
fn npc_colors(human: Color, rng: &mut Mulberry32) -> Vec<Color> {
    let mut colors: Vec<Color> = PALETTE.iter().copied().filter(|&c| c != human).collect();
    rng.shuffle(&mut colors);
    colors
}

/// Builds tick-0 state: human at index 0, NPCs after it, each in its corner
/// slot with a 3×3 patch of starting territory.
pub fn create_initial_state(config: &MatchConfig) -> Result<MatchState, ConfigError> {
    config.validate()?;

    let size = config.grid_size as usize;
    let mut rng = Mulberry32::new(config.seed);
    let mut grid = GridWorld::new(size, size);
    let profile = npc_profile(config.difficulty);

    let mut agents = Vec::with_capacity(config.npc_count as usize + 1);
    agents.push(Agent::new_human(0, config.human_color, spawn_slot(0, size, size)));

    let colors = npc_colors(config.human_color, &mut rng);
    for n in 0..config.npc_count as usize {
        let id = n + 1;
        let heading = *rng.pick(&DIRECTIONS).unwrap_or(&DIRECTIONS[0]);
        let timer = rng.int_range(
            NPC_INITIAL_TIMER_BASE,
            NPC_INITIAL_TIMER_BASE + NPC_INITIAL_TIMER_SPAN - 1,
        );
        agents.push(Agent::new_npc(
            id,
            colors[n % colors.len()],
            spawn_slot(id, size, size),
            profile.base_speed,
            heading,
            timer,
        ));
    }

    for a in &agents {
        let (cx, cy) = a.cell();
        grid.paint_square(cx, cy, SAFE_ZONE_RADIUS, a.color);
    }

    Ok(MatchState {
        tick: 0,
        grid,
        agents,
        power_ups: Vec::new(),
        next_power_up_id: 0,
        rng,
        remaining_secs: config.duration_secs,
        match_over: false,
        config: config.clone(),
    })
}

/// Default 32×32 single-NPC match with the given seed.
pub fn default_config(seed: Seed) -> MatchConfig {
    MatchConfig {
        seed,
        ..MatchConfig::default()
    }
}
