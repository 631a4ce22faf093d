use crate::constants::*;
use crate::types::*;

// ── Spawner ─────────────────────────────────────────────────

/// One spawn attempt. Below the active cap it succeeds with
/// `POWER_UP_SPAWN_CHANCE`, placing a uniformly random kind on an interior cell.
pub fn try_spawn_power_up(state: &mut MatchState) -> Option<PowerUp> {
    if state.power_ups.len() >= MAX_ACTIVE_POWER_UPS {
        return None;
    }
    if !state.rng.chance(POWER_UP_SPAWN_CHANCE) {
        return None;
    }

    let kind = POWER_UP_KINDS[state.rng.below(POWER_UP_KINDS.len())];
    let cols = state.grid.cols() as i32;
    let rows = state.grid.rows() as i32;
    let cx = state.rng.int_range(1, cols - 2);
    let cy = state.rng.int_range(1, rows - 2);

    let pu = PowerUp {
        id: state.next_power_up_id,
        x: cx as f64 + 0.5,
        y: cy as f64 + 0.5,
        kind,
    };
    state.next_power_up_id = state.next_power_up_id.wrapping_add(1);
    state.power_ups.push(pu);
    tracing::debug!(id = pu.id, ?kind, x = cx, y = cy, "power-up spawned");
    Some(pu)
}

// ── Pickup ──────────────────────────────────────────────────

/// Consumes every power-up within `PICKUP_RADIUS` of an active agent.
/// Agents are scanned in order, so the earlier agent wins a contested one.
pub fn resolve_pickups(state: &mut MatchState, events: &mut TickEvents) {
    for idx in 0..state.agents.len() {
        if !state.agents[idx].is_active() {
            continue;
        }
        let mut i = 0;
        while i < state.power_ups.len() {
            let pu = state.power_ups[i];
            if state.agents[idx].distance_to(pu.x, pu.y) < PICKUP_RADIUS {
                state.power_ups.remove(i);
                events.pickups.push(Pickup {
                    agent: idx,
                    power_up_id: pu.id,
                    kind: pu.kind,
                });
                tracing::debug!(agent = idx, id = pu.id, kind = ?pu.kind, "power-up collected");
                if let Some(swap) = apply_power_up(state, idx, pu.kind) {
                    events.swaps.push(swap);
                }
            } else {
                i += 1;
            }
        }
    }
}

// ── Effects ─────────────────────────────────────────────────

/// Applies `kind` on behalf of agent `picker`. Returns the swap pairing when a
/// SWAP found a target.
pub fn apply_power_up(state: &mut MatchState, picker: AgentId, kind: PowerUpKind) -> Option<Swap> {
    match kind {
        PowerUpKind::Speed => {
            state.agents[picker].boost(SPEED_BOOST_TICKS, SPEED_BOOST_MULTIPLIER);
            None
        }
        PowerUpKind::Freeze => {
            for (i, other) in state.agents.iter_mut().enumerate() {
                if i != picker {
                    other.freeze(FREEZE_TICKS);
                }
            }
            None
        }
        PowerUpKind::Bomb => {
            let (cx, cy) = state.agents[picker].cell();
            let color = state.agents[picker].color;
            state.grid.paint_disc(cx, cy, BOMB_RADIUS, color);
            None
        }
        PowerUpKind::Swap => {
            let target = choose_swap_target(state, picker)?;
            let (mine, theirs) = (state.agents[picker].color, state.agents[target].color);
            let changed = state.grid.swap_colors(mine, theirs);
            tracing::debug!(picker, target, changed, "territories swapped");
            Some(Swap { picker, target })
        }
    }
}

/// Opponents are active agents of a different colour. Insane NPCs go for the
/// human most of the time, otherwise the leader; everyone else flips between
/// the leader and a random opponent.
pub fn choose_swap_target(state: &mut MatchState, picker: AgentId) -> Option<AgentId> {
    let my_color = state.agents[picker].color;
    let opponents: Vec<AgentId> = state
        .agents
        .iter()
        .enumerate()
        .filter(|(_, a)| a.color != my_color && a.is_active())
        .map(|(i, _)| i)
        .collect();
    if opponents.is_empty() {
        return None;
    }

    let scores = state.grid.flatten_score();
    let cells_of = |i: AgentId| scores.get(&state.agents[i].color).copied().unwrap_or(0);
    // first maximum in agent order
    let leader = opponents
        .iter()
        .copied()
        .fold(None, |best: Option<AgentId>, i| match best {
            Some(b) if cells_of(b) >= cells_of(i) => Some(b),
            _ => Some(i),
        })?;

    let insane_npc =
        state.config.difficulty == Difficulty::Insane && !state.agents[picker].is_human();
    if insane_npc {
        let human = opponents.iter().copied().find(|&i| state.agents[i].is_human());
        match human {
            Some(h) if state.rng.chance(SWAP_TARGET_HUMAN_CHANCE) => Some(h),
            _ => Some(leader),
        }
    } else if state.rng.chance(SWAP_TARGET_LEADER_CHANCE) {
        Some(leader)
    } else {
        state.rng.pick(&opponents).copied()
    }
}
