//! Per-tick steering for non-human agents, plus the insane-mode cheat events.
//!
//! Each NPC holds a countdown. When it runs out the NPC picks one of three
//! behaviours, in priority order:
//!  1. chase the nearest power-up (difficulty-scaled chance)
//!  2. on its own territory: keep carving a straight edge, or turn 90°
//!  3. off its own territory: probe all 8 headings and take the best one

use crate::agent::clamp_to_arena;
use crate::constants::*;
use crate::grid::GridWorld;
use crate::prng::Mulberry32;
use crate::types::*;

/// Coarse heading toward a target: each axis moves only past a half-cell deadband.
pub fn heading_toward(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> Intent {
    let axis = |d: f64| -> i32 {
        if d > 0.5 {
            1
        } else if d < -0.5 {
            -1
        } else {
            0
        }
    };
    Intent::new(axis(to_x - from_x), axis(to_y - from_y))
}

pub fn nearest_power_up<'a>(agent: &Agent, power_ups: &'a [PowerUp]) -> Option<&'a PowerUp> {
    power_ups.iter().fold(None, |best: Option<&PowerUp>, pu| match best {
        Some(b) if agent.distance_to(b.x, b.y) <= agent.distance_to(pu.x, pu.y) => Some(b),
        _ => Some(pu),
    })
}

/// Score of heading `dir` from the agent's position, probing `look_ahead` cells out.
pub fn score_direction(agent: &Agent, dir: Intent, grid: &GridWorld, profile: &NpcProfile) -> i32 {
    let steps = profile.look_ahead as f64;
    let cx = (agent.x + dir.vx as f64 * steps).floor() as i64;
    let cy = (agent.y + dir.vy as f64 * steps).floor() as i64;
    if !grid.in_bounds(cx, cy) {
        return OFF_GRID_SCORE;
    }
    match grid.get(cx, cy) {
        None => EMPTY_CELL_SCORE,
        Some(c) if c == agent.color => OWN_CELL_SCORE,
        Some(_) => profile.enemy_cell_score,
    }
}

/// Highest-scoring heading; ties keep the earlier entry of [`DIRECTIONS`].
pub fn best_direction(agent: &Agent, grid: &GridWorld, profile: &NpcProfile) -> Option<Intent> {
    let mut best: Option<(Intent, i32)> = None;
    for dir in DIRECTIONS {
        let score = score_direction(agent, dir, grid, profile);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((dir, score));
        }
    }
    best.filter(|(_, s)| *s > OFF_GRID_SCORE).map(|(dir, _)| dir)
}

/// Runs one tick of the NPC state machine. Humans, frozen and respawning
/// agents are skipped without touching their timer.
pub fn update_npc(
    agent: &mut Agent,
    grid: &GridWorld,
    power_ups: &[PowerUp],
    profile: &NpcProfile,
    rng: &mut Mulberry32,
) {
    if agent.frozen || agent.respawning {
        return;
    }
    let timer = match agent.npc_state_mut() {
        Some(npc) => {
            npc.direction_change_timer -= 1;
            npc.direction_change_timer
        }
        None => return,
    };
    if timer > 0 {
        return;
    }

    let next_timer = decide(agent, grid, power_ups, profile, rng);
    if let Some(npc) = agent.npc_state_mut() {
        npc.direction_change_timer = next_timer;
    }
}

/// Picks a new heading and returns how long to hold it.
fn decide(
    agent: &mut Agent,
    grid: &GridWorld,
    power_ups: &[PowerUp],
    profile: &NpcProfile,
    rng: &mut Mulberry32,
) -> i32 {
    // 1. Power-up seeking
    if !power_ups.is_empty() && rng.chance(profile.power_up_seek_chance) {
        if let Some(target) = nearest_power_up(agent, power_ups) {
            agent.velocity = heading_toward(agent.x, agent.y, target.x, target.y);
            return profile.power_up_recheck_ticks;
        }
    }

    if grid.owner_at(agent.x, agent.y) == Some(agent.color) {
        // 2. Own territory: hold a straight stroke while the next cell is not ours
        if !agent.velocity.is_idle() {
            let nx = (agent.x + agent.velocity.vx as f64).floor() as i64;
            let ny = (agent.y + agent.velocity.vy as f64).floor() as i64;
            if grid.in_bounds(nx, ny) && grid.get(nx, ny) != Some(agent.color) {
                return profile.straight_run_ticks
                    + rng.int_range(0, STRAIGHT_RUN_JITTER_TICKS - 1);
            }
        }

        agent.velocity = if agent.velocity.is_idle() {
            *rng.pick(&AXIS_DIRECTIONS).unwrap_or(&AXIS_DIRECTIONS[0])
        } else if rng.chance(0.5) {
            agent.velocity.turned_right()
        } else {
            agent.velocity.turned_left()
        };
    } else if let Some(dir) = best_direction(agent, grid, profile) {
        // 3. Off territory: probe and steer
        agent.velocity = dir;
    }

    profile.rearm_base_ticks + rng.int_range(0, profile.rearm_base_ticks - 1)
}

/// Insane-mode rubber-banding. With a small chance per tick, one random active
/// NPC either gets a speed burst or teleports near the human.
pub fn maybe_cheat(
    agents: &mut [Agent],
    cheats: &CheatConfig,
    cols: usize,
    rows: usize,
    rng: &mut Mulberry32,
) -> Option<CheatEvent> {
    if !rng.chance(cheats.chance_per_tick) {
        return None;
    }
    let candidates: Vec<AgentId> = agents
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.is_human() && a.is_active())
        .map(|(i, _)| i)
        .collect();
    let idx = *rng.pick(&candidates)?;

    let kind = if rng.chance(cheats.speed_burst_share) {
        agents[idx].boost(cheats.speed_burst_ticks, cheats.speed_multiplier);
        CheatKind::SpeedBurst
    } else {
        let (hx, hy) = agents
            .iter()
            .find(|a| a.is_human())
            .map(|h| (h.x, h.y))
            .unwrap_or((cols as f64 / 2.0, rows as f64 / 2.0));
        let jx = (rng.next_f64() - 0.5) * cheats.teleport_jitter;
        let jy = (rng.next_f64() - 0.5) * cheats.teleport_jitter;
        agents[idx].x = clamp_to_arena(hx + jx, cols);
        agents[idx].y = clamp_to_arena(hy + jy, rows);
        CheatKind::Teleport
    };

    tracing::debug!(agent = idx, ?kind, "npc cheat triggered");
    Some(CheatEvent { agent: idx, kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: Color = Color(0xFF0055);
    const ENEMY: Color = Color(0x00FF99);

    fn npc(x: f64, y: f64, heading: Intent, timer: i32) -> Agent {
        Agent::new_npc(1, ME, (x, y), 0.12, heading, timer)
    }

    fn timer_of(agent: &Agent) -> i32 {
        match agent.control {
            Control::Npc(s) => s.direction_change_timer,
            Control::Human => panic!("not an npc"),
        }
    }

    #[test]
    fn heading_uses_half_cell_deadband() {
        assert_eq!(heading_toward(5.0, 5.0, 8.0, 5.3), Intent::new(1, 0));
        assert_eq!(heading_toward(5.0, 5.0, 2.0, 1.0), Intent::new(-1, -1));
        assert_eq!(heading_toward(5.0, 5.0, 5.4, 4.6), IDLE);
    }

    #[test]
    fn timer_counts_down_before_deciding() {
        let grid = GridWorld::new(16, 16);
        let mut rng = Mulberry32::new(1);
        let mut a = npc(8.5, 8.5, Intent::new(1, 0), 5);
        update_npc(&mut a, &grid, &[], &npc_profile(Difficulty::Normal), &mut rng);
        assert_eq!(timer_of(&a), 4);
        assert_eq!(a.velocity, Intent::new(1, 0));
        assert_eq!(rng.state(), 1);
    }

    #[test]
    fn frozen_npc_is_skipped_entirely() {
        let grid = GridWorld::new(16, 16);
        let mut rng = Mulberry32::new(1);
        let mut a = npc(8.5, 8.5, IDLE, 1);
        a.freeze(10);
        update_npc(&mut a, &grid, &[], &npc_profile(Difficulty::Insane), &mut rng);
        assert_eq!(timer_of(&a), 1);
    }

    #[test]
    fn insane_npc_chases_nearest_power_up() {
        let grid = GridWorld::new(16, 16);
        let power_ups = [
            PowerUp { id: 0, x: 14.5, y: 14.5, kind: PowerUpKind::Bomb },
            PowerUp { id: 1, x: 2.5, y: 8.5, kind: PowerUpKind::Speed },
        ];
        let profile = npc_profile(Difficulty::Insane);
        // 0.95 seek chance: over many seeds almost every decision chases
        let mut chased = 0;
        for seed in 0..100 {
            let mut rng = Mulberry32::new(seed);
            let mut a = npc(5.5, 8.5, Intent::new(0, 1), 1);
            update_npc(&mut a, &grid, &power_ups, &profile, &mut rng);
            if a.velocity == Intent::new(-1, 0) {
                assert_eq!(timer_of(&a), profile.power_up_recheck_ticks);
                chased += 1;
            }
        }
        assert!(chased > 80, "chased {chased}/100");
    }

    #[test]
    fn own_territory_keeps_straight_toward_unclaimed() {
        let mut grid = GridWorld::new(16, 16);
        grid.paint_square(5, 5, 1, ME);
        let profile = npc_profile(Difficulty::Normal);
        let mut rng = Mulberry32::new(3);
        // at the right edge of own block, heading right into empty space
        let mut a = npc(6.5, 5.5, Intent::new(1, 0), 1);
        update_npc(&mut a, &grid, &[], &profile, &mut rng);
        assert_eq!(a.velocity, Intent::new(1, 0));
        let t = timer_of(&a);
        assert!((30..40).contains(&t), "timer {t}");
    }

    #[test]
    fn own_territory_turns_when_next_cell_is_own() {
        let mut grid = GridWorld::new(16, 16);
        grid.paint_square(5, 5, 1, ME);
        let profile = npc_profile(Difficulty::Normal);
        let mut rng = Mulberry32::new(3);
        let mut a = npc(5.5, 5.5, Intent::new(1, 0), 1);
        update_npc(&mut a, &grid, &[], &profile, &mut rng);
        assert!(a.velocity == Intent::new(0, 1) || a.velocity == Intent::new(0, -1));
        let t = timer_of(&a);
        assert!((25..50).contains(&t), "timer {t}");
    }

    #[test]
    fn idle_npc_on_own_territory_starts_moving() {
        let mut grid = GridWorld::new(16, 16);
        grid.paint_square(5, 5, 1, ME);
        let mut rng = Mulberry32::new(11);
        let mut a = npc(5.5, 5.5, IDLE, 1);
        update_npc(&mut a, &grid, &[], &npc_profile(Difficulty::Normal), &mut rng);
        assert!(AXIS_DIRECTIONS.contains(&a.velocity));
    }

    #[test]
    fn off_territory_avoids_walls_and_prefers_empty() {
        let grid = GridWorld::new(16, 16);
        let profile = npc_profile(Difficulty::Normal);
        // in the top-left corner only right/down/down-right stay in bounds
        let a = npc(1.5, 1.5, Intent::new(-1, -1), 1);
        assert_eq!(best_direction(&a, &grid, &profile), Some(Intent::new(1, 0)));
        assert_eq!(score_direction(&a, Intent::new(-1, 0), &grid, &profile), OFF_GRID_SCORE);
    }

    #[test]
    fn enemy_cells_repel_on_normal_and_attract_on_insane() {
        let mut grid = GridWorld::new(20, 20);
        // enemy 3 cells right, own 3 cells left; everything else empty
        grid.paint_cell(13, 10, ENEMY);
        grid.paint_cell(15, 10, ENEMY);
        let a = npc(10.5, 10.5, IDLE, 1);

        let normal = npc_profile(Difficulty::Normal);
        assert_eq!(score_direction(&a, Intent::new(1, 0), &grid, &normal), -5);
        assert_ne!(best_direction(&a, &grid, &normal), Some(Intent::new(1, 0)));

        let insane = npc_profile(Difficulty::Insane);
        assert_eq!(score_direction(&a, Intent::new(1, 0), &grid, &insane), 15);
        assert_eq!(best_direction(&a, &grid, &insane), Some(Intent::new(1, 0)));
    }

    #[test]
    fn cheat_never_fires_at_zero_chance() {
        let mut agents = vec![
            Agent::new_human(0, ENEMY, (5.5, 5.5)),
            npc(20.5, 20.5, Intent::new(1, 0), 10),
        ];
        let cheats = CheatConfig { chance_per_tick: 0.0, ..CheatConfig::default() };
        let mut rng = Mulberry32::new(9);
        for _ in 0..1000 {
            assert!(maybe_cheat(&mut agents, &cheats, 32, 32, &mut rng).is_none());
        }
    }

    #[test]
    fn teleport_lands_near_the_human() {
        let mut agents = vec![
            Agent::new_human(0, ENEMY, (16.5, 16.5)),
            npc(2.5, 2.5, Intent::new(1, 0), 10),
        ];
        let cheats = CheatConfig {
            chance_per_tick: 1.0,
            speed_burst_share: 0.0,
            ..CheatConfig::default()
        };
        let mut rng = Mulberry32::new(9);
        let ev = maybe_cheat(&mut agents, &cheats, 32, 32, &mut rng).unwrap();
        assert_eq!(ev, CheatEvent { agent: 1, kind: CheatKind::Teleport });
        assert!((agents[1].x - 16.5).abs() <= 5.0);
        assert!((agents[1].y - 16.5).abs() <= 5.0);
    }

    #[test]
    fn speed_burst_triples_base_speed() {
        let mut agents = vec![
            Agent::new_human(0, ENEMY, (16.5, 16.5)),
            npc(2.5, 2.5, Intent::new(1, 0), 10),
        ];
        let cheats = CheatConfig {
            chance_per_tick: 1.0,
            speed_burst_share: 1.0,
            ..CheatConfig::default()
        };
        let mut rng = Mulberry32::new(9);
        let ev = maybe_cheat(&mut agents, &cheats, 32, 32, &mut rng).unwrap();
        assert_eq!(ev.kind, CheatKind::SpeedBurst);
        assert!((agents[1].current_speed - 0.36).abs() < 1e-9);
        assert_eq!(agents[1].speed_timer, CHEAT_SPEED_BURST_TICKS);
        agents[1].tick_timers();
        assert!((agents[1].current_speed - 0.36).abs() < 1e-9);
    }

    #[test]
    fn cheat_skips_when_no_active_npc() {
        let mut agents = vec![Agent::new_human(0, ENEMY, (16.5, 16.5))];
        let cheats = CheatConfig { chance_per_tick: 1.0, ..CheatConfig::default() };
        let mut rng = Mulberry32::new(9);
        assert!(maybe_cheat(&mut agents, &cheats, 32, 32, &mut rng).is_none());
    }
}
