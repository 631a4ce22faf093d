use crate::agent::spawn_slot;
use crate::constants::*;
use crate::types::*;

pub fn agents_collide(a: &Agent, b: &Agent) -> bool {
    if a.respawning || b.respawning {
        return false;
    }
    a.distance_to(b.x, b.y) < COLLISION_RADIUS
}

/// Detects every overlapping pair on the current positions, then respawns
/// every agent involved. Both sides of a collision lose; the outcome does not
/// depend on pair iteration order.
pub fn resolve_collisions(agents: &mut [Agent], cols: usize, rows: usize) -> Vec<Collision> {
    let mut collisions = Vec::new();
    for i in 0..agents.len() {
        for j in i + 1..agents.len() {
            if agents_collide(&agents[i], &agents[j]) {
                collisions.push(Collision { a: i, b: j });
            }
        }
    }

    for c in &collisions {
        for idx in [c.a, c.b] {
            if !agents[idx].respawning {
                agents[idx].respawn_at(spawn_slot(idx, cols, rows));
            }
        }
        tracing::debug!(a = c.a, b = c.b, "agents collided");
    }

    collisions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npc_at(id: usize, color: u32, x: f64, y: f64) -> Agent {
        Agent::new_npc(id, Color(color), (x, y), 0.12, Intent::new(1, 0), 10)
    }

    #[test]
    fn close_pair_both_respawn_at_slots() {
        let mut agents = vec![
            Agent::new_human(0, Color(0x00FF99), (10.0, 10.0)),
            npc_at(1, 0xFF0055, 10.3, 10.2),
        ];
        agents[0].velocity = Intent::new(1, 0);
        agents[0].boost(300, 2.0);
        agents[1].freeze(300);

        let hits = resolve_collisions(&mut agents, 32, 32);
        assert_eq!(hits, vec![Collision { a: 0, b: 1 }]);
        for (idx, a) in agents.iter().enumerate() {
            assert!(a.respawning);
            assert_eq!(a.respawn_timer, RESPAWN_TICKS);
            assert!(a.velocity.is_idle());
            assert_eq!((a.x, a.y), spawn_slot(idx, 32, 32));
            assert_eq!(a.current_speed, a.base_speed);
            assert!(!a.frozen);
        }
    }

    #[test]
    fn pair_outside_radius_does_not_collide() {
        let mut agents = vec![npc_at(0, 1, 10.0, 10.0), npc_at(1, 2, 10.65, 10.0)];
        assert!(resolve_collisions(&mut agents, 32, 32).is_empty());
        assert!(!agents[0].respawning && !agents[1].respawning);
    }

    #[test]
    fn respawning_agents_cannot_collide() {
        let mut agents = vec![npc_at(0, 1, 10.0, 10.0), npc_at(1, 2, 10.0, 10.0)];
        agents[1].respawning = true;
        agents[1].respawn_timer = 50;
        assert!(resolve_collisions(&mut agents, 32, 32).is_empty());
        assert_eq!(agents[1].respawn_timer, 50);
    }

    #[test]
    fn three_way_pileup_respawns_everyone() {
        let mut agents = vec![
            npc_at(0, 1, 10.0, 10.0),
            npc_at(1, 2, 10.4, 10.0),
            npc_at(2, 3, 9.6, 10.0),
        ];
        let hits = resolve_collisions(&mut agents, 32, 32);
        assert_eq!(hits.len(), 2); // 1 and 2 are 0.8 apart
        assert!(agents.iter().all(|a| a.respawning));
    }
}
