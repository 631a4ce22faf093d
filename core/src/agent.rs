use crate::constants::*;
use crate::types::*;

/// Cell-centred corner slot for agent `index`, wrapping modulo the slot count.
/// Corners: top-left, top-right, bottom-left, bottom-right.
pub fn spawn_slot(index: usize, cols: usize, rows: usize) -> (f64, f64) {
    let (cols_i, rows_i) = (cols as i64, rows as i64);
    let (cx, cy) = match index % SPAWN_SLOT_COUNT {
        0 => (SPAWN_INSET, SPAWN_INSET),
        1 => (cols_i - 1 - SPAWN_INSET, SPAWN_INSET),
        2 => (SPAWN_INSET, rows_i - 1 - SPAWN_INSET),
        _ => (cols_i - 1 - SPAWN_INSET, rows_i - 1 - SPAWN_INSET),
    };
    let cx = cx.clamp(0, (cols_i - 1).max(0));
    let cy = cy.clamp(0, (rows_i - 1).max(0));
    (cx as f64 + 0.5, cy as f64 + 0.5)
}

/// Keeps a coordinate inside `[0.5, dim - 0.5]`.
pub fn clamp_to_arena(v: f64, dim: usize) -> f64 {
    v.max(EDGE_MARGIN).min(dim as f64 - EDGE_MARGIN)
}

impl Agent {
    pub fn new_human(id: AgentId, color: Color, (x, y): (f64, f64)) -> Self {
        Self::with_control(id, color, (x, y), HUMAN_BASE_SPEED, IDLE, Control::Human)
    }

    pub fn new_npc(
        id: AgentId,
        color: Color,
        (x, y): (f64, f64),
        base_speed: f64,
        heading: Intent,
        direction_change_timer: i32,
    ) -> Self {
        Self::with_control(
            id,
            color,
            (x, y),
            base_speed,
            heading,
            Control::Npc(NpcState {
                direction_change_timer,
            }),
        )
    }

    fn with_control(
        id: AgentId,
        color: Color,
        (x, y): (f64, f64),
        base_speed: f64,
        velocity: Intent,
        control: Control,
    ) -> Self {
        Self {
            id,
            color,
            x,
            y,
            velocity,
            base_speed,
            current_speed: base_speed,
            speed_multiplier: 1.0,
            speed_timer: 0,
            respawning: false,
            respawn_timer: 0,
            frozen: false,
            freeze_timer: 0,
            control,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.control, Control::Human)
    }

    /// Active agents move, paint, capture, collide, and collect power-ups.
    pub fn is_active(&self) -> bool {
        !self.respawning
    }

    pub fn npc_state_mut(&mut self) -> Option<&mut NpcState> {
        match &mut self.control {
            Control::Npc(state) => Some(state),
            Control::Human => None,
        }
    }

    pub fn cell(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let (dx, dy) = (self.x - x, self.y - y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Resolves respawn, speed and freeze timers, in that order.
    pub fn tick_timers(&mut self) {
        if self.respawning {
            self.respawn_timer -= 1;
            if self.respawn_timer <= 0 {
                self.respawning = false;
                self.respawn_timer = 0;
            }
        }

        if self.speed_timer > 0 {
            self.speed_timer -= 1;
            self.current_speed = self.base_speed * self.speed_multiplier;
            if self.speed_timer <= 0 {
                self.current_speed = self.base_speed;
                self.speed_multiplier = 1.0;
            }
        }

        if self.frozen {
            self.velocity = IDLE;
            self.freeze_timer -= 1;
            if self.freeze_timer <= 0 {
                self.frozen = false;
                self.freeze_timer = 0;
            }
        }
    }

    /// Advances position by one tick of velocity. Returns whether it moved.
    pub fn integrate(&mut self, cols: usize, rows: usize) -> bool {
        if self.respawning || self.frozen || self.velocity.is_idle() {
            return false;
        }
        self.x = clamp_to_arena(self.x + self.velocity.vx as f64 * self.current_speed, cols);
        self.y = clamp_to_arena(self.y + self.velocity.vy as f64 * self.current_speed, rows);
        true
    }

    /// Resets in place at `slot`; the agent sits out `RESPAWN_TICKS`.
    pub fn respawn_at(&mut self, (x, y): (f64, f64)) {
        self.x = x;
        self.y = y;
        self.velocity = IDLE;
        self.respawning = true;
        self.respawn_timer = RESPAWN_TICKS;
        self.current_speed = self.base_speed;
        self.speed_multiplier = 1.0;
        self.speed_timer = 0;
        self.frozen = false;
        self.freeze_timer = 0;
    }

    /// Arms (or re-arms) a temporary speed multiplier.
    pub fn boost(&mut self, ticks: i32, multiplier: f64) {
        self.speed_timer = ticks;
        self.speed_multiplier = multiplier;
        self.current_speed = self.base_speed * multiplier;
    }

    pub fn freeze(&mut self, ticks: i32) {
        self.frozen = true;
        self.freeze_timer = ticks;
    }

    pub fn effects(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.speed_timer > 0 {
            effects.push(Effect::Speed);
        }
        if self.frozen {
            effects.push(Effect::Frozen);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Color = Color(0x00FF99);

    fn mover(vx: i32, vy: i32) -> Agent {
        let mut a = Agent::new_human(0, GREEN, (5.5, 5.5));
        a.velocity = Intent::new(vx, vy);
        a
    }

    #[test]
    fn spawn_slots_sit_in_corners() {
        assert_eq!(spawn_slot(0, 32, 32), (5.5, 5.5));
        assert_eq!(spawn_slot(1, 32, 32), (26.5, 5.5));
        assert_eq!(spawn_slot(2, 32, 32), (5.5, 26.5));
        assert_eq!(spawn_slot(3, 32, 32), (26.5, 26.5));
        // wraps modulo slot count
        assert_eq!(spawn_slot(5, 32, 32), spawn_slot(1, 32, 32));
    }

    #[test]
    fn spawn_slots_stay_inside_small_arenas() {
        for i in 0..4 {
            let (x, y) = spawn_slot(i, 8, 8);
            assert!(x > 0.0 && x < 8.0 && y > 0.0 && y < 8.0);
        }
    }

    #[test]
    fn movement_scales_by_current_speed() {
        let mut a = mover(1, -1);
        assert!(a.integrate(32, 32));
        assert!((a.x - (5.5 + HUMAN_BASE_SPEED)).abs() < 1e-9);
        assert!((a.y - (5.5 - HUMAN_BASE_SPEED)).abs() < 1e-9);
    }

    #[test]
    fn movement_clamps_at_edges() {
        let mut a = mover(-1, 1);
        a.x = 0.55;
        a.y = 7.45;
        a.integrate(8, 8);
        assert_eq!(a.x, 0.5);
        assert_eq!(a.y, 7.5);
    }

    #[test]
    fn frozen_or_respawning_agents_stay_put() {
        let mut a = mover(1, 0);
        a.frozen = true;
        assert!(!a.integrate(32, 32));
        a.frozen = false;
        a.respawning = true;
        assert!(!a.integrate(32, 32));
        assert_eq!((a.x, a.y), (5.5, 5.5));
    }

    #[test]
    fn speed_buff_decays_to_base() {
        let mut a = mover(1, 0);
        a.boost(SPEED_BOOST_TICKS, SPEED_BOOST_MULTIPLIER);
        a.tick_timers();
        assert_eq!(a.current_speed, a.base_speed * 2.0);
        assert_eq!(a.effects(), vec![Effect::Speed]);

        a.speed_timer = 1;
        a.tick_timers();
        assert_eq!(a.speed_timer, 0);
        assert_eq!(a.current_speed, a.base_speed);
        assert!(a.effects().is_empty());
    }

    #[test]
    fn freeze_zeroes_velocity_until_expiry() {
        let mut a = mover(1, 1);
        a.freeze(2);
        a.tick_timers();
        assert!(a.frozen);
        assert!(a.velocity.is_idle());
        a.tick_timers();
        assert!(!a.frozen);
        assert_eq!(a.freeze_timer, 0);
    }

    #[test]
    fn respawn_timer_counts_down() {
        let mut a = mover(1, 0);
        a.respawn_at((2.5, 2.5));
        for _ in 0..RESPAWN_TICKS - 1 {
            a.tick_timers();
            assert!(a.respawning);
        }
        a.tick_timers();
        assert!(!a.respawning);
    }

    #[test]
    fn respawn_clears_buffs_and_freeze() {
        let mut a = mover(1, 0);
        a.boost(300, 2.0);
        a.freeze(300);
        a.respawn_at((3.5, 4.5));
        assert_eq!((a.x, a.y), (3.5, 4.5));
        assert!(a.velocity.is_idle());
        assert!(a.respawning);
        assert_eq!(a.respawn_timer, RESPAWN_TICKS);
        assert_eq!(a.current_speed, a.base_speed);
        assert_eq!(a.speed_timer, 0);
        assert!(!a.frozen);
    }
}
