use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;
use crate::types::*;

/// What a renderer needs to know about one agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub color: Color,
    pub x: f64,
    pub y: f64,
    pub is_human: bool,
    pub respawning: bool,
    pub frozen: bool,
    pub effects: Vec<Effect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub agent: AgentId,
    pub color: Color,
    pub cells: u32,
}

/// Read-only view of a match between ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub elapsed_secs: f64,
    pub remaining_secs: u32,
    pub match_over: bool,
    pub cols: usize,
    pub rows: usize,
    /// Row-major, `cols * rows` long.
    pub cells: Vec<Cell>,
    pub agents: Vec<AgentView>,
    pub power_ups: Vec<PowerUp>,
    pub scores: Vec<ScoreEntry>,
}

impl MatchState {
    /// Cell count per agent, in agent order, zero included.
    pub fn scores(&self) -> Vec<ScoreEntry> {
        let counts = self.grid.flatten_score();
        self.agents
            .iter()
            .enumerate()
            .map(|(agent, a)| ScoreEntry {
                agent,
                color: a.color,
                cells: counts.get(&a.color).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Scores sorted best first; ties keep agent order.
    pub fn standings(&self) -> Vec<ScoreEntry> {
        let mut scores = self.scores();
        scores.sort_by(|a, b| b.cells.cmp(&a.cells));
        scores
    }

    pub fn winner(&self) -> Option<AgentId> {
        self.standings().first().map(|s| s.agent)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            elapsed_secs: self.tick as f64 / TICK_RATE as f64,
            remaining_secs: self.remaining_secs,
            match_over: self.match_over,
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            cells: self.grid.cells().to_vec(),
            agents: self
                .agents
                .iter()
                .map(|a| AgentView {
                    id: a.id,
                    color: a.color,
                    x: a.x,
                    y: a.y,
                    is_human: a.is_human(),
                    respawning: a.respawning,
                    frozen: a.frozen,
                    effects: a.effects(),
                })
                .collect(),
            power_ups: self.power_ups.clone(),
            scores: self.scores(),
        }
    }
}
