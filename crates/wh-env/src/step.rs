//! The transition engine: resolve one tick of simultaneous agent actions.

use tracing::debug;

use wh_core::{Action, AgentId, Cell};
use wh_grid::Tile;

use crate::{EnvError, EnvResult, Environment};

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Sum of collision penalties, step costs, pickup and drop-off costs.
    pub cost:       f64,
    /// Agents whose candidate cell was already claimed this tick.
    pub collisions: usize,
    /// Pairs of agents that tried to exchange cells.
    pub swaps:      usize,
    pub pickups:    usize,
    pub drop_offs:  usize,
}

impl StepReport {
    /// `true` if the tick incurred any collision penalty.
    #[inline]
    pub fn had_conflict(&self) -> bool {
        self.collisions + self.swaps > 0
    }
}

impl Environment {
    /// Advance the simulation by one tick and return its cost.
    ///
    /// `actions[i]` and `targets[i]` belong to agent `i`; both slices must
    /// have length [`agent_count`](Self::agent_count).  Entries for broken
    /// agents are ignored.  A target of `None` means the agent has nothing
    /// to pick up or deliver this tick.
    ///
    /// # Errors
    ///
    /// - [`EnvError::InvalidArgument`] on a length mismatch.
    /// - [`EnvError::Grid`] (out of bounds) if a target or computed cell
    ///   lies outside the grid or on its border ring.
    /// - [`EnvError::InvariantViolation`] if conflict resolution leaves two
    ///   agents on one cell.
    ///
    /// All checks run before the grid is touched; on error the environment
    /// is unchanged.
    pub fn step(&mut self, actions: &[Action], targets: &[Option<Cell>]) -> EnvResult<f64> {
        self.step_report(actions, targets).map(|r| r.cost)
    }

    /// [`step`](Self::step), returning the full [`StepReport`].
    pub fn step_report(
        &mut self,
        actions: &[Action],
        targets: &[Option<Cell>],
    ) -> EnvResult<StepReport> {
        let n = self.agent_count();
        for (what, got) in [("actions", actions.len()), ("targets", targets.len())] {
            if got != n {
                return Err(EnvError::InvalidArgument { what, expected: n, got });
            }
        }
        for target in targets.iter().flatten() {
            self.grid.index(*target)?;
            if self.grid.is_border(*target) {
                return Err(wh_grid::GridError::OutOfBounds {
                    cell:   *target,
                    height: self.height(),
                    width:  self.width(),
                }
                .into());
            }
        }

        let now = self.tick;
        let collision_cost = self.costs.collision_at(now);
        let live: Vec<AgentId> = self.registry.live_ids().collect();
        let current: Vec<Cell> = self.registry.positions().to_vec();
        let mut report = StepReport::default();

        // ── ① Propose moves / ② same-cell collisions ─────────────────────
        //
        // `claims` is a scratch occupancy map over the whole grid.  The
        // second agent to claim a cell pays the collision penalty; the move
        // itself is not rejected here.
        let mut proposed = current.clone();
        let mut claims: Vec<Option<AgentId>> = vec![None; self.grid.tiles().len()];
        let mut carrying = vec![false; n];

        for &agent in &live {
            let i = agent.index();
            let from = current[i];
            carrying[i] = self.is_carrying(agent)?;
            let to = from.step(actions[i]);

            let enterable = match self.grid.get(to)? {
                Tile::Empty => true,
                Tile::Wall => false,
                Tile::Box => targets[i] == Some(to) && !carrying[i],
                Tile::Agent { id, .. } => !self.registry.is_broken(id),
            };
            if enterable {
                proposed[i] = to;
            }

            let slot = self.grid.index(proposed[i])?;
            match claims[slot] {
                None => claims[slot] = Some(agent),
                Some(first) => {
                    report.cost += collision_cost;
                    report.collisions += 1;
                    debug!(tick = now.0, %agent, %first, cell = %proposed[i], "collision");
                }
            }
        }

        // ── ③ Swap detection ──────────────────────────────────────────────
        //
        // The grid still holds last tick's tiles, so the occupant of an
        // agent's candidate cell is read straight off it.
        let mut swapping: Vec<(AgentId, AgentId)> = Vec::new();
        for &agent in &live {
            let i = agent.index();
            if proposed[i] == current[i] {
                continue;
            }
            let Some(other) = self.grid.get(proposed[i])?.agent() else {
                continue;
            };
            if other > agent && proposed[other.index()] == current[i] {
                report.cost += collision_cost;
                report.swaps += 1;
                swapping.push((agent, other));
                debug!(tick = now.0, %agent, %other, "swap");
            }
        }

        // ── Resolve conflicts ─────────────────────────────────────────────
        let next = self.resolve(&live, &current, proposed, &swapping)?;

        // ── ④ Vacate ──────────────────────────────────────────────────────
        let mut held: Vec<Tile> = vec![Tile::Empty; n];
        for &agent in &live {
            let i = agent.index();
            held[i] = self.grid.get(current[i])?;
            self.grid.set(current[i], Tile::Empty)?;
        }

        // ── ⑤ Step cost ───────────────────────────────────────────────────
        for &agent in &live {
            if actions[agent.index()].is_move() {
                report.cost += self.costs.step;
            }
        }

        // ── ⑥ Commit positions, pickup / drop-off ─────────────────────────
        for &agent in &live {
            let i = agent.index();
            let dest = next[i];
            let mut tile = held[i];

            if dest != current[i] && targets[i] == Some(dest) {
                match self.grid.get(dest)? {
                    Tile::Box if !carrying[i] => {
                        if !self.ledger.pick_up(dest) {
                            return Err(EnvError::InvariantViolation(format!(
                                "{agent} picked up {dest} with no boxes remaining"
                            )));
                        }
                        report.cost += self.costs.pickup;
                        report.pickups += 1;
                        tile = tile.with_carrying(true);
                        debug!(tick = now.0, %agent, cell = %dest, "pickup");
                    }
                    Tile::Empty if carrying[i] => {
                        self.ledger.drop_off();
                        report.cost += self.costs.drop_off;
                        report.drop_offs += 1;
                        tile = tile.with_carrying(false);
                        debug!(tick = now.0, %agent, cell = %dest, "drop-off");
                    }
                    _ => {}
                }
            }
            self.grid.set(dest, tile)?;
        }

        // ── ⑦ Commit registry, advance tick ───────────────────────────────
        self.registry.commit(next);
        self.tick = now.next();

        #[cfg(debug_assertions)]
        self.check_invariants()?;

        Ok(report)
    }

    /// Turn candidate cells into final cells with exactly one agent per cell.
    ///
    /// Swapping pairs revert.  Then, until stable: when two agents claim one
    /// cell, an agent already standing there keeps it, otherwise the lower
    /// id keeps it; the loser reverts to its current cell.  Reverting only
    /// ever turns a mover into a stayer and stayers never lose, so this
    /// terminates within `live.len()` passes.
    fn resolve(
        &self,
        live:     &[AgentId],
        current:  &[Cell],
        mut next: Vec<Cell>,
        swapping: &[(AgentId, AgentId)],
    ) -> EnvResult<Vec<Cell>> {
        for &(a, b) in swapping {
            next[a.index()] = current[a.index()];
            next[b.index()] = current[b.index()];
        }

        let mut owner: Vec<Option<AgentId>> = vec![None; self.grid.tiles().len()];
        for _ in 0..=live.len() {
            owner.fill(None);
            let mut changed = false;

            for &agent in live {
                let i = agent.index();
                let slot = self.grid.index(next[i])?;
                match owner[slot] {
                    None => owner[slot] = Some(agent),
                    Some(holder) => {
                        let h = holder.index();
                        if next[i] == current[i] {
                            next[h] = current[h];
                            owner[slot] = Some(agent);
                        } else {
                            next[i] = current[i];
                        }
                        changed = true;
                    }
                }
            }

            if !changed {
                return Ok(next);
            }
        }

        Err(EnvError::InvariantViolation(
            "conflict resolution did not converge".into(),
        ))
    }
}
