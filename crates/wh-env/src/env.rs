//! The `Environment` struct: construction, queries, fault injection, and
//! termination.  The transition engine itself lives in [`crate::step`].

use tracing::info;

use wh_core::{AgentId, Cell, CostModel, Tick};
use wh_grid::{Arena, ArenaSpec, Grid, Tile};

use crate::{AgentRegistry, BoxLedger, EnvError, EnvResult};

/// The simulation state for one rollout.
///
/// Owns the grid, the agent registry, and the box ledger; all three are
/// mutated in place by [`step`](Self::step).  `Clone` is a deep copy, so a
/// driver can branch a rollout (or hand each worker thread its own copy)
/// without any shared state.
#[derive(Clone, Debug)]
pub struct Environment {
    pub(crate) grid:     Grid,
    pub(crate) registry: AgentRegistry,
    pub(crate) ledger:   BoxLedger,
    pub(crate) costs:    CostModel,
    pub(crate) tick:     Tick,
}

impl Environment {
    // ── Construction ──────────────────────────────────────────────────────

    /// Build the standard box-cluster arena with default costs.
    pub fn new(spec: &ArenaSpec) -> EnvResult<Self> {
        Self::with_costs(spec, CostModel::default())
    }

    /// Build the standard box-cluster arena with the given costs.
    pub fn with_costs(spec: &ArenaSpec, costs: CostModel) -> EnvResult<Self> {
        Self::from_arena(spec.build()?, costs)
    }

    /// Wrap an already-built arena (e.g. from [`wh_grid::LayoutBuilder`]).
    ///
    /// # Errors
    ///
    /// - [`EnvError::Config`] if `costs` violates the sign convention.
    /// - [`EnvError::InvariantViolation`] if an agent position does not hold
    ///   that agent's tile.
    pub fn from_arena(arena: Arena, costs: CostModel) -> EnvResult<Self> {
        costs.validate()?;
        let ledger = BoxLedger::new(arena.grid.box_cells());
        let env = Self {
            grid: arena.grid,
            registry: AgentRegistry::new(arena.agents),
            ledger,
            costs,
            tick: Tick::ZERO,
        };
        env.check_invariants()?;
        Ok(env)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Read-only view of the grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Number of agents, broken included.  Action and target slices passed
    /// to `step` must have this length.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn live_agent_count(&self) -> usize {
        self.registry.live_count()
    }

    #[inline]
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Every agent's position, indexed by `AgentId`.
    #[inline]
    pub fn positions(&self) -> &[Cell] {
        self.registry.positions()
    }

    pub fn agent_position(&self, agent: AgentId) -> EnvResult<Cell> {
        self.registry
            .position(agent)
            .ok_or(EnvError::UnknownAgent(agent))
    }

    /// `true` if `agent` is between a pickup and its drop-off.
    pub fn is_carrying(&self, agent: AgentId) -> EnvResult<bool> {
        match self.grid.get(self.agent_position(agent)?)? {
            Tile::Agent { id, carrying } if id == agent => Ok(carrying),
            other => Err(EnvError::InvariantViolation(format!(
                "{agent} registered at a cell holding {other:?}"
            ))),
        }
    }

    #[inline]
    pub fn is_broken(&self, agent: AgentId) -> bool {
        self.registry.is_broken(agent)
    }

    /// The current tick; equals the number of `step` calls so far.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn step_count(&self) -> u64 {
        self.tick.0
    }

    /// Box quadrants not yet picked up.
    #[inline]
    pub fn boxes_left(&self) -> usize {
        self.ledger.remaining()
    }

    /// Completed drop-offs.
    #[inline]
    pub fn delivered(&self) -> usize {
        self.ledger.delivered()
    }

    #[inline]
    pub fn ledger(&self) -> &BoxLedger {
        &self.ledger
    }

    /// Box cells neither claimed by a policy nor picked up, row-major.
    pub fn available_boxes(&self) -> Vec<Cell> {
        self.ledger.available()
    }

    /// Each agent's tile in the numeric observation encoding.
    pub fn agent_codes(&self) -> EnvResult<Vec<i32>> {
        self.positions()
            .iter()
            .map(|&cell| Ok(self.grid.get(cell)?.code()))
            .collect()
    }

    /// Flat row-major grid index of `agent`'s cell.
    pub fn agent_cell_index(&self, agent: AgentId) -> EnvResult<usize> {
        Ok(self.grid.index(self.agent_position(agent)?)?)
    }

    // ── Target bookkeeping for policy layers ──────────────────────────────

    /// Claim an available box cell as some agent's target.  Returns `false`
    /// if the cell was not available.
    pub fn claim_box(&mut self, cell: Cell) -> bool {
        self.ledger.claim(cell)
    }

    /// Return a claimed box cell to the available set.  Ignored unless the
    /// cell still holds an unclaimed box.
    pub fn release_box(&mut self, cell: Cell) -> bool {
        matches!(self.grid.get(cell), Ok(Tile::Box)) && self.ledger.release(cell)
    }

    // ── Termination ───────────────────────────────────────────────────────

    /// `true` exactly when no box quadrants remain.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.ledger.remaining() == 0
    }

    /// Administrative override: zero the remaining counter.  The grid is
    /// untouched, so carrying agents keep carrying.  Idempotent.
    pub fn force_finish(&mut self) {
        if !self.ledger.is_forced() {
            info!(tick = self.tick.0, boxes_left = self.ledger.remaining(), "rollout force-finished");
        }
        self.ledger.force_finish();
    }

    // ── Fault injection ───────────────────────────────────────────────────

    /// Permanently break `agent`.
    ///
    /// The agent stays on its cell as a static obstacle and is skipped by
    /// every later `step`.  Its entry in `targets` is cleared; a box it had
    /// claimed goes back to the available set.  Breaking an already broken
    /// agent is a no-op.
    ///
    /// # Errors
    ///
    /// - [`EnvError::UnknownAgent`] if `agent` is not registered.
    /// - [`EnvError::InvalidArgument`] if `targets` has the wrong length.
    pub fn break_robot(&mut self, agent: AgentId, targets: &mut [Option<Cell>]) -> EnvResult<()> {
        if !self.registry.contains(agent) {
            return Err(EnvError::UnknownAgent(agent));
        }
        if targets.len() != self.agent_count() {
            return Err(EnvError::InvalidArgument {
                what:     "targets",
                expected: self.agent_count(),
                got:      targets.len(),
            });
        }
        if !self.registry.mark_broken(agent) {
            return Ok(());
        }
        if let Some(target) = targets[agent.index()].take() {
            self.release_box(target);
        }
        info!(
            %agent,
            cell = %self.registry.position(agent).unwrap_or_default(),
            tick = self.tick.0,
            "robot broken"
        );
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Text rendering with `drop_offs` marked (see [`wh_grid::render`]).
    pub fn render(&self, drop_offs: &[Cell], redraw: bool) -> String {
        wh_grid::render(&self.grid, drop_offs, redraw)
    }

    /// Print [`render`](Self::render) to stdout.
    pub fn print(&self, drop_offs: &[Cell], redraw: bool) {
        print!("{}", self.render(drop_offs, redraw));
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Verify the grid/registry/ledger invariants.
    ///
    /// - every registered agent's cell holds that agent's tile;
    /// - the grid holds exactly `agent_count` agent tiles, none on the border;
    /// - the number of box tiles equals `boxes_left` (unless force-finished);
    /// - every available cell holds a box.
    pub fn check_invariants(&self) -> EnvResult<()> {
        let violation = |msg: String| Err(EnvError::InvariantViolation(msg));

        for (i, &cell) in self.positions().iter().enumerate() {
            let agent = AgentId(i as u32);
            match self.grid.get(cell)? {
                Tile::Agent { id, .. } if id == agent => {}
                other => return violation(format!("{agent} registered at {cell} holding {other:?}")),
            }
            if self.grid.is_border(cell) {
                return violation(format!("{agent} on border cell {cell}"));
            }
        }

        let agent_tiles = self.grid.count(|t| t.agent().is_some());
        if agent_tiles != self.agent_count() {
            return violation(format!(
                "{agent_tiles} agent tiles on the grid, {} agents registered",
                self.agent_count()
            ));
        }

        let box_tiles = self.grid.count(Tile::is_box);
        if !self.ledger.is_forced() && box_tiles != self.ledger.remaining() {
            return violation(format!(
                "{box_tiles} box tiles on the grid, ledger says {}",
                self.ledger.remaining()
            ));
        }

        for cell in self.ledger.available() {
            if !self.grid.get(cell)?.is_box() {
                return violation(format!("available cell {cell} holds no box"));
            }
        }
        Ok(())
    }
}
