//! Nearest-box greedy policy.
//!
//! ```text
//! not carrying:  keep the claimed box if it is still there,
//!                else take the nearest available box (row-major tie-break)
//! carrying:      head for the agent's drop-off point
//! each tick:     one step that lowers the Manhattan distance to the target,
//!                over cells that are free and not reserved this tick;
//!                if none exists, sidestep at random with probability `jitter`
//! ```
//!
//! There is no path search, so agents can wedge behind walls or each other.
//! The jitter is what eventually shakes them loose.

use wh_core::{Action, AgentId, AgentRng, Cell};
use wh_grid::Tile;

use crate::{Decision, Policy, PolicyContext, PolicyError, PolicyResult};

#[derive(Clone, Debug)]
pub struct Greedy {
    jitter: f64,
}

impl Default for Greedy {
    fn default() -> Self {
        Self { jitter: 0.25 }
    }
}

impl Greedy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the probability of a random sidestep when no move gets closer.
    ///
    /// # Errors
    ///
    /// [`PolicyError::Config`] unless `0.0 <= jitter <= 1.0`.
    pub fn with_jitter(jitter: f64) -> PolicyResult<Self> {
        if !(0.0..=1.0).contains(&jitter) {
            return Err(PolicyError::Config(format!(
                "jitter must lie in [0, 1], got {jitter}"
            )));
        }
        Ok(Self { jitter })
    }

    #[inline]
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    fn choose_target(&self, agent: AgentId, ctx: &PolicyContext<'_>, here: Cell, carrying: bool) -> Option<Cell> {
        if carrying {
            return ctx.drop_off(agent);
        }
        if let Some(cell) = ctx.target(agent) {
            if matches!(ctx.env.grid().get(cell), Ok(Tile::Box)) && !ctx.env.ledger().is_available(cell) {
                return Some(cell);
            }
        }
        ctx.env
            .available_boxes()
            .into_iter()
            .min_by_key(|&cell| (here.manhattan(cell), cell))
    }
}

/// `true` if an agent may step onto `cell` while working towards `target`.
fn passable(ctx: &PolicyContext<'_>, cell: Cell, target: Cell, carrying: bool) -> bool {
    if ctx.is_reserved(cell) {
        return false;
    }
    match ctx.env.grid().get(cell) {
        Ok(Tile::Empty) => true,
        Ok(Tile::Box) => cell == target && !carrying,
        _ => false,
    }
}

impl Policy for Greedy {
    fn decide(
        &self,
        agent: AgentId,
        ctx:   &PolicyContext<'_>,
        rng:   &mut AgentRng,
    ) -> Decision {
        let (Ok(here), Ok(carrying)) = (ctx.env.agent_position(agent), ctx.env.is_carrying(agent)) else {
            return Decision::stand();
        };
        let Some(target) = self.choose_target(agent, ctx, here, carrying) else {
            return Decision::stand();
        };
        if here == target {
            return Decision::new(Action::Stand, Some(target));
        }

        let distance = here.manhattan(target);
        let mut moves: Vec<Action> = Action::MOVES
            .into_iter()
            .filter(|&a| {
                let next = here.step(a);
                next.manhattan(target) < distance && passable(ctx, next, target, carrying)
            })
            .collect();

        if moves.is_empty() && rng.gen_bool(self.jitter) {
            moves = Action::MOVES
                .into_iter()
                .filter(|&a| passable(ctx, here.step(a), target, carrying))
                .collect();
        }

        let action = rng.choose(&moves).copied().unwrap_or(Action::Stand);
        Decision::new(action, Some(target))
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
