//! The `Rollout` driver and its builder.

use tracing::{debug, info, warn};

use wh_core::rng::mix_seed;
use wh_core::{Action, AgentId, AgentRng, Cell, SimRng, Tick};
use wh_env::Environment;
use wh_policy::{Policy, PolicyContext};

use crate::{RolloutConfig, RolloutObserver, SimError, SimResult, TickReport};

/// Stream index of the fault RNG, above every `AgentId`.
const FAULT_STREAM: u64 = 1 << 32;

// ── Outcome ───────────────────────────────────────────────────────────────────

/// How a rollout ended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RolloutOutcome {
    /// Every box was picked up within the step budget, and no collision
    /// stopped the run early.
    pub success:    bool,
    /// Ticks executed.
    pub steps:      u64,
    pub total_cost: f64,
    /// Same-cell collisions plus swaps, summed over all ticks.
    pub collisions: usize,
    pub faults:     usize,
    pub delivered:  usize,
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`Rollout`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                           |
/// |-------------------|-----------------------------------|
/// | `.drop_offs(v)`   | Each agent's starting cell        |
/// | `.targets(v)`     | No agent has a target             |
pub struct RolloutBuilder<'p, P: Policy> {
    env:       Environment,
    policy:    &'p P,
    config:    RolloutConfig,
    drop_offs: Option<Vec<Cell>>,
    targets:   Option<Vec<Option<Cell>>>,
}

impl<'p, P: Policy> RolloutBuilder<'p, P> {
    pub fn new(env: Environment, policy: &'p P, config: RolloutConfig) -> Self {
        Self {
            env,
            policy,
            config,
            drop_offs: None,
            targets:   None,
        }
    }

    /// Supply the drop-off point per agent (must be length `agent_count`).
    pub fn drop_offs(mut self, drop_offs: Vec<Cell>) -> Self {
        self.drop_offs = Some(drop_offs);
        self
    }

    /// Supply initial targets (must be length `agent_count`).  Box targets
    /// are claimed on build.
    pub fn targets(mut self, targets: Vec<Option<Cell>>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Validate inputs and return a ready-to-run [`Rollout`].
    pub fn build(self) -> SimResult<Rollout<'p, P>> {
        self.config.validate()?;
        let mut env = self.env;
        let n = env.agent_count();

        let drop_offs = match self.drop_offs {
            Some(d) => {
                if d.len() != n {
                    return Err(SimError::AgentCountMismatch {
                        expected: n,
                        got:      d.len(),
                        what:     "drop-off points",
                    });
                }
                if let Some(bad) = d.iter().find(|&&c| !env.grid().contains(c) || env.grid().is_border(c)) {
                    return Err(SimError::Config(format!("drop-off point {bad} is outside the arena")));
                }
                d
            }
            None => env.positions().to_vec(),
        };

        let targets = match self.targets {
            Some(t) => {
                if t.len() != n {
                    return Err(SimError::AgentCountMismatch {
                        expected: n,
                        got:      t.len(),
                        what:     "targets",
                    });
                }
                t
            }
            None => vec![None; n],
        };
        let claimed: Vec<Option<Cell>> = targets
            .iter()
            .map(|t| t.filter(|&cell| env.claim_box(cell)))
            .collect();

        let seed = self.config.seed;
        Ok(Rollout {
            rngs:       (0..n as u32).map(|i| AgentRng::new(seed, AgentId(i))).collect(),
            sim_rng:    SimRng::new(mix_seed(seed, FAULT_STREAM)),
            config:     self.config,
            env,
            policy:     self.policy,
            drop_offs,
            targets,
            claimed,
            total_cost: 0.0,
            collisions: 0,
            faults:     0,
            stopped:    false,
        })
    }
}

// ── Rollout ───────────────────────────────────────────────────────────────────

/// Drives one environment from its initial state to termination.
///
/// Owns the environment and the target vector; borrows the policy so one
/// policy value can serve every rollout of a batch.  Create via
/// [`RolloutBuilder`].
pub struct Rollout<'p, P: Policy> {
    config:     RolloutConfig,
    env:        Environment,
    policy:     &'p P,
    drop_offs:  Vec<Cell>,
    targets:    Vec<Option<Cell>>,
    /// Box cell each agent claimed through the ledger, if any.
    claimed:    Vec<Option<Cell>>,
    rngs:       Vec<AgentRng>,
    sim_rng:    SimRng,
    total_cost: f64,
    collisions: usize,
    faults:     usize,
    /// Set when `stop_on_collision` ended the run.
    stopped:    bool,
}

impl<'p, P: Policy> Rollout<'p, P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every box is picked up, the step budget runs out, or (with
    /// `stop_on_collision`) the first conflict.
    pub fn run<O: RolloutObserver>(&mut self, observer: &mut O) -> SimResult<RolloutOutcome> {
        info!(
            policy = self.policy.name(),
            seed = self.config.seed,
            agents = self.env.agent_count(),
            boxes = self.env.boxes_left(),
            "rollout start"
        );
        observer.on_rollout_start(&self.env);

        while !self.env.is_done() {
            if self.env.step_count() >= self.config.max_steps {
                warn!(
                    seed = self.config.seed,
                    max_steps = self.config.max_steps,
                    boxes_left = self.env.boxes_left(),
                    "step budget exhausted"
                );
                self.env.force_finish();
                break;
            }
            let report = self.tick(observer)?;
            if self.config.stop_on_collision && report.step.had_conflict() {
                info!(seed = self.config.seed, tick = %report.tick, "stopping on collision");
                self.stopped = true;
                break;
            }
        }

        let outcome = self.outcome();
        info!(
            seed = self.config.seed,
            success = outcome.success,
            steps = outcome.steps,
            cost = outcome.total_cost,
            "rollout end"
        );
        observer.on_rollout_end(&outcome);
        Ok(outcome)
    }

    /// Execute exactly one tick: decide, step, inject faults.
    pub fn tick<O: RolloutObserver>(&mut self, observer: &mut O) -> SimResult<TickReport> {
        let now = self.env.tick();
        observer.on_tick_start(now);

        let actions = self.decide_all();
        let step = self.env.step_report(&actions, &self.targets)?;
        self.total_cost += step.cost;
        self.collisions += step.collisions + step.swaps;

        self.inject_fault(now, observer)?;

        let report = TickReport {
            tick:        now,
            step,
            boxes_left:  self.env.boxes_left(),
            live_agents: self.env.live_agent_count(),
        };
        debug!(tick = %now, cost = report.step.cost, boxes_left = report.boxes_left, "tick");
        observer.on_tick_end(now, &report, &self.env);
        Ok(report)
    }

    /// The outcome so far.  `success` is only true once every box has been
    /// picked up without a forced finish or a collision stop.
    pub fn outcome(&self) -> RolloutOutcome {
        RolloutOutcome {
            success:    self.env.is_done() && !self.env.ledger().is_forced() && !self.stopped,
            steps:      self.env.step_count(),
            total_cost: self.total_cost,
            collisions: self.collisions,
            faults:     self.faults,
            delivered:  self.env.delivered(),
        }
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn targets(&self) -> &[Option<Cell>] {
        &self.targets
    }

    #[inline]
    pub fn drop_offs(&self) -> &[Cell] {
        &self.drop_offs
    }

    #[inline]
    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Ask the policy for every live agent, in ascending id order.
    ///
    /// Each agent sees the targets and box claims of the agents decided
    /// before it, and the cells they are moving into.
    fn decide_all(&mut self) -> Vec<Action> {
        let n = self.env.agent_count();
        let mut actions = vec![Action::Stand; n];
        let mut reserved: Vec<Cell> = Vec::with_capacity(n);
        let live: Vec<AgentId> = self.env.registry().live_ids().collect();

        for agent in live {
            let i = agent.index();
            let decision = {
                let ctx = PolicyContext::new(
                    self.env.tick(),
                    &self.env,
                    &self.targets,
                    &self.drop_offs,
                    &reserved,
                );
                self.policy.decide(agent, &ctx, &mut self.rngs[i])
            };

            self.retarget(agent, decision.target);
            actions[i] = decision.action;
            if decision.action.is_move() {
                reserved.push(self.env.positions()[i].step(decision.action));
            }
        }
        actions
    }

    /// Point `agent` at `target`, moving its box claim along with it.
    fn retarget(&mut self, agent: AgentId, target: Option<Cell>) {
        let i = agent.index();
        if self.targets[i] == target {
            return;
        }
        if let Some(old) = self.claimed[i].take() {
            self.env.release_box(old);
        }
        if let Some(cell) = target {
            if self.env.claim_box(cell) {
                self.claimed[i] = Some(cell);
            }
        }
        self.targets[i] = target;
    }

    /// Maybe break one random live agent.
    fn inject_fault<O: RolloutObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        if self.faults >= self.config.max_faults || self.config.fault_rate <= 0.0 {
            return Ok(());
        }
        if !self.sim_rng.gen_bool(self.config.fault_rate) {
            return Ok(());
        }
        let live: Vec<AgentId> = self.env.registry().live_ids().collect();
        if live.is_empty() {
            return Ok(());
        }
        let victim = live[self.sim_rng.gen_range(0..live.len())];
        self.env.break_robot(victim, &mut self.targets)?;
        self.claimed[victim.index()] = None;
        self.faults += 1;
        observer.on_fault(now, victim);
        Ok(())
    }
}
