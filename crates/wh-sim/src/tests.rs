//! Integration tests for wh-sim.

use wh_core::{Action, AgentId, Cell, CostModel, Tick};
use wh_env::Environment;
use wh_grid::{ArenaSpec, LayoutBuilder};
use wh_policy::{Decision, Greedy, Scripted, StandStill};

use crate::{
    BatchConfig, NoopObserver, RolloutBuilder, RolloutConfig, RolloutObserver, RolloutOutcome,
    TickReport, run_batch,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn c(row: i32, col: i32) -> Cell {
    Cell::new(row, col)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn config(max_steps: u64) -> RolloutConfig {
    RolloutConfig { max_steps, ..RolloutConfig::default() }
}

fn one_box_env() -> Environment {
    let arena = LayoutBuilder::new(3, 5).agent(c(1, 1)).boxed(c(1, 2)).build().unwrap();
    Environment::from_arena(arena, CostModel::default()).unwrap()
}

fn standard_env(agent_count: usize) -> Environment {
    let spec = ArenaSpec { agent_count, ..ArenaSpec::default() };
    Environment::new(&spec).unwrap()
}

/// Counts every callback.
#[derive(Default)]
struct Recorder {
    starts:      usize,
    tick_starts: Vec<Tick>,
    tick_ends:   Vec<TickReport>,
    faults:      Vec<(Tick, AgentId)>,
    ends:        Vec<RolloutOutcome>,
}

impl RolloutObserver for Recorder {
    fn on_rollout_start(&mut self, _env: &Environment) {
        self.starts += 1;
    }

    fn on_tick_start(&mut self, tick: Tick) {
        self.tick_starts.push(tick);
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport, _env: &Environment) {
        self.tick_ends.push(report.clone());
    }

    fn on_fault(&mut self, tick: Tick, agent: AgentId) {
        self.faults.push((tick, agent));
    }

    fn on_rollout_end(&mut self, outcome: &RolloutOutcome) {
        self.ends.push(outcome.clone());
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(RolloutConfig::default().validate().is_ok());
        assert_eq!(BatchConfig::default().rollout, RolloutConfig::default());
    }

    #[test]
    fn bad_values_rejected() {
        assert!(config(0).validate().is_err());
        let bad = RolloutConfig { fault_rate: 1.5, ..RolloutConfig::default() };
        assert!(bad.validate().is_err());
    }
}

// ── RolloutBuilder validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn default_drop_offs_are_start_cells() {
        let env = standard_env(2);
        let starts = env.positions().to_vec();
        let rollout = RolloutBuilder::new(env, &StandStill, config(10)).build().unwrap();
        assert_eq!(rollout.drop_offs(), starts.as_slice());
        assert_eq!(rollout.targets(), &[None, None]);
    }

    #[test]
    fn length_mismatches_error() {
        let err = RolloutBuilder::new(standard_env(2), &StandStill, config(10))
            .drop_offs(vec![c(1, 1)])
            .build();
        assert!(err.is_err());
        let err = RolloutBuilder::new(standard_env(2), &StandStill, config(10))
            .targets(vec![None; 3])
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn border_drop_off_rejected() {
        let err = RolloutBuilder::new(one_box_env(), &StandStill, config(10))
            .drop_offs(vec![c(0, 1)])
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn initial_box_targets_are_claimed() {
        let rollout = RolloutBuilder::new(one_box_env(), &StandStill, config(10))
            .targets(vec![Some(c(1, 2))])
            .build()
            .unwrap();
        assert!(rollout.env().available_boxes().is_empty());
    }
}

// ── Single rollouts ───────────────────────────────────────────────────────────

#[cfg(test)]
mod rollout_tests {
    use super::*;

    #[test]
    fn scripted_pickup_finishes() {
        let script = Scripted::new(vec![vec![Decision::new(Action::Right, Some(c(1, 2)))]]);
        let mut obs = Recorder::default();
        let outcome = RolloutBuilder::new(one_box_env(), &script, config(10))
            .build()
            .unwrap()
            .run(&mut obs)
            .unwrap();

        let costs = CostModel::default();
        assert!(outcome.success);
        assert_eq!(outcome.steps, 1);
        assert!(approx(outcome.total_cost, costs.step + costs.pickup));
        assert_eq!(outcome.collisions, 0);

        assert_eq!(obs.starts, 1);
        assert_eq!(obs.tick_starts, vec![Tick(0)]);
        assert_eq!(obs.tick_ends.len(), 1);
        assert_eq!(obs.tick_ends[0].step.pickups, 1);
        assert_eq!(obs.tick_ends[0].boxes_left, 0);
        assert_eq!(obs.ends, vec![outcome]);
    }

    #[test]
    fn budget_exhaustion_force_finishes() {
        let mut rollout = RolloutBuilder::new(standard_env(2), &StandStill, config(5))
            .build()
            .unwrap();
        let outcome = rollout.run(&mut NoopObserver).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.steps, 5);
        assert_eq!(outcome.total_cost, 0.0);
        assert!(rollout.env().is_done(), "forced finish marks the env done");
        assert!(rollout.env().ledger().is_forced());
    }

    #[test]
    fn faults_respect_the_cap() {
        let cfg = RolloutConfig {
            max_steps:  10,
            fault_rate: 1.0,
            max_faults: 2,
            ..RolloutConfig::default()
        };
        let mut obs = Recorder::default();
        let mut rollout = RolloutBuilder::new(standard_env(3), &StandStill, cfg)
            .build()
            .unwrap();
        let outcome = rollout.run(&mut obs).unwrap();

        assert_eq!(outcome.faults, 2);
        assert_eq!(obs.faults.len(), 2);
        assert_eq!(obs.faults[0].0, Tick(0));
        assert_eq!(obs.faults[1].0, Tick(1));
        assert_ne!(obs.faults[0].1, obs.faults[1].1);
        assert_eq!(rollout.env().live_agent_count(), 1);
        assert_eq!(obs.tick_ends.last().unwrap().live_agents, 1);
    }

    #[test]
    fn stop_on_collision_ends_early() {
        let arena = LayoutBuilder::new(3, 6)
            .agent(c(1, 1))
            .agent(c(1, 3))
            .boxed(c(1, 4))
            .build()
            .unwrap();
        let env = Environment::from_arena(arena, CostModel::default()).unwrap();
        let script = Scripted::from_actions(vec![vec![Action::Right], vec![Action::Left]]);
        let cfg = RolloutConfig { stop_on_collision: true, ..config(50) };
        let outcome = RolloutBuilder::new(env, &script, cfg)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.collisions, 1);
    }

    #[test]
    fn collision_stop_fails_even_on_the_last_pickup() {
        // Agent 0 takes the only box while agents 1 and 2 meet on (2, 4).
        let arena = LayoutBuilder::new(4, 7)
            .agent(c(1, 1))
            .agent(c(2, 3))
            .agent(c(2, 5))
            .boxed(c(1, 2))
            .build()
            .unwrap();
        let env = Environment::from_arena(arena, CostModel::default()).unwrap();
        let script = Scripted::new(vec![
            vec![Decision::new(Action::Right, Some(c(1, 2)))],
            vec![Decision::go(Action::Right)],
            vec![Decision::go(Action::Left)],
        ]);
        let cfg = RolloutConfig { stop_on_collision: true, ..config(50) };
        let mut rollout = RolloutBuilder::new(env, &script, cfg).build().unwrap();
        let outcome = rollout.run(&mut NoopObserver).unwrap();

        assert!(rollout.env().is_done());
        assert!(!outcome.success);
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.collisions, 1);
    }

    #[test]
    fn without_collision_stop_the_same_tick_succeeds() {
        let arena = LayoutBuilder::new(4, 7)
            .agent(c(1, 1))
            .agent(c(2, 3))
            .agent(c(2, 5))
            .boxed(c(1, 2))
            .build()
            .unwrap();
        let env = Environment::from_arena(arena, CostModel::default()).unwrap();
        let script = Scripted::new(vec![
            vec![Decision::new(Action::Right, Some(c(1, 2)))],
            vec![Decision::go(Action::Right)],
            vec![Decision::go(Action::Left)],
        ]);
        let outcome = RolloutBuilder::new(env, &script, config(50))
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.collisions, 1);
    }

    #[test]
    fn broken_robot_keeps_no_target_under_greedy() {
        let cfg = RolloutConfig {
            max_steps:  200,
            fault_rate: 1.0,
            max_faults: 1,
            ..RolloutConfig::default()
        };
        let mut obs = Recorder::default();
        let policy = Greedy::new();
        let mut rollout = RolloutBuilder::new(standard_env(3), &policy, cfg)
            .build()
            .unwrap();

        rollout.tick(&mut obs).unwrap();
        assert_eq!(obs.faults.len(), 1);
        let victim = obs.faults[0].1;
        let frozen_at = rollout.env().positions()[victim.index()];
        assert_eq!(rollout.targets()[victim.index()], None);

        while !rollout.env().is_done() && rollout.env().step_count() < 200 {
            rollout.tick(&mut obs).unwrap();
            assert_eq!(rollout.targets()[victim.index()], None);
            assert_eq!(rollout.env().positions()[victim.index()], frozen_at);
            assert!(rollout.env().is_broken(victim));
        }
        assert_eq!(rollout.outcome().faults, 1);
        assert_eq!(obs.faults.len(), 1);
    }

    #[test]
    fn greedy_clears_a_single_agent_arena() {
        let spec = ArenaSpec { wall_offset: 1, box_offset: 1, box_grid_size: 1, agent_count: 1 };
        let env = Environment::new(&spec).unwrap();
        assert_eq!(env.boxes_left(), 4);
        let outcome = RolloutBuilder::new(env, &Greedy::new(), config(500))
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.delivered, 3, "the run ends at the last pickup");
        assert_eq!(outcome.collisions, 0);
    }
}

// ── Batches ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch_tests {
    use super::*;

    fn batch(rollouts: usize) -> BatchConfig {
        BatchConfig {
            rollouts,
            num_threads: Some(2),
            rollout: RolloutConfig {
                max_steps:  300,
                seed:       7,
                fault_rate: 0.02,
                max_faults: 1,
                ..RolloutConfig::default()
            },
        }
    }

    #[test]
    fn batches_are_deterministic() {
        let spec = ArenaSpec { agent_count: 3, ..ArenaSpec::default() };
        let costs = CostModel::default();
        let a = run_batch(&spec, &costs, &Greedy::new(), &batch(8)).unwrap();
        let b = run_batch(&spec, &costs, &Greedy::new(), &batch(8)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn greedy_never_collides() {
        let spec = ArenaSpec { agent_count: 4, ..ArenaSpec::default() };
        let summary = run_batch(&spec, &CostModel::default(), &Greedy::new(), &batch(6)).unwrap();
        assert_eq!(summary.total_collisions(), 0);
        assert!(summary.outcomes.iter().all(|o| o.steps <= 300));
    }

    #[test]
    fn stand_still_batch_fails_everywhere() {
        let cfg = BatchConfig { rollouts: 3, num_threads: None, rollout: config(4) };
        let summary = run_batch(&ArenaSpec::default(), &CostModel::default(), &StandStill, &cfg).unwrap();
        assert_eq!(summary.successes(), 0);
        assert_eq!(summary.success_rate(), 0.0);
        assert_eq!(summary.mean_steps_to_success(), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = BatchConfig { rollouts: 1, num_threads: None, rollout: config(0) };
        assert!(run_batch(&ArenaSpec::default(), &CostModel::default(), &StandStill, &cfg).is_err());
    }
}
