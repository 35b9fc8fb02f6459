//! warehouse — runnable demo for the warehouse grid simulator.
//!
//! Plays one greedy rollout with a frame per tick, then runs a batch of
//! rollouts with random robot faults and prints the success tally.  Set
//! `RUST_LOG=info` (or `debug`) to see rollout and tick events on stderr.

use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wh_core::{AgentId, Cell, CostModel, Tick};
use wh_env::Environment;
use wh_grid::ArenaSpec;
use wh_policy::Greedy;
use wh_sim::{BatchConfig, RolloutBuilder, RolloutConfig, RolloutObserver, TickReport, run_batch};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:   usize = 3;
const SEED:          u64   = 42;
const MAX_STEPS:     u64   = 400;
const ROLLOUTS:      usize = 200;
const FAULT_RATE:    f64   = 0.01; // per tick
const MAX_FAULTS:    usize = 1;
const FRAME_EVERY:   u64   = 10;   // ticks between printed frames

// ── Observer that prints frames ───────────────────────────────────────────────

struct FramePrinter {
    drop_offs: Vec<Cell>,
    frames:    usize,
    faults:    usize,
}

impl RolloutObserver for FramePrinter {
    fn on_rollout_start(&mut self, env: &Environment) {
        println!("{}", env.render(&self.drop_offs, false));
    }

    fn on_tick_end(&mut self, tick: Tick, report: &TickReport, env: &Environment) {
        if tick.0 % FRAME_EVERY == 0 || report.step.pickups > 0 {
            self.frames += 1;
            println!(
                "{tick}: cost {:+.1}  boxes left {}  live agents {}",
                report.step.cost, report.boxes_left, report.live_agents
            );
            println!("{}", env.render(&self.drop_offs, false));
        }
    }

    fn on_fault(&mut self, tick: Tick, agent: AgentId) {
        self.faults += 1;
        println!("{tick}: {agent} broke down");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    println!("=== warehouse — grid pickup and delivery ===");
    println!("Agents: {AGENT_COUNT}  |  Rollouts: {ROLLOUTS}  |  Seed: {SEED}");
    println!();

    let spec = ArenaSpec { agent_count: AGENT_COUNT, ..ArenaSpec::default() };
    let costs = CostModel::default();
    let policy = Greedy::new();
    let rollout = RolloutConfig {
        max_steps:         MAX_STEPS,
        seed:              SEED,
        fault_rate:        FAULT_RATE,
        max_faults:        MAX_FAULTS,
        stop_on_collision: false,
    };

    // 1. One rollout, shown frame by frame.
    let env = Environment::with_costs(&spec, costs.clone())?;
    println!(
        "Arena: {}×{}, {} box quadrants",
        env.height(),
        env.width(),
        env.boxes_left()
    );
    let mut printer = FramePrinter { drop_offs: env.positions().to_vec(), frames: 0, faults: 0 };
    let outcome = RolloutBuilder::new(env, &policy, rollout.clone())
        .build()?
        .run(&mut printer)?;
    println!(
        "Rollout: {} in {} steps, cost {:.1}, {} collisions, {} faults, {} frames",
        if outcome.success { "success" } else { "failure" },
        outcome.steps,
        outcome.total_cost,
        outcome.collisions,
        printer.faults,
        printer.frames,
    );
    println!();

    // 2. Batch.
    let batch = BatchConfig { rollouts: ROLLOUTS, num_threads: None, rollout };
    let t0 = Instant::now();
    let summary = run_batch(&spec, &costs, &policy, &batch)?;
    let elapsed = t0.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "batch finished");

    // 3. Summary.
    println!("Batch complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  successes      : {}/{} ({:.1} %)",
        summary.successes(),
        summary.len(),
        100.0 * summary.success_rate()
    );
    match summary.mean_steps_to_success() {
        Some(mean) => println!("  mean steps     : {mean:.1}"),
        None => println!("  mean steps     : n/a"),
    }
    println!("  collisions     : {}", summary.total_collisions());
    println!("  faults         : {}", summary.total_faults());

    Ok(())
}
