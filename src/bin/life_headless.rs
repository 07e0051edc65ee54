//! # Headless Game of Life runner
//!
//! Seeds a grid, advances it a number of generations on the chosen engine
//! and prints the final generation as text. Stands in for a windowed
//! front end when all you want is the grid.
//!
//! ## Usage
//!
//! ```text
//! RUST_LOG=info life_headless --width 64 --height 32 --seed 7 \
//!     --generations 100 --engine parallel
//! ```
//!
//! Options: `--width`, `--height`, `--seed`, `--generations`,
//! `--engine cpu|parallel|gpu`, `--live-one-in`, `--threads`,
//! `--pattern clear|glider|blinker|block|gosper-gun`, `--quiet`.

use anyhow::{anyhow, bail, Context, Result};
use torus_life::prelude::*;

struct Options {
    config: LifeConfig,
    generations: u64,
    pattern: Option<LifePattern>,
    quiet: bool,
}

fn parse_value<T>(flag: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.ok_or_else(|| anyhow!("{} needs a value", flag))?;
    value
        .parse()
        .with_context(|| format!("invalid value '{}' for {}", value, flag))
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        config: LifeConfig::new(64, 32),
        generations: 100,
        pattern: None,
        quiet: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--width" => options.config.width = parse_value(&flag, args.next())?,
            "--height" => options.config.height = parse_value(&flag, args.next())?,
            "--seed" => options.config.seed = Some(parse_value(&flag, args.next())?),
            "--generations" => options.generations = parse_value(&flag, args.next())?,
            "--engine" => options.config.engine = parse_value(&flag, args.next())?,
            "--live-one-in" => options.config.live_one_in = parse_value(&flag, args.next())?,
            "--threads" => options.config.threads = Some(parse_value(&flag, args.next())?),
            "--pattern" => options.pattern = Some(parse_value(&flag, args.next())?),
            "--quiet" => options.quiet = true,
            other => bail!("unknown option '{}'", other),
        }
    }
    Ok(options)
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args()?;
    let mut sim = Simulation::new(options.config).context("failed to start simulation")?;
    if let Some(pattern) = options.pattern {
        sim.load_pattern(pattern)?;
    }

    log::info!(
        "Running {} generations on the {} engine",
        options.generations,
        sim.engine_name()
    );
    sim.run(options.generations)
        .with_context(|| format!("simulation failed at generation {}", sim.generation()))?;

    let metrics = sim.metrics();
    log::info!(
        "Finished: generation {}, {} live cells, {:.3} ms/step ({:.1} steps/s)",
        sim.generation(),
        metrics.live_cells,
        metrics.step_time_ms,
        metrics.steps_per_second
    );

    if !options.quiet {
        print!("{}", sim.current_grid().to_text());
    }
    println!(
        "seed={} generation={} live={}",
        sim.seed(),
        sim.generation(),
        sim.current_grid().live_count()
    );
    Ok(())
}
