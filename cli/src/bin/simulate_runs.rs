use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use skirmish::api::{simulate_many, Policy, SessionConfig};
use skirmish::HeroClass;

#[path = "../config.rs"]
mod config;

#[derive(Copy, Clone, ValueEnum)]
enum PolicyArg {
    Aggressive,
    Balanced,
}

#[derive(Parser)]
#[command(name = "simulate-runs")]
#[command(about = "Monte Carlo sim: many unattended runs of the full campaign")]
struct Args {
    /// Hero class: warrior | mage | rogue
    #[arg(long, default_value = "warrior")]
    class: String,

    /// Number of runs
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (run i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Decision policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Aggressive)]
    policy: PolicyArg,

    /// Optional session config (JSON or YAML); class/seed/policy flags are ignored when set
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn to_policy(p: PolicyArg) -> Policy {
    match p {
        PolicyArg::Aggressive => Policy::Aggressive,
        PolicyArg::Balanced => Policy::Balanced,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    skirmish::logging::init(args.verbose);

    let cfg = if let Some(path) = args.config.as_ref() {
        config::load_session_config(path)?
    } else {
        let class: HeroClass = args.class.parse()?;
        SessionConfig { policy: to_policy(args.policy), ..SessionConfig::new(class, args.seed) }
    };

    let stats = simulate_many(cfg.clone(), args.trials)?;

    println!("simulate-runs results");
    println!("---------------------");
    println!("runs:               {}", stats.samples);
    println!("class:              {}", cfg.class);
    println!("policy:             {:?}", cfg.policy);
    println!("waves:              {} → {}", cfg.first_wave, cfg.boss_wave);
    println!();
    println!("clear rate:         {:.1}%", stats.clear_rate * 100.0);
    println!("cleared:            {}", stats.cleared);
    println!("defeated:           {}", stats.defeated);
    println!("quit:               {}", stats.quit);
    println!("avg hp (cleared):   {:.2}", stats.avg_hp_cleared);

    Ok(())
}
