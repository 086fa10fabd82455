use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use skirmish::api::{load_wave, run_session, simulate_session, Campaign, Policy, SessionConfig};
use skirmish::content::builtin_waves;
use skirmish::{run_encounter, Dice, Hero, HeroAction, HeroClass, ScriptedActions};

mod config;
mod console;

use console::Console;

#[derive(Copy, Clone, ValueEnum)]
enum ClassArg {
    Warrior,
    Mage,
    Rogue,
}

#[derive(Copy, Clone, ValueEnum)]
enum PolicyArg {
    Aggressive,
    Balanced,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play a full run interactively on stdin/stdout
    Play {
        /// Hero class
        #[arg(long, value_enum, default_value_t = ClassArg::Warrior)]
        class: ClassArg,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Fight one wave with a scripted list of actions
    Fight {
        /// Hero class
        #[arg(long, value_enum, default_value_t = ClassArg::Warrior)]
        class: ClassArg,
        /// Built-in wave id or path to a wave JSON/YAML file
        #[arg(long, default_value = "first_wave")]
        wave: String,
        /// Comma-separated actions (attack, strong, heal); the last one repeats
        #[arg(long, default_value = "attack")]
        actions: String,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Print the encounter report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Play one unattended run and print its transcript
    Auto {
        /// Session config (JSON or YAML); overrides --class/--seed/--policy
        #[arg(long)]
        config: Option<PathBuf>,
        /// Hero class
        #[arg(long, value_enum, default_value_t = ClassArg::Warrior)]
        class: ClassArg,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Decision policy
        #[arg(long, value_enum, default_value_t = PolicyArg::Aggressive)]
        policy: PolicyArg,
        /// Print the session result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List built-in waves
    Waves,
}

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Skirmish turn-based combat harness")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_class(c: ClassArg) -> HeroClass {
    match c {
        ClassArg::Warrior => HeroClass::Warrior,
        ClassArg::Mage => HeroClass::Mage,
        ClassArg::Rogue => HeroClass::Rogue,
    }
}

fn to_policy(p: PolicyArg) -> Policy {
    match p {
        PolicyArg::Aggressive => Policy::Aggressive,
        PolicyArg::Balanced => Policy::Balanced,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    skirmish::logging::init(cli.verbose);

    match cli.cmd {
        Cmd::Play { class, seed } => {
            let campaign = Campaign::builtin()?;
            let hero = Hero::new(to_class(class));
            tracing::debug!(seed, class = %hero.class, "starting interactive session");
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            console.say(&format!("You are a {}. Type q to quit.", hero.class));
            let outcome = run_session(hero, &campaign, &mut Dice::from_seed(seed), &mut console)?;
            console.say(&format!(
                "Game over: {:?} at {} (HP {}/{}, gold {})",
                outcome.status,
                outcome.reached,
                outcome.hero.combatant.hp(),
                outcome.hero.combatant.max_hp(),
                outcome.hero.gold
            ));
        }
        Cmd::Fight { class, wave, actions, seed, json } => {
            let wave = load_wave(&wave)?;
            let script: Vec<HeroAction> = actions
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(HeroAction::parse_or_attack)
                .collect();
            let mut input = if script.is_empty() {
                ScriptedActions::repeat(HeroAction::Attack)
            } else {
                ScriptedActions::new(script).then_repeat()
            };
            let mut hero = Hero::new(to_class(class));
            let mut dice = Dice::from_seed(seed);
            let report = run_encounter(&mut hero, wave.spawn(), &mut dice, &mut input)
                .with_context(|| format!("failed to fight wave '{}'", wave.name))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for entry in &report.log {
                    println!("{}", entry);
                }
                println!(
                    "rounds={} hero_hp={}/{}",
                    report.rounds,
                    hero.combatant.hp(),
                    hero.combatant.max_hp()
                );
            }
        }
        Cmd::Auto { config: config_path, class, seed, policy, json } => {
            let cfg = match config_path {
                Some(path) => config::load_session_config(&path)?,
                None => SessionConfig {
                    policy: to_policy(policy),
                    ..SessionConfig::new(to_class(class), seed)
                },
            };
            let result = simulate_session(cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for line in &result.log {
                    println!("{}", line);
                }
                println!(
                    "status={:?} reached={} hero_hp={}/{} gold={}",
                    result.status,
                    result.reached,
                    result.hero_end.hp,
                    result.hero_end.max_hp,
                    result.gold_end
                );
            }
        }
        Cmd::Waves => {
            for (id, _) in builtin_waves() {
                let wave = load_wave(id)?;
                let names: Vec<&str> = wave.enemies.iter().map(|e| e.name.as_str()).collect();
                println!("{:<12} {} [{}]", id, wave.name, names.join(", "));
            }
        }
    }
    Ok(())
}
