/// Avalon Host: validate a setup, deal seats and print the reveal script.
///
/// Usage: avalon_host <validate|deal|narrate|roles> [options]

use std::path::PathBuf;
use std::process;

use avalon_engine::core::narration::NarrationScript;
use avalon_engine::presets::{self, PRESET_NAMES};
use avalon_engine::{AvalonEngine, Deal, LancelotMode, Module, ModuleConfiguration, ValidationPolicy, ValidationResult};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "avalon_host",
    about = "Deal Avalon roles and narrate the reveal ritual",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a setup and report errors, warnings and seat counts
    Validate {
        #[command(flatten)]
        setup: Setup,

        /// Disable the "consider adding more roles" suggestions
        #[arg(long)]
        no_underfill: bool,
    },

    /// Deal the roles into numbered seats
    Deal {
        #[command(flatten)]
        setup: Setup,

        /// RNG seed for a reproducible deal
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the spoken reveal script and host notes
    Narrate {
        #[command(flatten)]
        setup: Setup,
    },

    /// List every module and the built-in presets
    Roles,
}

#[derive(Args)]
struct Setup {
    /// Number of players (5-10)
    #[arg(short, long)]
    players: u32,

    /// Built-in preset (base, classic, lancelots, big_box)
    #[arg(long, conflicts_with = "config")]
    preset: Option<String>,

    /// RON file with a module configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra module to switch on, e.g. --module Oberon or --module "lady of the lake" (repeatable)
    #[arg(short, long = "module", value_parser = parse_module)]
    modules: Vec<Module>,

    /// Lancelot mode: off, classic or variant
    #[arg(long, value_parser = parse_lancelot)]
    lancelot: Option<LancelotMode>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_module(s: &str) -> Result<Module, String> {
    Module::from_name(s).ok_or_else(|| format!("unknown module '{s}' (see `avalon_host roles`)"))
}

fn parse_lancelot(s: &str) -> Result<LancelotMode, String> {
    match s.to_lowercase().as_str() {
        "off" => Ok(LancelotMode::Off),
        "classic" => Ok(LancelotMode::Classic),
        "variant" => Ok(LancelotMode::Variant),
        _ => Err(format!("unknown Lancelot mode '{s}': expected off, classic or variant")),
    }
}

impl Setup {
    fn configuration(&self) -> Result<ModuleConfiguration, String> {
        let mut config = if let Some(ref name) = self.preset {
            presets::builtin(name)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("unknown preset '{name}': expected one of {}", PRESET_NAMES.join(", ")))?
        } else if let Some(ref path) = self.config {
            AvalonEngine::default()
                .load_configuration(path)
                .map_err(|e| format!("{}: {e}", path.display()))?
        } else {
            ModuleConfiguration::new()
        };

        for module in &self.modules {
            config.set(*module, true);
        }
        if let Some(mode) = self.lancelot {
            config.lancelot = mode;
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avalon_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { setup, no_underfill } => run_validate(&setup, no_underfill),
        Commands::Deal { setup, seed } => run_deal(&setup, seed),
        Commands::Narrate { setup } => run_narrate(&setup),
        Commands::Roles => {
            print_roles();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("serialization error: {e}"))
}

fn run_validate(setup: &Setup, no_underfill: bool) -> Result<(), String> {
    let config = setup.configuration()?;
    let mut policy = ValidationPolicy::default();
    if no_underfill {
        policy.underfill_slack = None;
    }
    let engine = AvalonEngine::builder().policy(policy).build();
    let result = engine.validate(setup.players, &config);

    if setup.json {
        println!("{}", to_json(&result)?);
    } else {
        println!("{}", engine.summary(setup.players, &config));
        print_validation(&result);
    }

    if result.is_ok() {
        Ok(())
    } else {
        Err(format!("{} error(s) in configuration", result.errors.len()))
    }
}

fn print_validation(result: &ValidationResult) {
    let c = &result.counts;
    println!(
        "Good: {}/{} selected   Evil: {}/{} selected",
        c.good_selected, c.good_slots, c.evil_selected, c.evil_slots
    );
    for warning in &result.warnings {
        println!("WARNING: {}", warning);
    }
    for error in &result.errors {
        println!("ERROR: {}", error);
    }
    if result.errors.is_empty() && result.warnings.is_empty() {
        println!("All checks passed!");
    }
}

fn run_deal(setup: &Setup, seed: Option<u64>) -> Result<(), String> {
    let config = setup.configuration()?;
    let mut builder = AvalonEngine::builder();
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let mut engine = builder.build();

    let deal = match engine.assign(setup.players, &config) {
        Ok(deal) => deal,
        Err(e) => {
            let result = engine.validate(setup.players, &config);
            if setup.json {
                println!("{}", to_json(&result)?);
            } else {
                print_validation(&result);
            }
            return Err(e.to_string());
        }
    };

    if setup.json {
        println!("{}", to_json(&deal)?);
    } else {
        println!("{}", engine.summary(setup.players, &config));
        print_deal(&deal);
    }
    Ok(())
}

fn print_deal(deal: &Deal) {
    for a in &deal.assignments {
        println!("Seat {:>2}: {} ({})", a.seat, a.role, a.team);
    }
    println!("\n{} Good, {} Evil", deal.good_count, deal.evil_count);
}

fn run_narrate(setup: &Setup) -> Result<(), String> {
    let config = setup.configuration()?;
    let engine = AvalonEngine::default();
    let script = engine.narrate(setup.players, &config);

    if setup.json {
        println!("{}", to_json(&script)?);
    } else {
        print_script(&script);
    }
    Ok(())
}

fn print_script(script: &NarrationScript) {
    println!("=== Reveal script ===\n");
    println!("{}", script.render_steps());
    println!("\n=== Host notes ===\n");
    for note in &script.notes {
        println!("- {}", note);
    }
}

fn print_roles() {
    println!("Modules (use the name in the first column with --module):\n");
    for module in Module::ALL {
        let team = module.team().map_or("Rule", |t| t.label());
        println!("  {:<22} {:<5} {}", format!("{:?}", module), team, module.description());
    }
    println!("\nThe Assassin is always dealt on the Evil side.");
    println!("Lancelots: --lancelot classic|variant deals Good and Evil Lancelot together.");
    println!("\nPresets: {}", PRESET_NAMES.join(", "));
}
