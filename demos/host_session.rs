/// Host Session example: one game night, three tables.
///
/// Loads the built-in presets, validates each table, deals seats with a fixed
/// seed and prints the reveal script the host reads aloud.
///
/// Run with: cargo run --example host_session

use avalon_engine::presets;
use avalon_engine::{AvalonEngine, LancelotMode, Module, ModuleConfiguration};

fn main() {
    let mut engine = AvalonEngine::builder().seed(2026).build();

    println!("========================================");
    println!("   AVALON GAME NIGHT");
    println!("   Three Tables, One Host");
    println!("========================================");
    println!();

    // --- Table 1: first-timers, base roles only ---
    let base = presets::builtin("base")
        .expect("Failed to parse base preset")
        .expect("base preset missing");
    run_table(1, "First Timers", 5, &base, &mut engine);

    // --- Table 2: the classic setup ---
    let classic = presets::builtin("classic")
        .expect("Failed to parse classic preset")
        .expect("classic preset missing");
    run_table(2, "The Regulars", 8, &classic, &mut engine);

    // --- Table 3: hand-picked modules, too many Evil roles at first ---
    let mut custom = ModuleConfiguration::new()
        .with_all(&[
            Module::Merlin,
            Module::Percival,
            Module::Morgana,
            Module::Mordred,
            Module::Oberon,
            Module::Cleric,
        ])
        .with_lancelot(LancelotMode::Variant);
    run_table(3, "The Veterans (first draft)", 7, &custom, &mut engine);

    // Drop Oberon and Mordred to bring Evil back within budget and try again.
    custom.set(Module::Oberon, false);
    custom.set(Module::Mordred, false);
    run_table(3, "The Veterans", 8, &custom, &mut engine);

    println!("========================================");
    println!("   GOOD LUCK, LOYAL SERVANTS");
    println!("========================================");
}

fn run_table(
    number: u32,
    title: &str,
    players: u32,
    config: &ModuleConfiguration,
    engine: &mut AvalonEngine,
) {
    println!("--- Table {}: {} ---", number, title);
    println!("[{}]", engine.summary(players, config));
    println!();

    let validation = engine.validate(players, config);
    for warning in &validation.warnings {
        println!("  warning: {}", warning);
    }
    for error in &validation.errors {
        println!("  error: {}", error);
    }

    match engine.assign(players, config) {
        Ok(deal) => {
            for a in &deal.assignments {
                println!("  Seat {:>2}: {} ({})", a.seat, a.role, a.team);
            }
            println!();
            println!("{}", engine.narrate(players, config).render_steps());
        }
        Err(e) => println!("  [Cannot deal: {}]", e),
    }

    println!();
    println!();
}
