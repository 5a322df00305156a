use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use digi_arena::catalog::{CreatureCatalog, SqliteCreatureCatalog};
use digi_arena::data::{starter_catalog, starter_drops, starter_roster};
use digi_arena::simulation::creature::{Creature, StatusTag};
use digi_arena::simulation::game::Player;
use digi_arena::systems::status::{active_statuses, attach};
use digi_arena::Game;

const HELP: &str = "Commands: status | boss | bag | turn [n] | log | ready <creature_id> | buff <provoked|feared|cheered> <creature_id> [turns] | statuses <creature_id> | save <path> | load <path> | help | quit";

fn main() {
    println!("Initializing Digi Arena (Encounter Debug)...");
    let (db_path, seed) = parse_args(env::args().collect());

    let catalog: Box<dyn CreatureCatalog> = match db_path {
        Some(path) => match open_sqlite_catalog(&path) {
            Ok(catalog) => Box::new(catalog),
            Err(err) => {
                eprintln!("Failed to open catalog DB at {}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => Box::new(starter_catalog()),
    };

    let players = match build_players(catalog.as_ref()) {
        Ok(players) => players,
        Err(err) => {
            eprintln!("Failed to build battle roster: {}", err);
            std::process::exit(1);
        }
    };

    let mut game = match Game::new(catalog, players, seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Failed to start battle: {}", err);
            std::process::exit(1);
        }
    };

    println!("Seed: {}", game.seed());
    println!("{}", HELP);
    loop {
        print!("> ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            break;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "status" => print_status(&game),
            "boss" => print_boss(&game),
            "bag" => print_bag(&game),
            "log" => print_log(&mut game),
            "turn" => {
                let count = parts.next().and_then(|v| v.parse::<u32>().ok()).unwrap_or(1);
                for _ in 0..count {
                    if let Err(err) = game.advance_round() {
                        println!("Round failed: {}", err);
                        break;
                    }
                }
                print_log(&mut game);
                print_status(&game);
            }
            "ready" => {
                if let Some(id) = parts.next().and_then(|v| v.parse::<u32>().ok()) {
                    match game.state_mut().creature_by_id_mut(id) {
                        Some(creature) => {
                            creature.evolution_ready = true;
                            println!("{} is ready to evolve.", creature.name);
                        }
                        None => println!("No creature with id {}", id),
                    }
                } else {
                    println!("Usage: ready <creature_id>");
                }
            }
            "buff" => {
                let tag = parts.next().and_then(parse_status_tag);
                let id = parts.next().and_then(|v| v.parse::<u32>().ok());
                let turns = parts.next().and_then(|v| v.parse::<u64>().ok()).unwrap_or(2);
                match (tag, id) {
                    (Some(tag), Some(id)) => {
                        let turn = game.state().turn_count;
                        match game.state_mut().creature_by_id_mut(id) {
                            Some(creature) => {
                                attach(creature, tag, turn, turns);
                                println!(
                                    "{} is {} until turn {}.",
                                    creature.name,
                                    tag.as_str(),
                                    turn + turns
                                );
                            }
                            None => println!("No creature with id {}", id),
                        }
                    }
                    _ => println!("Usage: buff <provoked|feared|cheered> <creature_id> [turns]"),
                }
            }
            "statuses" => {
                if let Some(id) = parts.next().and_then(|v| v.parse::<u32>().ok()) {
                    print_statuses(&game, id);
                } else {
                    println!("Usage: statuses <creature_id>");
                }
            }
            "save" => {
                if let Some(path) = parts.next() {
                    match game.save_to_path(path) {
                        Ok(()) => println!("Saved to {}", path),
                        Err(err) => println!("Save failed: {}", err),
                    }
                } else {
                    println!("Usage: save <path>");
                }
            }
            "load" => {
                if let Some(path) = parts.next() {
                    match game.load_from_path(path) {
                        Ok(()) => {
                            println!("Loaded from {}", path);
                            print_status(&game);
                        }
                        Err(err) => println!("Load failed: {}", err),
                    }
                } else {
                    println!("Usage: load <path>");
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}

fn parse_args(args: Vec<String>) -> (Option<PathBuf>, u64) {
    let mut iter = args.iter();
    let mut db_path = None;
    let mut seed = 42;
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => {
                if let Some(value) = iter.next() {
                    db_path = Some(PathBuf::from(value));
                }
            }
            "--seed" => {
                if let Some(value) = iter.next().and_then(|v| v.parse::<u64>().ok()) {
                    seed = value;
                }
            }
            _ => {}
        }
    }
    (db_path, seed)
}

/// Open (or seed) the on-disk catalog. A fresh database gets the starter
/// content so the tool works out of the box.
fn open_sqlite_catalog(
    path: &PathBuf,
) -> Result<SqliteCreatureCatalog, Box<dyn std::error::Error>> {
    let catalog = SqliteCreatureCatalog::open(path)?;
    if catalog.list_creatures()?.is_empty() {
        for entry in starter_roster() {
            catalog.insert_entry(&entry)?;
        }
        for (boss_id, drops) in starter_drops() {
            for drop in drops {
                catalog.insert_drop(boss_id, &drop)?;
            }
        }
        println!("Seeded starter content into {}", path.display());
    }
    Ok(catalog)
}

/// Two tamers with three rookies each, drawn from the active level-1
/// entries in id order.
fn build_players(catalog: &dyn CreatureCatalog) -> Result<Vec<Player>, Box<dyn std::error::Error>> {
    let mut rookies: Vec<_> = catalog
        .list_creatures()?
        .into_iter()
        .filter(|entry| entry.active && entry.level == 1)
        .collect();
    rookies.sort_by_key(|entry| entry.id);
    if rookies.is_empty() {
        return Err("catalog has no active level-1 creatures".into());
    }

    let mut next_id = 1u32;
    let mut players = Vec::new();
    for name in ["Tai", "Matt"] {
        let mut creatures = Vec::new();
        for slot in 0..3 {
            let template = &rookies[(players.len() * 3 + slot) % rookies.len()];
            creatures.push(Creature::from_template(next_id, template)?);
            next_id += 1;
        }
        players.push(Player {
            id: players.len() as u32 + 1,
            name: name.to_string(),
            avatar: None,
            creatures,
        });
    }
    Ok(players)
}

fn parse_status_tag(raw: &str) -> Option<StatusTag> {
    match raw.to_lowercase().as_str() {
        "provoked" => Some(StatusTag::Provoked),
        "feared" => Some(StatusTag::Feared),
        "cheered" => Some(StatusTag::Cheered),
        _ => None,
    }
}

fn print_status(game: &Game) {
    let state = game.state();
    println!(
        "Turn {} | bosses defeated: {} | bag: {} items",
        state.turn_count,
        state.bosses_defeated,
        state.item_bag.len()
    );
    for player in &state.players {
        println!("{}:", player.name);
        for creature in &player.creatures {
            let marker = if creature.is_alive() { "" } else { " [down]" };
            println!(
                "  [{}] {} (lv{} {:?}) {}/{} HP, power {}{}",
                creature.id,
                creature.name,
                creature.level,
                creature.creature_type,
                creature.current_hp,
                creature.max_hp,
                creature.combat_power(),
                marker
            );
        }
    }
}

fn print_boss(game: &Game) {
    match game.state().boss.as_ref() {
        Some(boss) if !boss.is_defeated => println!(
            "{} (lv{}) {}/{} HP, power {}, spawned turn {}",
            boss.name, boss.level, boss.current_hp, boss.max_hp, boss.calculated_dp, boss.spawned_on_turn
        ),
        Some(boss) => println!("{} has been defeated.", boss.name),
        None => println!("No boss on the field."),
    }
}

fn print_bag(game: &Game) {
    let bag = &game.state().item_bag;
    if bag.is_empty() {
        println!("Bag: empty");
        return;
    }
    println!("Bag:");
    for item_id in bag {
        println!("  item #{}", item_id);
    }
}

fn print_log(game: &mut Game) {
    for entry in game.drain_log() {
        println!("  {}", entry);
    }
}

fn print_statuses(game: &Game, creature_id: u32) {
    let state = game.state();
    let found = state
        .players
        .iter()
        .flat_map(|player| player.creatures.iter())
        .find(|creature| creature.id == creature_id);
    match found {
        Some(creature) => {
            let active = active_statuses(creature, state.turn_count);
            if active.is_empty() {
                println!("{}: no active statuses", creature.name);
            } else {
                let names: Vec<_> = active.iter().map(|tag| tag.as_str()).collect();
                println!("{}: {}", creature.name, names.join(", "));
            }
        }
        None => println!("No creature with id {}", creature_id),
    }
}
