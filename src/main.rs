//! Patrons - worker-placement rules engine
//!
//! Interactive CLI for driving a game of Patrons.
//!
//! ## Usage
//!
//! ```
//! patrons [OPTIONS]
//!
//! Options:
//!   --player NAME     Add a player (repeatable; default: Alice, Bob)
//!   --setup FILE      Load players and rule knobs from a JSON file
//!   --no-shuffle      Keep the given seating order (default: random start)
//!   --debug           Print the full game state after every accepted intent
//! ```
//!
//! Commands are read from stdin; type `help` at the prompt for the list.

use patrons::{
    ActionDefinition, Catalog, CliDecisionMaker, Color, GameConfig, GameState, Intent,
    IntentOutcome, RandomDecisionMaker, ShopId, apply_intent, legal_intents,
};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// JSON setup file: player roster plus optional rule knobs.
#[derive(Debug, Deserialize)]
struct GameSetup {
    players: Vec<String>,
    #[serde(default)]
    workers_per_round: Option<u32>,
    #[serde(default)]
    rounds: Option<u8>,
}

#[derive(Debug, Default)]
struct Options {
    players: Vec<String>,
    setup: Option<String>,
    shuffle: bool,
    debug: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        shuffle: true,
        ..Options::default()
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--player" => {
                let name = args.next().ok_or("--player needs a name")?;
                options.players.push(name);
            }
            "--setup" => {
                let path = args.next().ok_or("--setup needs a file path")?;
                options.setup = Some(path);
            }
            "--no-shuffle" => options.shuffle = false,
            "--debug" => options.debug = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option: {}", other)),
        }
    }
    Ok(options)
}

fn print_usage() {
    println!("Usage: patrons [--player NAME]... [--setup FILE] [--no-shuffle] [--debug]");
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let mut config = GameConfig::default();
    let mut names = options.players.clone();

    if let Some(path) = &options.setup {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error: cannot read {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        };
        let setup: GameSetup = match serde_json::from_str(&text) {
            Ok(setup) => setup,
            Err(err) => {
                eprintln!("error: bad setup file {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        };
        names = setup.players;
        if let Some(workers) = setup.workers_per_round {
            config.workers_per_round = workers;
        }
        if let Some(rounds) = setup.rounds {
            config.rounds = rounds;
        }
    }

    if names.is_empty() {
        names = vec!["Alice".to_string(), "Bob".to_string()];
    }
    if options.shuffle {
        let mut rng = rand::rng();
        names.shuffle(&mut rng);
    }

    let catalog = Catalog::standard();
    let mut game = match GameState::new(&names, config, catalog) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("=== Patrons ===");
    println!(
        "{} players, {} workers per round, {} rounds. Type `help` for commands.",
        game.players.len(),
        config.workers_per_round,
        config.rounds
    );
    print_state(&game);

    let stdin = io::stdin();
    loop {
        if game.is_finished() {
            println!("{}", game.summary());
            break;
        }
        print!("{}> ", game.active_player().name);
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };
        let argument = parts.next();

        match command {
            "help" => print_help(),
            "board" => print_board(&game, catalog),
            "shops" => print_shops(&game, catalog),
            "ledger" => print_state(&game),
            "state" => print!("{}", game.summary()),
            "trace" => {
                for event in game.trace.events() {
                    println!("  {}", event);
                }
            }
            "legal" => {
                for intent in legal_intents(&game, catalog) {
                    println!("  {}", describe_intent(&intent, catalog));
                }
            }
            "place" => match argument.and_then(|name| find_space(catalog, name)) {
                Some(space) => {
                    submit(&mut game, catalog, Intent::PlaceWorker { space: space.id }, &options)
                }
                None => println!("*** Unknown space. Try `board` for names."),
            },
            "resolve" => submit(&mut game, catalog, Intent::ResolveAction, &options),
            "buy" => match argument.and_then(Color::from_name) {
                Some(color) => {
                    let shop = ShopId::Regular {
                        color,
                        round: game.turn.round,
                    };
                    submit(&mut game, catalog, Intent::BuyShop { shop }, &options);
                }
                None => println!("*** Which color? e.g. `buy red`"),
            },
            "victory" => match argument.and_then(Color::from_name) {
                Some(color) => {
                    let shop = ShopId::Victory { color };
                    submit(&mut game, catalog, Intent::BuyShop { shop }, &options);
                }
                None => println!("*** Which color? e.g. `victory red`"),
            },
            "end" => submit(&mut game, catalog, Intent::EndTurn, &options),
            "auto" => {
                run_auto(&mut game, catalog);
                print!("{}", game.summary());
            }
            "quit" | "exit" => break,
            other => println!("*** Unknown command `{}`. Try `help`.", other),
        }
    }

    ExitCode::SUCCESS
}

fn print_help() {
    println!("Commands:");
    println!("  board            show action spaces and occupancy");
    println!("  shops            show this round's shops and the victory shop");
    println!("  ledger | state   show players and holdings");
    println!("  legal            list everything you may do right now");
    println!("  place <space>    place a worker (by space name)");
    println!("  resolve          resolve your placed action");
    println!("  buy <color>      buy this round's shop of that color");
    println!("  victory <color>  buy from the victory shop");
    println!("  end              end your turn");
    println!("  trace            show the full game trace");
    println!("  auto             let random play finish the game");
    println!("  quit             leave");
}

fn find_space<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a ActionDefinition> {
    catalog.action_by_name(name).or_else(|| {
        name.parse()
            .ok()
            .and_then(|raw| catalog.action(patrons::SpaceId::from_raw(raw)))
    })
}

fn describe_intent(intent: &Intent, catalog: &Catalog) -> String {
    match intent {
        Intent::PlaceWorker { space } => {
            let name = catalog.action(*space).map(|a| a.name).unwrap_or("?");
            format!("place a worker on {}", name)
        }
        Intent::BuyShop { shop } => format!("buy the {}", shop),
        other => other.to_string(),
    }
}

fn submit(game: &mut GameState, catalog: &Catalog, intent: Intent, options: &Options) {
    let mut decisions = CliDecisionMaker;
    match apply_intent(game, catalog, intent, &mut decisions) {
        Ok(IntentOutcome::Placed { space }) => {
            let name = catalog.action(space).map(|a| a.name).unwrap_or("?");
            println!("Worker placed on {}. `resolve` to take its action.", name);
        }
        Ok(IntentOutcome::Resolved { space }) => {
            let name = catalog.action(space).map(|a| a.name).unwrap_or("?");
            println!("{} resolved.", name);
        }
        Ok(IntentOutcome::Purchased { shop }) => println!("Bought the {}.", shop),
        Ok(IntentOutcome::TurnPassed) => {
            println!("Turn passed to {}.", game.active_player().name)
        }
        Ok(IntentOutcome::GameFinished { winner }) => {
            let name = game
                .player(winner)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            println!("Game over! {} wins.", name);
        }
        Err(err) => println!("*** {}", err),
    }
    if options.debug {
        print!("{}", game.summary());
    }
}

/// Play the rest of the game with random legal intents and random choices.
fn run_auto(game: &mut GameState, catalog: &Catalog) {
    use rand::prelude::IndexedRandom;

    let mut rng = rand::rng();
    let mut decisions = RandomDecisionMaker;
    for _ in 0..50_000 {
        if game.is_finished() {
            return;
        }
        let intents = legal_intents(game, catalog);
        let Some(intent) = intents.choose(&mut rng).copied() else {
            return;
        };
        let _ = apply_intent(game, catalog, intent, &mut decisions);
    }
}

fn print_state(game: &GameState) {
    print!("{}", game.summary());
}

fn print_board(game: &GameState, catalog: &Catalog) {
    println!("Action board (round {}):", game.turn.round);
    for definition in catalog.actions() {
        let status = match game.board.occupant(definition.id) {
            Some(player) => game
                .player(player)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "?".to_string()),
            None if definition.available_in(game.turn.round) => "open".to_string(),
            None => format!("round {}+", definition.min_round),
        };
        println!(
            "  {:12} {:7} [{}] {}",
            definition.name,
            definition.color.name(),
            status,
            definition.describe()
        );
    }
    let open = game.board.colors_with_open_spaces(game.turn.round);
    let names: Vec<&str> = open.iter().map(|c| c.name()).collect();
    println!("  layers with open spaces: {}", names.join(", "));
}

fn print_shops(game: &GameState, catalog: &Catalog) {
    println!("Shops (round {}):", game.turn.round);
    for color in Color::ALL {
        if let Some(entry) = catalog.regular_shop(color, game.turn.round) {
            let tag = if entry.bypass { " (bypass)" } else { "" };
            println!(
                "  {:16} {:7} costs {}{}: {}",
                entry.name,
                color.name(),
                entry.cost,
                tag,
                entry.describe()
            );
        }
    }
    println!("Victory shop:");
    for color in Color::ALL {
        if let Some(entry) = catalog.victory_shop(color) {
            println!(
                "  {:16} {:7} costs {}: {}",
                entry.name,
                color.name(),
                entry.cost,
                entry.describe()
            );
        }
    }
}
