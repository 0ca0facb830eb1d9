//! Emit Markdown documentation for the static catalog.
//!
//! Walks the declared action spaces and shop entries and prints reference
//! tables, so the rulebook text always matches what the engine actually
//! does. Output goes to stdout; redirect it wherever the docs live.

use patrons::{Catalog, Color};

fn main() {
    let catalog = Catalog::standard();

    println!("# Patrons catalog");
    println!();
    println!("## Action spaces");
    println!();
    println!("| Space | Layer | Available from | Effect |");
    println!("|---|---|---|---|");
    for action in catalog.actions() {
        println!(
            "| {} | {} | round {} | {} |",
            action.name,
            action.color,
            action.min_round,
            action.describe()
        );
    }

    println!();
    println!("## Shops");
    for round in 1..=patrons::ROUNDS {
        println!();
        println!("### Round {}", round);
        println!();
        println!("| Shop | Layer | Cost | Benefit |");
        println!("|---|---|---|---|");
        for color in Color::ALL {
            if let Some(entry) = catalog.regular_shop(color, round) {
                let bypass = if entry.bypass { " *(bypass)*" } else { "" };
                println!(
                    "| {}{} | {} | {} | {} |",
                    entry.name,
                    bypass,
                    color,
                    entry.cost,
                    entry.describe()
                );
            }
        }
    }

    println!();
    println!("## Victory shop");
    println!();
    println!("| Layer | Cost | Benefit |");
    println!("|---|---|---|");
    for color in Color::ALL {
        if let Some(entry) = catalog.victory_shop(color) {
            println!("| {} | {} | {} |", color, entry.cost, entry.describe());
        }
    }
}
