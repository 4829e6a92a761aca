/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use clap::Parser;

use draughts::{perft, splitperft, Game, Move, Rules};

/// Compute total number of states reachable from a position, given a depth.
#[derive(Debug, Parser)]
struct Cli {
    /// Depth to run the perft.
    depth: u32,

    /// Variant to play: "international" (default) or "english".
    #[arg(short, long, default_value = "international")]
    variant: String,

    /// The FEN string of the position to run the perft.
    #[arg(short, long)]
    fen: Option<String>,

    /// List of moves to apply to the position before running the perft.
    #[arg(required = false)]
    moves: Vec<String>,

    /// If set, perform a splitperft, displaying the number of nodes reachable after each move available from the root.
    #[arg(short, long, default_value = "false")]
    split: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Parse args appropriately
    let rules = Rules::by_name(&args.variant)?;
    let mut game = if let Some(fen) = &args.fen {
        Game::from_fen(rules, fen)?
    } else {
        Game::new(rules)
    };

    // Apply moves, if any were provided
    for mv_str in args.moves {
        let mv = Move::from_text(&mv_str, &game)?;
        game.push(mv);
    }

    println!(
        "Computing PERFT({}) of the following position:\n{}\n",
        args.depth,
        game.to_fen()
    );

    let now = Instant::now();
    let total_nodes = if args.split {
        let counts = splitperft(&mut game, args.depth);
        for (mv, nodes) in &counts {
            println!("{mv}\t{nodes}");
        }
        println!();
        counts.iter().map(|(_, nodes)| nodes).sum()
    } else {
        perft(&mut game, args.depth)
    };

    let elapsed = now.elapsed();

    // Compute nodes-per-second metrics
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let m_nps = nps / 1_000_000.0;

    println!("  Total Nodes:\t{total_nodes}");
    println!(" Elapsed Time:\t{elapsed:.1?}");
    println!("  Nodes / Sec:\t{nps:.0}");
    println!("M Nodes / Sec:\t{m_nps:.1}");

    Ok(())
}
