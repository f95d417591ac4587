use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tetrofit_solver::Lookahead;
use tracing::info;

use crate::{
    schema::{
        puzzle::Puzzle,
        report::{MoveReport, RunReport},
    },
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct RunArg {
    /// Puzzle file (JSON)
    puzzle: PathBuf,
    /// Output file path for the report (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg { puzzle, output } = arg;

    let puzzle = util::read_puzzle(puzzle)?;
    let report = play(&puzzle)?;
    info!(
        moves = report.moves.len(),
        score = report.stats.total_score(),
        "finished puzzle"
    );
    util::write_report(&report, output.as_deref())?;
    Ok(())
}

fn play(puzzle: &Puzzle) -> anyhow::Result<RunReport> {
    let mut solver = puzzle.build_solver()?;
    let mut moves = Vec::with_capacity(puzzle.moves.len());
    for (i, def) in puzzle.moves.iter().enumerate() {
        let lookahead = Lookahead::try_from(def.lookahead)
            .with_context(|| format!("Invalid lookahead for move {i}"))?;
        let placement = solver
            .play(def.piece, lookahead)
            .with_context(|| format!("Move {i} (piece {}) failed", def.piece))?;
        eprintln!(
            "move {i}: piece {} at ({}, {}) scored {}",
            def.piece,
            placement.anchor_row(),
            placement.anchor_col(),
            placement.score()
        );
        eprintln!("{solver}");
        moves.push(MoveReport {
            lookahead,
            placement,
            board: solver.render(),
        });
    }
    Ok(RunReport {
        moves,
        stats: solver.stats().clone(),
        board: solver.board().clone(),
    })
}
