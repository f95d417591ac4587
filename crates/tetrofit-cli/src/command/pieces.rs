use std::{fmt::Write as _, path::PathBuf};

use clap::Args;
use tetrofit_solver::Catalogue;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct PiecesArg {
    /// Puzzle file (JSON)
    puzzle: PathBuf,
}

pub(crate) fn run(arg: &PiecesArg) -> anyhow::Result<()> {
    let puzzle = util::read_puzzle(&arg.puzzle)?;
    let solver = puzzle.build_solver()?;
    print!("{}", describe(solver.catalogue()));
    Ok(())
}

fn describe(catalogue: &Catalogue) -> String {
    let mut out = String::new();
    for piece in catalogue.iter() {
        let orientations = piece.orientations();
        _ = writeln!(
            out,
            "piece {} (frequency {}, {} orientations)",
            piece.id(),
            piece.frequency(),
            orientations.len()
        );
        for (i, shape) in orientations.iter().enumerate() {
            _ = writeln!(out, "  [{i}] {}x{}", shape.rows(), shape.cols());
            for line in shape.to_string().lines() {
                _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}
