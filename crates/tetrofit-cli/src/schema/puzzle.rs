use anyhow::Context;
use serde::{Deserialize, Serialize};
use tetrofit_engine::PieceId;
use tetrofit_solver::Solver;

/// A board, its seed rows, the piece catalogue and the moves to play.
///
/// ```json
/// {
///   "width": 3,
///   "height": 4,
///   "seed_rows": ["* *"],
///   "pieces": [{ "shape": "*", "frequency": 9 }, { "shape": "**" }],
///   "moves": [{ "piece": 0, "lookahead": 1 }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub width: usize,
    pub height: usize,
    /// Obstacle rows, bottom row first.
    #[serde(default)]
    pub seed_rows: Vec<String>,
    pub pieces: Vec<PieceDef>,
    #[serde(default)]
    pub moves: Vec<MoveDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceDef {
    pub shape: String,
    #[serde(default = "default_frequency")]
    pub frequency: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveDef {
    pub piece: PieceId,
    /// Signed so that negative values reach the solver and are reported as such.
    #[serde(default)]
    pub lookahead: i64,
}

fn default_frequency() -> u32 {
    1
}

impl Puzzle {
    /// Creates a solver with the puzzle's board, seed rows and pieces.
    pub fn build_solver(&self) -> anyhow::Result<Solver> {
        let mut solver = Solver::new(self.width, self.height)
            .with_context(|| format!("Failed to create {}x{} board", self.width, self.height))?;
        for (i, row) in self.seed_rows.iter().enumerate() {
            solver
                .add_seed_row(row)
                .with_context(|| format!("Failed to add seed row {i} {row:?}"))?;
        }
        for (i, piece) in self.pieces.iter().enumerate() {
            solver
                .add_piece_str(&piece.shape, piece.frequency)
                .with_context(|| format!("Failed to add piece {i} {:?}", piece.shape))?;
        }
        Ok(solver)
    }
}
