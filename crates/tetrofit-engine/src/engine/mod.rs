//! Placement enumeration and scoring.
//!
//! - [`Placement`] - one legal drop of a piece orientation, with the resulting board
//! - [`immediate_score`] - points for rows cleared by a single placement
//! - [`SessionStats`] - totals over a sequence of committed placements
//!
//! Candidates come from [`Board::candidate_placements`](crate::Board::candidate_placements),
//! which yields placements in a fixed order: orientation, then anchor row, then anchor
//! column. Callers that pick a maximum keep the first one they see, so equal scores
//! resolve the same way every time.

pub use self::{placement::*, stats::*};

mod placement;
mod stats;
