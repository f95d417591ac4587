//! Candidate selection: greedy and bounded breadth-first lookahead.
//!
//! A lookahead chain is a candidate placement followed by further placements of any
//! catalogue piece. Only the first placement (the head) and the last board (the tail) of
//! a chain affect the decision, so chains are stored collapsed as the head's index, the
//! tail board and the score accumulated so far.

use tetrofit_engine::{Board, Placement};
use tracing::{debug, trace};

use crate::Catalogue;

#[derive(Debug, Clone)]
struct Chain {
    head: usize,
    tail: Board,
    /// Head score plus the frequency-weighted scores of later placements, in chain order.
    accumulated: f64,
}

impl Chain {
    #[expect(clippy::cast_precision_loss)]
    fn value(&self) -> f64 {
        self.accumulated - self.tail.penalty() as f64
    }
}

/// Returns the index of the first candidate with the highest net score.
pub(crate) fn select_greedy(candidates: &[Placement]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = candidate.net_score();
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

/// Returns the index of the candidate heading the best chain of `depth` further placements.
///
/// The frontier is extended one depth at a time with every legal placement of every
/// catalogue piece; when a depth yields no placement at all, the previous frontier is
/// evaluated instead. Returns `None` when not even the first depth can be expanded.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn select_with_lookahead(
    candidates: &[Placement],
    catalogue: &Catalogue,
    depth: usize,
) -> Option<usize> {
    let total_frequency = catalogue.total_frequency() as f64;
    let mut frontier: Vec<Chain> = candidates
        .iter()
        .enumerate()
        .map(|(head, placement)| Chain {
            head,
            tail: placement.board().clone(),
            accumulated: placement.immediate_score() as f64,
        })
        .collect();

    let mut expanded = false;
    for level in 1..=depth {
        let mut next = Vec::new();
        for chain in &frontier {
            for piece in catalogue.iter() {
                let frequency = f64::from(piece.frequency());
                for placement in chain.tail.candidate_placements(piece) {
                    let weighted = frequency * placement.immediate_score() as f64 / total_frequency;
                    next.push(Chain {
                        head: chain.head,
                        accumulated: chain.accumulated + weighted,
                        tail: placement.into_board(),
                    });
                }
            }
        }
        debug!(level, chains = next.len(), "expanded lookahead frontier");
        if next.is_empty() {
            break;
        }
        frontier = next;
        expanded = true;
    }
    if !expanded {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for chain in &frontier {
        let value = chain.value();
        trace!(head = chain.head, value, "evaluated chain");
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((chain.head, value));
        }
    }
    let (head, value) = best?;
    debug!(head, value, "selected lookahead chain");
    Some(head)
}
