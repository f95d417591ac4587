pub use self::{bit_board::*, piece::*, shape::*};

pub(crate) mod bit_board;
pub(crate) mod connectivity;
pub(crate) mod penalty;
pub(crate) mod piece;
pub(crate) mod shape;
