pub use self::{direction::*, grid::*, row::*, score::*};

pub(crate) mod direction;
pub(crate) mod grid;
pub(crate) mod row;
pub(crate) mod score;
