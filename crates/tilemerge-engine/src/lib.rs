pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no empty cell left to insert a tile into")]
pub struct NoEmptyCellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("grid size must be at least {}, got {size}", Grid::MIN_SIZE)]
pub struct GridSizeError {
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridShapeError {
    #[display("grid is too small")]
    Size(GridSizeError),
    #[display("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("cell ({row}, {col}) holds {value}, which is neither 0 nor a power of two above 1")]
    InvalidValue { row: usize, col: usize, value: u32 },
}
