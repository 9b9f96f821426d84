use std::io;

/// Failure of a [`BestScoreStore`].
///
/// Store failures are recoverable: the session keeps playing with a best score of 0 and
/// reports the error through [`SessionView::store_error`](super::SessionView).
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum StoreError {
    #[display("best score store I/O failed: {_0}")]
    Io(io::Error),
    #[display("best score store holds malformed data: {message}")]
    #[from(ignore)]
    Malformed { message: String },
    #[display("best score store unavailable: {reason}")]
    #[from(ignore)]
    Unavailable { reason: String },
}

/// Durable storage for a single best-score value.
///
/// `get` yields 0 when nothing has been stored yet. The session only calls `set` with a
/// value larger than the one it last read, so a store never sees its value decrease.
pub trait BestScoreStore {
    fn get(&self) -> Result<u64, StoreError>;

    fn set(&mut self, value: u64) -> Result<(), StoreError>;
}

impl<T> BestScoreStore for &mut T
where
    T: BestScoreStore + ?Sized,
{
    fn get(&self) -> Result<u64, StoreError> {
        (**self).get()
    }

    fn set(&mut self, value: u64) -> Result<(), StoreError> {
        (**self).set(value)
    }
}

impl<T> BestScoreStore for Box<T>
where
    T: BestScoreStore + ?Sized,
{
    fn get(&self) -> Result<u64, StoreError> {
        (**self).get()
    }

    fn set(&mut self, value: u64) -> Result<(), StoreError> {
        (**self).set(value)
    }
}

/// In-process store, lost when the program exits.
///
/// ```
/// use tilemerge_engine::{BestScoreStore as _, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// assert_eq!(store.get().unwrap(), 0);
/// store.set(2048).unwrap();
/// assert_eq!(store.get().unwrap(), 2048);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: u64,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(value: u64) -> Self {
        Self { value, writes: 0 }
    }

    /// Number of successful `set` calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl BestScoreStore for MemoryStore {
    fn get(&self) -> Result<u64, StoreError> {
        Ok(self.value)
    }

    fn set(&mut self, value: u64) -> Result<(), StoreError> {
        self.value = value;
        self.writes += 1;
        Ok(())
    }
}
