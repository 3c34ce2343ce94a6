//! The Chunk type - a fixed-capacity buffer slot for stream data.

/// A fixed-capacity byte chunk.
///
/// The backing storage is allocated once at the capacity chosen by the pool
/// and never grows. `len` tracks the filled prefix: bytes fetched from the
/// source live in `filled()`, the remaining room is exposed via
/// `spare_mut()`.
///
/// A chunk is owned by exactly one party at a time: a pool while idle, a
/// reader while holding stream data. Handing it over is a move, so shared
/// or double ownership does not compile.
///
/// # Example
///
/// ```
/// use bufseek::Chunk;
///
/// let mut chunk = Chunk::new(8);
/// let n = {
///     let spare = chunk.spare_mut();
///     spare[..5].copy_from_slice(b"hello");
///     5
/// };
/// chunk.advance(n);
///
/// assert_eq!(chunk.filled(), b"hello");
/// assert_eq!(chunk.capacity(), 8);
/// assert!(!chunk.is_full());
/// ```
#[derive(Debug)]
pub struct Chunk {
    data: Vec<u8>,
    len: usize,
}

impl Chunk {
    /// Creates an empty chunk with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            len: 0,
        }
    }

    /// Returns the fixed capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of filled bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no bytes are filled.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if there is no spare room left.
    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    /// Returns the filled prefix.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Returns the unfilled suffix for the next source read.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.len..]
    }

    /// Marks `n` more bytes as filled.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the spare room.
    pub fn advance(&mut self, n: usize) {
        assert!(
            self.len + n <= self.data.len(),
            "advance past chunk capacity"
        );
        self.len += n;
    }

    /// Empties the chunk, keeping the allocation.
    pub fn reset(&mut self) {
        self.len = 0;
    }
}
