/// Ordered, append-only buffer of encoded media segments.
///
/// Shared between the encoder callback and the coordinator; wrap in
/// `Arc<parking_lot::Mutex<ChunkBuffer>>` for cross-thread access.
///
/// Empty segments (encoder keepalives) are dropped on write.
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<Vec<u8>>,
    total_bytes: u64,
    empty_dropped: u64,
    received: u64,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment. Returns `false` if it was empty and discarded.
    pub fn push(&mut self, chunk: Vec<u8>) -> bool {
        self.received += 1;
        if chunk.is_empty() {
            self.empty_dropped += 1;
            return false;
        }
        self.total_bytes += chunk.len() as u64;
        self.chunks.push(chunk);
        true
    }

    /// Remove and return every buffered segment, in arrival order.
    pub fn take(&mut self) -> Vec<Vec<u8>> {
        self.total_bytes = 0;
        std::mem::take(&mut self.chunks)
    }

    /// Number of buffered (non-empty) segments.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total size of buffered segments in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Empty segments discarded since the last reset.
    pub fn empty_dropped(&self) -> u64 {
        self.empty_dropped
    }

    /// Segments pushed since the last reset, empty or not. Unaffected by `take`.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Reset the buffer to empty state.
    pub fn reset(&mut self) {
        self.chunks.clear();
        self.total_bytes = 0;
        self.empty_dropped = 0;
        self.received = 0;
    }
}
