/// One mono block of f32 samples as delivered by a capture callback.
pub type AudioBlock = Vec<f32>;

/// Append-only accumulator for captured PCM blocks.
///
/// Unlike a fixed-capacity ring buffer, this never drops samples: a session
/// may record for an unbounded duration and every delivered block must
/// survive until the encode pass. Blocks are kept whole until `drain()`
/// flattens them, so `append` stays O(1) amortized with no per-block copy.
///
/// Not internally synchronized; the session wraps it in
/// `Arc<parking_lot::Mutex<..>>` together with the state machine.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    blocks: Vec<AudioBlock>,
    total_len: usize,
}

impl SampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one block to the tail. Block contents are not validated.
    pub fn append(&mut self, block: AudioBlock) {
        self.total_len += block.len();
        self.blocks.push(block);
    }

    /// Total accumulated sample count across all appended blocks.
    pub fn len(&self) -> usize {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Return every accumulated sample as one contiguous buffer, preserving
    /// block order and intra-block order, and reset the buffer to empty.
    ///
    /// Draining an empty buffer returns an empty vec.
    pub fn drain(&mut self) -> Vec<f32> {
        let mut samples = Vec::with_capacity(self.total_len);
        for block in self.blocks.drain(..) {
            samples.extend_from_slice(&block);
        }
        self.total_len = 0;
        samples
    }

    /// Discard all accumulated blocks.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.total_len = 0;
    }
}
