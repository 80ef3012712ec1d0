//! Reusable markup buffer.

use crate::config::DEFAULT_RENDER_BUFFER_CAPACITY;

/// Scratch buffer reused across render passes.
///
/// The capacity is only a hint for append performance; contents are cleared
/// at the start of every pass.
#[derive(Debug)]
pub struct RenderCache {
    buffer: String,
    capacity_hint: usize,
}

impl RenderCache {
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity_hint),
            capacity_hint,
        }
    }

    /// Clears and returns the buffer for a new pass.
    pub fn scratch(&mut self) -> &mut String {
        self.buffer.clear();
        if self.buffer.capacity() < self.capacity_hint {
            self.buffer.reserve(self.capacity_hint);
        }
        &mut self.buffer
    }

    /// Markup produced by the last pass.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RENDER_BUFFER_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::RenderCache;

    #[test]
    fn scratch_clears_previous_pass() {
        let mut cache = RenderCache::with_capacity(16);
        cache.scratch().push_str("first");
        assert_eq!(cache.as_str(), "first");
        cache.scratch().push_str("second");
        assert_eq!(cache.as_str(), "second");
        assert!(cache.scratch().capacity() >= 16);
    }
}
