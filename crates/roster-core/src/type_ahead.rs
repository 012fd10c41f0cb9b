//! Accumulating type-ahead buffer with a restartable quiet period.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_SEARCH_TIMEOUT;

/// Accumulates typed input for prefix matching.
///
/// Every [`push`](TypeAhead::push) restarts the quiet period and bumps a
/// generation counter. The buffer starts over when either
///
/// - the next `push` arrives after the quiet period has elapsed, or
/// - the host's timer fires and calls [`expire`](TypeAhead::expire) with the
///   generation it was armed for. Timers armed before a later `push` carry a
///   stale generation and are ignored.
///
/// ```
/// use roster_core::type_ahead::TypeAhead;
///
/// let mut buffer = TypeAhead::new();
/// buffer.push("A");
/// let generation = buffer.push("p");
/// assert_eq!(buffer.query(), "ap");
///
/// buffer.expire(generation);
/// assert_eq!(buffer.query(), "");
/// ```
#[derive(Debug, Clone)]
pub struct TypeAhead {
    buffer: String,
    last_input: Option<Instant>,
    timeout: Duration,
    generation: u64,
}

impl Default for TypeAhead {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeAhead {
    /// Create an empty buffer with the default 500 ms quiet period.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_SEARCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            buffer: String::new(),
            last_input: None,
            timeout,
            generation: 0,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Append lowercased `input`, restarting the quiet period.
    ///
    /// Returns the generation a host timer should pass to
    /// [`expire`](TypeAhead::expire).
    pub fn push(&mut self, input: &str) -> u64 {
        self.push_at(input, Instant::now())
    }

    fn push_at(&mut self, input: &str, now: Instant) -> u64 {
        if self.is_idle_at(now) {
            self.buffer.clear();
        }
        self.buffer.extend(input.chars().flat_map(char::to_lowercase));
        self.last_input = Some(now);
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Clear the buffer if no input arrived since the timer for `generation`
    /// was armed. Returns whether the buffer was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.clear();
        true
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_input = None;
    }

    /// The accumulated, lowercased query.
    pub fn query(&self) -> &str {
        &self.buffer
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the quiet period has elapsed since the last input.
    pub fn is_idle(&self) -> bool {
        self.is_idle_at(Instant::now())
    }

    fn is_idle_at(&self, now: Instant) -> bool {
        match self.last_input {
            Some(at) => now.saturating_duration_since(at) >= self.timeout,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_lowercase() {
        let mut t = TypeAhead::new();
        t.push("B");
        t.push("A");
        assert_eq!(t.query(), "ba");
    }

    #[test]
    fn quiet_period_restarts_query() {
        let start = Instant::now();
        let mut t = TypeAhead::with_timeout(Duration::from_millis(500));
        t.push_at("a", start);
        t.push_at("p", start + Duration::from_millis(300)); // within window
        assert_eq!(t.query(), "ap");
        // 400ms after the *last* input: still within the restarted window.
        t.push_at("r", start + Duration::from_millis(700));
        assert_eq!(t.query(), "apr");
        t.push_at("b", start + Duration::from_millis(1300)); // 600ms quiet
        assert_eq!(t.query(), "b");
    }

    #[test]
    fn real_clock_expiry() {
        let mut t = TypeAhead::with_timeout(Duration::from_millis(1));
        t.push("a");
        std::thread::sleep(Duration::from_millis(5));
        assert!(t.is_idle());
        t.push("b");
        assert_eq!(t.query(), "b");
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut t = TypeAhead::new();
        let first = t.push("a");
        let second = t.push("b");
        assert!(!t.expire(first));
        assert_eq!(t.query(), "ab");
        assert!(t.expire(second));
        assert_eq!(t.query(), "");
    }

    #[test]
    fn empty_input_keeps_query() {
        let mut t = TypeAhead::new();
        t.push("");
        assert_eq!(t.query(), "");
        assert_eq!(t.generation(), 1);
    }
}
