//! Single-slot carryover buffer.
//!
//! Output that has already been pulled off the stream but not yet handed to
//! the caller is parked here until the next read.

/// At most one pending fragment of already-read output.
#[derive(Debug, Default)]
pub struct Carryover {
    slot: Option<String>,
}

impl Carryover {
    /// Create an empty carryover.
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a fragment for the next read.
    ///
    /// Empty fragments are ignored. The slot must be empty: callers only set
    /// it after consuming the previous fragment.
    pub fn set(&mut self, text: String) {
        debug_assert!(
            self.slot.is_none(),
            "carryover set while a fragment is still pending"
        );
        if !text.is_empty() {
            self.slot = Some(text);
        }
    }

    /// Remove and return the pending fragment.
    pub fn take(&mut self) -> Option<String> {
        self.slot.take()
    }

    /// Peek at the pending fragment.
    pub fn as_str(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Check if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Drop any pending fragment.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_empties_slot() {
        let mut carryover = Carryover::new();
        carryover.set("rest of line\n".to_string());
        assert_eq!(carryover.as_str(), Some("rest of line\n"));
        assert_eq!(carryover.take().as_deref(), Some("rest of line\n"));
        assert!(carryover.is_empty());
        assert_eq!(carryover.take(), None);
    }

    #[test]
    fn test_empty_fragment_not_stored() {
        let mut carryover = Carryover::new();
        carryover.set(String::new());
        assert!(carryover.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "still pending")]
    fn test_double_set_is_a_bug() {
        let mut carryover = Carryover::new();
        carryover.set("a".to_string());
        carryover.set("b".to_string());
    }
}
