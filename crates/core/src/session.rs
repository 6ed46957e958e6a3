//! Last-issued-wins bookkeeping for fetches that can be superseded before
//! they resolve (e.g. the selected product changes mid-flight).

/// Identifies one issued request. Only the most recently issued token can
/// resolve its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct LatestSlot<T> {
    issued: u64,
    value: Option<T>,
    resolved: Option<u64>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            value: None,
            resolved: None,
        }
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every token issued before it.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Whether the latest issued request has not resolved yet.
    pub fn is_pending(&self) -> bool {
        self.issued > 0 && self.resolved != Some(self.issued)
    }

    /// Stores `value` if `token` is still the latest; stale results are dropped.
    pub fn resolve(&mut self, token: RequestToken, value: T) -> bool {
        if !self.is_current(token) {
            tracing::debug!(
                stale = token.0,
                latest = self.issued,
                "discarding superseded response"
            );
            return false;
        }
        self.value = Some(value);
        self.resolved = Some(token.0);
        true
    }

    /// The last accepted value. It may belong to an older request while a
    /// newer one is pending.
    pub fn current(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_request_wins_regardless_of_completion_order() {
        let mut slot = LatestSlot::new();
        let first = slot.issue();
        let second = slot.issue();

        assert!(slot.resolve(second, "second"));
        assert!(!slot.resolve(first, "first"));
        assert_eq!(slot.current(), Some(&"second"));
        assert!(!slot.is_pending());
    }

    #[test]
    fn keeps_previous_value_while_newer_request_pending() {
        let mut slot = LatestSlot::new();
        let a = slot.issue();
        assert!(slot.is_pending());
        assert!(slot.resolve(a, 1));

        let b = slot.issue();
        assert!(slot.is_pending());
        assert!(!slot.is_current(a));
        assert_eq!(slot.current(), Some(&1));

        assert!(slot.resolve(b, 2));
        assert_eq!(slot.current(), Some(&2));
        assert!(b.generation() > a.generation());
    }

    #[test]
    fn fresh_slot_is_empty() {
        let slot: LatestSlot<Vec<u8>> = LatestSlot::new();
        assert!(slot.current().is_none());
        assert!(!slot.is_pending());
    }
}
