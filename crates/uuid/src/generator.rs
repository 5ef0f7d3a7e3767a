use crate::RecordId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Allocates identifiers for newly created records.
///
/// Implementations must never hand out the same id twice for the lifetime of the generator.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random canonical UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        RecordId::new().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers, counting from 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_yields_distinct_canonical_ids() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..100).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 100);
        let is_simple = |id: &String| {
            id.len() == 32 && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        };
        assert!(ids.iter().all(is_simple));
    }

    #[test]
    fn sequential_generator_counts_from_one() {
        let generator = SequentialIdGenerator::new("rem");
        assert_eq!(generator.next_id(), "rem-1");
        assert_eq!(generator.next_id(), "rem-2");
        assert_eq!(generator.next_id(), "rem-3");
    }
}
