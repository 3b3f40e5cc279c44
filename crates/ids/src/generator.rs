use crate::{IdResult, ItemId};
use chrono::Utc;

/// Source of fresh item identifiers.
///
/// `last` is the highest id currently in use (if any). Implementations must return an id
/// strictly greater than `last`. Callers are expected to hold whatever lock protects the store
/// while calling this, so that `last` is still current when the new record is written.
///
/// Fails with `IdError::Exhausted` when `last` is already `i64::MAX`.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, last: Option<ItemId>) -> IdResult<ItemId>;
}

/// Issues ids from the current time in epoch milliseconds.
///
/// # Monotonicity Guarantee
///
/// If the clock reads a value at or below `last` (two creations within the same millisecond, or
/// a clock step backwards), the id is `last + 1` instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimestampIdGenerator;

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self, last: Option<ItemId>) -> IdResult<ItemId> {
        let now = ItemId::new(Utc::now().timestamp_millis());

        match last {
            Some(prev) if now <= prev => prev.next(),
            _ => Ok(now),
        }
    }
}

/// Issues `1, 2, 3, ...`, continuing after `last`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialIdGenerator;

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, last: Option<ItemId>) -> IdResult<ItemId> {
        match last {
            Some(prev) if prev.get() >= 1 => prev.next(),
            _ => Ok(ItemId::new(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdError;

    #[test]
    fn test_timestamp_generate_new() {
        let before = Utc::now().timestamp_millis();
        let id = TimestampIdGenerator::new().next_id(None).unwrap();
        let after = Utc::now().timestamp_millis();

        assert!(id.get() >= before && id.get() <= after);
    }

    #[test]
    fn test_timestamp_generate_monotonic() {
        let generator = TimestampIdGenerator::new();
        let id1 = generator.next_id(None).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let id2 = generator.next_id(Some(id1)).unwrap();

        assert!(id2 > id1);
    }

    #[test]
    fn test_timestamp_generate_monotonic_same_instant() {
        let generator = TimestampIdGenerator::new();
        let id1 = generator.next_id(None).unwrap();
        // No sleep: forces the bump path most of the time
        let id2 = generator.next_id(Some(id1)).unwrap();
        let id3 = generator.next_id(Some(id2)).unwrap();

        assert!(id2 > id1);
        assert!(id3 > id2);
    }

    #[test]
    fn test_timestamp_generate_after_future_id() {
        let generator = TimestampIdGenerator::new();
        let future = ItemId::new(Utc::now().timestamp_millis() + 60_000);

        assert_eq!(
            generator.next_id(Some(future)).unwrap(),
            future.next().unwrap()
        );
    }

    #[test]
    fn test_sequential_starts_at_one() {
        assert_eq!(SequentialIdGenerator::new().next_id(None).unwrap(), ItemId::new(1));
    }

    #[test]
    fn test_sequential_continues_after_last() {
        let generator = SequentialIdGenerator::new();
        assert_eq!(generator.next_id(Some(ItemId::new(9))).unwrap(), ItemId::new(10));
        // Ids below one (hand-edited stores) restart the sequence
        assert_eq!(generator.next_id(Some(ItemId::new(-3))).unwrap(), ItemId::new(1));
    }

    #[test]
    fn test_generators_refuse_to_reuse_max_id() {
        let max = Some(ItemId::new(i64::MAX));

        assert!(matches!(
            TimestampIdGenerator::new().next_id(max),
            Err(IdError::Exhausted(_))
        ));
        assert!(matches!(
            SequentialIdGenerator::new().next_id(max),
            Err(IdError::Exhausted(_))
        ));
    }

    #[test]
    fn test_generators_are_object_safe() {
        let generators: Vec<Box<dyn IdGenerator>> = vec![
            Box::new(TimestampIdGenerator::new()),
            Box::new(SequentialIdGenerator::new()),
        ];

        for generator in generators {
            let first = generator.next_id(None).unwrap();
            let second = generator.next_id(Some(first)).unwrap();
            assert_ne!(first, second);
        }
    }
}
