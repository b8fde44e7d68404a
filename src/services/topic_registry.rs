use std::collections::HashSet;
use std::sync::Mutex;

/// Tracks which broker topics this service currently holds subscriptions for.
///
/// Membership is a plain set: a second subscribe and an unsubscribe of an
/// unknown topic are no-ops. The transport callback and the admin surface
/// share one instance, hence the mutex.
#[derive(Debug, Default)]
pub struct TopicRegistry {
    topics: Mutex<HashSet<String>>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the topic was not tracked before.
    pub fn add(&self, topic: &str) -> bool {
        self.topics.lock().unwrap().insert(topic.to_string())
    }

    /// Returns `true` when the topic was tracked.
    pub fn remove(&self, topic: &str) -> bool {
        self.topics.lock().unwrap().remove(topic)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.lock().unwrap().contains(topic)
    }

    /// Snapshot of the tracked topics, in no particular order.
    pub fn list(&self) -> Vec<String> {
        self.topics.lock().unwrap().iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_is_idempotent() {
        let registry = TopicRegistry::new();

        assert!(registry.add("sensor/data"));
        assert!(!registry.add("sensor/data"));

        assert_eq!(registry.list(), vec!["sensor/data"]);
    }

    #[test]
    fn test_unsubscribe_of_non_member_is_noop() {
        let registry = TopicRegistry::new();

        assert!(!registry.remove("device/status"));

        registry.add("device/status");

        assert!(registry.remove("device/status"));
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_contains_tracks_membership() {
        let registry = TopicRegistry::new();

        assert!(!registry.contains("devices"));
        registry.add("devices");
        assert!(registry.contains("devices"));
    }
}
