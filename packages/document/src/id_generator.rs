use uuid::Uuid;

/// Source of globally unique identifiers for pages and component instances
pub trait IdGenerator {
    fn new_id(&mut self) -> String;
}

/// Random v4 UUIDs (production default)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Sequential ID generator, deterministic for tests and fixtures
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u32,
}

impl SequentialIds {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Get ID seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("node")
    }
}

impl IdGenerator for SequentialIds {
    fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids() {
        let mut gen = SequentialIds::new("page");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert_eq!(id1, "page-1");
        assert_eq!(id2, "page-2");
        assert_eq!(id3, "page-3");
        assert_eq!(gen.seed(), "page");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let mut gen = UuidGenerator;
        let ids: HashSet<String> = (0..100).map(|_| gen.new_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}
