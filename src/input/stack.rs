//! Ordered record of held bindings

/// Held binding ids, oldest first. An id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveStack {
    ids: Vec<String>,
}

impl ActiveStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` as the newest press. Returns `false` (and leaves the
    /// order alone) if it is already held.
    pub fn push(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Remove every occurrence of `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|held| held != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|held| held == id)
    }

    /// Most recent press still held
    pub fn top(&self) -> Option<&str> {
        self.ids.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    /// Take every id out, oldest first
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.ids)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut stack = ActiveStack::new();
        stack.push("left");
        stack.push("right");
        assert_eq!(stack.as_slice(), ["left", "right"]);
        assert_eq!(stack.top(), Some("right"));
    }

    #[test]
    fn test_push_is_idempotent() {
        let mut stack = ActiveStack::new();
        assert!(stack.push("left"));
        assert!(stack.push("right"));
        assert!(!stack.push("left"));
        assert_eq!(stack.as_slice(), ["left", "right"]);
    }

    #[test]
    fn test_remove_middle() {
        let mut stack = ActiveStack::new();
        for id in ["a", "b", "c"] {
            stack.push(id);
        }
        assert!(stack.remove("b"));
        assert!(!stack.remove("b"));
        assert_eq!(stack.as_slice(), ["a", "c"]);
    }

    #[test]
    fn test_drain_empties() {
        let mut stack = ActiveStack::new();
        stack.push("a");
        stack.push("b");
        assert_eq!(stack.drain(), vec!["a".to_string(), "b".to_string()]);
        assert!(stack.is_empty());
    }
}
