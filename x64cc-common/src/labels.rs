//! Label numbering for code generation

/// Label identifier for code generation
pub type LabelId = u32;

/// Hands out labels that are unique across one compilation.
///
/// The counter is monotonic and never reset, so every label produced by one
/// generator is distinct regardless of its prefix.
#[derive(Debug, Clone)]
pub struct LabelGenerator {
    next_id: LabelId,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Generate a new label with a prefix
    pub fn new_label_with_prefix(&mut self, prefix: &str) -> String {
        let label = format!("{}_{}", prefix, self.next_id);
        self.next_id += 1;
        label
    }

    /// Number of labels handed out so far
    pub fn issued(&self) -> u32 {
        self.next_id.saturating_sub(1)
    }
}

impl Default for LabelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_generator() {
        let mut gen = LabelGenerator::new();

        assert_eq!(gen.new_label_with_prefix(".Lelse"), ".Lelse_1");
        assert_eq!(gen.new_label_with_prefix(".Ltrue"), ".Ltrue_2");
        assert_eq!(gen.new_label_with_prefix(".Lend"), ".Lend_3");
        assert_eq!(gen.issued(), 3);
    }

    #[test]
    fn test_labels_unique_across_prefixes() {
        let mut gen = LabelGenerator::new();
        let mut seen = std::collections::HashSet::new();
        for prefix in [".Lelse", ".Lend", ".Lelse", ".Ltrue"].iter().cycle().take(40) {
            assert!(seen.insert(gen.new_label_with_prefix(prefix)));
        }
    }
}
