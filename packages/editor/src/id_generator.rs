use crate::element::{Element, ElementId};
use crate::tree::ElementTree;
use crc32fast::Hasher;

/// Generate a session seed from a session name using CRC32
pub fn session_seed(session: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(session.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for the elements of one editing session.
///
/// The counter only ever grows, so an id handed out once is never handed out
/// again, even after the element carrying it has been deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(session: &str) -> Self {
        Self::from_seed(session_seed(session))
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> ElementId {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Move the counter past every id in `tree` that this generator could
    /// have produced, so a tree loaded from disk can keep being edited.
    pub fn reserve(&mut self, tree: &ElementTree) {
        for root in tree.roots() {
            self.reserve_element(root);
        }
    }

    /// Same as [`reserve`](Self::reserve) for one subtree, used when an
    /// element built outside this generator joins the tree.
    pub fn reserve_element(&mut self, element: &Element) {
        let prefix = format!("{}-", self.seed);
        for node in element.descendants() {
            let issued = node
                .id()
                .strip_prefix(&prefix)
                .and_then(|n| n.parse::<u64>().ok());
            if let Some(n) = issued {
                self.count = self.count.max(n);
            }
        }
    }

    /// Get session seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out (or reserved) so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind};

    #[test]
    fn test_session_seed_generation() {
        let seed1 = session_seed("landing-page");
        let seed2 = session_seed("landing-page");

        // Same session always generates same seed
        assert_eq!(seed1, seed2);

        // Different sessions generate different seeds
        assert_ne!(seed1, session_seed("pricing-page"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("test");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id3.ends_with("-3"));

        let seed = gen.seed();
        assert!(id1.starts_with(seed));
        assert!(id3.starts_with(seed));
    }

    #[test]
    fn test_reserve_skips_existing_ids() {
        let mut gen = IdGenerator::from_seed("abc".to_string());
        let tree = ElementTree::from_roots(vec![
            Element::new("abc-7", ElementKind::Text),
            Element::new("abc-x", ElementKind::Text),
            Element::new("other-40", ElementKind::Text),
        ])
        .unwrap();

        gen.reserve(&tree);
        assert_eq!(gen.issued(), 7);
        assert_eq!(gen.new_id(), "abc-8");
    }

    #[test]
    fn test_reserve_element_covers_children() {
        let mut gen = IdGenerator::from_seed("abc".to_string());
        let section = Element::new("abc-1", ElementKind::Section)
            .with_children(vec![Element::new("abc-5", ElementKind::Text)])
            .unwrap();

        gen.reserve_element(&section);
        assert_eq!(gen.new_id(), "abc-6");
    }
}
