//! Collection aliases used across tessera.
//!
//! Hash maps and sets are backed by AHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("background.png", 1u32);
        assert_eq!(map.get("background.png"), Some(&1));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert("font.ttf");
        assert!(set.contains("font.ttf"));
    }
}
