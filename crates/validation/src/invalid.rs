//! Denylist of explicitly invalidated locking scripts.
//!
//! Maintained out of band by the node operator or shipped with the network
//! definition; input validation only consults it.

use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
pub struct InvalidOutputs {
    scripts: HashSet<Vec<u8>>,
}

impl InvalidOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scripts<I>(scripts: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            scripts: scripts.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, script: Vec<u8>) {
        self.scripts.insert(script);
    }

    pub fn contains_script(&self, script: &[u8]) -> bool {
        self.scripts.contains(script)
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact_bytes() {
        let list = InvalidOutputs::from_scripts([vec![0x76, 0xa9], vec![0x51]]);
        assert!(list.contains_script(&[0x51]));
        assert!(!list.contains_script(&[0x52]));
        assert!(!list.contains_script(&[0x76]));
        assert!(!InvalidOutputs::new().contains_script(&[0x51]));
    }
}
