use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::commitment::{Address, Label};

/// Immutable label -> depositor map. A label is bound to exactly one
/// depositor, set at most once, and is used exclusively to authorize
/// ragequit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRegistry(BTreeMap<Label, Address>);

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `label` to `depositor`. Returns false if the label was
    /// already registered, in which case the existing binding stands.
    pub fn register_once(&mut self, label: Label, depositor: Address) -> bool {
        match self.0.entry(label) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(depositor);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn owner_of(&self, label: &Label) -> Option<Address> {
        self.0.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::commitment::{AssetId, Scope};

    #[test]
    fn test_register_once() {
        let mut registry = LabelRegistry::new();
        let scope = Scope::new(AssetId::from_symbol("NATIVE"), b"test");
        let label = Label::mint(scope, 0);
        let (alice, mallory) = (Address([1; 20]), Address([2; 20]));

        assert_eq!(registry.owner_of(&label), None);
        assert!(registry.register_once(label, alice));
        assert_eq!(registry.owner_of(&label), Some(alice));

        // second write is rejected and the first binding stands
        assert!(!registry.register_once(label, mallory));
        assert_eq!(registry.owner_of(&label), Some(alice));
    }
}
