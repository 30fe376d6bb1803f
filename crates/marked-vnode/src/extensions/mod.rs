//! Extension registry for per-kind rendering overrides.

mod extension;

pub use extension::{Extension, ExtensionContext, ExtensionError, ExtensionOutput, RenderFn};

use std::fmt;

use indexmap::IndexMap;
use marked_vnode_core::Token;

/// Rendering overrides keyed by token kind.
///
/// A registry is assembled before the compiler is built and only read
/// afterwards, so one registry can be shared by compilers on many threads.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    renderers: IndexMap<String, Extension>,
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override for `kind`, replacing any earlier one
    pub fn add<F>(&mut self, kind: &str, render: F) -> &mut Self
    where
        F: Fn(&Token, &ExtensionContext<'_>) -> Result<ExtensionOutput, ExtensionError>
            + Send
            + Sync
            + 'static,
    {
        self.renderers.insert(kind.to_string(), Extension::new(render));
        self
    }

    /// Builder form of [`add`](Self::add)
    pub fn with<F>(mut self, kind: &str, render: F) -> Self
    where
        F: Fn(&Token, &ExtensionContext<'_>) -> Result<ExtensionOutput, ExtensionError>
            + Send
            + Sync
            + 'static,
    {
        self.add(kind, render);
        self
    }

    /// Take over every override of `other`; its entries win on conflict
    pub fn merge(&mut self, other: ExtensionRegistry) -> &mut Self {
        self.renderers.extend(other.renderers);
        self
    }

    /// Find the override for a token kind
    pub fn get(&self, kind: &str) -> Option<&Extension> {
        self.renderers.get(kind)
    }

    /// Registered kinds, in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suppress(_: &Token, _: &ExtensionContext<'_>) -> Result<ExtensionOutput, ExtensionError> {
        Ok(ExtensionOutput::Suppress)
    }

    #[test]
    fn test_add_and_get() {
        let mut registry = ExtensionRegistry::new();
        registry.add("mention", suppress);
        assert!(registry.get("mention").is_some());
        assert!(registry.get("strong").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_merge_keeps_order_and_overrides() {
        let mut base = ExtensionRegistry::new().with("a", suppress).with("b", suppress);
        let plugin = ExtensionRegistry::new().with("b", suppress).with("c", suppress);
        base.merge(plugin);
        assert_eq!(base.kinds().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_debug_lists_kinds() {
        let registry = ExtensionRegistry::new().with("mention", suppress);
        assert_eq!(format!("{registry:?}"), "{\"mention\"}");
    }
}
