//! Immutable, hierarchically derived request context.
//!
//! A [`Context`] is a chain of layers. Deriving a child with
//! [`Context::with_value`] pushes one layer on top of the parent without
//! touching it; lookups walk from the newest layer towards the root, so the
//! nearest binding of a key wins. Layers are reference counted and shared
//! between every clone and descendant, which means a value stored in a layer
//! is visible (by reference) from every context derived from it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Value type a context can carry
pub type ContextValue = Arc<dyn Any + Send + Sync>;

/// Key under which a value is bound in a [`Context`].
///
/// Keys compare by name. Two independently declared keys with the same name
/// address the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey(&'static str);

impl ContextKey {
    /// Declare a key
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Name of the key
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

struct Layer {
    key: ContextKey,
    value: ContextValue,
    parent: Option<Arc<Layer>>,
}

impl Drop for Layer {
    // Unlink parents one at a time; the default recursive drop overflows
    // the stack on long chains.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(layer) = parent {
            parent = Arc::into_inner(layer).and_then(|mut layer| layer.parent.take());
        }
    }
}

/// Request-scoped, immutable value carrier.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Layer>>,
}

impl Context {
    /// Root context carrying no values
    pub const fn background() -> Self {
        Self { head: None }
    }

    /// Derive a child context binding `key` to `value`.
    pub fn with_value(&self, key: ContextKey, value: ContextValue) -> Self {
        Self {
            head: Some(Arc::new(Layer {
                key,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the nearest value bound to `key`
    pub fn value(&self, key: ContextKey) -> Option<ContextValue> {
        self.layers()
            .find(|layer| layer.key == key)
            .map(|layer| Arc::clone(&layer.value))
    }

    /// Number of layers between this context and the root
    pub fn depth(&self) -> usize {
        self.layers().count()
    }

    /// Whether two contexts share the exact same newest layer.
    ///
    /// True for clones of one context and for a context returned unchanged
    /// by an operation; false for any derived child.
    pub fn same_layer(a: &Self, b: &Self) -> bool {
        match (&a.head, &b.head) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            (None, None) => true,
            _ => false,
        }
    }

    fn layers(&self) -> impl Iterator<Item = &Layer> {
        let mut next = self.head.as_deref();
        std::iter::from_fn(move || {
            let layer = next?;
            next = layer.parent.as_deref();
            Some(layer)
        })
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are opaque; only keys are shown.
        f.debug_struct("Context")
            .field("keys", &self.layers().map(|l| l.key.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: ContextKey = ContextKey::new("test.name");
    const OTHER: ContextKey = ContextKey::new("test.other");

    fn string_value(ctx: &Context, key: ContextKey) -> Option<String> {
        ctx.value(key)
            .and_then(|v| v.downcast::<String>().ok())
            .map(|s| (*s).clone())
    }

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.value(NAME).is_none());
    }

    #[test]
    fn test_with_value_leaves_parent_untouched() {
        let parent = Context::background();
        let child = parent.with_value(NAME, Arc::new("alice".to_string()));

        assert!(parent.value(NAME).is_none());
        assert_eq!(string_value(&child, NAME).as_deref(), Some("alice"));
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn test_nearest_layer_wins() {
        let ctx = Context::background()
            .with_value(NAME, Arc::new("outer".to_string()))
            .with_value(OTHER, Arc::new(7_u32))
            .with_value(NAME, Arc::new("inner".to_string()));

        assert_eq!(string_value(&ctx, NAME).as_deref(), Some("inner"));
        assert_eq!(
            ctx.value(OTHER).and_then(|v| v.downcast::<u32>().ok()).map(|v| *v),
            Some(7)
        );
    }

    #[test]
    fn test_keys_compare_by_name() {
        let alias = ContextKey::new("test.name");
        let ctx = Context::background().with_value(NAME, Arc::new("x".to_string()));
        assert_eq!(string_value(&ctx, alias).as_deref(), Some("x"));
    }

    #[test]
    fn test_same_layer() {
        let root = Context::background();
        let child = root.with_value(NAME, Arc::new(1_u8));
        let clone = child.clone();

        assert!(Context::same_layer(&child, &clone));
        assert!(!Context::same_layer(&root, &child));
        assert!(Context::same_layer(&root, &Context::default()));
    }

    #[test]
    fn test_drop_deep_chain() {
        let mut ctx = Context::background();
        for i in 0..1_000_000_u32 {
            ctx = ctx.with_value(OTHER, Arc::new(i));
        }
        assert_eq!(ctx.depth(), 1_000_000);
        drop(ctx);
    }

    #[test]
    fn test_drop_keeps_shared_ancestors_alive() {
        let mut base = Context::background();
        for i in 0..10_000_u32 {
            base = base.with_value(OTHER, Arc::new(i));
        }
        let mut branch = base.with_value(NAME, Arc::new("branch".to_string()));
        for i in 0..10_000_u32 {
            branch = branch.with_value(OTHER, Arc::new(i));
        }

        drop(branch);
        assert_eq!(base.depth(), 10_000);
        assert_eq!(
            base.value(OTHER).and_then(|v| v.downcast::<u32>().ok()).map(|v| *v),
            Some(9_999)
        );
    }

    #[test]
    fn test_debug_lists_keys_only() {
        let ctx = Context::background().with_value(NAME, Arc::new("secret".to_string()));
        let rendered = format!("{ctx:?}");
        assert!(rendered.contains("test.name"));
        assert!(!rendered.contains("secret"));
    }
}
