//! Folding layers over the base resolver set.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    BookOwnershipCheck, DenyAccessToUnownedBooks, Layer, MaskSensitiveFields, Operation, ResolverSet,
};

/// Provider name recorded for operations no layer overrides.
pub const BASE_PROVIDER: &str = "base";

/// The composed, immutable resolver set plus a record of how it was built.
#[derive(Clone, Debug)]
pub struct Stack {
    resolvers: Arc<ResolverSet>,
    providers: BTreeMap<Operation, &'static str>,
    layers: Vec<&'static str>,
}

impl Stack {
    pub fn shared(&self) -> Arc<ResolverSet> {
        Arc::clone(&self.resolvers)
    }

    /// Name of the layer whose override answers `op` (the last one to
    /// override it), or [`BASE_PROVIDER`].
    pub fn provider(&self, op: Operation) -> &'static str {
        self.providers.get(&op).copied().unwrap_or(BASE_PROVIDER)
    }

    /// Layer names in fold order (innermost first).
    pub fn layers(&self) -> &[&'static str] {
        &self.layers
    }
}

impl core::ops::Deref for Stack {
    type Target = ResolverSet;

    fn deref(&self) -> &ResolverSet {
        &self.resolvers
    }
}

/// Fold `layers` over `base`, left to right.
///
/// Each step hands the running set to the layer as "previous", then takes
/// the layer's override for every operation it declares and keeps the
/// running handler for the rest. A later layer therefore wraps earlier
/// overrides of the same operation; an earlier one never sees later ones.
pub fn compose(base: ResolverSet, layers: &[Box<dyn Layer>]) -> Stack {
    let mut current = Arc::new(base);
    let mut providers = BTreeMap::new();
    let mut names = Vec::new();

    for layer in layers {
        let partial = layer.apply(Arc::clone(&current));
        for (op, delegation) in partial.declarations() {
            tracing::debug!(layer = layer.name(), operation = %op, ?delegation, "layer overrides operation");
            if let Some(shadowed) = providers.insert(op, layer.name()) {
                tracing::debug!(layer = layer.name(), operation = %op, wraps = shadowed, "override wraps earlier layer");
            }
        }

        current = Arc::new(partial.merge_over(&current));
        names.push(layer.name());
    }

    tracing::info!(layers = ?names, "resolver stack composed");

    Stack {
        resolvers: current,
        providers,
        layers: names,
    }
}

/// Ordered list of layers, folded once by [`StackBuilder::build`].
pub struct StackBuilder {
    base: ResolverSet,
    layers: Vec<Box<dyn Layer>>,
}

impl StackBuilder {
    pub fn new(base: ResolverSet) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Append a layer; it will wrap every layer added before it.
    pub fn layer(mut self, layer: impl Layer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn build(self) -> Stack {
        compose(self.base, &self.layers)
    }
}

/// Mask sensitive fields, then deny access to unowned books.
pub fn reference_stack(base: ResolverSet, check: BookOwnershipCheck) -> Stack {
    StackBuilder::new(base)
        .layer(MaskSensitiveFields)
        .layer(DenyAccessToUnownedBooks::new(check))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_auth::{Hs256TokenCodec, Identity};
    use bookshelf_core::{AuthorId, Book};

    use crate::{Delegation, FnLayer, PartialResolverSet, RequestContext, ResolverError, base_resolvers};

    fn base() -> ResolverSet {
        let store = Arc::new(bookshelf_core::seed::catalog().unwrap());
        base_resolvers(store, Arc::new(Hs256TokenCodec::new("secret")))
    }

    fn tag_titles(name: &'static str) -> FnLayer<impl Fn(Arc<ResolverSet>) -> PartialResolverSet + Send + Sync> {
        FnLayer::new(name, move |previous: Arc<ResolverSet>| {
            PartialResolverSet::new().with_books(Delegation::Filtered, move |_, ctx| {
                Ok(previous
                    .books(ctx)?
                    .into_iter()
                    .map(|b| Book {
                        title: format!("{}[{name}]", b.title),
                        ..b
                    })
                    .collect())
            })
        })
    }

    #[test]
    fn empty_layer_list_is_the_base_set() {
        let stack = compose(base(), &[]);
        let ctx = RequestContext::anonymous();

        assert!(stack.layers().is_empty());
        assert_eq!(stack.books(&ctx).unwrap().len(), 2);
        assert_eq!(stack.authors(&ctx).unwrap()[0].password, "password");
        for op in Operation::ALL {
            assert_eq!(stack.provider(op), BASE_PROVIDER);
        }
    }

    #[test]
    fn later_layers_wrap_earlier_overrides() {
        let stack = StackBuilder::new(base())
            .layer(tag_titles("inner"))
            .layer(tag_titles("outer"))
            .build();

        let books = stack.books(&RequestContext::anonymous()).unwrap();
        assert_eq!(books[1].title, "Jurassic Park[inner][outer]");
        assert_eq!(stack.provider(Operation::Books), "outer");
        assert_eq!(stack.provider(Operation::Authors), BASE_PROVIDER);
        assert_eq!(stack.layers(), &["inner", "outer"]);
    }

    #[test]
    fn replacing_layer_hides_everything_beneath() {
        let stack = StackBuilder::new(base())
            .layer(tag_titles("inner"))
            .layer(FnLayer::new("deny_all", |_previous: Arc<ResolverSet>| {
                PartialResolverSet::new().with_books(Delegation::Replaced, |_, _| Err(ResolverError::Forbidden))
            }))
            .build();

        assert_eq!(stack.books(&RequestContext::anonymous()), Err(ResolverError::Forbidden));
    }

    #[test]
    fn reference_stack_assigns_each_operation_to_its_layer() {
        let stack = reference_stack(base(), BookOwnershipCheck::default());

        assert_eq!(stack.layers(), &["mask_sensitive_fields", "deny_access_to_unowned_books"]);
        assert_eq!(stack.provider(Operation::Authenticate), BASE_PROVIDER);
        assert_eq!(stack.provider(Operation::Books), "deny_access_to_unowned_books");
        assert_eq!(stack.provider(Operation::Book), "deny_access_to_unowned_books");
        assert_eq!(stack.provider(Operation::Authors), "mask_sensitive_fields");
        assert_eq!(stack.provider(Operation::Author), "mask_sensitive_fields");
    }

    #[test]
    fn order_of_disjoint_layers_does_not_change_results() {
        let forward = reference_stack(base(), BookOwnershipCheck::default());
        let reversed = StackBuilder::new(base())
            .layer(DenyAccessToUnownedBooks::default())
            .layer(MaskSensitiveFields)
            .build();
        let ctx = RequestContext::authenticated(Identity::new(AuthorId::new(1)));

        assert_eq!(forward.books(&ctx), reversed.books(&ctx));
        assert_eq!(forward.authors(&ctx), reversed.authors(&ctx));
    }
}
