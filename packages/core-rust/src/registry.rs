//! Marker-to-chain registry.
//!
//! Two phases:
//! 1. [`RegistryBuilder`] collects `register(marker, interceptor)` and
//!    `declare(operation)` calls during startup.
//! 2. [`RegistryBuilder::build`] freezes everything into an
//!    [`InterceptorRegistry`] with one precomputed chain per declared
//!    operation. The frozen registry has no mutating methods, so it can be
//!    shared behind an `Arc` and read from any number of threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::interceptor::{Interceptor, SharedInterceptor};
use crate::marker::Marker;
use crate::operation::{OperationDeclaration, OperationId};

/// Frozen chain for one operation.
pub type Chain = Arc<[SharedInterceptor]>;

// ---------------------------------------------------------------------------
// RegistryBuilder
// ---------------------------------------------------------------------------

/// Mutable registry used during startup.
#[derive(Default)]
pub struct RegistryBuilder {
    chains: HashMap<Marker, Vec<SharedInterceptor>>,
    declarations: HashMap<OperationId, OperationDeclaration>,
    /// Declaration order, for deterministic iteration.
    declared_order: Vec<OperationId>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `interceptor` to the chain for `marker`.
    ///
    /// Registration order is execution order: the first interceptor registered
    /// under a marker is the outermost.
    pub fn register<I>(&mut self, marker: Marker, interceptor: I) -> &mut Self
    where
        I: Interceptor + 'static,
    {
        self.register_shared(marker, Arc::new(interceptor))
    }

    /// Like [`register`](Self::register) for an interceptor that is already shared.
    pub fn register_shared(&mut self, marker: Marker, interceptor: SharedInterceptor) -> &mut Self {
        debug!(marker = %marker, interceptor = interceptor.name(), "interceptor registered");
        self.chains.entry(marker).or_default().push(interceptor);
        self
    }

    /// Records which markers an operation carries.
    ///
    /// Redeclaring an operation replaces the earlier declaration.
    pub fn declare(&mut self, declaration: OperationDeclaration) -> &mut Self {
        let id = declaration.id().clone();
        if self.declarations.insert(id.clone(), declaration).is_some() {
            warn!(operation = %id, "operation redeclared, previous markers replaced");
        } else {
            self.declared_order.push(id);
        }
        self
    }

    /// Chain for a declaration, computed from the current registrations.
    #[must_use]
    pub fn resolve(&self, declaration: &OperationDeclaration) -> Vec<SharedInterceptor> {
        resolve_markers(&self.chains, declaration.markers())
    }

    /// Freezes the builder, precomputing the chain of every declared operation.
    #[must_use]
    pub fn build(self) -> InterceptorRegistry {
        let resolved = self
            .declared_order
            .iter()
            .filter_map(|id| self.declarations.get(id))
            .map(|decl| {
                let chain: Chain = resolve_markers(&self.chains, decl.markers()).into();
                (decl.id().clone(), chain)
            })
            .collect();

        InterceptorRegistry {
            chains: self.chains,
            declarations: self.declarations,
            resolved,
            empty: Arc::from(Vec::new()),
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("markers", &self.chains.len())
            .field("operations", &self.declarations.len())
            .finish_non_exhaustive()
    }
}

fn resolve_markers(
    chains: &HashMap<Marker, Vec<SharedInterceptor>>,
    markers: &[Marker],
) -> Vec<SharedInterceptor> {
    markers
        .iter()
        .filter_map(|marker| chains.get(marker))
        .flat_map(|chain| chain.iter().cloned())
        .collect()
}

// ---------------------------------------------------------------------------
// InterceptorRegistry
// ---------------------------------------------------------------------------

/// Read-only registry produced by [`RegistryBuilder::build`].
pub struct InterceptorRegistry {
    chains: HashMap<Marker, Vec<SharedInterceptor>>,
    declarations: HashMap<OperationId, OperationDeclaration>,
    resolved: HashMap<OperationId, Chain>,
    empty: Chain,
}

impl InterceptorRegistry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Chain for an arbitrary declaration: the chains of its markers, concatenated
    /// in declaration order. Unknown markers contribute nothing.
    #[must_use]
    pub fn resolve(&self, declaration: &OperationDeclaration) -> Vec<SharedInterceptor> {
        resolve_markers(&self.chains, declaration.markers())
    }

    /// Precomputed chain for a declared operation; empty for undeclared ones.
    #[must_use]
    pub fn resolve_id(&self, id: &OperationId) -> Chain {
        self.resolved
            .get(id)
            .map_or_else(|| Arc::clone(&self.empty), Arc::clone)
    }

    /// Declaration recorded for `id`, if any.
    #[must_use]
    pub fn declaration(&self, id: &OperationId) -> Option<&OperationDeclaration> {
        self.declarations.get(id)
    }

    /// Number of interceptors registered under `marker`.
    #[must_use]
    pub fn chain_len(&self, marker: &Marker) -> usize {
        self.chains.get(marker).map_or(0, Vec::len)
    }
}

impl fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorRegistry")
            .field("markers", &self.chains.len())
            .field("operations", &self.declarations.len())
            .finish_non_exhaustive()
    }
}
