//! Hierarchical scope table for signal introspection.
//!
//! Scopes mirror the design hierarchy: packages and module instances, each
//! with a dotted full path, an ordered child list and a map from local signal
//! name to [`SignalId`]. Nodes live in an [`Arena`] and refer to their parent
//! by ID only. Full signal paths are indexed in a sorted map so both exact
//! lookups and prefix listings are cheap.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use dpsim_common::{define_id, Arena, Ident, Interner};
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::signal::SignalId;

define_id!(
    /// Opaque ID for a node in the [`ScopeTable`].
    ScopeId
);

/// The HDL construct a scope was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    /// A package such as the compilation unit `$unit`.
    Package,
    /// A module instance.
    Module,
}

/// One node of the hierarchy.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    name: Ident,
    path: String,
    def_name: String,
    kind: ScopeKind,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    signals: BTreeMap<Ident, SignalId>,
}

impl ScopeNode {
    /// Full dotted path, e.g. `harness.alu`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the module or package definition, e.g. `arithmetic_logic_unit`.
    pub fn def_name(&self) -> &str {
        &self.def_name
    }

    /// Package or module.
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Child scopes in registration order.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// Number of signals declared directly in this scope.
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }
}

/// Arena of scopes plus path indexes.
#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: Arena<ScopeId, ScopeNode>,
    scope_paths: HashMap<String, ScopeId>,
    signal_paths: BTreeMap<String, SignalId>,
    names: Interner,
}

impl ScopeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether the table has no scopes.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Adds a scope under `parent` (or at the root).
    pub fn add_scope(
        &mut self,
        parent: Option<ScopeId>,
        name: &str,
        def_name: &str,
        kind: ScopeKind,
    ) -> Result<ScopeId, SimError> {
        let path = match parent {
            Some(p) => {
                let parent_node = self
                    .scopes
                    .try_get(p)
                    .ok_or(SimError::UnknownParent(p.as_raw()))?;
                format!("{}.{name}", parent_node.path)
            }
            None => name.to_string(),
        };
        if self.scope_paths.contains_key(&path) {
            return Err(SimError::DuplicatePath { path });
        }
        let ident = self.names.get_or_intern(name);
        let id = self.scopes.alloc(ScopeNode {
            name: ident,
            path: path.clone(),
            def_name: def_name.to_string(),
            kind,
            parent,
            children: Vec::new(),
            signals: BTreeMap::new(),
        });
        if let Some(p) = parent {
            self.scopes.get_mut(p).children.push(id);
        }
        self.scope_paths.insert(path, id);
        Ok(id)
    }

    /// The full path a signal named `name` would get in `scope`.
    pub fn signal_path(&self, scope: ScopeId, name: &str) -> Result<String, SimError> {
        let node = self
            .scopes
            .try_get(scope)
            .ok_or(SimError::UnknownParent(scope.as_raw()))?;
        Ok(format!("{}.{name}", node.path))
    }

    /// Records `signal` as `name` in `scope`.
    pub fn add_signal(
        &mut self,
        scope: ScopeId,
        name: &str,
        signal: SignalId,
    ) -> Result<(), SimError> {
        let path = self.signal_path(scope, name)?;
        if self.signal_paths.contains_key(&path) {
            return Err(SimError::DuplicatePath { path });
        }
        let ident = self.names.get_or_intern(name);
        self.scopes.get_mut(scope).signals.insert(ident, signal);
        self.signal_paths.insert(path, signal);
        Ok(())
    }

    /// Resolves a full signal path.
    pub fn lookup_signal(&self, path: &str) -> Result<SignalId, SimError> {
        self.signal_paths
            .get(path)
            .copied()
            .ok_or_else(|| SimError::SignalNotFound {
                path: path.to_string(),
            })
    }

    /// Resolves a full scope path.
    pub fn lookup_scope(&self, path: &str) -> Result<ScopeId, SimError> {
        self.scope_paths
            .get(path)
            .copied()
            .ok_or_else(|| SimError::ScopeNotFound {
                path: path.to_string(),
            })
    }

    /// Returns the node for `id`.
    pub fn get(&self, id: ScopeId) -> &ScopeNode {
        self.scopes.get(id)
    }

    /// Local name of a scope.
    pub fn name(&self, id: ScopeId) -> &str {
        self.names.resolve(self.scopes.get(id).name)
    }

    /// Signals whose full path starts with `prefix`, sorted by path.
    pub fn signals_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, SignalId)> + 'a {
        self.signal_paths
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(path, _)| path.starts_with(prefix))
            .map(|(path, &id)| (path.as_str(), id))
    }

    /// Root scopes in registration order.
    pub fn roots(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.scopes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Scope paths in teardown order: the reverse of construction, so every
    /// child is removed before its parent.
    pub fn teardown_order(&self) -> Vec<String> {
        let mut order: Vec<_> = self.scopes.values().map(|n| n.path.clone()).collect();
        order.reverse();
        order
    }
}
