//! The asset contract: every node of the build graph is an [`Asset`].
//!
//! An asset declares the assets it depends on and knows how to turn their
//! resolved states into its own [`State`]. Assets refer to each other by
//! [`AssetId`], an index handed out by the graph that owns them.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use clusterkit_common::State;

use crate::domain::error::AssetError;

/// Opaque handle of an asset inside its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(usize);

impl AssetId {
    /// Wrap an arena index. Ids are normally handed out by
    /// `AssetGraph::add`; constructing one by hand is useful in tests.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset #{}", self.0)
    }
}

/// Resolved states of an asset's parents, keyed by parent id.
///
/// Assets only ever read from this map.
#[derive(Debug, Default)]
pub struct ParentStates<'a> {
    states: HashMap<AssetId, &'a State>,
}

impl<'a> ParentStates<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AssetId, state: &'a State) {
        self.states.insert(id, state);
    }

    #[must_use]
    pub fn get(&self, id: AssetId) -> Option<&'a State> {
        self.states.get(&id).copied()
    }

    /// Look up a parent that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::MissingParent`] naming `what` if the parent
    /// state was not supplied.
    pub fn require(&self, id: AssetId, what: &'static str) -> Result<&'a State, AssetError> {
        self.get(id).ok_or(AssetError::MissingParent { what })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Result of one `generate` call.
///
/// Unlike a plain `Result`, a generation may carry a usable state *and* an
/// error at once: an asset whose work failed halfway can still hand back
/// what it recovered. It always carries at least one of the two.
#[derive(Debug)]
#[must_use]
pub struct Generation {
    state: Option<State>,
    error: Option<AssetError>,
}

impl Generation {
    pub fn ok(state: State) -> Self {
        Self {
            state: Some(state),
            error: None,
        }
    }

    pub fn failed(error: AssetError) -> Self {
        Self {
            state: None,
            error: Some(error),
        }
    }

    /// A recovered state together with the error that interrupted the work.
    pub fn partial(state: State, error: AssetError) -> Self {
        Self {
            state: Some(state),
            error: Some(error),
        }
    }

    #[must_use]
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&AssetError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn into_parts(self) -> (Option<State>, Option<AssetError>) {
        (self.state, self.error)
    }

    /// Collapse into a `Result`, dropping any partial state when an error
    /// is present.
    ///
    /// # Errors
    ///
    /// Returns the generation's error, if any.
    pub fn into_result(self) -> Result<State, AssetError> {
        match (self.state, self.error) {
            (_, Some(err)) => Err(err),
            (Some(state), None) => Ok(state),
            (None, None) => unreachable!("generation without state or error"),
        }
    }
}

impl From<Result<State, AssetError>> for Generation {
    fn from(result: Result<State, AssetError>) -> Self {
        match result {
            Ok(state) => Self::ok(state),
            Err(err) => Self::failed(err),
        }
    }
}

/// A node of the asset graph.
///
/// `generate` is only called once every id returned by `dependencies` has a
/// resolved state in `parents`. Implementations must not fall back to
/// defaults when a parent they need is missing.
#[async_trait(?Send)]
pub trait Asset {
    /// Human-readable name, used in diagnostics only.
    fn name(&self) -> String;

    /// Parents that must be resolved before `generate` runs, in an order
    /// each implementation documents.
    fn dependencies(&self) -> Vec<AssetId>;

    /// Produce this asset's state from its parents' states.
    async fn generate(&self, parents: &ParentStates<'_>) -> Generation;
}
