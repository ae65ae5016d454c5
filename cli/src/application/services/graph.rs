//! Asset graph and resolver.
//!
//! `AssetGraph` is an arena of assets addressed by [`AssetId`]. An asset can
//! only be added after every asset it depends on, so ids ascend in a valid
//! generation order and the graph can never contain a cycle.
//!
//! `Resolver` walks the graph for a target, generating each required asset
//! at most once and persisting every state it obtains through an
//! [`AssetStore`].

use std::collections::{BTreeSet, HashMap};

use anyhow::{Context, Result};
use clusterkit_common::State;
use tracing::{debug, info};

use crate::application::ports::{AssetStore, ProgressReporter};
use crate::domain::{Asset, AssetId, GraphError, ParentStates};

/// Arena of assets. Topology is fixed once an asset is added.
#[derive(Default)]
pub struct AssetGraph {
    assets: Vec<Box<dyn Asset>>,
}

impl AssetGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset whose dependencies are already in the graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownDependency`] if a dependency id was not
    /// handed out by this graph.
    pub fn add(&mut self, asset: impl Asset + 'static) -> Result<AssetId, GraphError> {
        if let Some(dependency) = asset
            .dependencies()
            .into_iter()
            .find(|dep| dep.index() >= self.assets.len())
        {
            return Err(GraphError::UnknownDependency {
                asset: asset.name(),
                dependency,
            });
        }
        let id = AssetId::new(self.assets.len());
        self.assets.push(Box::new(asset));
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`GraphError::UnknownAsset`] if `id` is not in the graph.
    pub fn get(&self, id: AssetId) -> Result<&dyn Asset, GraphError> {
        self.assets
            .get(id.index())
            .map(AsRef::as_ref)
            .ok_or(GraphError::UnknownAsset(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// `target` and all of its transitive dependencies, in generation order.
    fn closure(&self, target: AssetId) -> Result<Vec<AssetId>, GraphError> {
        let mut needed = BTreeSet::new();
        let mut stack = vec![target];
        while let Some(id) = stack.pop() {
            if needed.insert(id) {
                stack.extend(self.get(id)?.dependencies());
            }
        }
        Ok(needed.into_iter().collect())
    }
}

/// Generates assets on demand and remembers their states.
pub struct Resolver<'g> {
    graph: &'g AssetGraph,
    states: HashMap<AssetId, State>,
}

impl<'g> Resolver<'g> {
    #[must_use]
    pub fn new(graph: &'g AssetGraph) -> Self {
        Self {
            graph,
            states: HashMap::new(),
        }
    }

    /// Resolve `target`, generating it and any missing dependencies first.
    ///
    /// Every generated state is saved to `store`. When an asset fails but
    /// still returns a partial state, that state is saved before the error
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is unknown, an asset fails to generate,
    /// or a state cannot be saved.
    pub async fn resolve(
        &mut self,
        target: AssetId,
        store: &impl AssetStore,
        reporter: &impl ProgressReporter,
    ) -> Result<&State> {
        for id in self.graph.closure(target)? {
            if self.states.contains_key(&id) {
                debug!(%id, "asset already resolved");
                continue;
            }
            let asset = self.graph.get(id)?;
            let name = asset.name();
            reporter.step(&format!("Generating {name}..."));
            info!(%id, asset = %name, "generating asset");

            let generation = {
                let mut parents = ParentStates::new();
                for dep in asset.dependencies() {
                    if let Some(state) = self.states.get(&dep) {
                        parents.insert(dep, state);
                    }
                }
                asset.generate(&parents).await
            };

            let (state, error) = generation.into_parts();
            if let Some(state) = &state {
                let written = store
                    .save(state)
                    .with_context(|| format!("failed to save asset \"{name}\""))?;
                debug!(asset = %name, files = written.len(), "asset state saved");
            }
            match (state, error) {
                (partial, Some(err)) => {
                    if partial.is_some() {
                        reporter.warn(&format!("Saved partial state of {name}"));
                    }
                    return Err(anyhow::Error::new(err))
                        .with_context(|| format!("failed to generate asset \"{name}\""));
                }
                (Some(state), None) => {
                    reporter.success(&format!("Generated {name}"));
                    self.states.insert(id, state);
                }
                (None, None) => anyhow::bail!("asset \"{name}\" produced neither state nor error"),
            }
        }
        self.states
            .get(&target)
            .ok_or_else(|| GraphError::UnknownAsset(target).into())
    }

    /// The state of `id`, if it has been resolved.
    #[must_use]
    pub fn state(&self, id: AssetId) -> Option<&State> {
        self.states.get(&id)
    }
}
