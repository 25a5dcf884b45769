//! Stacking Controller (§4.8): raise-as-one-set across a surface's
//! ancestor/descendant tree, and re-issuing stack commands when an
//! external actor re-orders tracked surfaces.

use tracing::debug;

use crate::ids::SurfaceId;
use crate::ports::Scene;
use crate::surface_store::SurfaceInfoStore;

pub struct StackingController;

impl StackingController {
    pub fn new() -> Self {
        StackingController
    }

    /// Collects `surface`'s whole ancestor/descendant tree and raises it as
    /// one set, root first, preserving relative order within the set.
    pub fn raise(&self, store: &SurfaceInfoStore, scene: &mut impl Scene, surface: SurfaceId) {
        let root = Self::root_of(store, surface);
        let mut set = Vec::new();
        Self::collect_subtree(store, root, &mut set);
        debug!("raising tree rooted at {} ({} surface(s))", root, set.len());
        scene.raise(&set);
    }

    fn root_of(store: &SurfaceInfoStore, surface: SurfaceId) -> SurfaceId {
        let mut current = surface;
        while let Some(info) = store.info_for(current) {
            match info.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    fn collect_subtree(store: &SurfaceInfoStore, root: SurfaceId, out: &mut Vec<SurfaceId>) {
        out.push(root);
        if let Some(info) = store.info_for(root) {
            for child in &info.children {
                Self::collect_subtree(store, *child, out);
            }
        }
    }

    /// An external re-order of `observed_order` (e.g. the compositor raised
    /// something behind the engine's back) is observed here; the controller
    /// re-issues the implied stack command so its own idea of order stays
    /// consistent with the scene.
    pub fn on_external_reorder(&self, scene: &mut impl Scene, observed_order: &[SurfaceId]) {
        scene.raise(observed_order);
    }
}

impl Default for StackingController {
    fn default() -> Self {
        Self::new()
    }
}
