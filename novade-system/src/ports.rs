//! Capability traits the engine is parameterised by (§6, §9).
//!
//! These replace inheritance-based Wayland/XWayland collaborators with
//! small virtual interfaces: a host adapts its scene graph, display server
//! and input plumbing to these traits rather than the engine depending on
//! any concrete backend.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::geometry::{Global, Point, Rectangle};
use crate::ids::SurfaceId;

/// The scene-graph boundary (§6): surface creation/destruction, hit
/// testing, raising, and the observer callbacks the engine drives directly
/// from the dispatch thread with no suspension points (§9).
#[cfg_attr(test, mockall::automock)]
pub trait Scene {
    fn destroy_surface(&mut self, surface: SurfaceId);
    fn surface_at(&self, point: Point<Global>) -> Option<SurfaceId>;
    fn raise(&mut self, surfaces: &[SurfaceId]);

    /// Geometry changed; the host should reposition/resize its node.
    fn on_geometry_changed(&mut self, surface: SurfaceId, rect: Rectangle<Global>) {
        let _ = (surface, rect);
    }
    /// Visibility changed (e.g. minimised/hidden vs. restored/attached).
    fn on_visibility_changed(&mut self, surface: SurfaceId, visible: bool) {
        let _ = (surface, visible);
    }
    /// Keyboard focus changed; `old` is the previously focused surface, if any.
    fn on_focus_changed(&mut self, old: Option<SurfaceId>, new: Option<SurfaceId>) {
        let _ = (old, new);
    }
}

/// The input-sink boundary (§6): the engine notifies a host once it has
/// decided an input event does not need to be consumed internally, so the
/// host may forward it to the client that owns the target surface.
pub trait InputSink {
    fn deliver_to_client(&mut self, surface: SurfaceId);
}

/// A closure-queue external producers post work onto; drained only from the
/// window-manager thread (§5, §6, GLOSSARY "Executor"). Internal engine
/// state needs no locking since the engine runs on a single logical thread;
/// `parking_lot` guards only this posting boundary.
#[derive(Default)]
pub struct Executor {
    queue: Mutex<VecDeque<Box<dyn FnOnce() + Send>>>,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by any thread to schedule work for the window-manager thread.
    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        self.queue.lock().push_back(Box::new(task));
    }

    /// Called only from the window-manager thread to run every pending task.
    pub fn drain(&self) {
        loop {
            let task = self.queue.lock().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
