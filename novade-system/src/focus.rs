//! Focus Controller (§4.7): selects the active surface, maintains focus
//! history, and enforces grab exclusivity.
//!
//! Based on `input::focus::FocusManager`: a bounded `VecDeque` history
//! (most-recently-focused at the front, an entry removed and re-pushed
//! rather than duplicated on refocus) and a grab state that takes priority
//! over every other focus request while active. That history is
//! Wayland-object-shaped (client/surface pairs plus `wl_keyboard`
//! enter/leave sends); here it is reduced to the engine's own `SurfaceId`
//! history plus calls into the `Scene` capability, since protocol framing
//! is a host concern (§9).

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::ids::SurfaceId;
use crate::ports::Scene;
use crate::surface_store::{FocusMode, SurfaceInfoStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabKind {
    KeyboardOnly,
    PointerOnly,
    Full,
}

#[derive(Debug, Clone, Copy)]
struct GrabState {
    surface: SurfaceId,
    kind: GrabKind,
}

pub struct FocusController {
    active: Option<SurfaceId>,
    history: VecDeque<SurfaceId>,
    history_capacity: usize,
    grab: Option<GrabState>,
}

impl FocusController {
    pub fn new(history_capacity: usize) -> Self {
        FocusController { active: None, history: VecDeque::new(), history_capacity, grab: None }
    }

    pub fn active(&self) -> Option<SurfaceId> {
        self.active
    }

    /// Resolves `requested` to its nearest focusable ancestor per §4.7's
    /// type-based delegation rule (gloss/tip/decoration are never
    /// focusable).
    fn resolve_focusable(store: &SurfaceInfoStore, requested: SurfaceId) -> Option<SurfaceId> {
        let mut current = requested;
        loop {
            let info = store.info_for(current)?;
            if !info.surface_type.is_never_focusable() && info.focus_mode != FocusMode::Disabled {
                return Some(current);
            }
            current = info.parent?;
        }
    }

    /// Requests focus move to `requested`. Invariant 4 (§8): after this
    /// call, at most one surface has active focus, and it is focusable.
    pub fn request_focus(&mut self, store: &SurfaceInfoStore, scene: &mut impl Scene, requested: SurfaceId) {
        let Some(target) = Self::resolve_focusable(store, requested) else {
            debug!("focus request for {} resolved to nothing focusable", requested);
            return;
        };

        if let Some(grab) = self.grab {
            let is_grabber_or_child = target == grab.surface || Self::is_descendant_of(store, target, grab.surface);
            if !is_grabber_or_child {
                debug!("focus request for {} denied: surface {} holds a grab", target, grab.surface);
                self.set_active(store, scene, grab.surface);
                return;
            }
        }

        self.set_active(store, scene, target);
    }

    fn is_descendant_of(store: &SurfaceInfoStore, candidate: SurfaceId, ancestor: SurfaceId) -> bool {
        let mut current = candidate;
        while let Some(info) = store.info_for(current) {
            match info.parent {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    fn set_active(&mut self, store: &SurfaceInfoStore, scene: &mut impl Scene, target: SurfaceId) {
        if self.active == Some(target) {
            return;
        }
        let old = self.active;
        self.active = Some(target);
        self.history.retain(|id| *id != target);
        self.history.push_front(target);
        while self.history.len() > self.history_capacity {
            self.history.pop_back();
        }

        info!("focus changed {:?} -> {}", old, target);
        // Observer order (§4.7): titlebar repaint, then scene-focus update,
        // then raise. Titlebar repaint and raise are driven by the host in
        // response to `on_focus_changed`; this call is the scene-focus
        // update itself.
        scene.on_focus_changed(old, self.active);
        let _ = store;
    }

    /// Begins a grab: the grabbing surface becomes active and cannot lose
    /// focus except to another grab or its own children (§4.7).
    pub fn request_grab(&mut self, store: &SurfaceInfoStore, scene: &mut impl Scene, surface: SurfaceId, kind: GrabKind) {
        self.grab = Some(GrabState { surface, kind });
        self.set_active(store, scene, surface);
    }

    pub fn release_grab(&mut self, surface: SurfaceId) {
        if self.grab.map(|g| g.surface) == Some(surface) {
            self.grab = None;
        }
    }

    pub fn is_grabbing(&self, surface: SurfaceId) -> bool {
        self.grab.map(|g| g.surface) == Some(surface)
    }

    /// The kind of the current grab, if any, so an input sink can tell
    /// whether pointer events (as opposed to just keyboard) are redirected.
    pub fn grab_kind(&self) -> Option<GrabKind> {
        self.grab.map(|g| g.kind)
    }

    /// Fallback chain on destroy/hide of the active surface (§4.7): parent
    /// if focusable, else most-recently-focused in the session, else the
    /// next session's default surface.
    pub fn on_surface_removed_or_hidden(
        &mut self,
        store: &SurfaceInfoStore,
        scene: &mut impl Scene,
        removed: SurfaceId,
        removed_parent: Option<SurfaceId>,
        removed_session: crate::ids::SessionId,
    ) {
        if self.grab.map(|g| g.surface) == Some(removed) {
            self.grab = None;
        }
        if self.active != Some(removed) {
            self.history.retain(|id| *id != removed);
            return;
        }
        self.active = None;
        self.history.retain(|id| *id != removed);

        if let Some(parent) = removed_parent {
            if let Some(resolved) = Self::resolve_focusable(store, parent) {
                self.set_active(store, scene, resolved);
                return;
            }
        }

        if let Some(next) = self.history.iter().find(|id| store.info_for(**id).is_some()).copied() {
            self.set_active(store, scene, next);
            return;
        }

        if let Some(session) = store.session_info(removed_session) {
            if let Some(default) = session.default_surface {
                self.set_active(store, scene, default);
                return;
            }
        }

        if let Some(any) = store.iter().find(|s| s.state.is_visible() && s.focus_mode != FocusMode::Disabled) {
            let id = any.id;
            self.set_active(store, scene, id);
        }
    }

    /// Rotates forward through the focus history (alt+Tab / alt+`).
    pub fn cycle_forward(&mut self, store: &SurfaceInfoStore, scene: &mut impl Scene) {
        if self.history.len() < 2 {
            return;
        }
        let front = self.history.pop_front().unwrap();
        self.history.push_back(front);
        if let Some(next) = self.history.front().copied() {
            self.set_active(store, scene, next);
        }
    }

    /// Rotates backward through the focus history (alt+shift+Tab / alt+shift+`).
    pub fn cycle_backward(&mut self, store: &SurfaceInfoStore, scene: &mut impl Scene) {
        if self.history.len() < 2 {
            return;
        }
        let back = self.history.pop_back().unwrap();
        self.history.push_front(back);
        self.set_active(store, scene, back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Global, Point, Rectangle, Size};
    use crate::ids::SessionId;
    use crate::ports::MockScene;
    use crate::surface_store::{SurfaceInfo, SurfaceType};

    fn rect() -> Rectangle<Global> {
        Rectangle::new(Point::new(0, 0), Size::new(100, 100))
    }

    fn permissive_scene() -> MockScene {
        let mut scene = MockScene::new();
        scene.expect_on_focus_changed().returning(|_, _| ());
        scene
    }

    #[test]
    fn gloss_surface_delegates_focus_to_parent() {
        let mut store = SurfaceInfoStore::new();
        let session = SessionId::new_v4();
        let parent_id = SurfaceId::new_v4();
        store.emplace(SurfaceInfo::new(parent_id, session, SurfaceType::Normal, rect())).unwrap();
        let gloss_id = SurfaceId::new_v4();
        let mut gloss = SurfaceInfo::new(gloss_id, session, SurfaceType::Gloss, rect());
        gloss.parent = Some(parent_id);
        store.emplace(gloss).unwrap();

        let mut focus = FocusController::new(32);
        let mut scene = permissive_scene();
        focus.request_focus(&store, &mut scene, gloss_id);
        assert_eq!(focus.active(), Some(parent_id));
    }

    #[test]
    fn grabbing_surface_cannot_be_unfocused_by_non_grab_request() {
        let mut store = SurfaceInfoStore::new();
        let session = SessionId::new_v4();
        let grabber = SurfaceId::new_v4();
        let other = SurfaceId::new_v4();
        store.emplace(SurfaceInfo::new(grabber, session, SurfaceType::Normal, rect())).unwrap();
        store.emplace(SurfaceInfo::new(other, session, SurfaceType::Normal, rect())).unwrap();

        let mut focus = FocusController::new(32);
        let mut scene = permissive_scene();
        focus.request_grab(&store, &mut scene, grabber, GrabKind::Full);
        focus.request_focus(&store, &mut scene, other);
        assert_eq!(focus.active(), Some(grabber));
    }

    #[test]
    fn destroy_falls_back_to_parent() {
        let mut store = SurfaceInfoStore::new();
        let session = SessionId::new_v4();
        let parent_id = SurfaceId::new_v4();
        store.emplace(SurfaceInfo::new(parent_id, session, SurfaceType::Normal, rect())).unwrap();
        let child_id = SurfaceId::new_v4();
        let mut child = SurfaceInfo::new(child_id, session, SurfaceType::Dialog, rect());
        child.parent = Some(parent_id);
        store.emplace(child).unwrap();

        let mut focus = FocusController::new(32);
        let mut scene = permissive_scene();
        focus.request_focus(&store, &mut scene, child_id);
        assert_eq!(focus.active(), Some(child_id));

        store.forget(child_id);
        focus.on_surface_removed_or_hidden(&store, &mut scene, child_id, Some(parent_id), session);
        assert_eq!(focus.active(), Some(parent_id));
    }

    #[test]
    fn cycle_forward_rotates_history() {
        let mut store = SurfaceInfoStore::new();
        let session = SessionId::new_v4();
        let a = SurfaceId::new_v4();
        let b = SurfaceId::new_v4();
        store.emplace(SurfaceInfo::new(a, session, SurfaceType::Normal, rect())).unwrap();
        store.emplace(SurfaceInfo::new(b, session, SurfaceType::Normal, rect())).unwrap();

        let mut focus = FocusController::new(32);
        let mut scene = permissive_scene();
        focus.request_focus(&store, &mut scene, a);
        focus.request_focus(&store, &mut scene, b);
        assert_eq!(focus.active(), Some(b));

        focus.cycle_forward(&store, &mut scene);
        assert_eq!(focus.active(), Some(a));
    }
}
