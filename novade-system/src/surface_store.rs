//! Per-surface metadata storage.
//!
//! Grounded on `window_mechanics::manager::WindowManager` (a
//! `HashMap<WindowId, WindowInfo>` alongside a parallel
//! `HashMap<WorkspaceId, WorkspaceInfo>`) and `window_mechanics::data_types`'s
//! `WindowInfo`/`WorkspaceInfo` structs. The session/workspace split there
//! maps onto surface/session here; the engine is the single owner of every
//! `SurfaceInfo` record, and parent/child links are weak (by id, looked up
//! through the store) to keep the ownership tree acyclic by construction.

use std::collections::HashMap;

use bitflags::bitflags;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::geometry::{Global, Local, Point, Rectangle, Size};
use crate::ids::{OutputId, SessionId, SurfaceId};

/// The kind of surface, governing focusability and parent requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    Normal,
    Utility,
    Dialog,
    Gloss,
    Freestyle,
    Menu,
    InputMethod,
    Satellite,
    Tip,
    Decoration,
}

impl SurfaceType {
    /// Invariant 2/3 (§3): satellite-like types require a parent; top-level
    /// types forbid one.
    pub fn requires_parent(self) -> bool {
        matches!(self, SurfaceType::Gloss | SurfaceType::Satellite | SurfaceType::Tip)
    }

    pub fn forbids_parent(self) -> bool {
        matches!(self, SurfaceType::Normal | SurfaceType::Utility)
    }

    /// §4.7: these types are never focusable; selecting one delegates to
    /// its parent.
    pub fn is_never_focusable(self) -> bool {
        matches!(self, SurfaceType::Gloss | SurfaceType::Tip | SurfaceType::Decoration)
    }

    /// §4.5 rule 7: whether a titlebar should be allocated for this type.
    pub fn wants_titlebar(self) -> bool {
        matches!(self, SurfaceType::Normal | SurfaceType::Utility | SurfaceType::Dialog)
    }
}

/// Logical window state (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceState {
    Restored,
    Maximised,
    VertMaximised,
    HorizMaximised,
    Fullscreen,
    Minimised,
    Hidden,
    Attached,
}

impl SurfaceState {
    pub fn is_visible(self) -> bool {
        !matches!(self, SurfaceState::Hidden | SurfaceState::Minimised)
    }

    /// §4.9: maximised/fullscreen surfaces cannot be moved or resized by a
    /// gesture; vert-/horiz-maximised surfaces freeze the constrained axis.
    pub fn is_movable(self) -> bool {
        !matches!(self, SurfaceState::Maximised | SurfaceState::Fullscreen | SurfaceState::Attached)
    }

    pub fn is_resizable(self) -> bool {
        !matches!(self, SurfaceState::Maximised | SurfaceState::Fullscreen | SurfaceState::Attached)
    }
}

/// Whether focus may land on a surface, and if so under what exclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusMode {
    Focusable,
    Disabled,
    Grabbing,
}

/// Coarse stacking band (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DepthLayer {
    Background,
    Below,
    Application,
    AlwaysOnTop,
    Above,
    Overlay,
}

bitflags! {
    /// Edges a surface is pinned to when `state == Attached`, and the edges
    /// an edge-attachment placement request targets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const EAST  = 0b0100;
        const WEST  = 0b1000;
    }
}

/// Resize/aspect constraints carried on a surface, consulted every gesture
/// frame (§4.9) and by `request-move`/`request-resize` geometry derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConstraints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: Option<i32>,
    pub max_height: Option<i32>,
    pub width_inc: i32,
    pub height_inc: i32,
}

impl Default for SizeConstraints {
    fn default() -> Self {
        SizeConstraints {
            min_width: 1,
            min_height: 1,
            max_width: None,
            max_height: None,
            width_inc: 1,
            height_inc: 1,
        }
    }
}

impl SizeConstraints {
    pub fn clamp(&self, size: Size<Global>) -> Size<Global> {
        let mut width = size.width.max(self.min_width);
        let mut height = size.height.max(self.min_height);
        if let Some(max_width) = self.max_width {
            width = width.min(max_width);
        }
        if let Some(max_height) = self.max_height {
            height = height.min(max_height);
        }
        Size::new(width, height)
    }
}

/// Per-surface metadata (§3).
#[derive(Debug, Clone)]
pub struct SurfaceInfo {
    pub id: SurfaceId,
    pub session: SessionId,
    pub surface_type: SurfaceType,
    pub state: SurfaceState,
    pub restore_rect: Rectangle<Global>,
    pub top_left: Point<Global>,
    pub size: Size<Global>,
    pub constraints: SizeConstraints,
    pub parent: Option<SurfaceId>,
    pub children: Vec<SurfaceId>,
    pub output_id: Option<OutputId>,
    pub depth_layer: DepthLayer,
    pub attached_edges: Edges,
    pub exclusive_rect: Option<Rectangle<Local>>,
    pub focus_mode: FocusMode,
    pub titlebar: Option<SurfaceId>,
    pub is_titlebar: bool,
    /// Visibility prior to being hidden by a fullscreen occupant (§4.6);
    /// restored when the fullscreen surface on that output goes away.
    pub pre_fullscreen_hide_state: Option<SurfaceState>,
}

impl SurfaceInfo {
    pub fn rect(&self) -> Rectangle<Global> {
        Rectangle::new(self.top_left, self.size)
    }

    pub fn new(id: SurfaceId, session: SessionId, surface_type: SurfaceType, rect: Rectangle<Global>) -> Self {
        SurfaceInfo {
            id,
            session,
            surface_type,
            state: SurfaceState::Restored,
            restore_rect: rect,
            top_left: rect.top_left,
            size: rect.size,
            constraints: SizeConstraints::default(),
            parent: None,
            children: Vec::new(),
            output_id: None,
            depth_layer: DepthLayer::Application,
            attached_edges: Edges::empty(),
            exclusive_rect: None,
            focus_mode: FocusMode::Focusable,
            titlebar: None,
            is_titlebar: false,
            pre_fullscreen_hide_state: None,
        }
    }
}

/// Per-client bookkeeping: surface count and focus order, mirroring
/// `window_mechanics::data_types::WorkspaceInfo`'s role alongside
/// `WindowInfo`.
#[derive(Debug, Clone, Default)]
pub struct SessionInfo {
    pub surfaces: Vec<SurfaceId>,
    pub default_surface: Option<SurfaceId>,
}

/// Owns every known `SurfaceInfo` and `SessionInfo`.
#[derive(Debug, Default)]
pub struct SurfaceInfoStore {
    surfaces: HashMap<SurfaceId, SurfaceInfo>,
    sessions: HashMap<SessionId, SessionInfo>,
}

impl SurfaceInfoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emplace(&mut self, info: SurfaceInfo) -> Result<(), EngineError> {
        if info.surface_type.requires_parent() && info.parent.is_none() {
            return Err(EngineError::InconsistentSpec(format!(
                "{:?} surface {} requires a parent",
                info.surface_type, info.id
            )));
        }
        if info.surface_type.forbids_parent() && info.parent.is_some() {
            return Err(EngineError::InconsistentSpec(format!(
                "{:?} surface {} must not have a parent",
                info.surface_type, info.id
            )));
        }
        if info.parent == Some(info.id) {
            return Err(EngineError::InconsistentSpec(format!("surface {} cannot parent itself", info.id)));
        }

        let session = self.sessions.entry(info.session).or_default();
        session.surfaces.push(info.id);
        if session.default_surface.is_none() {
            session.default_surface = Some(info.id);
        }

        let mut info = info;
        if let Some(parent_id) = info.parent {
            if let Some(parent) = self.surfaces.get_mut(&parent_id) {
                parent.children.push(info.id);
                // Invariant 6 (§3): a child left at the default layer inherits
                // its parent's; an explicit non-default layer is preserved.
                if info.depth_layer == DepthLayer::Application {
                    info.depth_layer = parent.depth_layer;
                }
            } else {
                warn!("surface {} references unknown parent {}", info.id, parent_id);
            }
        }

        debug!("storing surface {} (type {:?})", info.id, info.surface_type);
        self.surfaces.insert(info.id, info);
        Ok(())
    }

    pub fn info_for(&self, id: SurfaceId) -> Option<&SurfaceInfo> {
        self.surfaces.get(&id)
    }

    pub fn info_for_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceInfo> {
        self.surfaces.get_mut(&id)
    }

    pub fn session_info(&self, id: SessionId) -> Option<&SessionInfo> {
        self.sessions.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceInfo> {
        self.surfaces.values()
    }

    /// Removes a surface, unlinking it from its parent's children and from
    /// its session. Lost-child errors during unlink are logged and do not
    /// abort the removal (§7).
    pub fn forget(&mut self, id: SurfaceId) -> Option<SurfaceInfo> {
        let removed = self.surfaces.remove(&id)?;

        if let Some(parent_id) = removed.parent {
            match self.surfaces.get_mut(&parent_id) {
                Some(parent) => parent.children.retain(|c| *c != id),
                None => warn!("surface {} had unknown parent {} on removal", id, parent_id),
            }
        }
        for child_id in &removed.children {
            match self.surfaces.get_mut(child_id) {
                Some(child) => child.parent = None,
                None => warn!("surface {} had unknown child {} on removal", id, child_id),
            }
        }

        if let Some(session) = self.sessions.get_mut(&removed.session) {
            session.surfaces.retain(|s| *s != id);
            if session.default_surface == Some(id) {
                session.default_surface = session.surfaces.first().copied();
            }
        }

        debug!("forgetting surface {}", id);
        Some(removed)
    }

    /// Removes every surface belonging to `session`, per "session end
    /// destroys all its surfaces" (§3 Lifecycle).
    pub fn end_session(&mut self, session: SessionId) -> Vec<SurfaceInfo> {
        let ids: Vec<SurfaceId> = self
            .sessions
            .get(&session)
            .map(|s| s.surfaces.clone())
            .unwrap_or_default();
        let removed: Vec<SurfaceInfo> = ids.into_iter().filter_map(|id| self.forget(id)).collect();
        self.sessions.remove(&session);
        removed
    }

    /// Invariant 1 (§8): parent chain is acyclic and within the configured
    /// depth bound.
    pub fn parent_chain_depth(&self, start: SurfaceId, max_depth: usize) -> Option<usize> {
        let mut current = start;
        let mut seen = std::collections::HashSet::new();
        let mut depth = 0;
        while let Some(info) = self.surfaces.get(&current) {
            if !seen.insert(current) {
                return None;
            }
            match info.parent {
                Some(parent) => {
                    current = parent;
                    depth += 1;
                    if depth > max_depth {
                        return None;
                    }
                }
                None => return Some(depth),
            }
        }
        Some(depth)
    }
}
