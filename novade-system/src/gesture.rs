//! Gesture Engine (§4.9): interactive pointer/touch move and resize.
//!
//! The resize-edge delta math and min/max clamp sequence are grounded on
//! `window_mechanics::interactive_ops::NovaResizeGrab::motion`: each edge
//! bit adjusts `loc`/`size` independently, then the result is clamped with
//! `.max(min).min(max)` against the surface's own constraint fields. That
//! code binds this to a `smithay::input::pointer::PointerGrab` object;
//! here the same per-frame math runs against the engine's own
//! `GestureState`/`SurfaceInfo`, invoked by the Event Dispatcher.

use crate::geometry::{Displacement, Global, Point, Rectangle};
use crate::ids::SurfaceId;
use crate::surface_store::{Edges, SurfaceInfoStore, SurfaceState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    None,
    PointerMoving,
    PointerResizing,
    TouchMoving,
    TouchResizing,
}

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    surface: SurfaceId,
    mode: GestureMode,
    start_geometry: Rectangle<Global>,
    start_pointer: Point<Global>,
    resize_edges: Edges,
    touch_points: u8,
}

pub struct GestureEngine {
    current: Option<ActiveGesture>,
}

impl GestureEngine {
    pub fn new() -> Self {
        GestureEngine { current: None }
    }

    pub fn mode(&self) -> GestureMode {
        self.current.map(|g| g.mode).unwrap_or(GestureMode::None)
    }

    pub fn active_surface(&self) -> Option<SurfaceId> {
        self.current.map(|g| g.surface)
    }

    /// Begins a pointer drag. No-op if the surface is not currently movable
    /// (§4.9: maximised/fullscreen windows cannot be moved).
    pub fn begin_pointer_move(&mut self, store: &SurfaceInfoStore, surface: SurfaceId, pointer: Point<Global>) {
        let Some(info) = store.info_for(surface) else { return };
        if !info.state.is_movable() {
            return;
        }
        self.current = Some(ActiveGesture {
            surface,
            mode: GestureMode::PointerMoving,
            start_geometry: info.rect(),
            start_pointer: pointer,
            resize_edges: Edges::empty(),
            touch_points: 0,
        });
    }

    /// Begins a pointer resize. The anchor corner is implied by `edges`
    /// (the farthest corner from the cursor, chosen by the dispatcher from
    /// the click position before calling this).
    pub fn begin_pointer_resize(&mut self, store: &SurfaceInfoStore, surface: SurfaceId, pointer: Point<Global>, edges: Edges) {
        let Some(info) = store.info_for(surface) else { return };
        if !info.state.is_resizable() {
            return;
        }
        self.current = Some(ActiveGesture {
            surface,
            mode: GestureMode::PointerResizing,
            start_geometry: info.rect(),
            start_pointer: pointer,
            resize_edges: edges,
            touch_points: 0,
        });
    }

    /// Applies pointer motion to the in-progress gesture, mutating the
    /// target surface's geometry directly, and returns the new rectangle.
    pub fn pointer_motion(&mut self, store: &mut SurfaceInfoStore, pointer: Point<Global>) -> Option<Rectangle<Global>> {
        let gesture = self.current?;
        let delta = pointer - gesture.start_pointer;

        let new_rect = match gesture.mode {
            GestureMode::PointerMoving => gesture.start_geometry.translated(delta),
            GestureMode::PointerResizing => {
                let info = store.info_for(gesture.surface)?;
                resize_by_edges(gesture.start_geometry, gesture.resize_edges, delta, info.state, &info.constraints)
            }
            _ => return None,
        };

        let info = store.info_for_mut(gesture.surface)?;
        info.top_left = new_rect.top_left;
        info.size = new_rect.size;
        Some(new_rect)
    }

    /// Ends the current gesture (button release, modifier change, or the
    /// window disappearing).
    pub fn end(&mut self) {
        self.current = None;
    }

    /// Cancels the gesture if it targets `surface` (window-disappeared /
    /// dead-surface recovery, §7).
    pub fn cancel_if_targets(&mut self, surface: SurfaceId) {
        if self.current.map(|g| g.surface) == Some(surface) {
            self.current = None;
        }
    }

    /// Three concurrent touch points begin a touch drag (§4.9); any
    /// touch-up/down while dragging cancels it.
    pub fn touch_down(&mut self, store: &SurfaceInfoStore, surface: SurfaceId, centroid: Point<Global>) {
        let count = self.current.map(|g| g.touch_points).unwrap_or(0) + 1;
        if count == 3 {
            if let Some(info) = store.info_for(surface) {
                if info.state.is_movable() {
                    self.current = Some(ActiveGesture {
                        surface,
                        mode: GestureMode::TouchMoving,
                        start_geometry: info.rect(),
                        start_pointer: centroid,
                        resize_edges: Edges::empty(),
                        touch_points: count,
                    });
                    return;
                }
            }
        }
        if let Some(g) = &mut self.current {
            if matches!(g.mode, GestureMode::TouchMoving | GestureMode::TouchResizing) {
                self.current = None;
            }
        }
    }

    pub fn touch_up(&mut self) {
        if let Some(g) = self.current {
            if matches!(g.mode, GestureMode::TouchMoving | GestureMode::TouchResizing) {
                self.current = None;
            }
        }
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies each edge's delta to `start`, freezing the axis constrained by
/// `state` (vert-/horiz-maximised), then clamps the result against
/// `constraints`, matching `NovaResizeGrab::motion`'s per-edge adjustment
/// followed by `.max(min).min(max)`.
fn resize_by_edges(
    start: Rectangle<Global>,
    edges: Edges,
    delta: Displacement<Global>,
    state: SurfaceState,
    constraints: &crate::surface_store::SizeConstraints,
) -> Rectangle<Global> {
    let mut top_left = start.top_left;
    let mut size = start.size;

    let x_frozen = state == SurfaceState::VertMaximised;
    let y_frozen = state == SurfaceState::HorizMaximised;

    if !x_frozen {
        if edges.contains(Edges::WEST) {
            top_left.x += delta.dx;
            size.width -= delta.dx;
        }
        if edges.contains(Edges::EAST) {
            size.width += delta.dx;
        }
    }
    if !y_frozen {
        if edges.contains(Edges::NORTH) {
            top_left.y += delta.dy;
            size.height -= delta.dy;
        }
        if edges.contains(Edges::SOUTH) {
            size.height += delta.dy;
        }
    }

    let clamped = constraints.clamp(size);
    // If the west/north edge moved, re-anchor the opposite edge so the
    // anchor corner (not the moved corner) stays fixed when a clamp kicks in.
    if edges.contains(Edges::WEST) && clamped.width != size.width {
        top_left.x = start.right() - clamped.width;
    }
    if edges.contains(Edges::NORTH) && clamped.height != size.height {
        top_left.y = start.bottom() - clamped.height;
    }

    Rectangle::new(top_left, clamped)
}
