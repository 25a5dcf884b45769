//! State Machine (§4.6): applies state transitions to geometry, and
//! propagates fullscreen-occludes-attached-siblings behaviour.
//!
//! Grounded on `window_mechanics::manager::WindowManager::set_window_state`,
//! which looks the window up, validates the transition, mutates geometry,
//! and logs the before/after state at `info!` level.

use tracing::{info, warn};

use crate::error::EngineError;
use crate::geometry::{Displacement, Global, Point, Rectangle, Size};
use crate::ids::SurfaceId;
use crate::output_registry::OutputRegistry;
use crate::surface_store::{Edges, SurfaceInfoStore, SurfaceState};

/// Applies `new_state` to `surface`, following the transition table in
/// §4.6. Returns the new rectangle, or an error if the transition is
/// illegal for this surface (a no-op per §7: state and geometry are
/// unchanged).
pub fn set_state(
    store: &mut SurfaceInfoStore,
    registry: &OutputRegistry,
    surface: SurfaceId,
    new_state: SurfaceState,
) -> Result<Rectangle<Global>, EngineError> {
    let (old_state, old_rect, output_id) = {
        let info = store
            .info_for(surface)
            .ok_or_else(|| EngineError::InvalidHandle(surface.to_string()))?;
        (info.state, info.rect(), info.output_id)
    };

    if old_state == new_state {
        return Ok(old_rect);
    }

    let zone = output_id
        .and_then(|o| registry.zone_of_output(o))
        .or_else(|| registry.zone_containing(old_rect.top_left));

    let new_rect = match new_state {
        SurfaceState::Restored => {
            let info = store.info_for(surface).unwrap();
            info.restore_rect
        }
        SurfaceState::Maximised => zone.as_ref().map(|z| z.extent).unwrap_or(old_rect),
        SurfaceState::VertMaximised => {
            let z = zone.as_ref().map(|z| z.extent).unwrap_or(old_rect);
            Rectangle::new(
                Point::new(old_rect.top_left.x, z.top()),
                crate::geometry::Size::new(old_rect.size.width, z.size.height),
            )
        }
        SurfaceState::HorizMaximised => {
            let z = zone.as_ref().map(|z| z.extent).unwrap_or(old_rect);
            Rectangle::new(
                Point::new(z.left(), old_rect.top_left.y),
                crate::geometry::Size::new(z.size.width, old_rect.size.height),
            )
        }
        SurfaceState::Fullscreen => zone.as_ref().map(|z| z.extent).unwrap_or(old_rect),
        SurfaceState::Minimised | SurfaceState::Hidden => old_rect,
        SurfaceState::Attached => {
            let edges = store.info_for(surface).unwrap().attached_edges;
            zone.as_ref()
                .map(|z| attached_rect(z.extent, edges, old_rect.size))
                .unwrap_or(old_rect)
        }
    };

    {
        let info = store.info_for_mut(surface).unwrap();
        if old_state == SurfaceState::Restored {
            info.restore_rect = old_rect;
        }
        if new_state != SurfaceState::Fullscreen {
            info.output_id = None;
        } else if let Some(z) = &zone {
            info.output_id = z.outputs.first().copied();
        }
        info.top_left = new_rect.top_left;
        info.size = new_rect.size;
        info.state = new_state;
    }

    info!("surface {} transitioned {:?} -> {:?}", surface, old_state, new_state);

    if new_state == SurfaceState::Fullscreen {
        occlude_attached_siblings(store, registry, surface);
    } else if old_state == SurfaceState::Fullscreen {
        unocclude_attached_siblings(store, registry, surface);
    }

    Ok(new_rect)
}

/// Derives an attached surface's rectangle from its `attached_edges` and the
/// owning zone's extent (§4.6). A surface pinned to one edge of an axis
/// keeps its own extent along that axis but spans the zone fully along the
/// perpendicular axis, unless it is also pinned there; a surface pinned to
/// both edges of an axis spans that axis fully.
fn attached_rect(zone_extent: Rectangle<Global>, edges: Edges, current_size: Size<Global>) -> Rectangle<Global> {
    let (left, width) = if edges.contains(Edges::WEST) && edges.contains(Edges::EAST) {
        (zone_extent.left(), zone_extent.size.width)
    } else if edges.contains(Edges::WEST) {
        (zone_extent.left(), current_size.width)
    } else if edges.contains(Edges::EAST) {
        (zone_extent.right() - current_size.width, current_size.width)
    } else {
        // No horizontal edge: a purely vertical attachment spans the zone's
        // full width, as a top/bottom panel does.
        (zone_extent.left(), zone_extent.size.width)
    };

    let (top, height) = if edges.contains(Edges::NORTH) && edges.contains(Edges::SOUTH) {
        (zone_extent.top(), zone_extent.size.height)
    } else if edges.contains(Edges::NORTH) {
        (zone_extent.top(), current_size.height)
    } else if edges.contains(Edges::SOUTH) {
        (zone_extent.bottom() - current_size.height, current_size.height)
    } else {
        // No vertical edge: a purely horizontal attachment spans the zone's
        // full height, as a side dock does.
        (zone_extent.top(), zone_extent.size.height)
    };

    Rectangle::new(Point::new(left, top), Size::new(width, height))
}

/// When `fullscreen_surface` enters fullscreen, every `Attached` surface on
/// the same output is pushed to `Hidden`, remembering its prior state.
fn occlude_attached_siblings(store: &mut SurfaceInfoStore, registry: &OutputRegistry, fullscreen_surface: SurfaceId) {
    let Some(fs_info) = store.info_for(fullscreen_surface) else { return };
    let Some(zone) = registry.zone_containing(fs_info.top_left) else { return };

    let to_hide: Vec<SurfaceId> = store
        .iter()
        .filter(|s| s.state == SurfaceState::Attached && zone.extent.overlaps(&s.rect()))
        .map(|s| s.id)
        .collect();

    for id in to_hide {
        if let Some(info) = store.info_for_mut(id) {
            info.pre_fullscreen_hide_state = Some(info.state);
            info.state = SurfaceState::Hidden;
        }
    }
}

/// When the active fullscreen surface on an output leaves fullscreen,
/// previously hidden attached surfaces there return to `Attached`.
fn unocclude_attached_siblings(store: &mut SurfaceInfoStore, registry: &OutputRegistry, surface: SurfaceId) {
    let Some(info) = store.info_for(surface) else { return };
    let Some(zone) = registry.zone_containing(info.top_left) else { return };

    let to_restore: Vec<SurfaceId> = store
        .iter()
        .filter(|s| s.pre_fullscreen_hide_state.is_some() && zone.extent.overlaps(&s.rect()))
        .map(|s| s.id)
        .collect();

    for id in to_restore {
        if let Some(info) = store.info_for_mut(id) {
            if let Some(prev) = info.pre_fullscreen_hide_state.take() {
                info.state = prev;
            }
        }
    }
}

/// Subtree motion (§4.6): displaces `surface` and every descendant by `d`,
/// with no independent child layout recomputation.
pub fn move_subtree(store: &mut SurfaceInfoStore, surface: SurfaceId, d: Displacement<Global>) {
    let mut stack = vec![surface];
    while let Some(id) = stack.pop() {
        let children = match store.info_for_mut(id) {
            Some(info) => {
                info.top_left = info.top_left + d;
                info.children.clone()
            }
            None => {
                warn!("move_subtree: surface {} disappeared mid-walk", id);
                continue;
            }
        };
        stack.extend(children);
    }
}
