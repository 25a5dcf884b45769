//! Application-zone computation (§4.3): the rectangle left over once
//! attached-edge surfaces' exclusive rectangles are subtracted from a
//! zone's extent.

use crate::geometry::{Global, Local, Point, Rectangle, Size};
use crate::ids::ZoneId;
use crate::surface_store::{Edges, SurfaceInfo};

/// A zone's computed application rectangle (§3 "application area"), as
/// tracked by [`crate::Engine`] alongside the zone's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationZone {
    pub id: ZoneId,
    pub rect: Rectangle<Global>,
}

/// What changed about a zone's application rectangle since it was last
/// recomputed — distinct from [`crate::output_registry::ZoneEvent`], which
/// only reacts to raw output-extent changes, not to exclusive-rect changes
/// contributed by attached surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationZoneEvent {
    Created(ApplicationZone),
    Updated(ApplicationZone),
    Deleted(ZoneId),
}

/// One attached surface's contribution to a zone's exclusion.
pub struct ExclusiveContribution {
    pub edges: Edges,
    /// The surface's exclusive rectangle translated into the zone's global
    /// coordinate space.
    pub rect_in_zone: Rectangle<Local>,
}

/// Reduces `extent` by every contribution's edge-specific exclusion, applied
/// in the order surfaces were created (i.e. the order of `contributions`).
pub fn application_rect(extent: Rectangle<Global>, contributions: &[ExclusiveContribution]) -> Rectangle<Global> {
    let mut left = extent.left();
    let mut top = extent.top();
    let mut right = extent.right();
    let mut bottom = extent.bottom();

    for contribution in contributions {
        let r = contribution.rect_in_zone;
        let both_horizontal = contribution.edges.contains(Edges::EAST) && contribution.edges.contains(Edges::WEST);
        let both_vertical = contribution.edges.contains(Edges::NORTH) && contribution.edges.contains(Edges::SOUTH);

        if contribution.edges.contains(Edges::WEST) && !both_horizontal {
            left = left.max(r.right());
        }
        if contribution.edges.contains(Edges::EAST) && !both_horizontal {
            right = right.min(r.left());
        }
        if contribution.edges.contains(Edges::NORTH) && !both_vertical {
            top = top.max(r.bottom());
        }
        if contribution.edges.contains(Edges::SOUTH) && !both_vertical {
            bottom = bottom.min(r.top());
        }
    }

    left = left.min(right);
    top = top.min(bottom);
    Rectangle::new(Point::new(left, top), Size::new((right - left).max(0), (bottom - top).max(0)))
}

/// Builds the exclusive contribution for a surface, translating its
/// surface-local `exclusive_rect` into the zone's global space by adding the
/// surface's own `top_left`.
pub fn contribution_for(surface: &SurfaceInfo) -> Option<ExclusiveContribution> {
    let local = surface.exclusive_rect?;
    let global = Rectangle::new(
        Point::<Local>::new(surface.top_left.x + local.top_left.x, surface.top_left.y + local.top_left.y),
        local.size,
    );
    Some(ExclusiveContribution { edges: surface.attached_edges, rect_in_zone: global })
}
