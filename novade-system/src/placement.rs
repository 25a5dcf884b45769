//! Placement Engine (§4.5): decides the initial rectangle for a newly
//! created surface, and popup placement via gravity + hints.
//!
//! Grounded on `window_mechanics::manager::WindowManager`'s pure, static
//! layout functions (`calculate_tall_layout`/`calculate_grid_layout`), which
//! are tested by calling them directly with hand-built inputs rather than
//! through the stateful manager. The placement algorithm here follows the
//! same shape: a free function taking everything it needs as arguments and
//! returning a concrete rectangle, with no engine state of its own.

use bitflags::bitflags;

use crate::geometry::{Displacement, Global, Gravity, Local, Point, Rectangle, Size};
use crate::ids::SurfaceId;
use crate::output_registry::{OutputRegistry, Zone};
use crate::surface_store::{SurfaceInfo, SurfaceState, SurfaceType};

/// Which vertical/horizontal edges of an `aux_rect` a placement request may
/// attach the new window to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAttachment {
    Vertical,
    Horizontal,
    Any,
}

bitflags! {
    /// Popup placement fallback hints (§4.5), tried flip, then slide, then
    /// resize, on whichever axes are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlacementHints: u8 {
        const FLIP_X   = 0b0000_0001;
        const FLIP_Y   = 0b0000_0010;
        const SLIDE_X  = 0b0000_0100;
        const SLIDE_Y  = 0b0000_1000;
        const RESIZE_X = 0b0001_0000;
        const RESIZE_Y = 0b0010_0000;
    }
}

/// Popup-specific placement parameters (§4.5 "Popup placement").
#[derive(Debug, Clone, Copy)]
pub struct GravityPlacement {
    pub aux_anchor: Gravity,
    pub window_anchor: Gravity,
    pub offset: Displacement<Local>,
    pub hints: PlacementHints,
}

/// A request to place a new surface (§4.5 "Inputs").
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    pub surface_type: SurfaceType,
    pub size: Size<Global>,
    pub parent: Option<SurfaceId>,
    pub output_id: Option<crate::ids::OutputId>,
    pub state: Option<SurfaceState>,
    pub aux_rect: Option<Rectangle<Local>>,
    pub edge_attachment: Option<EdgeAttachment>,
    pub gravity: Option<GravityPlacement>,
}

impl PlacementRequest {
    pub fn new(surface_type: SurfaceType, size: Size<Global>) -> Self {
        PlacementRequest {
            surface_type,
            size,
            parent: None,
            output_id: None,
            state: None,
            aux_rect: None,
            edge_attachment: None,
            gravity: None,
        }
    }
}

fn fits_in(rect: Rectangle<Global>, bounds: Rectangle<Global>) -> bool {
    rect.left() >= bounds.left() && rect.top() >= bounds.top() && rect.right() <= bounds.right() && rect.bottom() <= bounds.bottom()
}

fn translate_local_to_global(local: Rectangle<Local>, parent_top_left: Point<Global>) -> Rectangle<Global> {
    Rectangle::new(
        Point::new(parent_top_left.x + local.top_left.x, parent_top_left.y + local.top_left.y),
        Size::new(local.size.width, local.size.height),
    )
}

/// Attempts vertical (right-then-left) then, if requested, horizontal
/// (bottom-then-top) edge attachment of a `size`-sized window against
/// `aux_global`, constrained to fit entirely within `bounds`.
fn try_edge_attachment(
    edge_attachment: EdgeAttachment,
    aux_global: Rectangle<Global>,
    size: Size<Global>,
    bounds: Rectangle<Global>,
) -> Option<Rectangle<Global>> {
    let try_vertical = || {
        let right = Rectangle::new(Point::new(aux_global.right(), aux_global.top()), size);
        if fits_in(right, bounds) {
            return Some(right);
        }
        let left = Rectangle::new(Point::new(aux_global.left() - size.width, aux_global.top()), size);
        if fits_in(left, bounds) {
            return Some(left);
        }
        None
    };
    let try_horizontal = || {
        let bottom = Rectangle::new(Point::new(aux_global.left(), aux_global.bottom()), size);
        if fits_in(bottom, bounds) {
            return Some(bottom);
        }
        let top = Rectangle::new(Point::new(aux_global.left(), aux_global.top() - size.height), size);
        if fits_in(top, bounds) {
            return Some(top);
        }
        None
    };

    match edge_attachment {
        EdgeAttachment::Vertical => try_vertical(),
        EdgeAttachment::Horizontal => try_horizontal(),
        EdgeAttachment::Any => try_vertical().or_else(try_horizontal),
    }
}

/// Centres `size` on `target`, biased upward by one sixth of the height
/// difference (§4.5 rules 4 and 5).
fn centered_with_upward_bias(target: Rectangle<Global>, size: Size<Global>) -> Rectangle<Global> {
    let dx = (target.size.width - size.width) / 2;
    let dy_centered = (target.size.height - size.height) / 2;
    let bias = dy_centered / 6;
    Rectangle::new(Point::new(target.top_left.x + dx, target.top_left.y + dy_centered - bias), size)
}

/// Computes the initial rectangle for a new surface (§4.5). `title_bar_height`
/// allocates titlebar space per rule 7; `active_output` is used for the
/// global fallback of rule 5; `default_surface` is the session's current
/// default surface used by rule 2.
pub fn place(
    request: &PlacementRequest,
    store: &crate::surface_store::SurfaceInfoStore,
    registry: &OutputRegistry,
    active_zone: Option<&Zone>,
    default_surface: Option<SurfaceId>,
    title_bar_height: i32,
) -> Rectangle<Global> {
    let global_display_area = registry.global_display_area();

    // Rule 1: explicit output forces fullscreen sizing to that output.
    if let Some(output_id) = request.output_id {
        if let Some(output) = registry.output(output_id) {
            return output.rect;
        }
    }

    let mut placed: Option<Rectangle<Global>> = None;

    if request.parent.is_none() {
        // Rule 2: offset from the session default surface if one exists.
        if let Some(default_id) = default_surface {
            if let Some(default_info) = store.info_for(default_id) {
                let candidate = Rectangle::new(
                    Point::new(
                        default_info.top_left.x + title_bar_height,
                        default_info.top_left.y + title_bar_height,
                    ),
                    request.size,
                );
                let overlaps_its_zone = registry
                    .zone_containing(default_info.top_left)
                    .map(|z| z.extent.overlaps(&candidate))
                    .unwrap_or(false);
                if overlaps_its_zone {
                    placed = Some(candidate);
                }
            }
        }
    } else if let (Some(parent_id), Some(aux_rect), Some(edge_attachment)) =
        (request.parent, request.aux_rect, request.edge_attachment)
    {
        // Rule 3: edge attachment relative to the parent's aux-rect.
        if let Some(parent) = store.info_for(parent_id) {
            let aux_global = translate_local_to_global(aux_rect, parent.top_left);
            let bounds = active_zone.map(|z| z.extent).or(global_display_area).unwrap_or(aux_global);
            placed = try_edge_attachment(edge_attachment, aux_global, request.size, bounds);
        }
    }

    if placed.is_none() {
        if let Some(parent_id) = request.parent {
            // Rule 4: centre on parent with upward bias.
            if let Some(parent) = store.info_for(parent_id) {
                placed = Some(centered_with_upward_bias(parent.rect(), request.size));
            }
        }
    }

    let mut rect = placed.unwrap_or_else(|| {
        // Rule 5: centre within the active output/zone, then apply
        // state-specific override.
        let zone_extent = active_zone.map(|z| z.extent).or(global_display_area).unwrap_or(Rectangle::new(
            Point::zero(),
            request.size,
        ));
        match request.state {
            Some(SurfaceState::Fullscreen) | Some(SurfaceState::Maximised) => zone_extent,
            Some(SurfaceState::VertMaximised) => {
                let centered = centered_with_upward_bias(zone_extent, request.size);
                Rectangle::new(Point::new(centered.top_left.x, zone_extent.top()), Size::new(request.size.width, zone_extent.size.height))
            }
            Some(SurfaceState::HorizMaximised) => {
                let centered = centered_with_upward_bias(zone_extent, request.size);
                Rectangle::new(Point::new(zone_extent.left(), centered.top_left.y), Size::new(zone_extent.size.width, request.size.height))
            }
            _ => centered_with_upward_bias(zone_extent, request.size),
        }
    });

    // Rule 6: clamp so the window's top is not above the global display area's top.
    if let Some(area) = global_display_area {
        if rect.top() < area.top() {
            rect = Rectangle::new(Point::new(rect.top_left.x, area.top()), rect.size);
        }
    }

    // Rule 7: allocate titlebar space unless fullscreen.
    if request.surface_type.wants_titlebar() && request.state != Some(SurfaceState::Fullscreen) {
        rect = Rectangle::new(
            Point::new(rect.top_left.x, rect.top_left.y + title_bar_height),
            Size::new(rect.size.width, (rect.size.height - title_bar_height).max(0)),
        );
    }

    rect
}

/// Popup placement via gravity + fallback hints (§4.5 "Popup placement").
pub fn place_popup(
    aux_rect: Rectangle<Local>,
    parent: &SurfaceInfo,
    window_size: Size<Global>,
    gravity: &GravityPlacement,
    output_bounds: Rectangle<Global>,
) -> Rectangle<Global> {
    let aux_global = translate_local_to_global(aux_rect, parent.top_left);
    let anchor = gravity.aux_anchor.anchor_point(&aux_global) + Displacement::new(gravity.offset.dx, gravity.offset.dy);

    let place_with = |window_anchor: Gravity, anchor: Point<Global>| -> Rectangle<Global> {
        let window_local_anchor = window_anchor.anchor_point(&Rectangle::new(Point::zero(), window_size));
        Rectangle::new(Point::new(anchor.x - window_local_anchor.x, anchor.y - window_local_anchor.y), window_size)
    };

    let mut window_anchor = gravity.window_anchor;
    let mut anchor_point = anchor;
    let mut rect = place_with(window_anchor, anchor_point);

    if !fits_in(rect, output_bounds) {
        let escapes_x = rect.left() < output_bounds.left() || rect.right() > output_bounds.right();
        let escapes_y = rect.top() < output_bounds.top() || rect.bottom() > output_bounds.bottom();

        if escapes_x && gravity.hints.contains(PlacementHints::FLIP_X) {
            window_anchor = window_anchor.flipped_x();
            let flipped_aux_anchor = gravity.aux_anchor.flipped_x();
            anchor_point = flipped_aux_anchor.anchor_point(&aux_global) + Displacement::new(gravity.offset.dx, gravity.offset.dy);
            rect = place_with(window_anchor, anchor_point);
        }
        if escapes_y && gravity.hints.contains(PlacementHints::FLIP_Y) {
            window_anchor = window_anchor.flipped_y();
            let flipped_aux_anchor = gravity.aux_anchor.flipped_y();
            anchor_point = flipped_aux_anchor.anchor_point(&aux_global) + Displacement::new(gravity.offset.dx, gravity.offset.dy);
            rect = place_with(window_anchor, anchor_point);
        }
    }

    if !fits_in(rect, output_bounds) {
        if gravity.hints.contains(PlacementHints::SLIDE_X) {
            let dx = if rect.left() < output_bounds.left() {
                output_bounds.left() - rect.left()
            } else if rect.right() > output_bounds.right() {
                output_bounds.right() - rect.right()
            } else {
                0
            };
            rect = rect.translated(Displacement::new(dx, 0));
        }
        if gravity.hints.contains(PlacementHints::SLIDE_Y) {
            let dy = if rect.top() < output_bounds.top() {
                output_bounds.top() - rect.top()
            } else if rect.bottom() > output_bounds.bottom() {
                output_bounds.bottom() - rect.bottom()
            } else {
                0
            };
            rect = rect.translated(Displacement::new(0, dy));
        }
    }

    if !fits_in(rect, output_bounds) {
        let mut size = rect.size;
        if gravity.hints.contains(PlacementHints::RESIZE_X) {
            size.width = size.width.min(output_bounds.right() - rect.left()).max(1);
        }
        if gravity.hints.contains(PlacementHints::RESIZE_Y) {
            size.height = size.height.min(output_bounds.bottom() - rect.top()).max(1);
        }
        rect = Rectangle::new(rect.top_left, size);
    }

    // "Sticking" to the parent: pull the anchor back onto the parent's
    // rectangle if the gravity computation pushed it outside.
    let parent_rect = parent.rect();
    let x = rect.top_left.x.clamp(parent_rect.left() - rect.size.width, parent_rect.right());
    let y = rect.top_left.y.clamp(parent_rect.top() - rect.size.height, parent_rect.bottom());
    Rectangle::new(Point::new(x, y), rect.size)
}
