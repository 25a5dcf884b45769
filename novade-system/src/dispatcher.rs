//! Event Dispatcher (§4.10): the engine's sole entry point for input
//! events, output reconfiguration, and client requests.
//!
//! The match-then-delegate shape is grounded on
//! `input::event_dispatcher::process_input_event`, which matches on the
//! input-event variant and hands each case to a dedicated handler. That
//! function dispatches smithay/libinput types to Wayland-specific handlers;
//! here the match is over the engine's own host-agnostic event enum and
//! delegates into `GestureEngine`/`FocusController`/key bindings per §4.10's
//! ordering rule.

use tracing::debug;

use crate::config::Modifiers;
use crate::geometry::Point;
use crate::gesture::GestureEngine;
use crate::ids::SurfaceId;
use crate::ports::Scene;
use crate::surface_store::{Edges, SurfaceInfoStore, SurfaceState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// A host-agnostic input event (§6 "Input boundary").
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    PointerMotion { position: Point<crate::geometry::Global> },
    PointerButtonDown { position: Point<crate::geometry::Global>, button: MouseButton, modifiers: Modifiers },
    PointerButtonUp { button: MouseButton },
    KeyChord { modifiers: Modifiers, key: KeyChordKey },
    TouchDown { position: Point<crate::geometry::Global> },
    TouchUp,
}

/// The subset of keys the built-in bindings table (§4.10) recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChordKey {
    F11,
    F4,
    Tab,
    Backtick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMaximised,
    ToggleVertMaximised,
    ToggleHorizMaximised,
    AskClose,
    ForceClose,
    RotateSessionFocusForward,
    RotateSessionFocusBackward,
    RotateWithinSessionForward,
    RotateWithinSessionBackward,
}

/// Resolves a key chord to a built-in action per the §4.10 bindings table.
/// Every binding requires the surrounding modifier set to match exactly
/// (no extra modifiers), matching how a compositor's keybinding table is
/// normally consulted.
pub fn resolve_key_binding(modifiers: Modifiers, key: KeyChordKey) -> Option<KeyAction> {
    use KeyAction::*;
    use KeyChordKey::*;
    match (modifiers, key) {
        (Modifiers { alt: true, shift: false, ctrl: false, .. }, F11) => Some(ToggleMaximised),
        (Modifiers { shift: true, alt: false, ctrl: false, .. }, F11) => Some(ToggleVertMaximised),
        (Modifiers { ctrl: true, alt: false, shift: false, .. }, F11) => Some(ToggleHorizMaximised),
        (Modifiers { alt: true, shift: false, ctrl: false, .. }, F4) => Some(AskClose),
        (Modifiers { ctrl: true, alt: false, shift: false, .. }, F4) => Some(ForceClose),
        (Modifiers { alt: true, shift: false, .. }, Tab) => Some(RotateSessionFocusForward),
        (Modifiers { alt: true, shift: true, .. }, Tab) => Some(RotateSessionFocusBackward),
        (Modifiers { alt: true, shift: false, .. }, Backtick) => Some(RotateWithinSessionForward),
        (Modifiers { alt: true, shift: true, .. }, Backtick) => Some(RotateWithinSessionBackward),
        _ => None,
    }
}

/// Picks the resize-corner edge set farthest from `pointer` within `rect`
/// (§4.9's anchor-corner selection, consulted by the dispatcher before
/// starting a resize gesture).
pub fn farthest_corner_edges(rect: crate::geometry::Rectangle<crate::geometry::Global>, pointer: Point<crate::geometry::Global>) -> Edges {
    let center = rect.center();
    let mut edges = Edges::empty();
    edges |= if pointer.x < center.x { Edges::EAST } else { Edges::WEST };
    edges |= if pointer.y < center.y { Edges::SOUTH } else { Edges::NORTH };
    edges
}

/// A single dispatch step's outcome, returned for the host to act on
/// (close requests and key-triggered state changes are reported rather
/// than acted on internally, since closing a client or mutating state is a
/// host/engine-API concern, not the dispatcher's).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Consumed,
    NotConsumed,
    KeyAction(KeyAction),
}

/// Dispatches one input event: Gesture Engine first (may consume), then
/// Focus Controller on a click outside any gesture, then key bindings
/// (§4.10).
pub fn dispatch_input(
    store: &mut SurfaceInfoStore,
    scene: &mut impl Scene,
    gestures: &mut GestureEngine,
    focus: &mut crate::focus::FocusController,
    event: InputEvent,
) -> DispatchOutcome {
    match event {
        InputEvent::PointerMotion { position } => {
            if gestures.pointer_motion(store, position).is_some() {
                DispatchOutcome::Consumed
            } else {
                DispatchOutcome::NotConsumed
            }
        }
        InputEvent::PointerButtonDown { position, button: _, modifiers: _ } => {
            if gestures.mode() != crate::gesture::GestureMode::None {
                return DispatchOutcome::Consumed;
            }
            if let Some(target) = scene.surface_at(position) {
                debug!("dispatch: click on {} outside any gesture", target);
                focus.request_focus(store, scene, target);
                return DispatchOutcome::Consumed;
            }
            DispatchOutcome::NotConsumed
        }
        InputEvent::PointerButtonUp { .. } => {
            gestures.end();
            DispatchOutcome::Consumed
        }
        InputEvent::KeyChord { modifiers, key } => match resolve_key_binding(modifiers, key) {
            Some(action) => DispatchOutcome::KeyAction(action),
            None => DispatchOutcome::NotConsumed,
        },
        InputEvent::TouchDown { position } => {
            if let Some(target) = scene.surface_at(position) {
                gestures.touch_down(store, target, position);
            }
            DispatchOutcome::Consumed
        }
        InputEvent::TouchUp => {
            gestures.touch_up();
            DispatchOutcome::Consumed
        }
    }
}

/// A client-requested move/resize must first transition a non-movable
/// surface (maximised/attached/fullscreen) to restored (§4.9). Unlike a
/// plain `set_state(Restored)`, the window must not snap away from under
/// the pointer/touch centroid that is driving the gesture: the top edge
/// stays anchored where the window currently is, and the window is
/// re-centred horizontally under `pointer` so it keeps following the
/// gesture that triggered the restore.
pub fn prepare_for_request_move_or_resize(
    store: &mut SurfaceInfoStore,
    registry: &crate::output_registry::OutputRegistry,
    surface: SurfaceId,
    pointer: Point<crate::geometry::Global>,
) -> Result<(), crate::error::EngineError> {
    let info = store
        .info_for(surface)
        .ok_or_else(|| crate::error::EngineError::InvalidHandle(surface.to_string()))?;
    if info.state.is_movable() {
        return Ok(());
    }
    let top = info.top_left.y;

    crate::state_machine::set_state(store, registry, surface, SurfaceState::Restored)?;

    let info = store.info_for_mut(surface).unwrap();
    let width = info.size.width;
    info.top_left = Point::new(pointer.x - width / 2, top);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Modifiers;
    use crate::geometry::{Global, Rectangle, Size};
    use crate::ids::{OutputId, SessionId};
    use crate::output_registry::OutputDescriptor;
    use crate::surface_store::SurfaceInfo;
    use crate::surface_store::SurfaceType;

    #[test]
    fn alt_f11_toggles_maximised() {
        assert_eq!(resolve_key_binding(Modifiers::ALT, KeyChordKey::F11), Some(KeyAction::ToggleMaximised));
    }

    #[test]
    fn shift_f11_toggles_vert_maximised() {
        assert_eq!(resolve_key_binding(Modifiers::SHIFT, KeyChordKey::F11), Some(KeyAction::ToggleVertMaximised));
    }

    #[test]
    fn unbound_chord_resolves_to_none() {
        assert_eq!(resolve_key_binding(Modifiers::NONE, KeyChordKey::F11), None);
    }

    #[test]
    fn farthest_corner_picks_opposite_quadrant() {
        let rect = Rectangle::<Global>::new(Point::new(0, 0), Size::new(100, 100));
        // Pointer near the NW corner should select the SE (south+east) edges.
        let edges = farthest_corner_edges(rect, Point::new(5, 5));
        assert_eq!(edges, Edges::SOUTH | Edges::EAST);
    }

    #[test]
    fn request_move_on_maximised_window_keeps_top_anchored_and_follows_pointer() {
        let mut store = SurfaceInfoStore::new();
        let mut registry = crate::output_registry::OutputRegistry::new();
        let output = OutputId::new_v4();
        registry.apply_configuration(vec![OutputDescriptor {
            id: output,
            rect: Rectangle::new(Point::new(0, 0), Size::new(1280, 720)),
            logical_group_id: 0,
        }]);
        let id = SurfaceId::new_v4();
        let mut info = SurfaceInfo::new(id, SessionId::new_v4(), SurfaceType::Normal, Rectangle::new(Point::new(300, 200), Size::new(400, 300)));
        info.restore_rect = Rectangle::new(Point::new(300, 200), Size::new(400, 300));
        store.emplace(info).unwrap();
        crate::state_machine::set_state(&mut store, &registry, id, SurfaceState::Maximised).unwrap();
        let top_before = store.info_for(id).unwrap().top_left.y;

        prepare_for_request_move_or_resize(&mut store, &registry, id, Point::new(500, 50)).unwrap();

        let info = store.info_for(id).unwrap();
        assert_eq!(info.state, SurfaceState::Restored);
        assert_eq!(info.top_left.y, top_before);
        assert_eq!(info.top_left.x, 500 - info.size.width / 2);
    }

    #[test]
    fn request_move_on_an_already_movable_window_is_a_no_op() {
        let mut store = SurfaceInfoStore::new();
        let registry = crate::output_registry::OutputRegistry::new();
        let id = SurfaceId::new_v4();
        let rect = Rectangle::new(Point::new(10, 10), Size::new(100, 100));
        store.emplace(SurfaceInfo::new(id, SessionId::new_v4(), SurfaceType::Normal, rect)).unwrap();

        prepare_for_request_move_or_resize(&mut store, &registry, id, Point::new(999, 999)).unwrap();

        assert_eq!(store.info_for(id).unwrap().rect(), rect);
    }
}
