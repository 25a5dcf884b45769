//! # NovaDE Window-Management Engine (`novade-system`)
//!
//! `novade-system` implements the window-management core for a Wayland/X11
//! display server: surface placement, the window state machine, focus and
//! stacking policy, application-zone computation, and interactive
//! move/resize gestures. It is a single-threaded cooperative core (see
//! [`ports::Executor`]); all state mutation happens on the thread that owns
//! the [`Engine`].
//!
//! The engine depends on `novade-core` for its error and logging
//! conventions and is otherwise parameterised entirely by the capability
//! traits in [`ports`]. It never depends on a concrete scene graph,
//! display server, or input backend.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod gesture;
pub mod ids;
pub mod output_registry;
pub mod placement;
pub mod ports;
pub mod stacking;
pub mod state_machine;
pub mod surface_store;
pub mod zone_engine;

use tracing::{debug, info};

use std::collections::HashMap;

use config::EngineConfig;
use dispatcher::{DispatchOutcome, InputEvent, KeyAction};
use error::EngineError;
use focus::FocusController;
use geometry::{Global, Rectangle};
use gesture::GestureEngine;
use ids::{SessionId, SurfaceId, ZoneId};
use output_registry::{OutputDescriptor, ZoneEvent};
use output_registry::OutputRegistry;
use placement::PlacementRequest;
use ports::{Executor, Scene};
use stacking::StackingController;
use surface_store::{SurfaceInfo, SurfaceInfoStore, SurfaceState};
use zone_engine::{ApplicationZoneEvent, ApplicationZone};

/// The composition root: owns the Surface Info Store, Output Registry, and
/// the behavioural controllers, parameterised by [`EngineConfig`].
pub struct Engine {
    config: EngineConfig,
    surfaces: SurfaceInfoStore,
    outputs: OutputRegistry,
    focus: FocusController,
    stacking: StackingController,
    gestures: GestureEngine,
    executor: Executor,
    /// Last-computed application rectangle per zone (§4.3), diffed on every
    /// recompute to report {create, update, delete} per Zone.
    application_zones: HashMap<ZoneId, Rectangle<Global>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        // Matches the host-initialization idiom documented on
        // `novade_core::config::ConfigLoader`: a consumer that hasn't already
        // installed its own subscriber gets environment-driven logging for
        // free. Harmless (and a no-op) if the host already initialized one.
        novade_core::logging::init_minimal_logging();
        info!("engine starting with config {:?}", config);
        let focus_history_capacity = config.focus_history_capacity;
        Engine {
            config,
            surfaces: SurfaceInfoStore::new(),
            outputs: OutputRegistry::new(),
            focus: FocusController::new(focus_history_capacity),
            stacking: StackingController::new(),
            gestures: GestureEngine::new(),
            executor: Executor::new(),
            application_zones: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Drains any work posted to the executor by other threads. Call this
    /// once per dispatch-loop iteration from the window-manager thread.
    pub fn drain_executor(&self) {
        self.executor.drain();
    }

    /// Applies a new output configuration (§4.2), re-anchors every
    /// fullscreen/maximised surface to its (possibly moved or removed)
    /// output per §1(g), recomputes application zones (§4.3), and reports
    /// output zone lifecycle events for the host to react to.
    pub fn apply_output_configuration(&mut self, descriptors: Vec<OutputDescriptor>) -> Vec<ZoneEvent> {
        let events = self.outputs.apply_configuration(descriptors);
        self.reanchor_fullscreen_and_maximised();
        self.recompute_application_zones();
        events
    }

    /// §1(g): walks every known surface and re-derives geometry for the ones
    /// anchored to an output (fullscreen or maximised), following
    /// `output_updates.cpp`'s behaviour of moving the window with its output
    /// and falling back to the containing zone if the output disconnected.
    fn reanchor_fullscreen_and_maximised(&mut self) {
        let targets: Vec<SurfaceId> = self
            .surfaces
            .iter()
            .filter(|s| matches!(s.state, SurfaceState::Fullscreen | SurfaceState::Maximised))
            .map(|s| s.id)
            .collect();

        for id in targets {
            let info = self.surfaces.info_for(id).unwrap();
            let zone = info
                .output_id
                .filter(|o| self.outputs.output(*o).is_some())
                .and_then(|o| self.outputs.zone_of_output(o))
                .or_else(|| self.outputs.zone_containing(info.top_left));
            let Some(zone) = zone else { continue };

            let info = self.surfaces.info_for_mut(id).unwrap();
            info.top_left = zone.extent.top_left;
            info.size = zone.extent.size;
            if info.state == SurfaceState::Fullscreen {
                info.output_id = zone.outputs.first().copied();
            }
            debug!("re-anchored surface {} to zone {} after output reconfiguration", id, zone.id);
        }
    }

    /// §4.3: recomputes every zone's application rectangle from the current
    /// attached surfaces' exclusive rectangles, returning one of
    /// {create, update, delete} per Zone whose application rectangle
    /// changed since the last recompute.
    pub fn recompute_application_zones(&mut self) -> Vec<ApplicationZoneEvent> {
        let mut current = HashMap::new();
        let mut events = Vec::new();

        for zone in self.outputs.zones() {
            let contributions: Vec<zone_engine::ExclusiveContribution> = self
                .surfaces
                .iter()
                .filter(|s| s.state == SurfaceState::Attached && zone.extent.overlaps(&s.rect()))
                .filter_map(zone_engine::contribution_for)
                .collect();
            let rect = zone_engine::application_rect(zone.extent, &contributions);
            current.insert(zone.id, rect);

            match self.application_zones.get(&zone.id) {
                None => events.push(ApplicationZoneEvent::Created(ApplicationZone { id: zone.id, rect })),
                Some(prev) if *prev != rect => {
                    events.push(ApplicationZoneEvent::Updated(ApplicationZone { id: zone.id, rect }))
                }
                Some(_) => {}
            }
        }

        for id in self.application_zones.keys() {
            if !current.contains_key(id) {
                events.push(ApplicationZoneEvent::Deleted(*id));
            }
        }

        self.application_zones = current;
        events
    }

    /// The last-computed application rectangle for `zone`, or `None` if the
    /// zone is unknown.
    pub fn application_rect(&self, zone: ZoneId) -> Option<Rectangle<Global>> {
        self.application_zones.get(&zone).copied()
    }

    /// Creates a new surface, placing it via the Placement Engine (§4.5).
    pub fn create_surface(
        &mut self,
        scene: &mut impl Scene,
        session: SessionId,
        request: PlacementRequest,
    ) -> Result<SurfaceId, EngineError> {
        if request.surface_type.requires_parent() && request.parent.is_none() {
            return Err(EngineError::InconsistentSpec(format!(
                "{:?} surface requires a parent",
                request.surface_type
            )));
        }
        if request.surface_type.forbids_parent() && request.parent.is_some() {
            return Err(EngineError::InconsistentSpec(format!(
                "{:?} surface must not have a parent",
                request.surface_type
            )));
        }

        let active_zone = self
            .focus
            .active()
            .and_then(|s| self.surfaces.info_for(s))
            .and_then(|s| self.outputs.zone_containing(s.top_left))
            .or_else(|| self.outputs.zones().next());
        let default_surface = self.surfaces.session_info(session).and_then(|s| s.default_surface);

        let rect = placement::place(
            &request,
            &self.surfaces,
            &self.outputs,
            active_zone.as_ref(),
            default_surface,
            self.config.title_bar_height,
        );

        let id = SurfaceId::new_v4();
        let mut info = SurfaceInfo::new(id, session, request.surface_type, rect);
        info.parent = request.parent;
        info.state = request.state.unwrap_or(SurfaceState::Restored);
        info.restore_rect = rect;
        self.surfaces.emplace(info)?;

        info!("created surface {} of type {:?} at {:?}", id, request.surface_type, rect);
        self.focus.request_focus(&self.surfaces, scene, id);
        self.stacking.raise(&self.surfaces, scene, id);
        Ok(id)
    }

    /// Destroys a surface, tearing down its focus/stacking implications
    /// (§4.7 fallback chain).
    pub fn destroy_surface(&mut self, scene: &mut impl Scene, surface: SurfaceId) {
        let Some(info) = self.surfaces.info_for(surface) else {
            debug!("destroy_surface: unknown surface {} treated as no-op", surface);
            return;
        };
        let parent = info.parent;
        let session = info.session;
        self.gestures.cancel_if_targets(surface);
        self.surfaces.forget(surface);
        scene.destroy_surface(surface);
        self.focus.on_surface_removed_or_hidden(&self.surfaces, scene, surface, parent, session);
        info!("destroyed surface {}", surface);
    }

    /// Applies a state transition (§4.6).
    pub fn set_state(
        &mut self,
        scene: &mut impl Scene,
        surface: SurfaceId,
        new_state: SurfaceState,
    ) -> Result<Rectangle<Global>, EngineError> {
        let rect = state_machine::set_state(&mut self.surfaces, &self.outputs, surface, new_state)?;
        self.recompute_application_zones();
        scene.on_geometry_changed(surface, rect);
        let visible = self
            .surfaces
            .info_for(surface)
            .map(|s| s.state.is_visible())
            .unwrap_or(true);
        scene.on_visibility_changed(surface, visible);
        if !visible && self.focus.active() == Some(surface) {
            let info = self.surfaces.info_for(surface).unwrap();
            let parent = info.parent;
            let session = info.session;
            self.focus.on_surface_removed_or_hidden(&self.surfaces, scene, surface, parent, session);
        }
        Ok(rect)
    }

    /// Dispatches an input event, applying any resulting key-bound state
    /// change before returning the outcome to the host.
    pub fn dispatch_input(&mut self, scene: &mut impl Scene, event: InputEvent) -> DispatchOutcome {
        let outcome = dispatcher::dispatch_input(&mut self.surfaces, scene, &mut self.gestures, &mut self.focus, event);
        if let DispatchOutcome::KeyAction(action) = outcome {
            self.apply_key_action(scene, action);
        }
        outcome
    }

    fn apply_key_action(&mut self, scene: &mut impl Scene, action: KeyAction) {
        let Some(active) = self.focus.active() else { return };
        let current_state = self.surfaces.info_for(active).map(|s| s.state);
        let toggled = |restored_target: SurfaceState| {
            if current_state == Some(restored_target) {
                SurfaceState::Restored
            } else {
                restored_target
            }
        };
        match action {
            KeyAction::ToggleMaximised => {
                let _ = self.set_state(scene, active, toggled(SurfaceState::Maximised));
            }
            KeyAction::ToggleVertMaximised => {
                let _ = self.set_state(scene, active, toggled(SurfaceState::VertMaximised));
            }
            KeyAction::ToggleHorizMaximised => {
                let _ = self.set_state(scene, active, toggled(SurfaceState::HorizMaximised));
            }
            KeyAction::AskClose | KeyAction::ForceClose => {
                self.destroy_surface(scene, active);
            }
            KeyAction::RotateSessionFocusForward => self.focus.cycle_forward(&self.surfaces, scene),
            KeyAction::RotateSessionFocusBackward => self.focus.cycle_backward(&self.surfaces, scene),
            KeyAction::RotateWithinSessionForward => self.focus.cycle_forward(&self.surfaces, scene),
            KeyAction::RotateWithinSessionBackward => self.focus.cycle_backward(&self.surfaces, scene),
        }
    }

    pub fn surface_info(&self, surface: SurfaceId) -> Option<&SurfaceInfo> {
        self.surfaces.info_for(surface)
    }

    pub fn raise(&mut self, scene: &mut impl Scene, surface: SurfaceId) {
        self.stacking.raise(&self.surfaces, scene, surface);
    }
}
