//! Output lifecycle and logical grouping into zones.
//!
//! Grounded on `DisplayManager`/`ManagedOutput` (`display_management.rs`):
//! a flat `Vec`/`HashMap` of managed outputs, add/remove by id, `tracing`
//! logs on every topology change. That manager tracked one flat list with a
//! "primary" flag; this registry additionally groups outputs sharing a
//! non-zero logical group id into a `Zone`, per §4.2/§4.3.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::geometry::{bounding_rectangle, Global, Rectangle};
use crate::ids::{OutputId, ZoneId};

/// A single physical output, as described by the host's display boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub id: OutputId,
    pub rect: Rectangle<Global>,
    /// Zero means "ungrouped": this output forms its own zone.
    pub logical_group_id: u32,
}

/// A logical group of one or more outputs, identified stably across
/// `apply_configuration` calls that keep the same member set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    pub outputs: Vec<OutputId>,
    pub extent: Rectangle<Global>,
}

/// What changed about a zone since the previous configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneEvent {
    Created(Zone),
    Updated(Zone),
    Deleted(ZoneId),
}

#[derive(Debug, Default)]
pub struct OutputRegistry {
    outputs: HashMap<OutputId, OutputDescriptor>,
    /// Stable zone id per logical_group_id (0 maps each output to its own
    /// zone, keyed by output id instead).
    group_zone_ids: HashMap<u32, ZoneId>,
    ungrouped_zone_ids: HashMap<OutputId, ZoneId>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &OutputDescriptor> {
        self.outputs.values()
    }

    pub fn output(&self, id: OutputId) -> Option<&OutputDescriptor> {
        self.outputs.get(&id)
    }

    /// The union of every known zone's extent (§3 "global display area").
    pub fn global_display_area(&self) -> Option<Rectangle<Global>> {
        let rects: Vec<Rectangle<Global>> = self.zones().map(|z| z.extent).collect();
        bounding_rectangle(&rects)
    }

    /// Replaces the known output set and returns zone lifecycle events in
    /// created-then-updated-then-deleted order (§4.2). Accepts an empty
    /// list: geometry from the previous configuration is simply forgotten,
    /// no observer sees anything created (§7 "zero-output config").
    pub fn apply_configuration(&mut self, descriptors: Vec<OutputDescriptor>) -> Vec<ZoneEvent> {
        let previous_zones: HashMap<ZoneId, Zone> = self.zones().map(|z| (z.id, z.clone())).collect();

        self.outputs = descriptors.into_iter().map(|d| (d.id, d)).collect();

        let mut seen_groups = std::collections::HashSet::new();
        let mut seen_outputs = std::collections::HashSet::new();
        let mut current_zones = Vec::new();
        for output in self.outputs.values() {
            if output.logical_group_id == 0 {
                if seen_outputs.insert(output.id) {
                    let zone_id = *self
                        .ungrouped_zone_ids
                        .entry(output.id)
                        .or_insert_with(ZoneId::new_v4);
                    current_zones.push(Zone { id: zone_id, outputs: vec![output.id], extent: output.rect });
                }
            } else if seen_groups.insert(output.logical_group_id) {
                let zone_id = *self
                    .group_zone_ids
                    .entry(output.logical_group_id)
                    .or_insert_with(ZoneId::new_v4);
                let members: Vec<OutputId> = self
                    .outputs
                    .values()
                    .filter(|o| o.logical_group_id == output.logical_group_id)
                    .map(|o| o.id)
                    .collect();
                let rects: Vec<Rectangle<Global>> = self
                    .outputs
                    .values()
                    .filter(|o| o.logical_group_id == output.logical_group_id)
                    .map(|o| o.rect)
                    .collect();
                let extent = bounding_rectangle(&rects).expect("non-empty group");
                current_zones.push(Zone { id: zone_id, outputs: members, extent });
            }
        }

        self.ungrouped_zone_ids.retain(|id, _| self.outputs.contains_key(id));
        self.group_zone_ids
            .retain(|group, _| self.outputs.values().any(|o| o.logical_group_id == *group));

        let mut events = Vec::new();
        for zone in &current_zones {
            match previous_zones.get(&zone.id) {
                None => {
                    info!("zone {} created with {} output(s)", zone.id, zone.outputs.len());
                    events.push(ZoneEvent::Created(zone.clone()));
                }
                Some(prev) if prev != zone => {
                    debug!("zone {} updated", zone.id);
                    events.push(ZoneEvent::Updated(zone.clone()));
                }
                Some(_) => {}
            }
        }
        let current_ids: std::collections::HashSet<ZoneId> = current_zones.iter().map(|z| z.id).collect();
        for (id, _) in previous_zones.iter().filter(|(id, _)| !current_ids.contains(id)) {
            info!("zone {} deleted", id);
            events.push(ZoneEvent::Deleted(*id));
        }

        events
    }

    pub fn zones(&self) -> impl Iterator<Item = Zone> + '_ {
        let mut groups: HashMap<u32, Vec<&OutputDescriptor>> = HashMap::new();
        let mut ungrouped = Vec::new();
        for output in self.outputs.values() {
            if output.logical_group_id == 0 {
                ungrouped.push(output);
            } else {
                groups.entry(output.logical_group_id).or_default().push(output);
            }
        }
        let ungrouped_zones = ungrouped.into_iter().map(|o| Zone {
            id: self.ungrouped_zone_ids[&o.id],
            outputs: vec![o.id],
            extent: o.rect,
        });
        let group_zones = groups.into_iter().map(move |(group, members)| {
            let rects: Vec<Rectangle<Global>> = members.iter().map(|o| o.rect).collect();
            Zone {
                id: self.group_zone_ids[&group],
                outputs: members.iter().map(|o| o.id).collect(),
                extent: bounding_rectangle(&rects).expect("non-empty group"),
            }
        });
        ungrouped_zones.chain(group_zones)
    }

    pub fn zone_containing(&self, point: crate::geometry::Point<Global>) -> Option<Zone> {
        self.zones().find(|z| z.extent.contains(point))
    }

    pub fn zone_of_output(&self, output: OutputId) -> Option<Zone> {
        self.zones().find(|z| z.outputs.contains(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn descriptor(id: OutputId, x: i32, y: i32, w: i32, h: i32, group: u32) -> OutputDescriptor {
        OutputDescriptor { id, rect: Rectangle::new(Point::new(x, y), Size::new(w, h)), logical_group_id: group }
    }

    #[test]
    fn ungrouped_outputs_each_form_their_own_zone() {
        let mut registry = OutputRegistry::new();
        let a = OutputId::new_v4();
        let b = OutputId::new_v4();
        let events = registry.apply_configuration(vec![descriptor(a, 0, 0, 640, 480, 0), descriptor(b, 640, 0, 640, 480, 0)]);
        assert_eq!(events.len(), 2);
        assert_eq!(registry.zones().count(), 2);
    }

    #[test]
    fn grouped_outputs_form_one_zone_spanning_members() {
        let mut registry = OutputRegistry::new();
        let a = OutputId::new_v4();
        let b = OutputId::new_v4();
        registry.apply_configuration(vec![descriptor(a, 30, 40, 1280, 720, 1), descriptor(b, 1400, 70, 640, 480, 1)]);
        let zones: Vec<Zone> = registry.zones().collect();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].extent, Rectangle::new(Point::new(30, 40), Size::new(2010, 720)));
    }

    #[test]
    fn zero_output_configuration_is_accepted() {
        let mut registry = OutputRegistry::new();
        let a = OutputId::new_v4();
        registry.apply_configuration(vec![descriptor(a, 0, 0, 640, 480, 0)]);
        let events = registry.apply_configuration(vec![]);
        assert!(matches!(events.as_slice(), [ZoneEvent::Deleted(_)]));
        assert_eq!(registry.zones().count(), 0);
    }

    #[test]
    fn reapplying_identical_configuration_emits_no_events() {
        let mut registry = OutputRegistry::new();
        let a = OutputId::new_v4();
        registry.apply_configuration(vec![descriptor(a, 0, 0, 640, 480, 0)]);
        let events = registry.apply_configuration(vec![descriptor(a, 0, 0, 640, 480, 0)]);
        assert!(events.is_empty());
    }

    #[test]
    fn zone_id_is_stable_across_reconfiguration() {
        let mut registry = OutputRegistry::new();
        let a = OutputId::new_v4();
        registry.apply_configuration(vec![descriptor(a, 0, 0, 640, 480, 0)]);
        let first_id = registry.zones().next().unwrap().id;
        registry.apply_configuration(vec![descriptor(a, 10, 10, 640, 480, 0)]);
        let second_id = registry.zones().next().unwrap().id;
        assert_eq!(first_id, second_id);
    }
}
