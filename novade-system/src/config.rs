//! Engine configuration.
//!
//! Captured once at [`crate::Engine::new`] and never consulted from a
//! process-wide global afterward, matching this codebase's avoidance of
//! global mutable state. A host typically obtains the `serde`-deserializable
//! form here from `novade_core`'s `ConfigLoader`/TOML machinery; the engine
//! itself never touches the filesystem.

use serde::{Deserialize, Serialize};

/// A keyboard modifier mask, expressed independently of any particular
/// input backend's bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub logo: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, logo: false };
    pub const ALT: Modifiers = Modifiers { alt: true, ..Modifiers::NONE };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ..Modifiers::NONE };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, ..Modifiers::NONE };

    pub fn with_shift(self) -> Modifiers {
        Modifiers { shift: true, ..self }
    }
}

/// Options recognised by the engine. All optional, defaulting per spec §6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Modifier that must be held for a pointer drag to start.
    pub pointer_drag_modifier: Modifiers,
    /// Height reserved above a titlebarred window.
    pub title_bar_height: i32,
    /// Scale applied to XWayland surfaces moving in/out of engine coordinates,
    /// stored as a fixed-point-like integer over 1000 to keep the engine's
    /// arithmetic entirely integral; 1000 means 1.0.
    pub assumed_surface_scale_milli: i32,
    /// Depth beyond which a parent chain is considered cyclic/corrupt and
    /// rejected rather than walked further.
    pub max_parent_chain_depth: usize,
    /// Capacity of the focus-history ring used for fallback-on-destroy and
    /// alt-tab/backtick cycling.
    pub focus_history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            pointer_drag_modifier: Modifiers::ALT,
            title_bar_height: 10,
            assumed_surface_scale_milli: 1000,
            max_parent_chain_depth: 64,
            focus_history_capacity: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.pointer_drag_modifier, Modifiers::ALT);
        assert_eq!(cfg.title_bar_height, 10);
        assert_eq!(cfg.assumed_surface_scale_milli, 1000);
    }

    #[test]
    fn modifiers_with_shift_preserves_other_fields() {
        let m = Modifiers::ALT.with_shift();
        assert!(m.alt);
        assert!(m.shift);
        assert!(!m.ctrl);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = EngineConfig::default();
        let text = toml::to_string(&cfg).expect("serialize");
        let back: EngineConfig = toml::from_str(&text).expect("deserialize");
        assert_eq!(cfg, back);
    }
}
