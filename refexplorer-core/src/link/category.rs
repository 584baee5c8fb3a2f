//! Link Categories
//!
//! A link category has two independent axes: whether the pin end takes part
//! in a real directed edge (active) or is a placeholder (passive), and the
//! link type (hard/soft x used-in-game/editor-only). The axes combine into
//! five display categories, each with a fixed name and color.

use serde::{Deserialize, Serialize};

/// A linear-space RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    /// Opaque color from linear components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from 8-bit sRGB components.
    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = f32::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The five display categories a link can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkDisplay {
    Passive,
    HardUsedInGame,
    HardEditorOnly,
    SoftUsedInGame,
    SoftEditorOnly,
}

impl LinkDisplay {
    /// All display categories.
    pub const ALL: [LinkDisplay; 5] = [
        LinkDisplay::Passive,
        LinkDisplay::HardUsedInGame,
        LinkDisplay::HardEditorOnly,
        LinkDisplay::SoftUsedInGame,
        LinkDisplay::SoftEditorOnly,
    ];

    /// Pin name used by the rendering layer.
    pub fn name(self) -> &'static str {
        match self {
            LinkDisplay::Passive => "Passive",
            LinkDisplay::HardUsedInGame => "Hard",
            LinkDisplay::HardEditorOnly => "HardEditorOnly",
            LinkDisplay::SoftUsedInGame => "Soft",
            LinkDisplay::SoftEditorOnly => "SoftEditorOnly",
        }
    }

    /// Wire color.
    pub fn color(self) -> LinearColor {
        match self {
            LinkDisplay::Passive => LinearColor::from_srgb8(128, 128, 128),
            // RiceFlower
            LinkDisplay::HardUsedInGame => LinearColor::from_srgb8(236, 252, 227),
            LinkDisplay::HardEditorOnly => LinearColor::from_srgb8(118, 126, 114),
            // CannonPink
            LinkDisplay::SoftUsedInGame => LinearColor::from_srgb8(145, 66, 117),
            LinkDisplay::SoftEditorOnly => LinearColor::from_srgb8(73, 33, 58),
        }
    }

    /// The canonical category displayed this way.
    pub fn category(self) -> LinkCategory {
        match self {
            LinkDisplay::Passive => LinkCategory::PASSIVE,
            LinkDisplay::HardUsedInGame => LinkCategory::active(true, true),
            LinkDisplay::HardEditorOnly => LinkCategory::active(true, false),
            LinkDisplay::SoftUsedInGame => LinkCategory::active(false, true),
            LinkDisplay::SoftEditorOnly => LinkCategory::active(false, false),
        }
    }
}

/// Classification of one link end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkCategory {
    /// The end takes part in a real directed edge.
    pub end_active: bool,
    /// At least one contributing dependency is hard.
    pub hard: bool,
    /// At least one contributing dependency is needed in game.
    pub used_in_game: bool,
}

impl LinkCategory {
    /// Placeholder end with no known direction.
    pub const PASSIVE: Self = Self {
        end_active: false,
        hard: false,
        used_in_game: false,
    };

    /// Active end with the given link type.
    pub const fn active(hard: bool, used_in_game: bool) -> Self {
        Self {
            end_active: true,
            hard,
            used_in_game,
        }
    }

    /// Union of two categories: every axis set in either is set in the result.
    pub fn union(self, other: Self) -> Self {
        Self {
            end_active: self.end_active || other.end_active,
            hard: self.hard || other.hard,
            used_in_game: self.used_in_game || other.used_in_game,
        }
    }

    /// Fold `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        *self = self.union(other);
    }

    /// Display category. Link-type bits are ignored on passive ends.
    pub fn display(self) -> LinkDisplay {
        if !self.end_active {
            return LinkDisplay::Passive;
        }
        match (self.hard, self.used_in_game) {
            (true, true) => LinkDisplay::HardUsedInGame,
            (true, false) => LinkDisplay::HardEditorOnly,
            (false, true) => LinkDisplay::SoftUsedInGame,
            (false, false) => LinkDisplay::SoftEditorOnly,
        }
    }

    /// Pin name of this category.
    pub fn name(self) -> &'static str {
        self.display().name()
    }

    /// Wire color of this category.
    pub fn color(self) -> LinearColor {
        self.display().color()
    }

    /// Parse a pin name back into a category. Unknown names are passive.
    pub fn from_pin_name(name: &str) -> Self {
        LinkDisplay::ALL
            .into_iter()
            .find(|display| display.name() == name)
            .map(LinkDisplay::category)
            .unwrap_or(Self::PASSIVE)
    }

    /// Category that colors the wire between an output and an input pin:
    /// the active end wins, otherwise the input end is used.
    pub fn wire(output: Self, input: Self) -> Self {
        if output.end_active {
            output
        } else {
            input
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passive_ignores_link_type_bits() {
        let odd = LinkCategory {
            end_active: false,
            hard: true,
            used_in_game: true,
        };
        assert_eq!(odd.display(), LinkDisplay::Passive);
        assert_eq!(odd.color(), LinkCategory::PASSIVE.color());
        assert_eq!(odd.name(), "Passive");
    }

    #[test]
    fn union_sets_every_axis() {
        let hard_editor = LinkCategory::active(true, false);
        let soft_game = LinkCategory::active(false, true);
        assert_eq!(hard_editor.union(soft_game), LinkCategory::active(true, true));

        let mut merged = LinkCategory::PASSIVE;
        merged.merge(soft_game);
        assert_eq!(merged, soft_game);
    }

    #[test]
    fn pin_names_round_trip() {
        for display in LinkDisplay::ALL {
            let category = display.category();
            assert_eq!(category.display(), display);
            assert_eq!(LinkCategory::from_pin_name(display.name()), category);
        }
        assert_eq!(LinkCategory::from_pin_name("Bogus"), LinkCategory::PASSIVE);
    }

    #[test]
    fn names_and_colors_are_distinct() {
        for (i, a) in LinkDisplay::ALL.iter().enumerate() {
            for b in &LinkDisplay::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
                assert_ne!(a.color(), b.color());
            }
        }
    }

    #[test]
    fn wire_prefers_active_end() {
        let active = LinkCategory::active(true, true);
        assert_eq!(LinkCategory::wire(active, LinkCategory::PASSIVE), active);
        assert_eq!(LinkCategory::wire(LinkCategory::PASSIVE, active), active);
        assert_eq!(
            LinkCategory::wire(LinkCategory::PASSIVE, LinkCategory::PASSIVE),
            LinkCategory::PASSIVE
        );
    }

    #[test]
    fn srgb_conversion_endpoints() {
        let black = LinearColor::from_srgb8(0, 0, 0);
        let white = LinearColor::from_srgb8(255, 255, 255);
        assert_eq!(black, LinearColor::rgb(0.0, 0.0, 0.0));
        assert!((white.r - 1.0).abs() < 1e-6);
        assert_eq!(white.a, 1.0);
    }
}
