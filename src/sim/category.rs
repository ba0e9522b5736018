//! Physics categories for contact filtering.
//!
//! Every physics-bearing sprite carries exactly one category bit. Bodies also
//! carry a contact-test mask naming the categories they want to hear about.

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// Category bit flags for physics bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    /// No category - never reported.
    pub const NONE: Self = Self(0);

    /// Incoming monsters.
    pub const MONSTER: Self = Self(1 << 1);

    /// Thrown projectiles. Reserved; nothing in the game fires one.
    pub const PROJECTILE: Self = Self(1 << 2);

    /// The player character.
    pub const PLAYER: Self = Self(1 << 3);

    /// The sword orbiting the player.
    pub const ARM: Self = Self(1 << 4);

    /// Every category.
    pub const ALL: Self = Self(u32::MAX);

    /// True if any bit is shared with `other`.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True if every bit in `other` is set in `self`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NONE => "none",
            Self::MONSTER => "monster",
            Self::PROJECTILE => "projectile",
            Self::PLAYER => "player",
            Self::ARM => "arm",
            Self::ALL => "all",
            _ => "mixed",
        }
    }
}

impl BitOr for Category {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Category {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
