//! Collision masks for filtering collision queries
//!
//! Every collider carries exactly one [`Mask`]. Queries name the masks they
//! care about with a [`MaskSet`], so a single check can consider several
//! kinds of collider at once.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The filter tag carried by a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mask {
    /// Level geometry and walls
    Solid,
    /// Characters
    Npc,
    /// Short-lived effects and pickups
    Effect,
    /// Dynamic props
    Object,
}

impl Mask {
    /// Every mask, in declaration order
    pub const ALL: [Self; 4] = [Self::Solid, Self::Npc, Self::Effect, Self::Object];
}

bitflags! {
    /// A set of [`Mask`] values used to filter collision queries
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaskSet: u8 {
        /// Level geometry and walls
        const SOLID = 1 << 0;
        /// Characters
        const NPC = 1 << 1;
        /// Short-lived effects and pickups
        const EFFECT = 1 << 2;
        /// Dynamic props
        const OBJECT = 1 << 3;
    }
}

impl MaskSet {
    /// Check whether `mask` is a member of this set
    pub fn has(self, mask: Mask) -> bool {
        self.contains(Self::from_mask(mask))
    }

    /// The single-member set for `mask`
    pub const fn from_mask(mask: Mask) -> Self {
        match mask {
            Mask::Solid => Self::SOLID,
            Mask::Npc => Self::NPC,
            Mask::Effect => Self::EFFECT,
            Mask::Object => Self::OBJECT,
        }
    }
}

impl From<Mask> for MaskSet {
    fn from(mask: Mask) -> Self {
        Self::from_mask(mask)
    }
}

impl FromIterator<Mask> for MaskSet {
    fn from_iter<I: IntoIterator<Item = Mask>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, mask| acc | Self::from(mask))
    }
}

impl<const N: usize> From<[Mask; N]> for MaskSet {
    fn from(masks: [Mask; N]) -> Self {
        masks.into_iter().collect()
    }
}
