//! Hit/hurt box classification for gameplay filtering
//!
//! The geometry algorithms ignore box types entirely. Gameplay code uses
//! them to decide which overlaps matter: an attack's hit box against a
//! target's hurt box.

use bitflags::bitflags;

bitflags! {
    /// Role of a shape in gameplay overlap checks
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BoxType: u8 {
        /// Deals damage
        const HIT = 1 << 0;
        /// Receives damage
        const HURT = 1 << 1;
        /// Both deals and receives damage
        const BOTH = Self::HIT.bits() | Self::HURT.bits();
    }
}

impl Default for BoxType {
    fn default() -> Self {
        Self::BOTH
    }
}

impl BoxType {
    /// True if `attacker` can hit `defender`
    ///
    /// # Example
    /// ```
    /// use collision_shapes::physics::BoxType;
    ///
    /// assert!(BoxType::interacts(BoxType::HIT, BoxType::HURT));
    /// assert!(!BoxType::interacts(BoxType::HURT, BoxType::HIT));
    /// ```
    pub fn interacts(attacker: Self, defender: Self) -> bool {
        attacker.contains(Self::HIT) && defender.contains(Self::HURT)
    }

    /// True if either box can hit the other
    pub fn interacts_either_way(a: Self, b: Self) -> bool {
        Self::interacts(a, b) || Self::interacts(b, a)
    }
}
