use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Semantic state of a single board cell. The player is tracked separately.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        const BOMB      = 1;
        const EXPLOSION = 1 << 1;
    }
}

impl CellFlags {
    pub const fn has_bomb(self) -> bool {
        self.contains(Self::BOMB)
    }

    pub const fn has_explosion(self) -> bool {
        self.contains(Self::EXPLOSION)
    }
}

impl Default for CellFlags {
    fn default() -> Self {
        Self::empty()
    }
}
