//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `NodeId` is an opaque identifier
//! resolved through the graph's id→index map; node ids are *not* guaranteed
//! to be positions in the node array.  `EdgeId` on the other hand is a direct
//! index into the graph's edge array, and `VehicleId` is a monotonic handle
//! assigned by the simulation.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" (the maximum inner value).
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

typed_id! {
    /// Identifier of an intersection, assigned monotonically by its graph.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road in the graph's edge array.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Monotonic handle of a vehicle, assigned by the simulation at spawn.
    pub struct VehicleId(u32);
}

impl EdgeId {
    /// Cast to `usize` for direct use as an edge-array index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
