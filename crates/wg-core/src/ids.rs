//! Strongly typed identifier wrappers and the monotonic id allocator.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Raw road-node ids come from an
//! external provider and can exceed `u32`, so both wrappers hold a `u64`.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id immediately after this one.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a graph node.  Dense `0..N` after sanitization.
    pub struct NodeId(u64);
}

typed_id! {
    /// Storage-order key of a directed edge.
    ///
    /// Edge ids are never reused: a freshly inserted edge always sorts after
    /// every edge already stored, so iterating edges by id is a stable,
    /// deterministic order.
    pub struct EdgeId(u64);
}

/// Monotonically increasing id source.
///
/// Hands out `start, start + 1, …`.  [`observe`](Self::observe) bumps the
/// counter past an externally supplied id so the next allocation can never
/// collide with it.  `u64::MAX` is never handed out or accepted: the counter
/// always has to be able to point one past the largest id seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Return the next id and advance the counter.
    #[inline]
    pub fn allocate(&mut self) -> CoreResult<u64> {
        let id = self.next;
        self.next = id.checked_add(1).ok_or(CoreError::IdSpaceExhausted(id))?;
        Ok(id)
    }

    /// Ensure future allocations are strictly greater than `id`.
    ///
    /// On error the counter is left where it was.
    #[inline]
    pub fn observe(&mut self, id: u64) -> CoreResult<()> {
        if id >= self.next {
            self.next = id.checked_add(1).ok_or(CoreError::IdSpaceExhausted(id))?;
        }
        Ok(())
    }

    /// The id the next [`allocate`](Self::allocate) call will return.
    #[inline]
    pub fn peek(&self) -> u64 {
        self.next
    }
}
