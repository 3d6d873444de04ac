//! Class-level settings and the hosting capacity model.

use serde::{Deserialize, Serialize};

use super::Student;

/// Nominal group size when a class has no settings.
pub const DEFAULT_GROUP_SIZE: usize = 6;

/// Extra guest slots a host gets above the nominal group size.
pub const HOST_CAPACITY_HEADROOM: usize = 2;

/// Per-class settings consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassSettings {
    /// Nominal target group size.
    pub group_size: usize,
}

impl Default for ClassSettings {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
        }
    }
}

impl ClassSettings {
    /// Creates settings with the given group size.
    pub fn new(group_size: usize) -> Self {
        Self { group_size }
    }

    /// Capacity of a host without an explicit one.
    #[inline]
    pub fn default_capacity(&self) -> usize {
        self.group_size + HOST_CAPACITY_HEADROOM
    }

    /// Guest capacity of a host.
    ///
    /// An explicit `Student::capacity` wins; otherwise the class group size
    /// plus [`HOST_CAPACITY_HEADROOM`].
    pub fn capacity_for(&self, host: &Student) -> usize {
        host.capacity.unwrap_or_else(|| self.default_capacity())
    }
}
