//! Room membership state
//!
//! A room is nothing more than the set of user names currently present in
//! it. Insertion order is preserved so that membership snapshots list users
//! in join order.

use crate::UserName;
use indexmap::IndexSet;

/// The member set of a single room.
///
/// A room has no existence independent of membership: the registry creates
/// one on first join and evicts it once [`Room::is_empty`] holds.
#[derive(Debug, Clone, Default)]
pub struct Room {
    members: IndexSet<UserName>,
}

impl Room {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. Re-adding a present name is a no-op; returns whether
    /// the set changed.
    pub fn add(&mut self, user: UserName) -> bool {
        self.members.insert(user)
    }

    /// Remove a member if present; returns whether the set changed.
    pub fn remove(&mut self, user: &UserName) -> bool {
        // shift_remove keeps join order intact for later snapshots
        self.members.shift_remove(user)
    }

    #[must_use]
    pub fn contains(&self, user: &UserName) -> bool {
        self.members.contains(user)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Snapshot the membership in join order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<UserName> {
        self.members.iter().cloned().collect()
    }
}
