//! Capability flags granted by a member role
//!
//! Roles are fixed (ADMIN, MODERATOR, GUEST); each one maps to a set of
//! capabilities so services ask "may this member X" instead of matching roles.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u32 {
        /// Read channels and their message history
        const VIEW_CHANNELS    = 1 << 0;
        /// Post messages
        const SEND_MESSAGES    = 1 << 1;
        /// Attach uploaded files to messages
        const ATTACH_FILES     = 1 << 2;
        /// Delete messages written by other members
        const MANAGE_MESSAGES  = 1 << 3;
        /// Create, rename and delete channels
        const MANAGE_CHANNELS  = 1 << 4;
        /// Change member roles and kick members
        const MANAGE_MEMBERS   = 1 << 5;
        /// Edit server settings and regenerate the invite code
        const MANAGE_SERVER    = 1 << 6;

        const GUEST = Self::VIEW_CHANNELS.bits()
            | Self::SEND_MESSAGES.bits()
            | Self::ATTACH_FILES.bits();

        const MODERATOR = Self::GUEST.bits()
            | Self::MANAGE_MESSAGES.bits()
            | Self::MANAGE_CHANNELS.bits();

        const ADMIN = Self::MODERATOR.bits()
            | Self::MANAGE_MEMBERS.bits()
            | Self::MANAGE_SERVER.bits();
    }
}

impl Permissions {
    /// Names of the individual flags that are set, lowest bit first
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names()
            .filter(|(_, flag)| flag.bits().is_power_of_two())
            .map(|(name, _)| name)
            .collect()
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(" | "))
    }
}
