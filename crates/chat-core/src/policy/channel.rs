use crate::entities::{Channel, Member, MemberRole, GENERAL_CHANNEL_NAME};
use crate::error::DomainError;
use crate::value_objects::Permissions;

/// What a member may do with the channels of a server
#[derive(Debug, Clone, Copy)]
pub struct ChannelPolicy {
    role: MemberRole,
}

impl ChannelPolicy {
    pub fn for_role(role: MemberRole) -> Self {
        Self { role }
    }

    pub fn for_member(member: &Member) -> Self {
        Self::for_role(member.role)
    }

    /// Edit and delete actions exist for every channel but `general`, and
    /// never for guests.
    pub fn can_manage(&self, channel: &Channel) -> bool {
        !channel.is_general() && self.role.permissions().contains(Permissions::MANAGE_CHANNELS)
    }

    pub fn ensure_can_create(&self, name: &str) -> Result<(), DomainError> {
        self.ensure_manager()?;
        ensure_not_reserved(name)
    }

    pub fn ensure_can_update(&self, channel: &Channel, new_name: &str) -> Result<(), DomainError> {
        self.ensure_manager()?;
        if channel.is_general() {
            return Err(DomainError::GeneralChannelLocked);
        }
        ensure_not_reserved(new_name)
    }

    pub fn ensure_can_delete(&self, channel: &Channel) -> Result<(), DomainError> {
        self.ensure_manager()?;
        if channel.is_general() {
            return Err(DomainError::GeneralChannelLocked);
        }
        Ok(())
    }

    fn ensure_manager(&self) -> Result<(), DomainError> {
        if self.role.permissions().contains(Permissions::MANAGE_CHANNELS) {
            Ok(())
        } else {
            Err(DomainError::MissingPermission("MANAGE_CHANNELS".to_string()))
        }
    }
}

fn ensure_not_reserved(name: &str) -> Result<(), DomainError> {
    if name.trim() == GENERAL_CHANNEL_NAME {
        Err(DomainError::ReservedChannelName)
    } else {
        Ok(())
    }
}
