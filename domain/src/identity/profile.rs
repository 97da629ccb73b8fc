//! Signed-in user profile (Value Object)
//!
//! Sign-in is mocked: any non-blank name and contact address is accepted and
//! no credential is ever checked.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Avatar size used until the user changes it, in pixels.
pub const DEFAULT_AVATAR_SIZE: u32 = 40;

/// Allowed avatar sizes, in pixels.
pub const AVATAR_SIZE_RANGE: RangeInclusive<u32> = 32..=64;

/// Fixed identity used by the one-step demo sign-in.
pub const DEMO_DISPLAY_NAME: &str = "Google User";
pub const DEMO_CONTACT_ADDRESS: &str = "user@google.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    display_name: String,
    contact_address: String,
    avatar_size: u32,
}

impl UserProfile {
    /// Build a profile; both fields must contain something besides whitespace.
    pub fn new(
        display_name: impl Into<String>,
        contact_address: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let display_name = display_name.into();
        let contact_address = contact_address.into();

        if display_name.trim().is_empty() {
            return Err(DomainError::InvalidProfile(
                "display name is required".to_string(),
            ));
        }
        if contact_address.trim().is_empty() {
            return Err(DomainError::InvalidProfile(
                "contact address is required".to_string(),
            ));
        }

        Ok(Self {
            display_name,
            contact_address,
            avatar_size: DEFAULT_AVATAR_SIZE,
        })
    }

    pub fn demo() -> Self {
        Self {
            display_name: DEMO_DISPLAY_NAME.to_string(),
            contact_address: DEMO_CONTACT_ADDRESS.to_string(),
            avatar_size: DEFAULT_AVATAR_SIZE,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn contact_address(&self) -> &str {
        &self.contact_address
    }

    pub fn avatar_size(&self) -> u32 {
        self.avatar_size
    }

    /// Upper-cased first character of the display name, `'U'` if there is none.
    pub fn initial(&self) -> char {
        self.display_name
            .trim_start()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }

    /// Apply profile edits. `None` leaves a field unchanged; blank strings are
    /// rejected; the avatar size is clamped into [`AVATAR_SIZE_RANGE`].
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), DomainError> {
        let mut next = self.clone();
        if let Some(name) = update.display_name {
            if name.trim().is_empty() {
                return Err(DomainError::InvalidProfile(
                    "display name is required".to_string(),
                ));
            }
            next.display_name = name;
        }
        if let Some(address) = update.contact_address {
            if address.trim().is_empty() {
                return Err(DomainError::InvalidProfile(
                    "contact address is required".to_string(),
                ));
            }
            next.contact_address = address;
        }
        if let Some(size) = update.avatar_size {
            next.avatar_size = size.clamp(*AVATAR_SIZE_RANGE.start(), *AVATAR_SIZE_RANGE.end());
        }
        *self = next;
        Ok(())
    }
}

/// Partial profile edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub contact_address: Option<String>,
    pub avatar_size: Option<u32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.contact_address.is_none() && self.avatar_size.is_none()
    }
}
