//! User record and identifier types.

use super::{ParseUserRoleError, UserDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a user in the reference directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUserId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyUserId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Board administrator.
    Admin,
    /// Regular board member.
    User,
}

impl UserRole {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Immutable user reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

impl User {
    /// Creates a validated user record.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] for a blank name and
    /// [`UserDomainError::InvalidEmail`] when the address lacks a local part
    /// or a domain.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, UserDomainError> {
        let name_value = validate_name(name.into())?;
        let email_value = validate_email(email.into())?;
        Ok(Self {
            id,
            name: name_value,
            email: email_value,
            role,
            avatar: None,
        })
    }

    /// Sets the avatar URI.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the access role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the avatar URI, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Returns a copy of this user with the profile changes applied.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError`] when a changed name or email is invalid.
    pub fn with_profile(&self, update: ProfileUpdate) -> Result<Self, UserDomainError> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = validate_name(name)?;
        }
        if let Some(email) = update.email {
            next.email = validate_email(email)?;
        }
        if let Some(avatar) = update.avatar {
            next.avatar = Some(avatar);
        }
        Ok(next)
    }
}

/// Editable profile fields. Identifier and role are never editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New avatar URI.
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Creates an empty profile update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the avatar URI.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

fn validate_name(raw: String) -> Result<String, UserDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn validate_email(raw: String) -> Result<String, UserDomainError> {
    let normalized = raw.trim();
    let is_valid = normalized
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
        && !normalized.chars().any(char::is_whitespace);
    if !is_valid {
        return Err(UserDomainError::InvalidEmail(raw));
    }
    Ok(normalized.to_owned())
}
