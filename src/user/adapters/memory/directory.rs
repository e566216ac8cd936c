//! Thread-safe in-memory user directory.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::user::{
    domain::{ProfileUpdate, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// User directory backed by an ordered in-memory list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with users.
    ///
    /// Later entries with an identifier already present are dropped.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut seeded: Vec<User> = Vec::new();
        for user in users {
            if !seeded.iter().any(|existing| existing.id() == user.id()) {
                seeded.push(user);
            }
        }
        Self {
            users: Arc::new(RwLock::new(seeded)),
        }
    }

    fn read_users(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(|poisoned| {
            tracing::warn!("user directory lock poisoned; reading last written state");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Poisons the shared lock by panicking while holding it for writing.
    ///
    /// Returns whether the lock ended up poisoned.
    #[cfg(test)]
    pub(crate) fn poison(&self) -> bool {
        let users = Arc::clone(&self.users);
        let outcome = std::thread::spawn(move || {
            let _guard = users.write();
            panic!("writer failed while holding the user directory");
        })
        .join();
        outcome.is_err() && self.users.is_poisoned()
    }
}

fn lock_error(err: impl ToString) -> UserDirectoryError {
    UserDirectoryError::storage(std::io::Error::other(err.to_string()))
}

impl UserDirectory for InMemoryUserDirectory {
    fn list_users(&self) -> Vec<User> {
        self.read_users().clone()
    }

    fn find_by_id(&self, id: &UserId) -> Option<User> {
        self.read_users()
            .iter()
            .find(|user| user.id() == id)
            .cloned()
    }

    fn register(&self, user: User) -> UserDirectoryResult<()> {
        let mut users = self.users.write().map_err(lock_error)?;
        if users.iter().any(|existing| existing.id() == user.id()) {
            return Err(UserDirectoryError::DuplicateUser(user.id().clone()));
        }
        if users
            .iter()
            .any(|existing| existing.email().eq_ignore_ascii_case(user.email()))
        {
            return Err(UserDirectoryError::DuplicateEmail(user.email().to_owned()));
        }
        users.push(user);
        Ok(())
    }

    fn update_profile(&self, id: &UserId, update: ProfileUpdate) -> UserDirectoryResult<User> {
        let mut users = self.users.write().map_err(lock_error)?;
        let email_taken = update.email.as_deref().is_some_and(|email| {
            users.iter().any(|existing| {
                existing.id() != id && existing.email().eq_ignore_ascii_case(email.trim())
            })
        });
        if email_taken {
            return Err(UserDirectoryError::DuplicateEmail(
                update.email.unwrap_or_default(),
            ));
        }

        let slot = users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or_else(|| UserDirectoryError::NotFound(id.clone()))?;
        let updated = slot.with_profile(update)?;
        *slot = updated.clone();
        Ok(updated)
    }
}
