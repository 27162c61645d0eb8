//! Mutex-guarded user store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserProfile};

#[derive(Debug, Default)]
struct UserStoreState {
    users: Vec<User>,
    last_id: u64,
}

/// User store keeping records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<UserStoreState>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserStoreState>, UserRepositoryError> {
        self.state
            .lock()
            .map_err(|err| UserRepositoryError::unavailable(err.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut state = self.lock()?;
        state.last_id = state.last_id.saturating_add(1);
        let stored = User::from_new(state.last_id, user);
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock()?.users.iter().find(|user| user.id == id).cloned())
    }

    async fn update(
        &self,
        id: u64,
        profile: UserProfile,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut state = self.lock()?;
        let Some(user) = state.users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        user.profile = profile;
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: u64) -> Result<bool, UserRepositoryError> {
        let mut state = self.lock()?;
        let before = state.users.len();
        state.users.retain(|user| user.id != id);
        Ok(state.users.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn new_user(name: &str) -> NewUser {
        let profile =
            UserProfile::try_from_parts(name, "x@example.org", "555", "Row 1", "1990-01-31")
                .expect("valid profile");
        NewUser::try_new("12345678909", profile).expect("valid user")
    }

    #[fixture]
    fn store() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_sequential_and_list_keeps_order(store: InMemoryUserRepository) {
        let first = store.create(new_user("Ada")).await.expect("create");
        let second = store.create(new_user("Grace")).await.expect("create");
        assert_eq!((first.id, second.id), (1, 2));

        let names: Vec<String> = store
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|user| user.profile.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_ids_are_not_reused(store: InMemoryUserRepository) {
        store.create(new_user("Ada")).await.expect("create");
        assert!(store.delete(1).await.expect("delete"));
        assert!(!store.delete(1).await.expect("delete again"));

        let next = store.create(new_user("Grace")).await.expect("create");
        assert_eq!(next.id, 2);
        assert!(store.find_by_id(1).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_id_and_cpf(store: InMemoryUserRepository) {
        let created = store.create(new_user("Ada")).await.expect("create");
        let profile = UserProfile::try_from_parts("Ada King", "k@example.org", "1", "Row 2", "1815-12-10")
            .expect("valid profile");

        let updated = store
            .update(created.id, profile.clone())
            .await
            .expect("update")
            .expect("user exists");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.cpf, created.cpf);
        assert_eq!(updated.profile, profile);
        assert!(store.update(99, profile).await.expect("update").is_none());
    }
}
