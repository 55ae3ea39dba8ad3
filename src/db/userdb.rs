// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::{find_row, insert_row, modify_row, DBClient, DbError};
use crate::models::usermodel::{User, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, DbError>;

    async fn get_users(&self) -> Result<Vec<User>, DbError>;

    async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>, DbError>;

    async fn save_user(&self, user: User) -> Result<User, DbError>;

    /// Runs `apply` against the stored user and persists the result if it
    /// returns `Ok`. `updated_at` is refreshed on success.
    async fn modify_user<F, E>(&self, user_id: Uuid, apply: F) -> Result<User, E>
    where
        F: FnOnce(&mut User) -> Result<(), E> + Send,
        E: From<DbError> + Send;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, DbError> {
        Ok(find_row(&self.users, user_id).await)
    }

    async fn get_users(&self) -> Result<Vec<User>, DbError> {
        Ok(self.users.read().await.clone())
    }

    async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>, DbError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.role == role).cloned().collect())
    }

    async fn save_user(&self, user: User) -> Result<User, DbError> {
        insert_row(&self.users, user).await
    }

    async fn modify_user<F, E>(&self, user_id: Uuid, apply: F) -> Result<User, E>
    where
        F: FnOnce(&mut User) -> Result<(), E> + Send,
        E: From<DbError> + Send,
    {
        modify_row(&self.users, user_id, |user: &mut User| {
            apply(user)?;
            user.updated_at = chrono::Utc::now();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drivers_are_users_filtered_by_role() {
        let db = DBClient::new();
        db.save_user(User::new("Alex Johnson", "alex@example.com", UserRole::Rider)).await.unwrap();
        db.save_user(User::new("Ben Carter", "ben@example.com", UserRole::Driver)).await.unwrap();

        let drivers = db.get_users_by_role(UserRole::Driver).await.unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].name, "Ben Carter");
        assert_eq!(db.get_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn modify_user_refreshes_updated_at() {
        let db = DBClient::new();
        let user = db
            .save_user(User::new("Alex Johnson", "alex@example.com", UserRole::Rider))
            .await
            .unwrap();

        let updated: User = db
            .modify_user(user.id, |u| {
                u.verified = true;
                Ok::<(), DbError>(())
            })
            .await
            .unwrap();

        assert!(updated.verified);
        assert!(updated.updated_at >= user.updated_at);
        assert!(db.get_user(user.id).await.unwrap().unwrap().verified);
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let db = DBClient::new();
        assert!(db.get_user(Uuid::new_v4()).await.unwrap().is_none());
    }
}
