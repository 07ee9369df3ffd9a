use crate::database::{
    model::account::{table_name, AccountRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    account::{
        event::{CreateAccount, UpdateAccountPassword},
        Account, Role,
    },
    id::AccountId,
};
use kernel::repository::account::AccountRepository;
use shared::error::{AppError, AppResult};

// ハッシュのコストは固定
const BCRYPT_COST: u32 = 10;

#[derive(new)]
pub struct AccountRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create(&self, event: CreateAccount) -> AppResult<AccountId> {
        if self
            .find_row_by_username(event.role, &event.username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest("Username already taken".into()));
        }

        let account_id = AccountId::new();
        let password_hash = hash_password(&event.password).await?;
        let table = table_name(event.role);
        let sql = format!(
            r#"
                INSERT INTO {table} (account_id, username, email, phone_number, password_hash)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (username) DO NOTHING
            "#
        );
        let res = sqlx::query(&sql)
            .bind(account_id)
            .bind(&event.username)
            .bind(event.email)
            .bind(event.phone_number)
            .bind(password_hash)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        // 存在確認の後に同名で作成された場合
        if res.rows_affected() < 1 {
            return Err(AppError::BadRequest("Username already taken".into()));
        }

        Ok(account_id)
    }

    async fn find_by_id(&self, role: Role, account_id: AccountId) -> AppResult<Option<Account>> {
        let table = table_name(role);
        let sql = format!(
            r#"
                SELECT account_id, username, email, phone_number, password_hash
                FROM {table}
                WHERE account_id = $1
            "#
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(|row| row.into_account(role)))
    }

    async fn verify(&self, role: Role, username: &str, password: &str) -> AppResult<Account> {
        let row = self
            .find_row_by_username(role, username)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        if !verify_password(password, &row.password_hash).await? {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(row.into_account(role))
    }

    async fn update_password(&self, event: UpdateAccountPassword) -> AppResult<()> {
        let row = self
            .find_row_by_username(event.role, &event.username)
            .await?
            .ok_or_else(|| AppError::EntityNotFound("User not found".into()))?;

        if !verify_password(&event.current_password, &row.password_hash).await? {
            return Err(AppError::UnauthenticatedError);
        }

        let password_hash = hash_password(&event.new_password).await?;
        let table = table_name(event.role);
        let sql = format!("UPDATE {table} SET password_hash = $1 WHERE account_id = $2");
        let res = sqlx::query(&sql)
            .bind(password_hash)
            .bind(row.account_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("User not found".into()));
        }

        Ok(())
    }

    async fn count(&self, role: Role) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table_name(role));
        sqlx::query_scalar(&sql)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}

impl AccountRepositoryImpl {
    async fn find_row_by_username(
        &self,
        role: Role,
        username: &str,
    ) -> AppResult<Option<AccountRow>> {
        let table = table_name(role);
        let sql = format!(
            r#"
                SELECT account_id, username, email, phone_number, password_hash
                FROM {table}
                WHERE username = $1
            "#
        );
        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(username)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }
}

// bcrypt は blocking 用のスレッドで実行する
async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::BackgroundTaskError(e.to_string()))?
        .map_err(AppError::from)
}

async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::BackgroundTaskError(e.to_string()))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashed_password_verifies_only_the_original() -> AppResult<()> {
        let hash = hash_password("s3cret").await?;
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).await?);
        assert!(!verify_password("wrong", &hash).await?);
        Ok(())
    }

    fn create_event(role: Role, username: &str, password: &str) -> CreateAccount {
        CreateAccount {
            role,
            username: username.into(),
            email: Some(format!("{username}@example.com")),
            phone_number: None,
            password: password.into(),
        }
    }

    #[sqlx::test]
    async fn test_login_checks_the_hash(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AccountRepositoryImpl::new(ConnectionPool::new(pool));
        let account_id = repo.create(create_event(Role::Admin, "almaz", "s3cret")).await?;

        let account = repo.verify(Role::Admin, "almaz", "s3cret").await?;
        assert_eq!(account.account_id, account_id);
        assert_eq!(account.email.as_deref(), Some("almaz@example.com"));
        assert!(account.is_admin());

        let res = repo.verify(Role::Admin, "almaz", "wrong").await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        // 役割ごとに別テーブル
        let res = repo.verify(Role::Management, "almaz", "s3cret").await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));
        Ok(())
    }

    #[sqlx::test]
    async fn test_duplicate_username(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AccountRepositoryImpl::new(ConnectionPool::new(pool));
        repo.create(create_event(Role::Management, "dawit", "pw"))
            .await?;

        let res = repo.create(create_event(Role::Management, "dawit", "other")).await;
        assert!(matches!(res, Err(AppError::BadRequest(_))));
        assert_eq!(repo.count(Role::Management).await?, 1);
        assert_eq!(repo.count(Role::Admin).await?, 0);
        Ok(())
    }

    #[sqlx::test]
    async fn test_change_password(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AccountRepositoryImpl::new(ConnectionPool::new(pool));
        repo.create(create_event(Role::Admin, "almaz", "old-pw"))
            .await?;

        let res = repo
            .update_password(UpdateAccountPassword {
                role: Role::Admin,
                username: "almaz".into(),
                current_password: "not-it".into(),
                new_password: "new-pw".into(),
            })
            .await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        repo.update_password(UpdateAccountPassword {
            role: Role::Admin,
            username: "almaz".into(),
            current_password: "old-pw".into(),
            new_password: "new-pw".into(),
        })
        .await?;
        assert!(repo.verify(Role::Admin, "almaz", "new-pw").await.is_ok());
        assert!(repo.verify(Role::Admin, "almaz", "old-pw").await.is_err());

        let res = repo
            .update_password(UpdateAccountPassword {
                role: Role::Admin,
                username: "nobody".into(),
                current_password: "x".into(),
                new_password: "y".into(),
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
