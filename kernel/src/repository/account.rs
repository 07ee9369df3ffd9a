use crate::model::{
    account::{
        event::{CreateAccount, UpdateAccountPassword},
        Account, Role,
    },
    id::AccountId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    // ユーザー名が使用済みなら BadRequest
    async fn create(&self, event: CreateAccount) -> AppResult<AccountId>;
    async fn find_by_id(&self, role: Role, account_id: AccountId) -> AppResult<Option<Account>>;
    // パスワードを照合し、一致すればアカウントを返す
    async fn verify(&self, role: Role, username: &str, password: &str) -> AppResult<Account>;
    async fn update_password(&self, event: UpdateAccountPassword) -> AppResult<()>;
    async fn count(&self, role: Role) -> AppResult<i64>;
}
