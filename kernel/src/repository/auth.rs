use crate::model::auth::{event::CreateToken, AccessToken, TokenOwner};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn fetch_owner_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<TokenOwner>>;
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()>;
}
