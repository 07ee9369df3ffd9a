use crate::{
    database::model::auth::{from, AuthorizationKey},
    redis::RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::auth::{event::CreateToken, AccessToken, TokenOwner};
use kernel::repository::auth::AuthRepository;
use shared::error::AppResult;
use std::sync::Arc;

// セッショントークンは Redis に TTL 付きで保存する
#[derive(new)]
pub struct AuthRepositoryImpl {
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_owner_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<TokenOwner>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|owner| owner.map(|owner| owner.into_inner()))
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let (key, value) = from(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = (&access_token).into();
        self.kv.delete(&key).await
    }
}
