use crate::redis::model::{RedisKey, RedisValue};
use kernel::model::{
    account::Role,
    auth::{event::CreateToken, AccessToken, TokenOwner},
    id::AccountId,
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub struct AuthorizationKey(String);

pub struct AuthorizedOwner(pub TokenOwner);

pub fn from(event: CreateToken) -> (AuthorizationKey, AuthorizedOwner) {
    (
        AuthorizationKey(format!("auth:{}", uuid::Uuid::new_v4().simple())),
        AuthorizedOwner(TokenOwner::new(event.role, event.account_id)),
    )
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(format!("auth:{}", token.0))
    }
}

impl From<AuthorizationKey> for AccessToken {
    fn from(key: AuthorizationKey) -> Self {
        let token = key.0.strip_prefix("auth:").unwrap_or(&key.0).to_string();
        Self(token)
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedOwner;

    fn inner(&self) -> String {
        self.0.clone()
    }
}

// 値は "<role>:<account_id>" の形式で保存する
impl RedisValue for AuthorizedOwner {
    fn inner(&self) -> String {
        format!("{}:{}", self.0.role.as_ref(), self.0.account_id)
    }
}

impl TryFrom<String> for AuthorizedOwner {
    type Error = AppError;

    fn try_from(s: String) -> AppResult<Self> {
        let (role, account_id) = s
            .split_once(':')
            .ok_or_else(|| AppError::ConversionEntityError(format!("malformed session: {s}")))?;
        let role = Role::from_str(role)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown role: {role}")))?;
        let account_id = AccountId::from_str(account_id)?;
        Ok(Self(TokenOwner::new(role, account_id)))
    }
}

impl AuthorizedOwner {
    pub fn into_inner(self) -> TokenOwner {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_value_survives_a_round_trip() -> AppResult<()> {
        let account_id = AccountId::new();
        let (key, owner) = from(CreateToken::new(Role::Management, account_id));
        assert!(key.inner().starts_with("auth:"));

        let restored = AuthorizedOwner::try_from(owner.inner())?.into_inner();
        assert_eq!(restored.role, Role::Management);
        assert_eq!(restored.account_id, account_id);
        Ok(())
    }

    #[test]
    fn access_token_maps_back_to_the_same_key() {
        let (key, _) = from(CreateToken::new(Role::Admin, AccountId::new()));
        let raw = key.inner();
        let token = AccessToken::from(key);
        assert_eq!(AuthorizationKey::from(&token).inner(), raw);
    }

    #[test]
    fn malformed_session_values_are_rejected() {
        assert!(AuthorizedOwner::try_from("admin".to_string()).is_err());
        assert!(AuthorizedOwner::try_from("owner:abc".to_string()).is_err());
    }
}
