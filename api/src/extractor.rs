use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{account::Account, auth::AccessToken, id::AccountId};
use registry::AppRegistry;
use shared::error::AppError;

// リクエストの検証を通過した、ログイン中のアカウント
pub struct AuthorizedAccount {
    pub access_token: AccessToken,
    pub account: Account,
}

impl AuthorizedAccount {
    pub fn id(&self) -> AccountId {
        self.account.account_id
    }

    pub fn is_admin(&self) -> bool {
        self.account.is_admin()
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // ヘッダーから Bearer トークンを取り出す
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        // トークンからロールとアカウント ID を引く
        let owner = registry
            .auth_repository()
            .fetch_owner_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        // 削除済みのアカウントのトークンは無効
        let account = registry
            .account_repository()
            .find_by_id(owner.role, owner.account_id)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        Ok(Self {
            access_token,
            account,
        })
    }
}

// JSON の読み取りに失敗した場合も AppError（400）として返す
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

// パスパラメータの不正も JSON のエラーで返す
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
