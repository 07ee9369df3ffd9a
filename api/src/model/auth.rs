use garde::Validate;
use kernel::model::auth::AccessToken;
use serde::{Deserialize, Serialize};

use super::account::AccountResponse;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub username: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub access_token: String,
    pub account: AccountResponse,
}

impl LoginResponse {
    pub fn new(access_token: AccessToken, account: AccountResponse) -> Self {
        Self {
            success: true,
            access_token: access_token.0,
            account,
        }
    }
}
