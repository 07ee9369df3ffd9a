use crate::model::id::AccountId;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

pub mod event;

// 認証情報はロールごとに別テーブルで管理される
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
    Admin,
    Management,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: AccountId,
    pub role: Role,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
