use crate::model::{account::Role, id::AccountId};
use derive_new::new;

pub mod event {
    use super::*;

    #[derive(new)]
    pub struct CreateToken {
        pub role: Role,
        pub account_id: AccountId,
    }
}

pub struct AccessToken(pub String);

// トークンから引ける認証済みアカウントの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct TokenOwner {
    pub role: Role,
    pub account_id: AccountId,
}
