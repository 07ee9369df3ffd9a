use kernel::model::{
    account::{Account, Role},
    id::AccountId,
};

#[derive(sqlx::FromRow)]
pub struct AccountRow {
    pub account_id: AccountId,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
}

impl AccountRow {
    // テーブルにはロールの列がないので、問い合わせたテーブルから補う
    pub fn into_account(self, role: Role) -> Account {
        let AccountRow {
            account_id,
            username,
            email,
            phone_number,
            password_hash: _,
        } = self;
        Account {
            account_id,
            role,
            username,
            email,
            phone_number,
        }
    }
}

pub fn table_name(role: Role) -> &'static str {
    match role {
        Role::Admin => "admins",
        Role::Management => "management_members",
    }
}
