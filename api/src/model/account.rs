use derive_new::new;
use garde::Validate;
use kernel::model::{
    account::{
        event::{CreateAccount, UpdateAccountPassword},
        Account, Role,
    },
    id::AccountId,
};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoleName {
    Admin,
    Management,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Management => Self::Management,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_id: AccountId,
    pub role: RoleName,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(value: Account) -> Self {
        let Account {
            account_id,
            role,
            username,
            email,
            phone_number,
        } = value;
        Self {
            account_id,
            role: RoleName::from(role),
            username,
            email,
            phone_number,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[garde(length(min = 1))]
    username: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(email)]
    email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(skip)]
    phone_number: Option<String>,
    #[garde(length(min = 1))]
    password: String,
}

// 空文字の連絡先は未設定として扱う
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

#[derive(new)]
pub struct CreateAccountRequestWithRole(Role, CreateAccountRequest);

impl From<CreateAccountRequestWithRole> for CreateAccount {
    fn from(value: CreateAccountRequestWithRole) -> Self {
        let CreateAccountRequestWithRole(
            role,
            CreateAccountRequest {
                username,
                email,
                phone_number,
                password,
            },
        ) = value;
        Self {
            role,
            username,
            email,
            phone_number,
            password,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreatedResponse {
    pub success: bool,
    pub account_id: AccountId,
}

impl From<AccountId> for AccountCreatedResponse {
    fn from(account_id: AccountId) -> Self {
        Self {
            success: true,
            account_id,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountPasswordRequest {
    #[garde(length(min = 1))]
    username: String,
    #[serde(alias = "oldPassword")]
    #[garde(length(min = 1))]
    current_password: String,
    #[garde(length(min = 1))]
    new_password: String,
}

#[derive(new)]
pub struct UpdateAccountPasswordRequestWithRole(Role, UpdateAccountPasswordRequest);

impl From<UpdateAccountPasswordRequestWithRole> for UpdateAccountPassword {
    fn from(value: UpdateAccountPasswordRequestWithRole) -> Self {
        let UpdateAccountPasswordRequestWithRole(
            role,
            UpdateAccountPasswordRequest {
                username,
                current_password,
                new_password,
            },
        ) = value;
        Self {
            role,
            username,
            current_password,
            new_password,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
