use crate::model::account::Role;

pub struct CreateAccount {
    pub role: Role,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: String,
}

pub struct UpdateAccountPassword {
    pub role: Role,
    pub username: String,
    pub current_password: String,
    pub new_password: String,
}
