use kernel::model::{id::CustomerId, notification::DueCustomer};
use sqlx::types::chrono::NaiveDate;

#[derive(sqlx::FromRow)]
pub struct DueCustomerRow {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub monthly_rent: i64,
    pub lease_expire_date: NaiveDate,
}

impl From<DueCustomerRow> for DueCustomer {
    fn from(value: DueCustomerRow) -> Self {
        let DueCustomerRow {
            customer_id,
            first_name,
            last_name,
            monthly_rent,
            lease_expire_date,
        } = value;
        DueCustomer {
            customer_id,
            first_name,
            last_name,
            monthly_rent,
            lease_expire_date,
        }
    }
}
