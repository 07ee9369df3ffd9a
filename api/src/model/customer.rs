use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    customer::{
        event::{CreateCustomer, UpdateCustomer},
        Customer, PaymentStatus, UnpaidCustomer,
    },
    id::CustomerId,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[garde(length(min = 1))]
    pub first_name: String,
    #[garde(length(min = 1))]
    pub last_name: String,
    #[garde(skip)]
    pub tin_number: String,
    #[garde(skip)]
    pub phone_number: String,
    #[garde(range(min = 0.0))]
    pub room_size_sq_m: f64,
    #[garde(skip)]
    pub house_number: String,
    #[garde(skip)]
    pub floor_number: i32,
    #[garde(range(min = 0))]
    pub monthly_rent: i64,
    #[garde(range(min = 0))]
    pub annual_rent: i64,
    #[garde(skip)]
    pub rent_date: NaiveDate,
    #[garde(skip)]
    pub lease_expire_date: NaiveDate,
}

// 満了日は賃料発生日より前にできない
fn check_lease_dates(rent_date: NaiveDate, lease_expire_date: NaiveDate) -> AppResult<()> {
    if lease_expire_date < rent_date {
        return Err(AppError::BadRequest(
            "leaseExpireDate must not be before rentDate".into(),
        ));
    }
    Ok(())
}

impl CreateCustomerRequest {
    // 登録時点の支払い状況は満了日から決める
    pub fn into_event(self, today: NaiveDate) -> AppResult<CreateCustomer> {
        check_lease_dates(self.rent_date, self.lease_expire_date)?;

        let CreateCustomerRequest {
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
        } = self;
        Ok(CreateCustomer {
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
            payment_status: PaymentStatus::derive(lease_expire_date, today),
        })
    }
}

// 更新は全項目の置き換え
pub type UpdateCustomerRequest = CreateCustomerRequest;

#[derive(new)]
pub struct UpdateCustomerRequestWithId(CustomerId, UpdateCustomerRequest);

impl UpdateCustomerRequestWithId {
    pub fn into_event(self, today: NaiveDate) -> AppResult<UpdateCustomer> {
        let UpdateCustomerRequestWithId(customer_id, req) = self;
        let CreateCustomer {
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
            payment_status,
        } = req.into_event(today)?;
        Ok(UpdateCustomer {
            customer_id,
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
            payment_status,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreatedResponse {
    pub customer_id: CustomerId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub tin_number: String,
    pub phone_number: String,
    pub room_size_sq_m: f64,
    pub house_number: String,
    pub floor_number: i32,
    pub monthly_rent: i64,
    pub annual_rent: i64,
    pub rent_date: NaiveDate,
    pub lease_expire_date: NaiveDate,
    pub payment_status: PaymentStatus,
}

impl From<Customer> for CustomerResponse {
    fn from(value: Customer) -> Self {
        let Customer {
            customer_id,
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
            payment_status,
        } = value;
        Self {
            customer_id,
            first_name,
            last_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent,
            annual_rent,
            rent_date,
            lease_expire_date,
            payment_status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersResponse {
    pub items: Vec<CustomerResponse>,
}

impl From<Vec<Customer>> for CustomersResponse {
    fn from(value: Vec<Customer>) -> Self {
        Self {
            items: value.into_iter().map(CustomerResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidCustomerResponse {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub monthly_rent: i64,
    pub lease_expire_date: NaiveDate,
    pub days_unpaid: i64,
}

impl From<UnpaidCustomer> for UnpaidCustomerResponse {
    fn from(value: UnpaidCustomer) -> Self {
        let UnpaidCustomer {
            customer_id,
            first_name,
            last_name,
            monthly_rent,
            lease_expire_date,
            days_unpaid,
        } = value;
        Self {
            customer_id,
            first_name,
            last_name,
            monthly_rent,
            lease_expire_date,
            days_unpaid,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidCustomersResponse {
    pub items: Vec<UnpaidCustomerResponse>,
}

impl From<Vec<UnpaidCustomer>> for UnpaidCustomersResponse {
    fn from(value: Vec<UnpaidCustomer>) -> Self {
        Self {
            items: value.into_iter().map(UnpaidCustomerResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(lease_expire_date: NaiveDate) -> CreateCustomerRequest {
        serde_json::from_value(serde_json::json!({
            "firstName": "Abebe",
            "lastName": "Kebede",
            "tinNumber": "0012345678",
            "phoneNumber": "+251911000000",
            "roomSizeSqM": 24.5,
            "houseNumber": "B-12",
            "floorNumber": 2,
            "monthlyRent": 1000,
            "annualRent": 12000,
            "rentDate": "2024-01-01",
            "leaseExpireDate": lease_expire_date,
        }))
        .unwrap()
    }

    #[test]
    fn status_follows_the_lease_expiry_on_create() {
        let today = date(2024, 1, 15);
        let event = request(date(2024, 1, 31)).into_event(today).unwrap();
        assert_eq!(event.payment_status, PaymentStatus::Paid);

        let event = request(date(2024, 1, 10)).into_event(today).unwrap();
        assert_eq!(event.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn lease_before_rent_date_is_rejected() {
        let res = request(date(2023, 12, 31)).into_event(date(2024, 1, 15));
        assert!(matches!(res, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut req = request(date(2024, 1, 31));
        assert!(req.validate(&()).is_ok());
        req.first_name = String::new();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn update_keeps_the_path_id() {
        let customer_id = CustomerId::new();
        let event = UpdateCustomerRequestWithId::new(customer_id, request(date(2024, 1, 31)))
            .into_event(date(2024, 1, 15))
            .unwrap();
        assert_eq!(event.customer_id, customer_id);
        assert_eq!(event.monthly_rent, 1000);
    }
}
