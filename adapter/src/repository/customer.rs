use crate::database::{
    model::customer::{CustomerRow, UnpaidCustomerRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    customer::{
        event::{CreateCustomer, UpdateCustomer},
        Customer, PaymentStatus, UnpaidCustomer,
    },
    id::CustomerId,
};
use kernel::repository::customer::CustomerRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct CustomerRepositoryImpl {
    db: ConnectionPool,
}

const SELECT_CUSTOMER: &str = r#"
    SELECT
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
        payment_status
    FROM customers
"#;

#[async_trait]
impl CustomerRepository for CustomerRepositoryImpl {
    async fn create(&self, event: CreateCustomer) -> AppResult<CustomerId> {
        let customer_id = CustomerId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO customers
                (customer_id, first_name, last_name, tin_number, phone_number,
                room_size_sq_m, house_number, floor_number, monthly_rent, annual_rent,
                rent_date, lease_expire_date, payment_status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(customer_id)
        .bind(event.first_name)
        .bind(event.last_name)
        .bind(event.tin_number)
        .bind(event.phone_number)
        .bind(event.room_size_sq_m)
        .bind(event.house_number)
        .bind(event.floor_number)
        .bind(event.monthly_rent)
        .bind(event.annual_rent)
        .bind(event.rent_date)
        .bind(event.lease_expire_date)
        .bind(event.payment_status.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No customer record has been created".into(),
            ));
        }

        Ok(customer_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Customer>> {
        let sql = format!("{SELECT_CUSTOMER} ORDER BY created_at ASC");
        sqlx::query_as::<_, CustomerRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Customer::try_from)
            .collect()
    }

    async fn find_by_id(&self, customer_id: CustomerId) -> AppResult<Option<Customer>> {
        let sql = format!("{SELECT_CUSTOMER} WHERE customer_id = $1");
        sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(customer_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Customer::try_from)
            .transpose()
    }

    async fn update(&self, event: UpdateCustomer) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE customers
                SET
                    first_name = $1,
                    last_name = $2,
                    tin_number = $3,
                    phone_number = $4,
                    room_size_sq_m = $5,
                    house_number = $6,
                    floor_number = $7,
                    monthly_rent = $8,
                    annual_rent = $9,
                    rent_date = $10,
                    lease_expire_date = $11,
                    payment_status = $12
                WHERE customer_id = $13
            "#,
        )
        .bind(event.first_name)
        .bind(event.last_name)
        .bind(event.tin_number)
        .bind(event.phone_number)
        .bind(event.room_size_sq_m)
        .bind(event.house_number)
        .bind(event.floor_number)
        .bind(event.monthly_rent)
        .bind(event.annual_rent)
        .bind(event.rent_date)
        .bind(event.lease_expire_date)
        .bind(event.payment_status.as_ref())
        .bind(event.customer_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Customer not found".into()));
        }

        Ok(())
    }

    async fn delete(&self, customer_id: CustomerId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Customer not found".into()));
        }

        Ok(())
    }

    async fn find_unpaid(&self, today: NaiveDate) -> AppResult<Vec<UnpaidCustomer>> {
        // DATE 同士の差は日数（integer）になる
        sqlx::query_as::<_, UnpaidCustomerRow>(
            r#"
                SELECT
                    customer_id,
                    first_name,
                    last_name,
                    monthly_rent,
                    lease_expire_date,
                    GREATEST($1::date - lease_expire_date, 0) AS days_unpaid
                FROM customers
                WHERE payment_status = $2
                ORDER BY days_unpaid DESC, last_name ASC
            "#,
        )
        .bind(today)
        .bind(PaymentStatus::Unpaid.as_ref())
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(UnpaidCustomer::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn reconcile_payment_status(&self, today: NaiveDate) -> AppResult<u64> {
        // 値が変わる行だけを更新するので、何度実行しても結果は同じ
        let res = sqlx::query(
            r#"
                UPDATE customers
                SET payment_status = CASE
                    WHEN lease_expire_date >= $1 THEN $2
                    ELSE $3
                END
                WHERE payment_status IS DISTINCT FROM CASE
                    WHEN lease_expire_date >= $1 THEN $2
                    ELSE $3
                END
            "#,
        )
        .bind(today)
        .bind(PaymentStatus::Paid.as_ref())
        .bind(PaymentStatus::Unpaid.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() > 0 {
            tracing::info!(updated = res.rows_affected(), "Payment status reconciled");
        }

        Ok(res.rows_affected())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn sample_customer(
        lease_expire_date: NaiveDate,
        today: NaiveDate,
    ) -> CreateCustomer {
        CreateCustomer {
            first_name: "Abebe".into(),
            last_name: "Kebede".into(),
            tin_number: "0012345678".into(),
            phone_number: "+251911000000".into(),
            room_size_sq_m: 42.5,
            house_number: "B-12".into(),
            floor_number: 3,
            monthly_rent: 1000,
            annual_rent: 12000,
            rent_date: date(2024, 1, 1),
            lease_expire_date,
            payment_status: PaymentStatus::derive(lease_expire_date, today),
        }
    }

    #[sqlx::test]
    async fn test_register_then_fetch(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = CustomerRepositoryImpl::new(ConnectionPool::new(pool));
        let today = date(2024, 1, 15);

        let customer_id = repo
            .create(sample_customer(date(2024, 1, 31), today))
            .await?;

        let customer = repo.find_by_id(customer_id).await?.expect("customer");
        assert_eq!(customer.customer_id, customer_id);
        assert_eq!(customer.first_name, "Abebe");
        assert_eq!(customer.last_name, "Kebede");
        assert_eq!(customer.tin_number, "0012345678");
        assert_eq!(customer.phone_number, "+251911000000");
        assert_eq!(customer.room_size_sq_m, 42.5);
        assert_eq!(customer.house_number, "B-12");
        assert_eq!(customer.floor_number, 3);
        assert_eq!(customer.monthly_rent, 1000);
        assert_eq!(customer.annual_rent, 12000);
        assert_eq!(customer.rent_date, date(2024, 1, 1));
        assert_eq!(customer.lease_expire_date, date(2024, 1, 31));
        assert_eq!(customer.payment_status, PaymentStatus::Paid);

        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_reconcile_flips_expired_lease(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = CustomerRepositoryImpl::new(ConnectionPool::new(pool));

        let customer_id = repo
            .create(sample_customer(date(2024, 1, 31), date(2024, 1, 15)))
            .await?;

        // 満了日当日はまだ Paid
        assert_eq!(repo.reconcile_payment_status(date(2024, 1, 31)).await?, 0);

        assert_eq!(repo.reconcile_payment_status(date(2024, 2, 1)).await?, 1);
        let customer = repo.find_by_id(customer_id).await?.expect("customer");
        assert_eq!(customer.payment_status, PaymentStatus::Unpaid);

        // 2 回目は何も変わらない
        assert_eq!(repo.reconcile_payment_status(date(2024, 2, 1)).await?, 0);

        let unpaid = repo.find_unpaid(date(2024, 2, 10)).await?;
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].days_unpaid, 10);
        Ok(())
    }

    #[sqlx::test]
    async fn test_update_and_delete(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = CustomerRepositoryImpl::new(ConnectionPool::new(pool));
        let today = date(2024, 1, 15);
        let customer_id = repo
            .create(sample_customer(date(2024, 1, 31), today))
            .await?;

        let CreateCustomer {
            first_name,
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            annual_rent,
            rent_date,
            ..
        } = sample_customer(date(2024, 1, 31), today);
        repo.update(UpdateCustomer {
            customer_id,
            first_name,
            last_name: "Alemu".into(),
            tin_number,
            phone_number,
            room_size_sq_m,
            house_number,
            floor_number,
            monthly_rent: 1500,
            annual_rent,
            rent_date,
            lease_expire_date: date(2024, 1, 10),
            payment_status: PaymentStatus::derive(date(2024, 1, 10), today),
        })
        .await?;

        let customer = repo.find_by_id(customer_id).await?.expect("customer");
        assert_eq!(customer.last_name, "Alemu");
        assert_eq!(customer.monthly_rent, 1500);
        assert_eq!(customer.payment_status, PaymentStatus::Unpaid);

        repo.delete(customer_id).await?;
        assert!(repo.find_by_id(customer_id).await?.is_none());
        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_unknown_customer_is_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = CustomerRepositoryImpl::new(ConnectionPool::new(pool));
        repo.create(sample_customer(date(2024, 1, 31), date(2024, 1, 15)))
            .await?;

        let res = repo.delete(CustomerId::new()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_unpaid_list_puts_most_overdue_first(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = CustomerRepositoryImpl::new(ConnectionPool::new(pool));
        let today = date(2024, 3, 1);

        let recent = repo
            .create(sample_customer(date(2024, 2, 25), today))
            .await?;
        let oldest = repo
            .create(sample_customer(date(2024, 1, 31), today))
            .await?;
        let middle = repo
            .create(sample_customer(date(2024, 2, 10), today))
            .await?;
        // 支払い済みの入居者は含まれない
        repo.create(sample_customer(date(2024, 3, 31), today))
            .await?;

        let unpaid = repo.find_unpaid(today).await?;
        let ids: Vec<_> = unpaid.iter().map(|c| c.customer_id).collect();
        assert_eq!(ids, vec![oldest, middle, recent]);

        let days: Vec<_> = unpaid.iter().map(|c| c.days_unpaid).collect();
        assert_eq!(days, vec![30, 20, 5]);
        Ok(())
    }
}
