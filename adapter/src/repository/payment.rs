use crate::database::{model::payment::PaymentRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    customer::PaymentStatus,
    id::{CustomerId, PaymentId},
    payment::{
        event::{ApprovePayment, ApprovedPayment},
        Payment,
    },
};
use kernel::repository::payment::PaymentRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct PaymentRepositoryImpl {
    db: ConnectionPool,
}

const SELECT_PAYMENT: &str = r#"
    SELECT
        p.payment_id,
        p.customer_id,
        p.amount,
        p.payment_date,
        p.start_date,
        p.end_date,
        p.duration_days,
        p.payment_status,
        c.first_name,
        c.last_name
    FROM payments AS p
    INNER JOIN customers AS c ON p.customer_id = c.customer_id
"#;

#[async_trait]
impl PaymentRepository for PaymentRepositoryImpl {
    async fn approve(&self, event: ApprovePayment) -> AppResult<ApprovedPayment> {
        // 支払いの記録と入居者の更新は 1 トランザクションで行う
        let mut tx = self.db.begin().await?;

        // 同じ入居者への承認が並行しないよう行ロックを取る
        let monthly_rent: Option<i64> = sqlx::query_scalar(
            r#"
                SELECT monthly_rent
                FROM customers
                WHERE customer_id = $1
                FOR UPDATE
            "#,
        )
        .bind(event.customer_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(monthly_rent) = monthly_rent else {
            return Err(AppError::EntityNotFound("Customer not found".into()));
        };

        let coverage = event.coverage;
        let amount = coverage.amount(monthly_rent, event.amount);
        let duration_days = i32::try_from(coverage.days()).map_err(|_| {
            AppError::BadRequest(format!("coverage of {} days is too long", coverage.days()))
        })?;

        let payment_id = PaymentId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO payments
                (payment_id, customer_id, amount, start_date, end_date,
                duration_days, payment_status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment_id)
        .bind(event.customer_id)
        .bind(amount)
        .bind(coverage.start_date())
        .bind(coverage.end_date())
        .bind(duration_days)
        .bind(PaymentStatus::Paid.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No payment record has been created".into(),
            ));
        }

        // 満了日を支払いの対象期間の終了日で上書きする
        let res = sqlx::query(
            r#"
                UPDATE customers
                SET payment_status = $1, lease_expire_date = $2
                WHERE customer_id = $3
            "#,
        )
        .bind(PaymentStatus::Paid.as_ref())
        .bind(coverage.end_date())
        .bind(event.customer_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No customer record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(ApprovedPayment { payment_id, amount })
    }

    async fn find_all(&self) -> AppResult<Vec<Payment>> {
        let sql = format!("{SELECT_PAYMENT} ORDER BY p.payment_date DESC");
        sqlx::query_as::<_, PaymentRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Payment::try_from)
            .collect()
    }

    async fn find_by_customer_id(&self, customer_id: CustomerId) -> AppResult<Vec<Payment>> {
        let sql = format!("{SELECT_PAYMENT} WHERE p.customer_id = $1 ORDER BY p.payment_date DESC");
        sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(customer_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Payment::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::customer::{
        tests::{date, sample_customer},
        CustomerRepositoryImpl,
    };
    use kernel::{model::payment::Coverage, repository::customer::CustomerRepository};

    #[sqlx::test]
    async fn test_approve_one_month(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let customers = CustomerRepositoryImpl::new(db.clone());
        let payments = PaymentRepositoryImpl::new(db);

        // 満了済みで未払いの入居者
        let today = date(2024, 1, 15);
        let customer_id = customers
            .create(sample_customer(date(2023, 12, 31), today))
            .await?;
        assert_eq!(
            customers.find_by_id(customer_id).await?.expect("customer").payment_status,
            PaymentStatus::Unpaid
        );

        let approved = payments
            .approve(ApprovePayment::new(
                customer_id,
                Coverage::new(date(2024, 1, 1), date(2024, 1, 31))?,
                None,
            ))
            .await?;
        assert_eq!(approved.amount, 1000);

        let customer = customers.find_by_id(customer_id).await?.expect("customer");
        assert_eq!(customer.payment_status, PaymentStatus::Paid);
        assert_eq!(customer.lease_expire_date, date(2024, 1, 31));

        let history = payments.find_by_customer_id(customer_id).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].payment_id, approved.payment_id);
        assert_eq!(history[0].duration_days, 30);
        assert_eq!(history[0].customer.first_name, "Abebe");
        assert_eq!(payments.find_all().await?.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_override_amount(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let customers = CustomerRepositoryImpl::new(db.clone());
        let payments = PaymentRepositoryImpl::new(db);
        let customer_id = customers
            .create(sample_customer(date(2024, 1, 31), date(2024, 1, 15)))
            .await?;

        let approved = payments
            .approve(ApprovePayment::new(
                customer_id,
                Coverage::new(date(2024, 2, 1), date(2024, 4, 30))?,
                Some(2800),
            ))
            .await?;
        assert_eq!(approved.amount, 2800);
        Ok(())
    }

    #[sqlx::test]
    async fn test_approve_unknown_customer(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let payments = PaymentRepositoryImpl::new(ConnectionPool::new(pool));

        let res = payments
            .approve(ApprovePayment::new(
                CustomerId::new(),
                Coverage::new(date(2024, 1, 1), date(2024, 1, 31))?,
                None,
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        assert!(payments.find_all().await?.is_empty());
        Ok(())
    }

    #[sqlx::test]
    async fn test_payments_are_listed_newest_first(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let customers = CustomerRepositoryImpl::new(db.clone());
        let payments = PaymentRepositoryImpl::new(db);
        let today = date(2024, 1, 15);
        let first_customer = customers
            .create(sample_customer(date(2024, 1, 31), today))
            .await?;
        let second_customer = customers
            .create(sample_customer(date(2024, 1, 31), today))
            .await?;

        let january = payments
            .approve(ApprovePayment::new(
                first_customer,
                Coverage::new(date(2024, 1, 1), date(2024, 1, 31))?,
                None,
            ))
            .await?;
        // payment_date はミリ秒精度なので間隔を空ける
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let february = payments
            .approve(ApprovePayment::new(
                first_customer,
                Coverage::new(date(2024, 2, 1), date(2024, 2, 29))?,
                None,
            ))
            .await?;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let other = payments
            .approve(ApprovePayment::new(
                second_customer,
                Coverage::new(date(2024, 2, 1), date(2024, 2, 29))?,
                None,
            ))
            .await?;

        let all: Vec<_> = payments
            .find_all()
            .await?
            .into_iter()
            .map(|p| p.payment_id)
            .collect();
        assert_eq!(
            all,
            vec![other.payment_id, february.payment_id, january.payment_id]
        );

        let history: Vec<_> = payments
            .find_by_customer_id(first_customer)
            .await?
            .into_iter()
            .map(|p| p.payment_id)
            .collect();
        assert_eq!(history, vec![february.payment_id, january.payment_id]);
        Ok(())
    }
}
