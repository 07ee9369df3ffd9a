use crate::database::{model::notification::DueCustomerRow, ConnectionPool};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{customer::PaymentStatus, id::CustomerId, notification::DueCustomer};
use kernel::repository::notification::NotificationRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct NotificationRepositoryImpl {
    db: ConnectionPool,
}

fn raw_ids(customer_ids: &[CustomerId]) -> Vec<Uuid> {
    customer_ids.iter().map(|id| id.raw()).collect()
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn find_due_customers(&self, due_date: NaiveDate) -> AppResult<Vec<DueCustomer>> {
        sqlx::query_as::<_, DueCustomerRow>(
            r#"
                SELECT
                    customer_id,
                    first_name,
                    last_name,
                    monthly_rent,
                    lease_expire_date
                FROM customers
                WHERE payment_status = $1
                  AND lease_expire_date = $2
                ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .bind(PaymentStatus::Paid.as_ref())
        .bind(due_date)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(DueCustomer::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_notified(
        &self,
        sent_on: NaiveDate,
        customer_ids: &[CustomerId],
    ) -> AppResult<Vec<CustomerId>> {
        if customer_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, CustomerId>(
            r#"
                SELECT customer_id
                FROM email_logs
                WHERE email_sent_date = $1
                  AND customer_id = ANY($2)
            "#,
        )
        .bind(sent_on)
        .bind(raw_ids(customer_ids))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_admin_emails(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
                SELECT email
                FROM admins
                WHERE email IS NOT NULL AND email <> ''
                ORDER BY username ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn record_notified(
        &self,
        sent_on: NaiveDate,
        customer_ids: &[CustomerId],
    ) -> AppResult<()> {
        // (customer_id, email_sent_date) が主キーなので、同じ日の記録は 1 件に保たれる
        sqlx::query(
            r#"
                INSERT INTO email_logs (customer_id, email_sent_date)
                SELECT id, $2 FROM UNNEST($1::uuid[]) AS t(id)
                ON CONFLICT (customer_id, email_sent_date) DO NOTHING
            "#,
        )
        .bind(raw_ids(customer_ids))
        .bind(sent_on)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }
}
