use crate::model::{id::CustomerId, notification::DueCustomer};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    // 満了日が due_date で、まだ Paid の入居者
    async fn find_due_customers(&self, due_date: NaiveDate) -> AppResult<Vec<DueCustomer>>;
    // sent_on にすでに通知済みの入居者 ID
    async fn find_notified(
        &self,
        sent_on: NaiveDate,
        customer_ids: &[CustomerId],
    ) -> AppResult<Vec<CustomerId>>;
    // 管理者のメールアドレス一覧
    async fn find_admin_emails(&self) -> AppResult<Vec<String>>;
    async fn record_notified(
        &self,
        sent_on: NaiveDate,
        customer_ids: &[CustomerId],
    ) -> AppResult<()>;
}
