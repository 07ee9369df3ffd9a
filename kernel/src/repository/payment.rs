use crate::model::{
    id::CustomerId,
    payment::{
        event::{ApprovePayment, ApprovedPayment},
        Payment,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    // 支払いを記録し、入居者を Paid にして満了日を延長する
    async fn approve(&self, event: ApprovePayment) -> AppResult<ApprovedPayment>;
    async fn find_all(&self) -> AppResult<Vec<Payment>>;
    async fn find_by_customer_id(&self, customer_id: CustomerId) -> AppResult<Vec<Payment>>;
}
