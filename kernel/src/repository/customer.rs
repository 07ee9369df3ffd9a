use crate::model::{
    customer::{
        event::{CreateCustomer, UpdateCustomer},
        Customer, UnpaidCustomer,
    },
    id::CustomerId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    // 入居者を登録する
    async fn create(&self, event: CreateCustomer) -> AppResult<CustomerId>;
    // すべての入居者を取得する
    async fn find_all(&self) -> AppResult<Vec<Customer>>;
    async fn find_by_id(&self, customer_id: CustomerId) -> AppResult<Option<Customer>>;
    // 存在しない場合は EntityNotFound
    async fn update(&self, event: UpdateCustomer) -> AppResult<()>;
    // 存在しない場合は EntityNotFound
    async fn delete(&self, customer_id: CustomerId) -> AppResult<()>;
    // 未払いの入居者を延滞日数の多い順に取得する
    async fn find_unpaid(&self, today: NaiveDate) -> AppResult<Vec<UnpaidCustomer>>;
    // 満了日から支払状況を導き直し、変更した件数を返す
    async fn reconcile_payment_status(&self, today: NaiveDate) -> AppResult<u64>;
}
