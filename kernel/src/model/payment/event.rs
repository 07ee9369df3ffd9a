use crate::model::{
    id::{CustomerId, PaymentId},
    payment::Coverage,
};
use derive_new::new;

#[derive(new, Debug)]
pub struct ApprovePayment {
    pub customer_id: CustomerId,
    pub coverage: Coverage,
    pub amount: Option<i64>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ApprovedPayment {
    pub payment_id: PaymentId,
    pub amount: i64,
}
