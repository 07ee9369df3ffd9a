use crate::{mailer::Mail, model::id::CustomerId};
use chrono::NaiveDate;

pub const CURRENCY: &str = "ETB";
pub const DIGEST_SUBJECT: &str = "Urgent: Customers with 1 Day Left for Rent Payment";

#[derive(Debug, Clone, PartialEq)]
pub struct DueCustomer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub monthly_rent: i64,
    pub lease_expire_date: NaiveDate,
}

// 翌日が期日の入居者をまとめた 1 通の通知
#[derive(Debug)]
pub struct DueRentDigest {
    customers: Vec<DueCustomer>,
}

impl DueRentDigest {
    pub fn new(customers: Vec<DueCustomer>) -> Self {
        Self { customers }
    }

    pub fn customer_ids(&self) -> Vec<CustomerId> {
        self.customers.iter().map(|c| c.customer_id).collect()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn body(&self) -> String {
        let mut body =
            String::from("The following customers have 1 day left before rent is due:\n\n");
        for c in &self.customers {
            body.push_str(&format!(
                "- {} {} | Amount Due: {} {}\n",
                c.first_name, c.last_name, c.monthly_rent, CURRENCY
            ));
        }
        body
    }

    pub fn into_mail(self, recipients: Vec<String>) -> Mail {
        Mail {
            to: recipients,
            subject: DIGEST_SUBJECT.to_string(),
            body: self.body(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    NothingDue,
    AlreadyNotified,
    NoRecipients,
    Sent { notified: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due(first: &str, last: &str, rent: i64) -> DueCustomer {
        DueCustomer {
            customer_id: CustomerId::new(),
            first_name: first.into(),
            last_name: last.into(),
            monthly_rent: rent,
            lease_expire_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        }
    }

    #[test]
    fn digest_lists_one_line_per_customer() {
        let digest = DueRentDigest::new(vec![
            due("Abebe", "Kebede", 12000),
            due("Sara", "Tesfaye", 8000),
        ]);
        let body = digest.body();
        assert!(body.starts_with("The following customers have 1 day left"));
        assert!(body.contains("- Abebe Kebede | Amount Due: 12000 ETB\n"));
        assert!(body.contains("- Sara Tesfaye | Amount Due: 8000 ETB\n"));
    }

    #[test]
    fn mail_goes_to_every_recipient_at_once() {
        let digest = DueRentDigest::new(vec![due("Abebe", "Kebede", 12000)]);
        let mail = digest.into_mail(vec!["a@example.com".into(), "b@example.com".into()]);
        assert_eq!(mail.to.len(), 2);
        assert_eq!(mail.subject, DIGEST_SUBJECT);
    }
}
