use kernel::model::notification::NotificationOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    NothingDue,
    AlreadyNotified,
    NoRecipients,
    Sent,
    Failed,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationJobResponse {
    pub outcome: JobOutcome,
    pub notified: usize,
}

impl NotificationJobResponse {
    pub fn failed() -> Self {
        Self {
            outcome: JobOutcome::Failed,
            notified: 0,
        }
    }
}

impl From<NotificationOutcome> for NotificationJobResponse {
    fn from(value: NotificationOutcome) -> Self {
        let (outcome, notified) = match value {
            NotificationOutcome::NothingDue => (JobOutcome::NothingDue, 0),
            NotificationOutcome::AlreadyNotified => (JobOutcome::AlreadyNotified, 0),
            NotificationOutcome::NoRecipients => (JobOutcome::NoRecipients, 0),
            NotificationOutcome::Sent { notified } => (JobOutcome::Sent, notified),
        };
        Self { outcome, notified }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_serialize_in_snake_case() {
        let res = NotificationJobResponse::from(NotificationOutcome::Sent { notified: 3 });
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            serde_json::json!({ "outcome": "sent", "notified": 3 })
        );
        assert_eq!(
            serde_json::to_value(NotificationJobResponse::failed()).unwrap()["outcome"],
            "failed"
        );
        assert_eq!(
            serde_json::to_value(JobOutcome::AlreadyNotified).unwrap(),
            "already_notified"
        );
    }
}
