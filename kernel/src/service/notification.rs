use crate::{
    mailer::Mailer,
    model::notification::{DueRentDigest, NotificationOutcome},
    repository::notification::NotificationRepository,
};
use chrono::{Days, NaiveDate};
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::Mutex;

// 翌日に期日を迎える入居者を管理者へ通知するジョブ。
// 同一プロセス内の実行は running で直列化し、
// (入居者 ID, 日付) の通知ログで同じ日の二重送信を防ぐ。
pub struct DueRentNotifier {
    repository: Arc<dyn NotificationRepository>,
    mailer: Arc<dyn Mailer>,
    running: Mutex<()>,
}

impl DueRentNotifier {
    pub fn new(repository: Arc<dyn NotificationRepository>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            repository,
            mailer,
            running: Mutex::new(()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self, today: NaiveDate) -> AppResult<NotificationOutcome> {
        let _guard = self.running.lock().await;

        let due_date = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::ConversionEntityError(format!("no day after {today}")))?;

        let due = self.repository.find_due_customers(due_date).await?;
        if due.is_empty() {
            tracing::info!("No customers due tomorrow");
            return Ok(NotificationOutcome::NothingDue);
        }
        tracing::info!(count = due.len(), "Found customers due tomorrow");

        let ids: Vec<_> = due.iter().map(|c| c.customer_id).collect();
        let notified = self.repository.find_notified(today, &ids).await?;
        let pending: Vec<_> = due
            .into_iter()
            .filter(|c| !notified.contains(&c.customer_id))
            .collect();
        if pending.is_empty() {
            tracing::info!("No new customers to notify today");
            return Ok(NotificationOutcome::AlreadyNotified);
        }

        let recipients = self.repository.find_admin_emails().await?;
        if recipients.is_empty() {
            tracing::warn!("No admin emails found");
            return Ok(NotificationOutcome::NoRecipients);
        }

        let digest = DueRentDigest::new(pending);
        let customer_ids = digest.customer_ids();
        let notified = digest.len();

        self.mailer.send(digest.into_mail(recipients)).await?;
        self.repository.record_notified(today, &customer_ids).await?;

        tracing::info!(notified, "Due rent digest sent to admins");
        Ok(NotificationOutcome::Sent { notified })
    }
}
