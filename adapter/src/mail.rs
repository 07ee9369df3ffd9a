use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::mailer::{Mail, Mailer};
use reqwest::Client;
use shared::{
    config::MailConfig,
    error::{AppError, AppResult},
};
use std::time::Duration;
use yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod};

const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";
const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";
const GMAIL_TIMEOUT: Duration = Duration::from_secs(30);

// Gmail API 経由でメールを送る
pub struct GmailMailer {
    config: MailConfig,
    client: Client,
}

impl GmailMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    // ブラウザでの認可は事前に済ませておく。サーバーからは対話的な認可を始めない
    async fn access_token(&self) -> AppResult<String> {
        let token_exists = tokio::fs::try_exists(&self.config.token_path)
            .await
            .unwrap_or(false);
        if !token_exists {
            return Err(AppError::ExternalServiceError(format!(
                "Gmail token file not found: {}",
                self.config.token_path
            )));
        }

        let secret = yup_oauth2::read_application_secret(&self.config.client_secret_path)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gmail secret error: {e}")))?;
        let auth =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::Interactive)
                .persist_tokens_to_disk(&self.config.token_path)
                .build()
                .await
                .map_err(|e| AppError::ExternalServiceError(format!("Gmail auth error: {e}")))?;

        // 対話的な認可に入った場合も時間で打ち切る
        let token = tokio::time::timeout(GMAIL_TIMEOUT, auth.token(&[GMAIL_SEND_SCOPE]))
            .await
            .map_err(|_| AppError::ExternalServiceError("Gmail token refresh timed out".into()))?
            .map_err(|e| AppError::ExternalServiceError(format!("Gmail token error: {e}")))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| AppError::ExternalServiceError("Gmail returned no access token".into()))
    }
}

#[async_trait]
impl Mailer for GmailMailer {
    async fn send(&self, mail: Mail) -> AppResult<()> {
        let access_token = self.access_token().await?;
        let raw = encode_message(&self.config.sender, &mail);

        let res = self
            .client
            .post(GMAIL_SEND_URL)
            .bearer_auth(access_token)
            .timeout(GMAIL_TIMEOUT)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Gmail error: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Gmail rejected the message ({status}): {body}"
            )));
        }

        tracing::info!(recipients = mail.to.len(), "Email sent to admins");
        Ok(())
    }
}

// 送信設定がない環境で使う。通知ログを残さないよう必ず失敗させる
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, mail: Mail) -> AppResult<()> {
        tracing::warn!(subject = %mail.subject, "Mail delivery is not configured");
        Err(AppError::ExternalServiceError(
            "Mail delivery is not configured".into(),
        ))
    }
}

// RFC 822 形式のメッセージを base64url（パディングなし）で符号化する
fn encode_message(sender: &str, mail: &Mail) -> String {
    let subject = general_purpose::STANDARD.encode(mail.subject.as_bytes());
    let message = format!(
        "From: {}\r\nTo: {}\r\nSubject: =?UTF-8?B?{}?=\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
        sender,
        mail.to.join(", "),
        subject,
        mail.body
    );
    general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> String {
        let bytes = general_purpose::URL_SAFE_NO_PAD.decode(raw).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn message_addresses_all_recipients_in_one_mail() {
        let mail = Mail {
            to: vec!["a@example.com".into(), "b@example.com".into()],
            subject: "Rent due".into(),
            body: "- Abebe Kebede | Amount Due: 1000 ETB\n".into(),
        };
        let message = decode(&encode_message("office@example.com", &mail));

        assert!(message.starts_with("From: office@example.com\r\n"));
        assert!(message.contains("To: a@example.com, b@example.com\r\n"));
        assert!(message.contains("Content-Type: text/plain; charset=UTF-8\r\n\r\n"));
        assert!(message.ends_with("Amount Due: 1000 ETB\n"));
    }

    #[test]
    fn subject_is_mime_encoded() {
        let mail = Mail {
            to: vec!["a@example.com".into()],
            subject: "Rent due".into(),
            body: String::new(),
        };
        let message = decode(&encode_message("office@example.com", &mail));
        let expected = general_purpose::STANDARD.encode("Rent due");
        assert!(message.contains(&format!("Subject: =?UTF-8?B?{expected}?=\r\n")));
    }

    #[tokio::test]
    async fn missing_token_file_fails_without_prompting() {
        let mailer = GmailMailer::new(MailConfig {
            sender: "office@example.com".into(),
            client_secret_path: "/nonexistent/client_secret.json".into(),
            token_path: "/nonexistent/token.json".into(),
        });
        let res = mailer
            .send(Mail {
                to: vec!["a@example.com".into()],
                subject: "Rent due".into(),
                body: String::new(),
            })
            .await;
        assert!(matches!(
            res,
            Err(AppError::ExternalServiceError(msg)) if msg.contains("token file")
        ));
    }

    #[tokio::test]
    async fn disabled_mailer_always_fails() {
        let res = DisabledMailer
            .send(Mail {
                to: vec!["a@example.com".into()],
                subject: "Rent due".into(),
                body: String::new(),
            })
            .await;
        assert!(matches!(res, Err(AppError::ExternalServiceError(_))));
    }
}
