use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::mail::{DisabledMailer, GmailMailer};
use adapter::redis::RedisClient;
use adapter::repository::{
    account::AccountRepositoryImpl, auth::AuthRepositoryImpl, customer::CustomerRepositoryImpl,
    health::HealthCheckRepositoryImpl, notification::NotificationRepositoryImpl,
    payment::PaymentRepositoryImpl,
};
use kernel::mailer::Mailer;
use kernel::repository::{
    account::AccountRepository, auth::AuthRepository, customer::CustomerRepository,
    health::HealthCheckRepository, payment::PaymentRepository,
};
use kernel::service::notification::DueRentNotifier;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    customer_repository: Arc<dyn CustomerRepository>,
    payment_repository: Arc<dyn PaymentRepository>,
    account_repository: Arc<dyn AccountRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    due_rent_notifier: Arc<DueRentNotifier>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: &AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let customer_repository = Arc::new(CustomerRepositoryImpl::new(pool.clone()));
        let payment_repository = Arc::new(PaymentRepositoryImpl::new(pool.clone()));
        let account_repository = Arc::new(AccountRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            redis_client.clone(),
            app_config.auth.ttl,
        ));

        let mailer: Arc<dyn Mailer> = match &app_config.mail {
            Some(mail) => Arc::new(GmailMailer::new(mail.clone())),
            None => Arc::new(DisabledMailer),
        };
        let due_rent_notifier = Arc::new(DueRentNotifier::new(
            Arc::new(NotificationRepositoryImpl::new(pool)),
            mailer,
        ));

        Self::from_parts(
            health_check_repository,
            customer_repository,
            payment_repository,
            account_repository,
            auth_repository,
            due_rent_notifier,
        )
    }

    // 実装を差し替えて組み立てる（インメモリ実装でのテストなど）
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        customer_repository: Arc<dyn CustomerRepository>,
        payment_repository: Arc<dyn PaymentRepository>,
        account_repository: Arc<dyn AccountRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        due_rent_notifier: Arc<DueRentNotifier>,
    ) -> Self {
        Self {
            health_check_repository,
            customer_repository,
            payment_repository,
            account_repository,
            auth_repository,
            due_rent_notifier,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn customer_repository(&self) -> Arc<dyn CustomerRepository> {
        self.customer_repository.clone()
    }

    pub fn payment_repository(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repository.clone()
    }

    pub fn account_repository(&self) -> Arc<dyn AccountRepository> {
        self.account_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn due_rent_notifier(&self) -> Arc<DueRentNotifier> {
        self.due_rent_notifier.clone()
    }
}
