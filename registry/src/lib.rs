use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::mailer::HttpMailer;
use adapter::price::ConfigPriceTable;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::repository::schedule::ScheduleRepositoryImpl;
use kernel::assembler::ContextAssembler;
use kernel::collaborator::notifier::Notifier;
use kernel::collaborator::pricing::PriceTable;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::ReservationRepository;
use kernel::repository::schedule::ScheduleRepository;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    schedule_repository: Arc<dyn ScheduleRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    context_assembler: Arc<ContextAssembler>,
    notifier: Arc<dyn Notifier>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let price_table: Arc<dyn PriceTable> =
            Arc::new(ConfigPriceTable::new(app_config.pricing));
        let schedule_repository: Arc<dyn ScheduleRepository> =
            Arc::new(ScheduleRepositoryImpl::new(pool.clone()));
        let reservation_repository: Arc<dyn ReservationRepository> =
            Arc::new(ReservationRepositoryImpl::new(
                pool.clone(),
                price_table.clone(),
                app_config.booking,
            ));
        let context_assembler = Arc::new(ContextAssembler::new(
            schedule_repository.clone(),
            reservation_repository.clone(),
            price_table,
            app_config.booking.window_open_days,
            app_config.booking.month_range,
        ));
        let notifier: Arc<dyn Notifier> = Arc::new(HttpMailer::new(&app_config.mailer));
        Self {
            health_check_repository,
            schedule_repository,
            reservation_repository,
            context_assembler,
            notifier,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn schedule_repository(&self) -> Arc<dyn ScheduleRepository> {
        self.schedule_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn context_assembler(&self) -> Arc<ContextAssembler> {
        self.context_assembler.clone()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }
}
