pub mod account_service;
pub mod analytics_service;
pub mod category_service;
pub mod operation_service;

pub use account_service::AccountService;
pub use analytics_service::AnalyticsService;
pub use category_service::CategoryService;
pub use operation_service::OperationService;
