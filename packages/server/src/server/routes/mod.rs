pub mod form;
pub mod health;
pub mod plan;

pub use form::form_handler;
pub use health::health_handler;
pub use plan::plan_handler;
