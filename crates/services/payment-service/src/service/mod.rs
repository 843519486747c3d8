//! Payment business logic.

mod payment_service;

pub use payment_service::{PaymentService, Payments};
