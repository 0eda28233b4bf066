//! Built-in functions registered by `Service::standard`.

pub mod batch_insert;
pub mod health_check;
