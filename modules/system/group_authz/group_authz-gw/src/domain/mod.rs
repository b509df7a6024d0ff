pub mod audit;
pub mod error;
pub mod local_client;
pub mod service;

pub use audit::{InMemoryAuditSink, TracingAuditSink};
pub use error::DomainError;
pub use local_client::GroupAuthzGwLocalClient;
pub use service::Service;
