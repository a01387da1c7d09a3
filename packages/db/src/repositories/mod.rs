//! Repository layer over the SurrealDB collections.

mod customer_repo;
mod device_repo;
mod job_repo;

pub use customer_repo::{CustomerRepository, NewCustomer};
pub use device_repo::{DeviceRepository, NewDevice};
pub use job_repo::{JobFilter, JobRepository};
