//! Registration client adapters.

mod http_client;

pub use http_client::HttpRegistrationClient;
