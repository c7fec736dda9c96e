pub mod fetch_utils;
pub mod http_client;
pub mod urls;
mod core;

pub use core::*;
pub use fetch_utils::{ApiCredentials, RetryPolicy, error_for_status, provider_error_message};
pub use http_client::create_http_client_with_timeout;
pub use urls::*;
