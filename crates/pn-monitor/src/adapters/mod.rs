//! Adapters for the outbound ports.

mod bootstrap;
mod grpcurl;
mod locator;
mod payload;

pub use bootstrap::{release_url, resolve_grpcurl, GrpcurlBootstrap, GRPCURL_VERSION};
pub use grpcurl::{GrpcurlClient, STATUS_METHOD, VERSION_METHOD};
pub use locator::SearchPathLocator;
pub use payload::{decode_status, decode_version};
