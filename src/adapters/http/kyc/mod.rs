//! KYC HTTP endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::PAYLOAD_DIGEST_HEADER;
pub use routes::kyc_routes;
