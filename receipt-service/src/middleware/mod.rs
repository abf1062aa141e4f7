pub mod credentials;
pub mod request_context;

pub use credentials::BasicCredentials;
pub use request_context::{make_request_span, metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
