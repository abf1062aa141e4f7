pub mod metrics;
pub mod vendor;

pub use self::metrics::{get_metrics, init_metrics, record_receipt};
pub use self::vendor::{VendorClient, VendorSession};
