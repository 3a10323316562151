//! Link extraction from per-device configuration dumps.

pub mod block;
pub mod extract;
pub mod prefix;
pub mod record;

pub use extract::LinkExtractor;
pub use prefix::NetworkPrefix;
pub use record::LinkRecord;
