pub mod offset;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use offset::{OffsetSpec, OffsetTable};
pub use structs::{InstrumentRecord, PricePoint};
