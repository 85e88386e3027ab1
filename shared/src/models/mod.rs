//! Data models
//!
//! Shared between order-server and API clients.
//! Record ids are the bare document keys (no `table:` prefix).
//! Timestamps are Unix millis.

pub mod menu_item;
pub mod order;
pub mod sales;

// Re-exports
pub use menu_item::*;
pub use order::*;
pub use sales::*;
