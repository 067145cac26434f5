//! Purchasing domain module (purchase order session, command/event driven).
//!
//! This crate contains the business rules for building a purchase order,
//! implemented purely as deterministic domain logic (no IO, no rendering).

pub mod order;
pub mod sku;
pub mod supplier;
pub mod view;

pub use order::{
    AddItem, AddSupplier, DateSelected, ItemAdded, LastItemRemoved, LineItem, OrderReset,
    OrderSession, RemoveLastItem, Reset, SelectDate, SelectSupplier, SessionCommand,
    SessionEvent, SessionState, SupplierAdded, SupplierSelected, DEFAULT_LOCATION,
};
pub use sku::{compact_date, format_sku, SKU_DATE_FORMAT};
pub use supplier::{strip_whitespace, SupplierDirectory};
pub use view::{OrderView, SupplierEntry};
