//! # duka-core: Pure Business Logic for Duka
//!
//! This crate is the heart of the Duka stationery shop system. It contains
//! all business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Duka Architecture                          │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐ │
//! │  │         Presentation layer (web UI / CLI / API)           │ │
//! │  │         not part of this workspace                        │ │
//! │  └─────────────────────────────┬─────────────────────────────┘ │
//! │                                │                               │
//! │  ┌─────────────────────────────▼─────────────────────────────┐ │
//! │  │              ★ duka-core (THIS CRATE) ★                   │ │
//! │  │                                                           │ │
//! │  │  ┌────────┐ ┌───────┐ ┌──────┐ ┌──────┐ ┌────────────┐   │ │
//! │  │  │ types  │ │ money │ │ sale │ │ debt │ │ validation │   │ │
//! │  │  └────────┘ └───────┘ └──────┘ └──────┘ └────────────┘   │ │
//! │  │                                                           │ │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │ │
//! │  └─────────────────────────────┬─────────────────────────────┘ │
//! │                                │                               │
//! │  ┌─────────────────────────────▼─────────────────────────────┐ │
//! │  │                duka-db (Database Layer)                   │ │
//! │  │          SQLite queries, migrations, repositories         │ │
//! │  └───────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, StationeryItem, Sale, Debt, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`sale`] - Sale totals and profit computation
//! - [`debt`] - Debt status derivation and payment rules
//! - [`sku`] - SKU generation
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Derived, not cached**: low-stock and debt status are recomputed
//!    from current state on every read, never stored

// =============================================================================
// Module Declarations
// =============================================================================

pub mod debt;
pub mod error;
pub mod money;
pub mod sale;
pub mod sku;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single sale.
///
/// Prevents runaway sales and keeps a receipt printable on one page.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity of a single item in a sale line.
///
/// Guards against typos (1000 instead of 10) at data entry.
pub const MAX_LINE_QUANTITY: i64 = 999;
