//! # duka-db: Database Layer for Duka
//!
//! SQLite persistence for the Duka stationery shop. All entity mutation
//! goes through the repositories in this crate; derived values (low
//! stock, debt status) are computed from current state on read, never
//! cached in columns.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Duka Data Flow                            │
//! │                                                                 │
//! │  Presentation layer (web UI / CLI / API - out of scope)         │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐ │
//! │  │                  duka-db (THIS CRATE)                     │ │
//! │  │                                                           │ │
//! │  │  ┌────────────┐  ┌──────────────────┐  ┌──────────────┐  │ │
//! │  │  │  Database  │  │   Repositories   │  │  Migrations  │  │ │
//! │  │  │ (pool.rs)  │◄─│ item, sale, debt │  │  (embedded)  │  │ │
//! │  │  │ SqlitePool │  │ customer, report │  │ 001_init.sql │  │ │
//! │  │  └────────────┘  └──────────────────┘  └──────────────┘  │ │
//! │  └───────────────────────────────────────────────────────────┘ │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (WAL mode, foreign keys on)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per entity, plus reports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use duka_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("duka.db")).await?;
//!
//! let low = db.items().low_stock().await?;
//! let summary = db.reports().dashboard(chrono::Utc::now()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::customer::CustomerRepository;
pub use repository::debt::DebtRepository;
pub use repository::expenditure::{ExpenditureRepository, NewExpenditure};
pub use repository::item::ItemRepository;
pub use repository::report::{DashboardSummary, ReportRepository};
pub use repository::sale::{NewSale, NewSaleLine, SaleRepository};
pub use repository::supplier::SupplierRepository;
