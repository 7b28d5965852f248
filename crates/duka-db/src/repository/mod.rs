//! # Repository Module
//!
//! Database repository implementations for Duka.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Repository Pattern Explained                    │
//! │                                                                 │
//! │  Caller                                                         │
//! │    │   db.items().adjust_stock(id, -3)                          │
//! │    ▼                                                            │
//! │  ItemRepository                                                 │
//! │  ├── get_by_id / get_by_sku                                     │
//! │  ├── insert / update / soft_delete                              │
//! │  ├── adjust_stock (atomic, guarded)                             │
//! │  └── low_stock                                                  │
//! │    │   SQL                                                      │
//! │    ▼                                                            │
//! │  SQLite                                                         │
//! │                                                                 │
//! │  One repository per entity; repositories own all SQL so the     │
//! │  core crate stays free of I/O.                                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - customer contact records
//! - [`category::CategoryRepository`] - item classification
//! - [`supplier::SupplierRepository`] - suppliers
//! - [`item::ItemRepository`] - inventory CRUD and stock adjustment
//! - [`sale::SaleRepository`] - atomic sale recording and completion
//! - [`debt::DebtRepository`] - debts and payments
//! - [`expenditure::ExpenditureRepository`] - money going out
//! - [`report::ReportRepository`] - read-only aggregation

pub mod category;
pub mod customer;
pub mod debt;
pub mod expenditure;
pub mod item;
pub mod report;
pub mod sale;
pub mod supplier;
