//! # Domain Types
//!
//! Core domain types for the Duka stationery shop.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Model                             │
//! │                                                                 │
//! │  Category ◄──┐                      ┌──► Supplier               │
//! │              │                      │                           │
//! │        ┌─────┴──────────────────────┴─────┐                     │
//! │        │         StationeryItem           │                     │
//! │        │  sku (unique), prices, stock     │                     │
//! │        └─────▲────────────────────▲───────┘                     │
//! │              │ snapshot           │                             │
//! │        ┌─────┴─────┐        ┌─────┴─────┐                       │
//! │        │ SaleLine  │ N─1    │   Debt    │──► DebtPayment        │
//! │        └─────┬─────┘        └─────┬─────┘                       │
//! │              │ N─1                │ N─1                         │
//! │        ┌─────▼─────┐        ┌─────▼─────┐                       │
//! │        │   Sale    │◄─0..1──│ (origin)  │                       │
//! │        └─────┬─────┘        └───────────┘                       │
//! │              │ N─0..1                                           │
//! │        ┌─────▼─────┐                                            │
//! │        │ Customer  │  (walk-in sales have no customer)          │
//! │        └───────────┘                                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where one exists: SKU for items, name for categories
//!
//! Derived state (low stock, debt status, margins) is exposed through
//! methods, never stored in fields, so it can never go stale.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::debt::derive_status;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A classification for stationery items (Pens, Paper, Notebooks, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    /// Unique display name.
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier the shop restocks from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer contact record.
///
/// Customers are never hard-deleted because sales and debts reference
/// them; deactivation flips `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Stationery Item
// =============================================================================

/// An inventory record for one stationery product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StationeryItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    pub description: Option<String>,

    /// Category this item belongs to.
    pub category_id: String,

    /// Supplier the item is restocked from, if known.
    pub supplier_id: Option<String>,

    /// Selling price in cents.
    pub unit_price_cents: i64,

    /// Cost price in cents (for profit calculations).
    pub cost_price_cents: i64,

    /// Current stock level. Never negative.
    pub stock_quantity: i64,

    /// Reorder threshold; stock below this flags the item as low.
    pub minimum_stock: i64,

    /// Soft-delete flag. Items referenced by sales are never hard-deleted.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StationeryItem {
    /// Returns the selling price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the cost price as Money.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_cents(self.cost_price_cents)
    }

    /// Low-stock predicate: stock strictly below the configured minimum.
    ///
    /// Pure function of current state, used by reporting. Never stored,
    /// so it is always consistent with the latest stock movement.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity < self.minimum_stock
    }

    /// Whether current stock can satisfy a requested quantity.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock_quantity >= quantity
    }

    /// Margin per unit: selling price minus cost price.
    ///
    /// May be negative; that is a display concern, not an error.
    #[inline]
    pub fn margin(&self) -> Money {
        self.unit_price() - self.cost_price()
    }

    /// Total selling value of stock on hand.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.unit_price().multiply_quantity(self.stock_quantity)
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction.
///
/// Pending sales have not yet decremented stock; the only transition is
/// pending → completed. Completed sales are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Sale is agreed but goods have not left the shelf.
    Pending,
    /// Sale is finalized; stock has been decremented.
    Completed,
}

impl SaleStatus {
    /// Lowercase wire/database name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Completed => "completed",
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale or debt payment was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Mobile money transfer (M-Pesa, Tigo Pesa, Airtel Money).
    MobileMoney,
    /// On credit - opens a debt for the customer.
    Credit,
    /// Anything else (bank transfer, cheque).
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction.
///
/// `total_cents` and `profit_cents` are derived from the lines at
/// recording time via [`crate::sale::compute_total`] and
/// [`crate::sale::compute_profit`]; lines never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    /// Buying customer; `None` for walk-in sales.
    pub customer_id: Option<String>,
    pub status: SaleStatus,
    pub payment_method: PaymentMethod,
    /// Σ line totals.
    pub total_cents: i64,
    /// Σ quantity × (unit price − cost price), from line snapshots.
    pub profit_cents: i64,
    pub notes: Option<String>,
    /// Due date requested for the debt a credit sale opens. Persisted at
    /// recording time so it survives a pending → completed transition;
    /// `None` means default terms apply when the debt is opened.
    pub credit_due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the sale transitioned to completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the sale profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a sale.
///
/// Uses the snapshot pattern: SKU, name, unit price and cost price are
/// frozen at time of sale so history survives later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub id: String,
    pub sale_id: String,
    pub item_id: String,
    /// SKU at time of sale (frozen).
    pub sku_snapshot: String,
    /// Item name at time of sale (frozen).
    pub name_snapshot: String,
    /// Unit selling price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Unit cost price in cents at time of sale (frozen).
    pub cost_price_cents: i64,
    /// Quantity sold. Always > 0.
    pub quantity: i64,
    /// unit_price × quantity.
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SaleLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }

    /// Profit contribution: quantity × (unit price − cost price).
    #[inline]
    pub fn profit(&self) -> Money {
        (Money::from_cents(self.unit_price_cents) - Money::from_cents(self.cost_price_cents))
            .multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Debt Status
// =============================================================================

/// Derived status of a debt. Never persisted.
///
/// State machine: open → overdue (time-triggered) → paid (payment-
/// triggered, terminal). Paid is absorbing regardless of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    /// Unpaid, not yet due.
    Open,
    /// Unpaid and past due date.
    Overdue,
    /// Fully paid. Terminal.
    Paid,
}

// =============================================================================
// Debt
// =============================================================================

/// An obligation a customer owes the shop.
///
/// There is no `status` field: status is derived on every read from the
/// amounts and due date (see [`crate::debt::derive_status`]), so it can
/// never be stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Debt {
    pub id: String,
    pub customer_id: String,
    /// Originating sale, when the debt came from a credit sale.
    pub sale_id: Option<String>,
    /// Principal owed, in cents. Always > 0.
    pub amount_cents: i64,
    /// Amount repaid so far. Invariant: 0 ≤ paid ≤ amount.
    pub paid_cents: i64,
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Debt {
    /// Principal as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Repaid portion as Money.
    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_cents(self.paid_cents)
    }

    /// Outstanding balance: principal minus payments.
    #[inline]
    pub fn remaining(&self) -> Money {
        self.amount() - self.paid()
    }

    /// Derives the current status as of `today`.
    #[inline]
    pub fn status(&self, today: NaiveDate) -> DebtStatus {
        derive_status(self.amount_cents, self.paid_cents, self.due_date, today)
    }

    /// Whether the debt is overdue as of `today`.
    #[inline]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status(today) == DebtStatus::Overdue
    }
}

// =============================================================================
// Debt Payment
// =============================================================================

/// A payment made towards a debt. Audit trail; the running balance lives
/// on the debt itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DebtPayment {
    pub id: String,
    pub debt_id: String,
    /// Amount paid in cents. Always > 0.
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DebtPayment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Expenditure
// =============================================================================

/// What an expenditure was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ExpenditureCategory {
    Supplies,
    Rent,
    Utilities,
    Salary,
    Marketing,
    Other,
}

impl Default for ExpenditureCategory {
    fn default() -> Self {
        ExpenditureCategory::Other
    }
}

/// Money going out of the business.
///
/// Counted against sales over the same window to report net figures on
/// the dashboard. `spent_at` is when the money left (may be backdated);
/// `created_at` is when the row was entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expenditure {
    pub id: String,
    pub category: ExpenditureCategory,
    pub description: Option<String>,
    /// Amount spent in cents. Always > 0.
    pub amount_cents: i64,
    pub spent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Expenditure {
    /// Returns the amount spent as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
