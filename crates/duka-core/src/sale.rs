//! # Sale Computation
//!
//! Pure functions for sale totals, profit, and line pricing.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Recording a Sale                             │
//! │                                                                 │
//! │  caller: item + quantity per line                               │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  price_line()   ← snapshot price/cost from the current item,    │
//! │       │           validate quantity, check stock                │
//! │       ▼                                                         │
//! │  compute_total() / compute_profit()  ← derived, never cached    │
//! │       │           independently of storage                      │
//! │       ▼                                                         │
//! │  duka-db SaleRepository::record_sale (single transaction:       │
//! │  stock decrements + sale + lines all-or-nothing)                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are computed exactly once, when the lines are fixed; reads
//! never recompute and cache them behind the caller's back.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{SaleLine, StationeryItem};
use crate::{MAX_LINE_QUANTITY, MAX_SALE_LINES};

// =============================================================================
// Line Draft
// =============================================================================

/// A priced sale line before persistence.
///
/// Carries the frozen snapshot of the item at pricing time; duka-db adds
/// ids and timestamps when it persists the sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDraft {
    pub item_id: String,
    pub sku_snapshot: String,
    pub name_snapshot: String,
    pub unit_price_cents: i64,
    pub cost_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

impl LineDraft {
    /// Profit contribution of this line.
    #[inline]
    pub fn profit(&self) -> Money {
        (Money::from_cents(self.unit_price_cents) - Money::from_cents(self.cost_price_cents))
            .multiply_quantity(self.quantity)
    }

    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// Builds a priced line draft from the current item state.
///
/// Snapshots SKU, name, selling price and cost price so the sale record
/// survives later catalog edits. An explicit `price_override` (haggled
/// price) replaces the catalog selling price; cost is never overridden.
///
/// ## Errors
/// - `QuantityTooLarge` / validation error for a non-positive quantity
/// - `InsufficientStock` when the shelf cannot cover the quantity
pub fn price_line(
    item: &StationeryItem,
    quantity: i64,
    price_override: Option<Money>,
) -> CoreResult<LineDraft> {
    crate::validation::validate_quantity(quantity)?;

    check_stock(item, quantity)?;

    let unit_price = price_override.unwrap_or_else(|| item.unit_price());
    let line_total = unit_price.multiply_quantity(quantity);

    Ok(LineDraft {
        item_id: item.id.clone(),
        sku_snapshot: item.sku.clone(),
        name_snapshot: item.name.clone(),
        unit_price_cents: unit_price.cents(),
        cost_price_cents: item.cost_price_cents,
        quantity,
        line_total_cents: line_total.cents(),
    })
}

/// Checks that `item` can cover `quantity` units.
pub fn check_stock(item: &StationeryItem, quantity: i64) -> CoreResult<()> {
    if !item.can_fulfill(quantity) {
        return Err(CoreError::InsufficientStock {
            sku: item.sku.clone(),
            available: item.stock_quantity,
            requested: quantity,
        });
    }
    Ok(())
}

/// Checks the line count against [`MAX_SALE_LINES`].
pub fn check_line_count(count: usize) -> CoreResult<()> {
    if count > MAX_SALE_LINES {
        return Err(CoreError::TooManyLines {
            max: MAX_SALE_LINES,
        });
    }
    Ok(())
}

// =============================================================================
// Totals
// =============================================================================

/// Sums quantity × unit price over the drafts. Zero lines total zero.
pub fn compute_total(lines: &[LineDraft]) -> Money {
    lines.iter().map(LineDraft::line_total).sum()
}

/// Sums quantity × (unit price − cost price) over the drafts, using the
/// cost frozen at pricing time.
pub fn compute_profit(lines: &[LineDraft]) -> Money {
    lines.iter().map(LineDraft::profit).sum()
}

/// Recomputes the total from persisted lines. Used by reads that want to
/// cross-check the stored total against the lines.
pub fn compute_total_persisted(lines: &[SaleLine]) -> Money {
    lines.iter().map(SaleLine::line_total).sum()
}

/// Recomputes the profit from persisted lines.
pub fn compute_profit_persisted(lines: &[SaleLine]) -> Money {
    lines.iter().map(SaleLine::profit).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(sku: &str, price: i64, cost: i64, stock: i64) -> StationeryItem {
        let now = Utc::now();
        StationeryItem {
            id: format!("id-{sku}"),
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            description: None,
            category_id: "cat-1".to_string(),
            supplier_id: None,
            unit_price_cents: price,
            cost_price_cents: cost,
            stock_quantity: stock,
            minimum_stock: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_price_line_snapshots_item() {
        let it = item("A", 1000, 800, 10);
        let draft = price_line(&it, 2, None).unwrap();

        assert_eq!(draft.sku_snapshot, "A");
        assert_eq!(draft.unit_price_cents, 1000);
        assert_eq!(draft.cost_price_cents, 800);
        assert_eq!(draft.line_total_cents, 2000);
    }

    #[test]
    fn test_price_line_with_override() {
        let it = item("A", 1000, 800, 10);
        let draft = price_line(&it, 2, Some(Money::from_cents(900))).unwrap();

        assert_eq!(draft.unit_price_cents, 900);
        assert_eq!(draft.line_total_cents, 1800);
        // Cost snapshot is never overridden.
        assert_eq!(draft.cost_price_cents, 800);
    }

    #[test]
    fn test_price_line_rejects_bad_quantity() {
        let it = item("A", 1000, 800, 10);
        assert!(price_line(&it, 0, None).is_err());
        assert!(price_line(&it, -1, None).is_err());
        assert!(price_line(&it, 1000, None).is_err());
    }

    #[test]
    fn test_price_line_rejects_insufficient_stock() {
        let it = item("A", 1000, 800, 3);
        let err = price_line(&it, 5, None).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                sku,
                available,
                requested,
            } => {
                assert_eq!(sku, "A");
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_compute_total_empty_is_zero() {
        assert_eq!(compute_total(&[]).cents(), 0);
        assert_eq!(compute_profit(&[]).cents(), 0);
    }

    /// The two-line reference scenario:
    /// item A: qty 2 @ 1000 (cost 800), item B: qty 1 @ 500 (cost 300)
    /// total = 2500, profit = 400 + 200 = 600.
    #[test]
    fn test_compute_total_and_profit_two_lines() {
        let a = item("A", 1000, 800, 10);
        let b = item("B", 500, 300, 10);

        let lines = vec![
            price_line(&a, 2, None).unwrap(),
            price_line(&b, 1, None).unwrap(),
        ];

        assert_eq!(compute_total(&lines).cents(), 2500);
        assert_eq!(compute_profit(&lines).cents(), 600);
    }

    #[test]
    fn test_profit_can_be_negative() {
        let loss_leader = item("L", 500, 800, 10);
        let lines = vec![price_line(&loss_leader, 2, None).unwrap()];
        assert_eq!(compute_profit(&lines).cents(), -600);
    }

    #[test]
    fn test_check_line_count() {
        assert!(check_line_count(0).is_ok());
        assert!(check_line_count(MAX_SALE_LINES).is_ok());
        assert!(check_line_count(MAX_SALE_LINES + 1).is_err());
    }
}
