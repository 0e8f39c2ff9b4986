//! Invoice totaling engine.
//!
//! Pure integer arithmetic over line items, discount and tax. Nothing here
//! fails: bad numeric input has already been coerced to 0 and every product
//! or sum saturates instead of overflowing. Negative results are passed
//! through untouched; rejecting them is the caller's business.

use crate::models::{
    DiscountSpec, DiscountType, InvoiceTotals, LineItem, LineItemField, Service, TaxSpec,
};
use crate::utils::parse_int_lenient;

/// `round(amount * percent / 100)`, rounding halves toward positive infinity.
///
/// Done in `i128` so no `i64` pair can overflow mid-way; the result is
/// clamped back into `i64`.
pub fn percent_of(amount: i64, percent: i64) -> i64 {
    let scaled = i128::from(amount) * i128::from(percent);
    let rounded = (scaled + 50).div_euclid(100);
    rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Apply one field edit to `item`.
///
/// Editing `quantity` or `rate` re-derives `amount` from the post-edit values.
/// Editing `description` leaves `amount` alone.
pub fn recompute_item_amount(item: &LineItem, field: LineItemField, value: &str) -> LineItem {
    let mut updated = item.clone();
    match field {
        LineItemField::Description => {
            updated.description = value.to_string();
            return updated;
        }
        LineItemField::Quantity => updated.quantity = parse_int_lenient(value),
        LineItemField::Rate => updated.rate = parse_int_lenient(value),
    }
    updated.amount = updated.quantity.saturating_mul(updated.rate);
    updated
}

/// Compute the full set of totals.
///
/// Items with an empty description still count towards the subtotal; they
/// are only dropped when the invoice is persisted.
pub fn compute_totals(items: &[LineItem], discount: &DiscountSpec, tax: &TaxSpec) -> InvoiceTotals {
    let subtotal = items
        .iter()
        .fold(0i64, |sum, item| sum.saturating_add(item.amount));

    // Fixed discounts are not clamped to the subtotal.
    let discount_amount = match discount.kind {
        DiscountType::Percentage => percent_of(subtotal, discount.value),
        DiscountType::Fixed => discount.value,
    };

    let taxable_amount = subtotal.saturating_sub(discount_amount);
    let tax_amount = percent_of(taxable_amount, tax.percentage);
    let total = taxable_amount.saturating_add(tax_amount);

    InvoiceTotals {
        subtotal,
        discount_amount,
        taxable_amount,
        tax_amount,
        total,
    }
}

/// Append one unit of `service` as a new line item.
///
/// Active-only filtering belongs to whoever offers the candidates.
pub fn add_service_line_item(items: &[LineItem], service: &Service) -> Vec<LineItem> {
    let mut next = items.to_vec();
    next.push(LineItem {
        description: service.name.clone(),
        quantity: 1,
        rate: service.rate,
        amount: service.rate,
    });
    next
}

/// The empty row a new invoice form starts with.
pub fn new_blank_line_item() -> LineItem {
    LineItem {
        description: String::new(),
        quantity: 1,
        rate: 0,
        amount: 0,
    }
}

/// Drop the item at `index`; an out-of-range index changes nothing.
pub fn remove_line_item(items: &[LineItem], index: usize) -> Vec<LineItem> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Items worth persisting: everything with a non-empty description.
pub fn persistable_items(items: &[LineItem]) -> Vec<LineItem> {
    items
        .iter()
        .filter(|item| !item.description.is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<LineItem> {
        vec![LineItem::new("Design", 2, 100), LineItem::new("Hosting", 1, 50)]
    }

    #[test]
    fn quantity_edit_recomputes_amount() {
        let item = LineItem::new("Design", 2, 100);
        let updated = recompute_item_amount(&item, LineItemField::Quantity, "5");
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.amount, 500);
    }

    #[test]
    fn rate_edit_recomputes_amount() {
        let item = LineItem::new("Design", 3, 100);
        let updated = recompute_item_amount(&item, LineItemField::Rate, "250");
        assert_eq!(updated.rate, 250);
        assert_eq!(updated.amount, 750);
    }

    #[test]
    fn amount_is_product_for_non_negative_inputs() {
        let base = LineItem::new("Row", 0, 0);
        for quantity in [0i64, 1, 7, 120] {
            for rate in [0i64, 1, 99, 4500] {
                let item =
                    recompute_item_amount(&base, LineItemField::Quantity, &quantity.to_string());
                let item = recompute_item_amount(&item, LineItemField::Rate, &rate.to_string());
                assert_eq!(item.amount, quantity * rate);
            }
        }
    }

    #[test]
    fn description_edit_keeps_amount() {
        // amount deliberately out of sync to prove it is untouched
        let item = LineItem {
            description: "Old".to_string(),
            quantity: 2,
            rate: 100,
            amount: 123,
        };
        let updated = recompute_item_amount(&item, LineItemField::Description, "New");
        assert_eq!(updated.description, "New");
        assert_eq!(updated.amount, 123);
    }

    #[test]
    fn non_numeric_input_becomes_zero() {
        let item = LineItem::new("Design", 2, 100);
        let updated = recompute_item_amount(&item, LineItemField::Quantity, "two");
        assert_eq!(updated.quantity, 0);
        assert_eq!(updated.amount, 0);
    }

    #[test]
    fn huge_inputs_saturate() {
        let item = LineItem::new("Big", 1, 1);
        let updated =
            recompute_item_amount(&item, LineItemField::Quantity, "9223372036854775807");
        let updated = recompute_item_amount(&updated, LineItemField::Rate, "10");
        assert_eq!(updated.amount, i64::MAX);
    }

    #[test]
    fn percentage_discount_and_tax() {
        let totals = compute_totals(
            &sample_items(),
            &DiscountSpec::percentage(10),
            &TaxSpec::new(18),
        );
        assert_eq!(
            totals,
            InvoiceTotals {
                subtotal: 250,
                discount_amount: 25,
                taxable_amount: 225,
                tax_amount: 41,
                total: 266,
            }
        );
    }

    #[test]
    fn fixed_discount_can_go_negative() {
        let totals = compute_totals(&sample_items(), &DiscountSpec::fixed(300), &TaxSpec::new(18));
        assert_eq!(totals.discount_amount, 300);
        assert_eq!(totals.taxable_amount, -50);
        assert_eq!(totals.tax_amount, -9);
        assert_eq!(totals.total, -59);
    }

    #[test]
    fn compute_totals_is_idempotent() {
        let items = sample_items();
        let discount = DiscountSpec::percentage(7);
        let tax = TaxSpec::new(12);
        assert_eq!(
            compute_totals(&items, &discount, &tax),
            compute_totals(&items, &discount, &tax)
        );
    }

    #[test]
    fn empty_description_items_count_towards_subtotal() {
        let items = vec![LineItem::new("", 3, 10), LineItem::new("Audit", 1, 20)];
        let totals = compute_totals(&items, &DiscountSpec::default(), &TaxSpec::new(0));
        assert_eq!(totals.subtotal, 50);
        assert_eq!(totals.total, 50);
    }

    #[test]
    fn discount_over_one_hundred_percent_is_not_capped() {
        let totals = compute_totals(
            &sample_items(),
            &DiscountSpec::percentage(120),
            &TaxSpec::new(0),
        );
        assert_eq!(totals.discount_amount, 300);
        assert_eq!(totals.total, -50);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(percent_of(225, 18), 41); // 40.5
        assert_eq!(percent_of(5, 10), 1); // 0.5
        assert_eq!(percent_of(-5, 10), 0); // -0.5
        assert_eq!(percent_of(-15, 10), -1); // -1.5
        assert_eq!(percent_of(-50, 18), -9);
    }

    #[test]
    fn empty_invoice_totals_are_zero() {
        let totals = compute_totals(&[], &DiscountSpec::default(), &TaxSpec::default());
        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn service_is_appended_as_single_unit() {
        let items = sample_items();
        let service = Service {
            id: None,
            name: "SEO Audit".to_string(),
            rate: 1200,
            is_active: true,
        };
        let next = add_service_line_item(&items, &service);
        assert_eq!(items.len(), 2);
        assert_eq!(next.len(), 3);
        assert_eq!(next[..2], items[..]);
        assert_eq!(next[2], LineItem::new("SEO Audit", 1, 1200));
    }

    #[test]
    fn inactive_service_is_not_filtered_by_engine() {
        let service = Service {
            id: None,
            name: "Legacy".to_string(),
            rate: 10,
            is_active: false,
        };
        assert_eq!(add_service_line_item(&[], &service).len(), 1);
    }

    #[test]
    fn remove_line_item_ignores_out_of_range() {
        let items = sample_items();
        assert_eq!(remove_line_item(&items, 0), vec![items[1].clone()]);
        assert_eq!(remove_line_item(&items, 5), items);
    }

    #[test]
    fn persistable_items_drop_empty_descriptions_only() {
        let items = vec![
            new_blank_line_item(),
            LineItem::new(" ", 1, 5),
            LineItem::new("Audit", 1, 20),
        ];
        let kept = persistable_items(&items);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].description, " ");
    }
}
