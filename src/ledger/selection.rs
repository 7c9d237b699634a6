//! Bulk-action selection over invoice ids.
//!
//! The caller owns the set; these functions only return new sets.

use std::collections::BTreeSet;

use super::invoice::{Invoice, InvoiceId};

pub type SelectionSet = BTreeSet<InvoiceId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub all_selected: bool,
    pub some_selected: bool,
}

pub fn select_all(ids: impl IntoIterator<Item = InvoiceId>) -> SelectionSet {
    ids.into_iter().collect()
}

pub fn clear_all() -> SelectionSet {
    SelectionSet::new()
}

pub fn toggle(current: &SelectionSet, id: InvoiceId, checked: bool) -> SelectionSet {
    let mut next = current.clone();
    if checked {
        next.insert(id);
    } else {
        next.remove(&id);
    }
    next
}

/// Header checkbox state for a table showing `total_count` rows
pub fn selection_summary(current: &SelectionSet, total_count: usize) -> SelectionSummary {
    let all_selected = total_count > 0 && current.len() == total_count;
    SelectionSummary {
        all_selected,
        some_selected: !current.is_empty() && !all_selected,
    }
}

/// The selected invoices in view order, or the whole view when nothing is selected
pub fn selected_or_all(invoices: &[Invoice], selection: &SelectionSet) -> Vec<Invoice> {
    if selection.is_empty() {
        return invoices.to_vec();
    }
    invoices
        .iter()
        .filter(|invoice| selection.contains(&invoice.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::invoice::{InvoiceStatus, InvoiceType};

    #[test]
    fn test_toggle_round_trip() {
        let empty = clear_all();
        let on = toggle(&empty, 3, true);
        assert!(on.contains(&3));
        assert_eq!(toggle(&on, 3, false), empty);
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let once = toggle(&clear_all(), 5, true);
        assert_eq!(toggle(&once, 5, true), once);
        assert_eq!(toggle(&clear_all(), 5, false), clear_all());
    }

    #[test]
    fn test_select_all_dedupes() {
        let set = select_all([1, 2, 2, 3]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_selection_summary() {
        let none = selection_summary(&clear_all(), 3);
        assert!(!none.all_selected && !none.some_selected);

        let some = selection_summary(&select_all([1]), 3);
        assert!(!some.all_selected && some.some_selected);

        let all = selection_summary(&select_all([1, 2, 3]), 3);
        assert!(all.all_selected && !all.some_selected);

        // An empty table is never "all selected"
        let empty_table = selection_summary(&clear_all(), 0);
        assert!(!empty_table.all_selected && !empty_table.some_selected);
    }

    #[test]
    fn test_selected_or_all() {
        let invoices: Vec<_> = (1..=4)
            .map(|id| Invoice::new(id, InvoiceType::Payable, InvoiceStatus::Unpaid))
            .collect();

        assert_eq!(selected_or_all(&invoices, &clear_all()).len(), 4);

        let picked = selected_or_all(&invoices, &select_all([4, 2]));
        let ids: Vec<_> = picked.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
