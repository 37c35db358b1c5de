//! Invoice totals shown on the dashboard cards.

use super::entities::{Customer, Invoice, InvoiceStatus};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
    pub invoice_count: usize,
    pub customer_count: usize,
    /// Cents
    pub total_paid: u64,
    /// Cents
    pub total_pending: u64,
}

impl InvoiceSummary {
    pub fn compute(invoices: &[Invoice], customers: &[Customer]) -> Self {
        let mut summary = Self {
            invoice_count: invoices.len(),
            customer_count: customers.len(),
            ..Self::default()
        };

        for invoice in invoices {
            match invoice.status {
                InvoiceStatus::Paid => summary.total_paid += invoice.amount,
                InvoiceStatus::Pending => summary.total_pending += invoice.amount,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(amount: u64, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: format!("inv-{amount}"),
            customer_id: "c1".to_string(),
            amount,
            status,
            date: "2023-06-07".to_string(),
        }
    }

    #[test]
    fn test_totals_split_by_status() {
        let invoices = vec![
            invoice(15795, InvoiceStatus::Pending),
            invoice(3040, InvoiceStatus::Paid),
            invoice(500, InvoiceStatus::Paid),
        ];
        let summary = InvoiceSummary::compute(&invoices, &[]);

        assert_eq!(summary.invoice_count, 3);
        assert_eq!(summary.customer_count, 0);
        assert_eq!(summary.total_paid, 3540);
        assert_eq!(summary.total_pending, 15795);
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(InvoiceSummary::compute(&[], &[]), InvoiceSummary::default());
    }
}
