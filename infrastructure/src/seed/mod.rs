//! Built-in placeholder dataset for the dashboard.

use querydash_domain::{Customer, Invoice, InvoiceStatus, Revenue};

const CUSTOMERS: [(&str, &str, &str, &str); 6] = [
    (
        "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        "Delba de Oliveira",
        "delba@example.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        "Lee Robinson",
        "lee@example.com",
        "/customers/lee-robinson.png",
    ),
    (
        "3958dc9e-737f-4377-85e9-fec4b6a6442a",
        "Hector Simpson",
        "hector@example.com",
        "/customers/evil-rabbit.png",
    ),
    (
        "50ca3e18-62cd-11ee-8c99-0242ac120002",
        "Michael Novotny",
        "michael@example.com",
        "/customers/michael-novotny.png",
    ),
    (
        "3958dc9e-787f-4377-85e9-fec4b6a6442a",
        "Amy Burns",
        "amy@example.com",
        "/customers/amy-burns.png",
    ),
    (
        "76d65c26-f784-44a2-ac19-586678f7c2f2",
        "Balazs Orban",
        "balazs@example.com",
        "/customers/balazs-orban.png",
    ),
];

/// (id, index into CUSTOMERS, amount in cents, paid, date)
const INVOICES: [(&str, usize, u64, bool, &str); 15] = [
    ("3958dc9e-712f-4377-85e9-fec4b6a6442a", 0, 15795, false, "2022-12-06"),
    ("3958dc9e-742f-4377-85e9-fec4b6a6442b", 1, 20348, false, "2022-11-14"),
    ("3958dc9e-737f-4377-85e9-fec4b6a6442c", 4, 3040, true, "2022-10-29"),
    ("50ca3e18-62cd-11ee-8c99-0242ac120003", 3, 44800, true, "2023-09-10"),
    ("3958dc9e-787f-4377-85e9-fec4b6a6442d", 5, 34577, false, "2023-08-05"),
    ("76d65c26-f784-44a2-ac19-586678f7c2f3", 2, 54246, false, "2023-07-16"),
    ("3958dc9e-712f-4377-85e9-fec4b6a6442e", 0, 666, false, "2023-06-27"),
    ("3958dc9e-737f-4377-85e9-fec4b6a6442f", 2, 32545, true, "2023-06-09"),
    ("3958dc9e-787f-4377-85e9-fec4b6a6442g", 4, 1250, true, "2023-06-17"),
    ("50ca3e18-62cd-11ee-8c99-0242ac120004", 3, 8546, true, "2023-06-07"),
    ("3958dc9e-742f-4377-85e9-fec4b6a6442h", 1, 500, true, "2023-08-19"),
    ("76d65c26-f784-44a2-ac19-586678f7c2f4", 5, 8945, false, "2023-06-03"),
    ("3958dc9e-737f-4377-85e9-fec4b6a6442i", 2, 8945, true, "2023-06-18"),
    ("3958dc9e-712f-4377-85e9-fec4b6a6442j", 0, 8945, true, "2023-10-04"),
    ("3958dc9e-737f-4377-85e9-fec4b6a6442k", 2, 1000, false, "2022-06-05"),
];

const REVENUE: [(&str, u64); 12] = [
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

/// Customers, invoices and monthly revenue shown when no data source is
/// configured.
#[derive(Debug, Clone)]
pub struct PlaceholderData {
    pub customers: Vec<Customer>,
    pub invoices: Vec<Invoice>,
    pub revenue: Vec<Revenue>,
}

impl PlaceholderData {
    pub fn load() -> Self {
        let customers: Vec<Customer> = CUSTOMERS
            .iter()
            .map(|&(id, name, email, image_url)| Customer {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                image_url: image_url.to_string(),
            })
            .collect();

        let invoices = INVOICES
            .iter()
            .map(|&(id, customer, amount, paid, date)| Invoice {
                id: id.to_string(),
                customer_id: customers[customer].id.clone(),
                amount,
                status: if paid {
                    InvoiceStatus::Paid
                } else {
                    InvoiceStatus::Pending
                },
                date: date.to_string(),
            })
            .collect();

        let revenue = REVENUE
            .iter()
            .map(|&(month, amount)| Revenue::new(month, amount))
            .collect();

        Self {
            customers,
            invoices,
            revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydash_domain::InvoiceSummary;

    #[test]
    fn test_every_invoice_references_a_customer() {
        let data = PlaceholderData::load();
        assert!(data.invoices.iter().all(|invoice| {
            data.customers
                .iter()
                .any(|customer| customer.id == invoice.customer_id)
        }));
    }

    #[test]
    fn test_summary_totals() {
        let data = PlaceholderData::load();
        let summary = InvoiceSummary::compute(&data.invoices, &data.customers);
        assert_eq!(summary.invoice_count, 15);
        assert_eq!(summary.customer_count, 6);
        assert_eq!(summary.total_paid, 108_571);
        assert_eq!(summary.total_pending, 135_577);
    }

    #[test]
    fn test_revenue_covers_a_year() {
        let data = PlaceholderData::load();
        assert_eq!(data.revenue.len(), 12);
        assert_eq!(data.revenue.iter().map(|r| r.revenue).max(), Some(4800));
    }
}
