//! Terminal rendering of the dashboard

use colored::Colorize;
use querydash_domain::util::format_cents;
use querydash_domain::{BarChart, Customer, Invoice, InvoiceSummary, Revenue};
use serde::Serialize;

pub const WELCOME: &str =
    "Welcome to your dashboard. Here you can manage your settings and view your data.";

/// Width, in cells, that the largest revenue bar spans.
const CHART_WIDTH: f64 = 40.0;

/// Everything the dashboard shows, ready for text or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub welcome: &'static str,
    pub summary: InvoiceSummary,
    pub revenue: BarChart,
}

impl DashboardView {
    pub fn build(customers: &[Customer], invoices: &[Invoice], revenue: &[Revenue]) -> Self {
        Self {
            welcome: WELCOME,
            summary: InvoiceSummary::compute(invoices, customers),
            revenue: BarChart::from_revenue(revenue, CHART_WIDTH),
        }
    }

    pub fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn render_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "Dashboard".bold().blue()));
        output.push_str(self.welcome);
        output.push_str("\n\n");

        let cards = [
            ("Collected", format_cents(self.summary.total_paid)),
            ("Pending", format_cents(self.summary.total_pending)),
            ("Total Invoices", self.summary.invoice_count.to_string()),
            ("Total Customers", self.summary.customer_count.to_string()),
        ];
        for (title, value) in cards {
            output.push_str(&format!("  {:<16} {}\n", title.dimmed(), value.bold()));
        }

        output.push_str(&format!("\n{}\n", "Recent Revenue".bold()));
        if self.revenue.is_empty() {
            output.push_str(&format!("  {}\n", "No data available.".dimmed()));
            return output;
        }
        for bar in &self.revenue.bars {
            output.push_str(&format!(
                "  {:<4} {} {}\n",
                bar.label,
                bar_cells(bar.height).cyan(),
                format_cents(bar.value * 100).dimmed()
            ));
        }

        output
    }
}

/// Whole cells for a bar height, never fewer than one.
fn bar_cells(height: f64) -> String {
    let cells = (height.round() as usize).max(1);
    "█".repeat(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydash_domain::InvoiceStatus;

    fn sample() -> DashboardView {
        let customers = vec![Customer {
            id: "c1".into(),
            name: "Amy Burns".into(),
            email: "amy@example.com".into(),
            image_url: "/customers/amy-burns.png".into(),
        }];
        let invoices = vec![
            Invoice {
                id: "i1".into(),
                customer_id: "c1".into(),
                amount: 1250,
                status: InvoiceStatus::Paid,
                date: "2023-06-17".into(),
            },
            Invoice {
                id: "i2".into(),
                customer_id: "c1".into(),
                amount: 666,
                status: InvoiceStatus::Pending,
                date: "2023-06-27".into(),
            },
        ];
        let revenue = vec![Revenue::new("Jan", 2000), Revenue::new("Feb", 0)];
        DashboardView::build(&customers, &invoices, &revenue)
    }

    #[test]
    fn test_text_shows_cards_and_bars() {
        colored::control::set_override(false);
        let text = sample().render_text();
        assert!(text.contains(WELCOME));
        assert!(text.contains("$12.50"));
        assert!(text.contains("$6.66"));
        assert!(text.contains(&format!("Jan  {}", "█".repeat(40))));
        // zero revenue still gets a visible bar
        assert!(text.contains("Feb  █ $0.00"));
    }

    #[test]
    fn test_empty_revenue() {
        colored::control::set_override(false);
        let view = DashboardView::build(&[], &[], &[]);
        assert!(view.render_text().contains("No data available."));
    }

    #[test]
    fn test_json_output() {
        let value: serde_json::Value = serde_json::from_str(&sample().render_json()).unwrap();
        assert_eq!(value["summary"]["total_paid"], 1250);
        assert_eq!(value["revenue"]["max_value"], 2000);
        assert_eq!(value["revenue"]["bars"][1]["height"], 1.0);
    }
}
