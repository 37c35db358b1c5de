//! Dashboard entities

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

/// An invoice. `amount` is in cents, `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: u64,
    pub status: InvoiceStatus,
    pub date: String,
}

/// Revenue for one month, in whole dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    pub month: String,
    pub revenue: u64,
}

impl Revenue {
    pub fn new(month: impl Into<String>, revenue: u64) -> Self {
        Self {
            month: month.into(),
            revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_serde() {
        let json = serde_json::to_string(&InvoiceStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
        let status: InvoiceStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, InvoiceStatus::Pending);
    }
}
