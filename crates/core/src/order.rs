use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Scalar;

/// Payment state of an order as reported by the storefront. Anything that
/// is not one of the known strings, including non-string values, is kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Scalar", into = "Scalar")]
pub enum FinancialStatus {
    Pending,
    Authorized,
    PartiallyPaid,
    Paid,
    PartiallyRefunded,
    Refunded,
    Voided,
    Other(Scalar),
}

impl FinancialStatus {
    fn label(&self) -> Option<&'static str> {
        let label = match self {
            FinancialStatus::Pending => "pending",
            FinancialStatus::Authorized => "authorized",
            FinancialStatus::PartiallyPaid => "partially_paid",
            FinancialStatus::Paid => "paid",
            FinancialStatus::PartiallyRefunded => "partially_refunded",
            FinancialStatus::Refunded => "refunded",
            FinancialStatus::Voided => "voided",
            FinancialStatus::Other(_) => return None,
        };
        Some(label)
    }
}

impl From<Scalar> for FinancialStatus {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => match s.as_str() {
                "pending" => FinancialStatus::Pending,
                "authorized" => FinancialStatus::Authorized,
                "partially_paid" => FinancialStatus::PartiallyPaid,
                "paid" => FinancialStatus::Paid,
                "partially_refunded" => FinancialStatus::PartiallyRefunded,
                "refunded" => FinancialStatus::Refunded,
                "voided" => FinancialStatus::Voided,
                _ => FinancialStatus::Other(Scalar::Text(s)),
            },
            other => FinancialStatus::Other(other),
        }
    }
}

impl From<&str> for FinancialStatus {
    fn from(value: &str) -> Self {
        FinancialStatus::from(Scalar::from(value))
    }
}

impl From<FinancialStatus> for Scalar {
    fn from(value: FinancialStatus) -> Self {
        match value {
            FinancialStatus::Other(raw) => raw,
            known => Scalar::from(known.label().unwrap_or_default()),
        }
    }
}

impl fmt::Display for FinancialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinancialStatus::Other(raw) => fmt::Display::fmt(raw, f),
            known => f.write_str(known.label().unwrap_or_default()),
        }
    }
}

/// Shipping state of an order. Storefronts send `null` for orders with
/// nothing shipped yet, which is modelled as `None` on [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Scalar", into = "Scalar")]
pub enum FulfillmentStatus {
    Fulfilled,
    Partial,
    Unfulfilled,
    Restocked,
    Other(Scalar),
}

impl FulfillmentStatus {
    fn label(&self) -> Option<&'static str> {
        let label = match self {
            FulfillmentStatus::Fulfilled => "fulfilled",
            FulfillmentStatus::Partial => "partial",
            FulfillmentStatus::Unfulfilled => "unfulfilled",
            FulfillmentStatus::Restocked => "restocked",
            FulfillmentStatus::Other(_) => return None,
        };
        Some(label)
    }
}

impl From<Scalar> for FulfillmentStatus {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => match s.as_str() {
                "fulfilled" => FulfillmentStatus::Fulfilled,
                "partial" => FulfillmentStatus::Partial,
                "unfulfilled" => FulfillmentStatus::Unfulfilled,
                "restocked" => FulfillmentStatus::Restocked,
                _ => FulfillmentStatus::Other(Scalar::Text(s)),
            },
            other => FulfillmentStatus::Other(other),
        }
    }
}

impl From<&str> for FulfillmentStatus {
    fn from(value: &str) -> Self {
        FulfillmentStatus::from(Scalar::from(value))
    }
}

impl From<FulfillmentStatus> for Scalar {
    fn from(value: FulfillmentStatus) -> Self {
        match value {
            FulfillmentStatus::Other(raw) => raw,
            known => Scalar::from(known.label().unwrap_or_default()),
        }
    }
}

impl fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentStatus::Other(raw) => fmt::Display::fmt(raw, f),
            known => f.write_str(known.label().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LineItem {
    pub product_id: Option<Scalar>,
    pub title: Option<Scalar>,
    pub sku: Option<Scalar>,
    pub quantity: Option<Scalar>,
    pub price: Option<Scalar>,
    pub variant_id: Option<Scalar>,
    pub variant_title: Option<Scalar>,
    pub total_discount: Option<Scalar>,
    pub upc: Option<Scalar>,
    #[serde(rename = "type")]
    pub product_type: Option<Scalar>,
    pub price_ex_tax: Option<Scalar>,
    pub price_inc_tax: Option<Scalar>,
}

/// Order body of an order webhook. Fields the storefront omits stay `None`;
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Order {
    pub id: Option<Scalar>,
    pub number: Option<Scalar>,
    pub financial_status: Option<FinancialStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
    pub currency: Option<Scalar>,
    pub customer: Option<Customer>,
    pub line_items: Option<Vec<LineItem>>,
}

impl Order {
    pub fn line_item_count(&self) -> usize {
        self.line_items.as_ref().map_or(0, Vec::len)
    }
}
