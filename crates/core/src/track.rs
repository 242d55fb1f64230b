//! Outbound analytics track events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::order::{FinancialStatus, FulfillmentStatus};
use crate::{CoreError, Scalar};

/// Semantic name of what happened to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "Order Refunded")]
    OrderRefunded,
    #[serde(rename = "Order Cancelled")]
    OrderCancelled,
    #[serde(rename = "Order Completed")]
    OrderCompleted,
    #[serde(rename = "Order Updated")]
    OrderUpdated,
}

impl EventName {
    pub const ALL: [EventName; 4] = [
        EventName::OrderRefunded,
        EventName::OrderCancelled,
        EventName::OrderCompleted,
        EventName::OrderUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::OrderRefunded => "Order Refunded",
            EventName::OrderCancelled => "Order Cancelled",
            EventName::OrderCompleted => "Order Completed",
            EventName::OrderUpdated => "Order Updated",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope type tag. Only track calls are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Track,
}

/// Per line item projection. `sku` is exposed under both its short and
/// qualified key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductProperties {
    #[serde(rename = "productId")]
    pub product_id: Option<Scalar>,
    pub title: Option<Scalar>,
    pub sku: Option<Scalar>,
    pub quantity: Option<Scalar>,
    pub price: Option<Scalar>,
    pub variant_id: Option<Scalar>,
    pub variant_title: Option<Scalar>,
    pub total_discount: Option<Scalar>,
    #[serde(rename = "productSku")]
    pub product_sku: Option<Scalar>,
    #[serde(rename = "productUpc")]
    pub product_upc: Option<Scalar>,
    #[serde(rename = "productType")]
    pub product_type: Option<Scalar>,
    #[serde(rename = "productExcludingTax")]
    pub product_excluding_tax: Option<Scalar>,
    #[serde(rename = "productIncludingTax")]
    pub product_including_tax: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderProperties {
    pub order_id: Option<Scalar>,
    pub order_number: Option<Scalar>,
    pub financial_status: Option<FinancialStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
    pub currency: Option<Scalar>,
    pub products: Vec<ProductProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackEvent {
    #[serde(rename = "type")]
    pub kind: EventType,
    pub event: EventName,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub properties: OrderProperties,
}

/// What the mapper hands back to the dispatcher: always one event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackBatch {
    pub events: Vec<TrackEvent>,
}

impl TrackBatch {
    pub fn single(event: TrackEvent) -> Self {
        Self { events: vec![event] }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let out = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(out)
    }
}
