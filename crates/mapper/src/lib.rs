//! Maps order webhooks onto analytics track events.
//!
//! The mapper is pure: it reads the inbound envelope, never mutates it, and
//! carries no state between calls.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use ot_core::order::{FinancialStatus, FulfillmentStatus, LineItem, Order};
use ot_core::track::{
    EventName, EventType, OrderProperties, ProductProperties, TrackBatch, TrackEvent,
};

mod error;

pub use error::{InvalidInput, MapperError};

/// Map one `{ payload: { body: <Order> } }` envelope into a batch holding a
/// single track event.
pub fn process_events(input: &Value) -> Result<TrackBatch, MapperError> {
    let body = order_body(input)?;
    let order = Order::deserialize(body)
        .map_err(|e| InvalidInput::MalformedBody(e.to_string()))?;
    let event = map_order(&order)?;
    Ok(TrackBatch::single(event))
}

/// Map an already decoded order.
pub fn map_order(order: &Order) -> Result<TrackEvent, MapperError> {
    let properties = build_properties(order)?;
    let user_id = user_id(order)?;
    let event = event_name(
        order.financial_status.as_ref(),
        order.fulfillment_status.as_ref(),
    );

    debug!(
        order_id = ?properties.order_id,
        %event,
        %user_id,
        line_items = order.line_item_count(),
        "mapped order"
    );

    Ok(TrackEvent {
        kind: EventType::Track,
        event,
        user_id,
        properties,
    })
}

/// Refunds and voids win over everything else; an order only counts as
/// completed once it is both paid and fulfilled.
pub fn event_name(
    financial: Option<&FinancialStatus>,
    fulfillment: Option<&FulfillmentStatus>,
) -> EventName {
    match (financial, fulfillment) {
        (Some(FinancialStatus::Refunded), _) => EventName::OrderRefunded,
        (Some(FinancialStatus::Voided), _) => EventName::OrderCancelled,
        (Some(FinancialStatus::Paid), Some(FulfillmentStatus::Fulfilled)) => {
            EventName::OrderCompleted
        }
        _ => EventName::OrderUpdated,
    }
}

/// Order level fields plus one product projection per line item, in input
/// order. Values are renamed, never computed.
pub fn build_properties(order: &Order) -> Result<OrderProperties, MapperError> {
    let line_items = order
        .line_items
        .as_ref()
        .ok_or(InvalidInput::MissingLineItems)?;

    Ok(OrderProperties {
        order_id: order.id.clone(),
        order_number: order.number.clone(),
        financial_status: order.financial_status.clone(),
        fulfillment_status: order.fulfillment_status.clone(),
        currency: order.currency.clone(),
        products: line_items.iter().map(product_properties).collect(),
    })
}

fn product_properties(item: &LineItem) -> ProductProperties {
    ProductProperties {
        product_id: item.product_id.clone(),
        title: item.title.clone(),
        sku: item.sku.clone(),
        quantity: item.quantity.clone(),
        price: item.price.clone(),
        variant_id: item.variant_id.clone(),
        variant_title: item.variant_title.clone(),
        total_discount: item.total_discount.clone(),
        product_sku: item.sku.clone(),
        product_upc: item.upc.clone(),
        product_type: item.product_type.clone(),
        product_excluding_tax: item.price_ex_tax.clone(),
        product_including_tax: item.price_inc_tax.clone(),
    }
}

fn user_id(order: &Order) -> Result<String, MapperError> {
    let customer = order.customer.as_ref().ok_or(InvalidInput::MissingCustomer)?;
    let id = customer.id.as_ref().ok_or(InvalidInput::MissingCustomerId)?;
    Ok(id.to_string())
}

// Anything falsy counts as no body at all; `{}` is reported separately.
fn order_body(input: &Value) -> Result<&Value, InvalidInput> {
    let payload = input
        .get("payload")
        .filter(|p| !p.is_null())
        .ok_or(InvalidInput::MissingPayload)?;
    let body = payload.get("body").ok_or(InvalidInput::MissingBody)?;

    match body {
        Value::Null | Value::Bool(false) => Err(InvalidInput::MissingBody),
        Value::String(s) if s.is_empty() => Err(InvalidInput::MissingBody),
        Value::Number(n) if n.as_f64() == Some(0.0) => Err(InvalidInput::MissingBody),
        Value::Object(fields) if fields.is_empty() => Err(InvalidInput::EmptyBody),
        _ => Ok(body),
    }
}
