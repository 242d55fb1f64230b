use ot_core::track::EventName;
use ot_mapper::{process_events, InvalidInput};
use proptest::prelude::*;
use serde_json::{json, Value};

fn shirt_order() -> Value {
    json!({
        "payload": {
            "body": {
                "id": 1,
                "number": 1001,
                "financial_status": "paid",
                "fulfillment_status": "fulfilled",
                "currency": "USD",
                "customer": { "id": 55 },
                "line_items": [{
                    "product_id": 9,
                    "title": "Shirt",
                    "sku": "SH1",
                    "quantity": 2,
                    "price": 20,
                    "variant_id": 3,
                    "variant_title": "M",
                    "total_discount": 0,
                    "upc": "123",
                    "type": "apparel",
                    "price_ex_tax": 18,
                    "price_inc_tax": 20
                }]
            }
        }
    })
}

#[test]
fn paid_and_fulfilled_order_becomes_completed_event() {
    let batch = process_events(&shirt_order()).unwrap();
    let out = serde_json::to_value(&batch).unwrap();

    assert_eq!(
        out,
        json!({
            "events": [{
                "type": "track",
                "event": "Order Completed",
                "userId": "55",
                "properties": {
                    "order_id": 1,
                    "order_number": 1001,
                    "financial_status": "paid",
                    "fulfillment_status": "fulfilled",
                    "currency": "USD",
                    "products": [{
                        "productId": 9,
                        "title": "Shirt",
                        "sku": "SH1",
                        "quantity": 2,
                        "price": 20,
                        "variant_id": 3,
                        "variant_title": "M",
                        "total_discount": 0,
                        "productSku": "SH1",
                        "productUpc": "123",
                        "productType": "apparel",
                        "productExcludingTax": 18,
                        "productIncludingTax": 20
                    }]
                }
            }]
        })
    );
}

#[test]
fn refund_takes_precedence_over_fulfilment() {
    let mut input = shirt_order();
    input["payload"]["body"]["financial_status"] = json!("refunded");
    let batch = process_events(&input).unwrap();
    assert_eq!(batch.events[0].event, EventName::OrderRefunded);
}

#[test]
fn voided_order_is_cancelled() {
    let mut input = shirt_order();
    input["payload"]["body"]["financial_status"] = json!("voided");
    input["payload"]["body"]["fulfillment_status"] = Value::Null;
    let batch = process_events(&input).unwrap();
    assert_eq!(batch.events[0].event, EventName::OrderCancelled);
}

#[test]
fn pending_order_is_updated() {
    let mut input = shirt_order();
    input["payload"]["body"]["financial_status"] = json!("pending");
    let batch = process_events(&input).unwrap();
    assert_eq!(batch.events[0].event, EventName::OrderUpdated);
}

#[test]
fn string_money_and_unknown_status_pass_through() {
    let mut input = shirt_order();
    input["payload"]["body"]["financial_status"] = json!("expired");
    input["payload"]["body"]["line_items"][0]["price"] = json!("20.00");
    input["payload"]["body"]["line_items"][0]["upc"] = Value::Null;

    let out = serde_json::to_value(process_events(&input).unwrap()).unwrap();
    let props = &out["events"][0]["properties"];
    assert_eq!(out["events"][0]["event"], json!("Order Updated"));
    assert_eq!(props["financial_status"], json!("expired"));
    assert_eq!(props["products"][0]["price"], json!("20.00"));
    assert_eq!(props["products"][0]["productUpc"], Value::Null);
}

#[test]
fn numeric_codes_and_structured_money_are_not_rejected() {
    let mut input = shirt_order();
    let item = &mut input["payload"]["body"]["line_items"][0];
    item["sku"] = json!(12345);
    item["upc"] = json!(123456789012u64);
    item["price"] = json!({"amount": "20.00", "currency_code": "USD"});
    item["title"] = json!(["Shirt", "Blue"]);

    let out = serde_json::to_value(process_events(&input).unwrap()).unwrap();
    let product = &out["events"][0]["properties"]["products"][0];
    assert_eq!(product["sku"], json!(12345));
    assert_eq!(product["productSku"], json!(12345));
    assert_eq!(product["productUpc"], json!(123456789012u64));
    assert_eq!(product["price"], json!({"amount": "20.00", "currency_code": "USD"}));
    assert_eq!(product["title"], json!(["Shirt", "Blue"]));
}

#[test]
fn non_string_status_falls_through_to_updated() {
    let mut input = shirt_order();
    input["payload"]["body"]["financial_status"] = json!(4);
    input["payload"]["body"]["fulfillment_status"] = json!({"state": "fulfilled"});

    let out = serde_json::to_value(process_events(&input).unwrap()).unwrap();
    let event = &out["events"][0];
    assert_eq!(event["event"], json!("Order Updated"));
    assert_eq!(event["properties"]["financial_status"], json!(4));
    assert_eq!(event["properties"]["fulfillment_status"], json!({"state": "fulfilled"}));
}

#[test]
fn integral_float_customer_id_has_no_fraction() {
    let mut input = shirt_order();
    input["payload"]["body"]["customer"]["id"] = json!(55.0);
    let batch = process_events(&input).unwrap();
    assert_eq!(batch.events[0].user_id, "55");

    input["payload"]["body"]["customer"]["id"] = json!(55.5);
    let batch = process_events(&input).unwrap();
    assert_eq!(batch.events[0].user_id, "55.5");
}

#[test]
fn empty_envelopes_are_invalid_input() {
    for input in [json!({}), json!({"payload": {}}), json!({"payload": {"body": null}})] {
        let err = process_events(&input).unwrap_err();
        assert!(
            matches!(
                err.reason(),
                InvalidInput::MissingPayload | InvalidInput::MissingBody
            ),
            "{input} gave {err}"
        );
    }
}

#[test]
fn mapping_leaves_input_untouched_and_is_repeatable() {
    let input = shirt_order();
    let before = input.clone();
    let first = process_events(&input).unwrap();
    let second = process_events(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(input, before);
}

fn customer_id() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u64>().prop_map(|id| json!(id)),
        any::<i64>().prop_map(|id| json!(id)),
        "[a-z0-9_]{1,12}".prop_map(|id| json!(id)),
    ]
}

fn line_item() -> impl Strategy<Value = Value> {
    (any::<u32>(), "[A-Z]{2}[0-9]{1,4}", 1u32..100).prop_map(|(product_id, sku, quantity)| {
        json!({
            "product_id": product_id,
            "sku": sku,
            "quantity": quantity,
            "price": "9.99",
        })
    })
}

fn status() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("paid")),
        Just(json!("pending")),
        Just(json!("refunded")),
        Just(json!("voided")),
        Just(json!("fulfilled")),
        Just(json!("unfulfilled")),
    ]
}

proptest! {
    #[test]
    fn every_valid_order_yields_one_event_with_all_products(
        cust in customer_id(),
        items in prop::collection::vec(line_item(), 0..8),
        financial in status(),
        fulfillment in status(),
    ) {
        let input = json!({
            "payload": {
                "body": {
                    "id": 7,
                    "financial_status": financial,
                    "fulfillment_status": fulfillment,
                    "customer": { "id": cust.clone() },
                    "line_items": items.clone(),
                }
            }
        });

        let batch = process_events(&input).unwrap();
        prop_assert_eq!(batch.events.len(), 1);

        let event = &batch.events[0];
        let expected_user = match &cust {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        prop_assert_eq!(&event.user_id, &expected_user);

        let products = &event.properties.products;
        prop_assert_eq!(products.len(), items.len());
        for (product, item) in products.iter().zip(&items) {
            let out = serde_json::to_value(product).unwrap();
            prop_assert_eq!(&out["productId"], &item["product_id"]);
            prop_assert_eq!(&out["sku"], &item["sku"]);
            prop_assert_eq!(&out["productSku"], &item["sku"]);
            prop_assert_eq!(&out["quantity"], &item["quantity"]);
        }
    }
}
