use anyhow::Result;
use tracing::{info, warn};

use ot_core::order::{Customer, FinancialStatus, FulfillmentStatus, LineItem, Order};
use ot_core::track::EventName;
use ot_core::{Scalar, WebhookEnvelope};
use ot_mapper::process_events;
use ot_runtime::init_tracing;
use ot_runtime::metrics::{MetricsRegistry, RunTimer};

const FINANCIAL: [&str; 6] = ["pending", "authorized", "paid", "partially_refunded", "refunded", "voided"];
const FULFILLMENT: [Option<&str>; 4] = [None, Some("unfulfilled"), Some("partial"), Some("fulfilled")];

fn synthetic_order(i: u64) -> Order {
    let financial = FINANCIAL[(i % FINANCIAL.len() as u64) as usize];
    let fulfillment = FULFILLMENT[((i / 3) % FULFILLMENT.len() as u64) as usize];
    let customers = 20u64;

    let line_items = (0..(i % 4))
        .map(|n| {
            let cents = 1_000 + (n as i64) * 250;
            LineItem {
                product_id: Some(Scalar::from(100 + n)),
                title: Some(Scalar::from(format!("Item {n}"))),
                sku: Some(Scalar::from(format!("SKU-{i}-{n}"))),
                quantity: Some(Scalar::from(1 + n % 3)),
                price: Some(Scalar::from(format!("{}.{:02}", cents / 100, cents % 100))),
                variant_id: Some(Scalar::from(n)),
                variant_title: Some(Scalar::from("Default")),
                total_discount: Some(Scalar::from("0.00")),
                upc: None,
                product_type: Some(Scalar::from("apparel")),
                price_ex_tax: None,
                price_inc_tax: None,
            }
        })
        .collect();

    Order {
        id: Some(Scalar::from(i)),
        number: Some(Scalar::from(1_000 + i)),
        financial_status: Some(FinancialStatus::from(financial)),
        fulfillment_status: fulfillment.map(FulfillmentStatus::from),
        currency: Some(Scalar::from("USD")),
        customer: Some(Customer {
            id: Some(Scalar::from(i * 7 % customers)),
        }),
        line_items: Some(line_items),
    }
}

fn main() -> Result<()> {
    init_tracing();
    info!("sample_demo starting");

    let metrics = MetricsRegistry::default();
    let timer = RunTimer::start();

    for i in 0..200u64 {
        metrics.inc_received(1);

        // Every 25th delivery arrives without an order body.
        let input = if i % 25 == 24 {
            serde_json::json!({ "payload": {} })
        } else {
            WebhookEnvelope::new(synthetic_order(i)).to_value()?
        };

        match process_events(&input) {
            Ok(batch) => {
                for event in &batch.events {
                    metrics.record_mapped(event.event, event.properties.products.len() as u64);
                }
            }
            Err(err) => {
                warn!(delivery = i, error = %err, "rejected");
                metrics.inc_rejected(1);
            }
        }
    }

    let snapshot = metrics.snapshot();
    for name in EventName::ALL {
        info!(event = %name, count = snapshot.count_for(name), "event distribution");
    }
    info!(
        "{}",
        snapshot.to_json_line("sample_demo", Some(timer.elapsed()))
    );
    info!(?snapshot, "final metrics summary");
    Ok(())
}
