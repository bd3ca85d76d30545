//! Product lifecycles: creation and finish of each product instance.

use std::collections::HashMap;

use serde::Serialize;

use ps_core::Activity;

use crate::prepared::PreparedLog;

/// One product instance that was both created and finished.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductLifecycle {
    pub product:         String,
    pub product_type:    String,
    pub start_time:      f64,
    pub end_time:        f64,
    /// `end_time - start_time`.
    pub throughput_time: f64,
}

/// Pair creation and finish markers per product instance.
///
/// Lifecycles are returned in finish order.  A product still in the system
/// at the horizon has no lifecycle.  A finish without a creation record is
/// logged at `warn` and skipped.
pub fn product_lifecycles(prepared: &PreparedLog) -> Vec<ProductLifecycle> {
    let mut created: HashMap<&str, f64> = HashMap::new();
    let mut lifecycles = Vec::new();

    for row in prepared.rows() {
        let (Some(product), Some(product_type)) =
            (row.event.product.as_deref(), row.product_type.as_deref())
        else {
            continue;
        };
        match row.event.activity {
            Activity::Created => {
                created.entry(product).or_insert(row.event.time);
            }
            Activity::Finished => match created.get(product) {
                Some(&start_time) => lifecycles.push(ProductLifecycle {
                    product:         product.to_owned(),
                    product_type:    product_type.to_owned(),
                    start_time,
                    end_time:        row.event.time,
                    throughput_time: row.event.time - start_time,
                }),
                None => tracing::warn!(
                    product,
                    time = row.event.time,
                    "finished product has no creation record; skipped"
                ),
            },
            _ => {}
        }
    }
    lifecycles
}
