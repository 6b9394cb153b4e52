//! Receiving order storage.

use shared::models::{ReceivingOrder, ReceivingOrderStatus, StockSource};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ReceivingOrderStore {
    orders: HashMap<String, ReceivingOrder>,
}

impl ReceivingOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ReceivingOrder> {
        self.orders.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ReceivingOrder> {
        self.orders.get_mut(id)
    }

    pub fn insert(&mut self, order: ReceivingOrder) {
        self.orders.insert(order.id.clone(), order);
    }

    /// Sum of `IN_TRANSIT` requested quantities for `(destination, sku,
    /// source)`, used to avoid double-ordering while a prior order is still
    /// in flight.
    pub fn in_transit_qty(&self, destination_location_id: &str, sku_id: &str, source: StockSource) -> i64 {
        self.orders
            .values()
            .filter(|o| {
                o.status == ReceivingOrderStatus::InTransit
                    && o.destination_location_id == destination_location_id
                    && o.sku_id == sku_id
                    && o.source == source
            })
            .map(|o| o.requested_qty)
            .sum()
    }

    pub fn all(&self) -> impl Iterator<Item = &ReceivingOrder> {
        self.orders.values()
    }

    pub fn in_transit_count_for_staff(&self, staff_id: &str) -> usize {
        self.orders
            .values()
            .filter(|o| {
                o.status == ReceivingOrderStatus::InTransit
                    && o.assigned_staff_id.as_deref() == Some(staff_id)
            })
            .count()
    }

    pub fn unassigned_in_transit(&self) -> Vec<&ReceivingOrder> {
        let mut orders: Vec<&ReceivingOrder> = self
            .orders
            .values()
            .filter(|o| o.status == ReceivingOrderStatus::InTransit && o.assigned_staff_id.is_none())
            .collect();
        orders.sort_by_key(|o| o.created_at);
        orders
    }
}
