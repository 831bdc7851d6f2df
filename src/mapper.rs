//! Map each customer to the list of their normalized purchases.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    left_join, Collector, Context, Currency, CustomerId, CustomerRecord, ParseError,
    PurchaseRecord,
};

/// A purchase as it appears on a bill.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedPurchase {
    pub product_id: String,
    pub price: f64,
    pub currency: Currency,
    pub quantity: i64,
    /// Kept exactly as it was written in the purchase dataset.
    pub purchased_at: String,
}

impl TryFrom<&PurchaseRecord> for NormalizedPurchase {
    type Error = ParseError;

    fn try_from(record: &PurchaseRecord) -> Result<Self, Self::Error> {
        let currency = record.currency.parse()?;
        let price = record
            .price
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or_else(|| ParseError::InvalidPrice(record.price.clone()))?;
        let quantity = record
            .quantity
            .parse()
            .map_err(|_| ParseError::InvalidQuantity(record.quantity.clone()))?;
        Ok(Self {
            product_id: record.product_id.clone(),
            price,
            currency,
            quantity,
            purchased_at: record.date.clone(),
        })
    }
}

/// Purchases of every known customer, in the order they were made.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PurchaseMap {
    purchases: HashMap<CustomerId, Vec<NormalizedPurchase>>,
}

impl PurchaseMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// The purchases of a customer, empty if they have none or are unknown.
    pub fn purchases_of(&self, customer: CustomerId) -> &[NormalizedPurchase] {
        self.purchases
            .get(&customer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the customer has an entry in the map, even an empty one.
    pub fn contains(&self, customer: CustomerId) -> bool {
        self.purchases.contains_key(&customer)
    }

    /// Number of customers in the map.
    pub fn len(&self) -> usize {
        self.purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    fn entry(&mut self, customer: CustomerId) -> &mut Vec<NormalizedPurchase> {
        self.purchases.entry(customer).or_default()
    }
}

/// Join purchases onto customers, normalizing each of them.
///
/// Returns `None` when there are no customers to map purchases to. Purchases which cannot be
/// normalized are skipped, each one raising a debug diagnostic.
pub fn map_purchases(
    customers: &[CustomerRecord],
    purchases: &[PurchaseRecord],
    collector: &mut Collector,
) -> Option<PurchaseMap> {
    if customers.is_empty() {
        collector.debug(
            "Failed to map purchases to customers, because no customer was found in data.",
            Context::new(),
        );
        return None;
    }

    let mut map = PurchaseMap::new();
    for row in left_join(customers, purchases) {
        let customer_id = row.customer.customer_id;
        let entry = map.entry(customer_id);
        let Some(purchase) = row.purchase else {
            continue;
        };
        match NormalizedPurchase::try_from(purchase) {
            Ok(normalized) => entry.push(normalized),
            Err(err) => collector.debug(
                format!(
                    "Failed to map a purchase to customer with id {}: {}",
                    customer_id, err
                ),
                Context::new()
                    .with("customer_id", customer_id)
                    .with("product_id", purchase.product_id.as_str()),
            ),
        }
    }
    Some(map)
}
