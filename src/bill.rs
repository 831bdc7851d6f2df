//! Build the bills of every customer ready to be charged.

use serde::Serialize;

use crate::{Collector, Context, CustomerRecord, NormalizedPurchase, PurchaseMap, Salutation};

/// The bill of a single customer, as sent to the billing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bill {
    pub salutation: Salutation,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub purchases: Vec<NormalizedPurchase>,
}

/// Create one [Bill] per customer, in the order of the customer dataset.
///
/// A customer missing any detail (email, first name, last name, or a known title) is skipped with
/// an error diagnostic. A customer without any purchase is skipped with a debug diagnostic.
pub fn create_bills(
    customers: &[CustomerRecord],
    purchases: &PurchaseMap,
    collector: &mut Collector,
) -> Vec<Bill> {
    let mut bills = Vec::new();
    for customer in customers {
        let customer_id = customer.customer_id;
        let (Some(email), Some(first_name), Some(last_name), Some(title)) = (
            &customer.email,
            &customer.firstname,
            &customer.lastname,
            &customer.title,
        ) else {
            collector.error(
                format!(
                    "A customer {} is missing some details, can't process their purchases",
                    customer_id
                ),
                Context::new().with("customer_id", customer_id),
            );
            continue;
        };
        let salutation = match title.parse::<Salutation>() {
            Ok(salutation) => salutation,
            Err(err) => {
                collector.error(
                    format!(
                        "A customer {} has invalid details, can't process their purchases: {}",
                        customer_id, err
                    ),
                    Context::new()
                        .with("customer_id", customer_id)
                        .with("title", title.as_str()),
                );
                continue;
            }
        };

        let customer_purchases = purchases.purchases_of(customer_id);
        if customer_purchases.is_empty() {
            collector.debug(
                format!(
                    "A customer {} will be ignored because they don't have any purchases",
                    customer_id
                ),
                Context::new().with("customer_id", customer_id),
            );
            continue;
        }

        bills.push(Bill {
            salutation,
            last_name: last_name.clone(),
            first_name: first_name.clone(),
            email: email.clone(),
            purchases: customer_purchases.to_vec(),
        });
    }
    bills
}
