//! Load the customer and purchase datasets, and join them together.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{Collector, Context, CustomerId, InputError};

/// A row of the customer dataset. Any detail may be missing (an empty field is read as `None`),
/// completeness is checked when billing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    /// Raw title code, resolved to a salutation when billing.
    pub title: Option<String>,
}

/// A raw row of the purchase dataset. Values are kept as written in the file, so that a bad value
/// only invalidates its own purchase when normalizing it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PurchaseRecord {
    pub customer_id: CustomerId,
    pub product_id: String,
    pub quantity: String,
    pub price: String,
    pub currency: String,
    pub date: String,
}

/// Datasets are semicolon-delimited, with a header row.
pub fn configured_csv_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(b';').trim(csv::Trim::All);
    builder
}

pub fn read_customers(path: &Path, collector: &mut Collector) -> Vec<CustomerRecord> {
    read_dataset(path, collector)
}

pub fn read_purchases(path: &Path, collector: &mut Collector) -> Vec<PurchaseRecord> {
    read_dataset(path, collector)
}

/// A dataset which cannot be opened is considered empty, it is up to the caller to decide
/// whether that is fatal.
fn read_dataset<T: DeserializeOwned>(path: &Path, collector: &mut Collector) -> Vec<T> {
    match open_dataset(path) {
        Ok(reader) => deserialize_rows(reader, &path.display().to_string(), collector),
        Err(err) => {
            tracing::warn!(%err, "dataset treated as empty");
            Vec::new()
        }
    }
}

fn open_dataset(path: &Path) -> Result<csv::Reader<std::fs::File>, InputError> {
    let file = std::fs::File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = configured_csv_reader_builder().from_reader(file);
    reader.headers().map_err(|source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(reader)
}

/// Deserialize every row, skipping the malformed ones.
pub fn deserialize_rows<R: std::io::Read, T: DeserializeOwned>(
    reader: csv::Reader<R>,
    source: &str,
    collector: &mut Collector,
) -> Vec<T> {
    let mut rows = Vec::new();
    for (row, index) in reader.into_deserialize().zip(1_i64..) {
        match row {
            Ok(row) => rows.push(row),
            // Bad rows are reported but should not stop loading the rest of the file
            Err(err) => collector.error(
                format!("Skipping malformed row {} of {}: {}", index, source, err),
                Context::new().with("filepath", source).with("row", index),
            ),
        }
    }
    rows
}

/// A customer, along with one of their purchases if they have any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JoinedRow<'a> {
    pub customer: &'a CustomerRecord,
    pub purchase: Option<&'a PurchaseRecord>,
}

/// Left join of purchases onto customers by id.
///
/// Rows follow the customer order, then the purchase order. A customer without purchases appears
/// once with no purchase, purchases of unknown customers are dropped. Should a customer id be
/// duplicated, only its first occurrence is joined.
pub fn left_join<'a>(
    customers: &'a [CustomerRecord],
    purchases: &'a [PurchaseRecord],
) -> Vec<JoinedRow<'a>> {
    let mut purchases_by_customer: HashMap<CustomerId, Vec<&PurchaseRecord>> = HashMap::new();
    for purchase in purchases {
        purchases_by_customer
            .entry(purchase.customer_id)
            .or_default()
            .push(purchase);
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for customer in customers {
        if !seen.insert(customer.customer_id) {
            continue;
        }
        match purchases_by_customer.get(&customer.customer_id) {
            Some(matching) => rows.extend(matching.iter().map(|purchase| JoinedRow {
                customer,
                purchase: Some(purchase),
            })),
            None => rows.push(JoinedRow {
                customer,
                purchase: None,
            }),
        }
    }
    rows
}
