//! Deliver the bills to the billing endpoint.

use std::time::Duration;

use crate::{Bill, Collector, Context};

/// Transport parameters, applied as-is to the request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryOptions {
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

/// PUT the bills as a JSON array to `url`, in a single attempt.
///
/// Returns whether the endpoint accepted them. Any failure, be it an error status or a transport
/// error (including an empty or malformed `url`), is logged as an error diagnostic.
pub fn send_bills(
    bills: &[Bill],
    url: &str,
    collector: &mut Collector,
    options: &DeliveryOptions,
) -> bool {
    let client = match reqwest::blocking::Client::builder().build() {
        Ok(client) => client,
        Err(err) => {
            collector.error(
                format!("Failed to send invoice, could not create HTTP client: {}", err),
                Context::new().with("error", err.to_string()),
            );
            return false;
        }
    };

    let mut request = client.put(url).json(bills);
    for (name, value) in &options.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    if let Some(timeout) = options.timeout {
        request = request.timeout(timeout);
    }

    match request.send() {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            collector.error(
                format!(
                    "Failed to send invoice, http status code {}, error: {}",
                    status, body
                ),
                Context::new()
                    .with("status", i64::from(status))
                    .with("url", url),
            );
            false
        }
        Err(err) => {
            collector.error(
                format!(
                    "Failed to send invoice, make sure the url provided is correct and there is \
                     internet connection: {}",
                    err
                ),
                Context::new()
                    .with("error", err.to_string())
                    .with("url", url),
            );
            false
        }
    }
}
