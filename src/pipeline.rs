//! Run the whole pipeline: load datasets -> map purchases -> create bills -> deliver them.

use std::io::Write;
use std::path::PathBuf;

use crate::{
    create_bills, map_purchases, read_customers, read_purchases, send_bills, Collector, Config,
    Context,
};

/// What a single run works on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub customers: PathBuf,
    pub purchases: PathBuf,
    /// Billing endpoint, falls back on the configured one when absent.
    pub url: Option<String>,
}

/// How far a run went.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// The bills were accepted by the billing endpoint.
    Delivered,
    /// The bills were built, but could not be delivered.
    DeliveryFailed,
    /// An input dataset could not be read, nothing was processed.
    Aborted,
}

/// Run the pipeline, writing its progress to `out`.
///
/// Problems are recorded in `collector`, which the caller is expected to report whatever the
/// outcome of the run.
pub fn run<W: Write>(
    request: &RunRequest,
    config: &Config,
    collector: &mut Collector,
    out: &mut W,
) -> std::io::Result<Outcome> {
    writeln!(out, "Processing customers data...")?;

    let customers = read_customers(&request.customers, collector);
    if customers.is_empty() {
        let path = request.customers.display().to_string();
        collector.error(
            format!(
                "Failed to read customers data from {}, file may not be present",
                path
            ),
            Context::new().with("filepath", path),
        );
        return Ok(Outcome::Aborted);
    }

    let purchases = read_purchases(&request.purchases, collector);
    if purchases.is_empty() {
        let path = request.purchases.display().to_string();
        collector.error(
            format!(
                "Failed to read customers purchases data from {}, file may not be present",
                path
            ),
            Context::new().with("filepath", path),
        );
        return Ok(Outcome::Aborted);
    }
    tracing::info!(
        customers = customers.len(),
        purchases = purchases.len(),
        "datasets loaded"
    );

    let Some(purchase_map) = map_purchases(&customers, &purchases, collector) else {
        return Ok(Outcome::Aborted);
    };

    writeln!(out, "Creating bill...")?;
    let bills = create_bills(&customers, &purchase_map, collector);
    tracing::info!(bills = bills.len(), "bills created");

    writeln!(out, "Sending customers purchases to API...")?;
    let url = match request.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => {
            writeln!(
                out,
                "No Display url is provided, defaulting to environment variable {}",
                crate::config::API_URL
            )?;
            config.api_url.clone().unwrap_or_default()
        }
    };

    if send_bills(&bills, &url, collector, &config.delivery_options()) {
        writeln!(out, "Successfully sent the invoice for payment processing")?;
        Ok(Outcome::Delivered)
    } else {
        writeln!(out, "Failed to send the invoice for payment processing")?;
        Ok(Outcome::DeliveryFailed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dataset::test::inline_csv;
    use crate::{ContextValue, Level};
    use expect_test::{expect, Expect};
    use httpmock::{Method::PUT, MockServer};

    const CUSTOMERS: &str = inline_csv!(
        "customer_id;email;firstname;lastname;title",
        "1;test@test.com;Test;LastTest;1",
        "2;test1@test.com;Test1;LastTest1;2",
        "3;;Test2;LastTest2;",
        "4;test4@test.com;Test4;LastTest4;1",
    );

    const PURCHASES: &str = inline_csv!(
        "customer_id;product_id;quantity;price;currency;date",
        "1;101;1;10.0;USD;2024-12-15",
        "5;102;2;20.0;EUR;2024-12-17",
        "2;201;3;15.5;USD;2024-12-17",
    );

    struct Datasets {
        dir: tempfile::TempDir,
    }

    impl Datasets {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("customers.csv"), CUSTOMERS).unwrap();
            std::fs::write(dir.path().join("purchases.csv"), PURCHASES).unwrap();
            Self { dir }
        }

        fn request(&self, url: Option<String>) -> RunRequest {
            RunRequest {
                customers: self.dir.path().join("customers.csv"),
                purchases: self.dir.path().join("purchases.csv"),
                url,
            }
        }
    }

    fn check_run(
        request: &RunRequest,
        config: &Config,
        collector: &mut Collector,
        expected_outcome: Outcome,
        expect: Expect,
    ) {
        let mut out = vec![];
        let outcome = run(request, config, collector, &mut out).unwrap();
        assert_eq!(outcome, expected_outcome);
        expect.assert_eq(&String::from_utf8(out).unwrap());
    }

    #[test]
    fn full_run() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT).path("/bills");
            then.status(200);
        });
        let datasets = Datasets::new();
        let mut collector = Collector::new();

        check_run(
            &datasets.request(Some(server.url("/bills"))),
            &Config::default(),
            &mut collector,
            Outcome::Delivered,
            expect![[r#"
                Processing customers data...
                Creating bill...
                Sending customers purchases to API...
                Successfully sent the invoice for payment processing
            "#]],
        );
        mock.assert();
        // Customer 3 is incomplete, customer 4 has no purchases
        assert_eq!(collector.count(Level::Error), 1);
        assert_eq!(collector.count(Level::Debug), 1);
    }

    #[test]
    fn url_defaults_to_configuration() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT).path("/configured");
            then.status(200);
        });
        let datasets = Datasets::new();
        let config = Config {
            api_url: Some(server.url("/configured")),
            ..Default::default()
        };

        check_run(
            &datasets.request(None),
            &config,
            &mut Collector::new(),
            Outcome::Delivered,
            expect![[r#"
                Processing customers data...
                Creating bill...
                Sending customers purchases to API...
                No Display url is provided, defaulting to environment variable API_URL
                Successfully sent the invoice for payment processing
            "#]],
        );
        mock.assert();
    }

    #[test]
    fn no_url_at_all() {
        let datasets = Datasets::new();
        let mut collector = Collector::new();

        check_run(
            &datasets.request(None),
            &Config::default(),
            &mut collector,
            Outcome::DeliveryFailed,
            expect![[r#"
                Processing customers data...
                Creating bill...
                Sending customers purchases to API...
                No Display url is provided, defaulting to environment variable API_URL
                Failed to send the invoice for payment processing
            "#]],
        );
        // Incomplete customer, then delivery
        assert_eq!(collector.count(Level::Error), 2);
    }

    #[test]
    fn missing_customers_aborts() {
        let datasets = Datasets::new();
        let mut request = datasets.request(None);
        request.customers = datasets.dir.path().join("missing.csv");
        let mut collector = Collector::new();

        check_run(
            &request,
            &Config::default(),
            &mut collector,
            Outcome::Aborted,
            expect![[r#"
                Processing customers data...
            "#]],
        );
        assert_eq!(collector.records().len(), 1);
        let record = &collector.records()[0];
        assert_eq!(record.level, Level::Error);
        assert_eq!(
            record.additional.get("filepath"),
            Some(&ContextValue::Text(request.customers.display().to_string()))
        );
    }

    #[test]
    fn empty_purchases_aborts() {
        let datasets = Datasets::new();
        std::fs::write(
            datasets.dir.path().join("purchases.csv"),
            "customer_id;product_id;quantity;price;currency;date\n",
        )
        .unwrap();
        let mut collector = Collector::new();

        check_run(
            &datasets.request(None),
            &Config::default(),
            &mut collector,
            Outcome::Aborted,
            expect![[r#"
                Processing customers data...
            "#]],
        );
        assert_eq!(collector.records().len(), 1);
        assert!(collector.records()[0]
            .message
            .starts_with("Failed to read customers purchases data from"));
    }
}
