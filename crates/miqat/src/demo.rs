//! Bundled demo data.
//!
//! The back-office API client is not part of this app; pages are fed
//! from JSON fixtures compiled into the binary.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use miqat_core::{ChartDatum, Company, Package, Pilgrim};

const PILGRIMS_JSON: &str = include_str!("../../../assets/demo/pilgrims.json");
const PACKAGE_JSON: &str = include_str!("../../../assets/demo/package.json");
const COMPANY_JSON: &str = include_str!("../../../assets/demo/company.json");
const ANALYTICS_JSON: &str = include_str!("../../../assets/demo/analytics.json");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AnalyticsFixture {
    registrations_per_month: Vec<ChartDatum>,
    transactions_per_bank: Vec<ChartDatum>,
}

/// Everything the pages display.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoData {
    pub pilgrims: Vec<Pilgrim>,
    pub package: Package,
    pub company: Company,
    pub registrations_per_month: Vec<ChartDatum>,
    pub transactions_per_bank: Vec<ChartDatum>,
}

impl DemoData {
    /// Parse the bundled fixtures.  A broken fixture is logged and
    /// replaced by an empty value so the rest of the app still loads.
    pub fn load() -> Self {
        let analytics: AnalyticsFixture = parse("analytics.json", ANALYTICS_JSON);
        Self {
            pilgrims: parse("pilgrims.json", PILGRIMS_JSON),
            package: parse("package.json", PACKAGE_JSON),
            company: parse("company.json", COMPANY_JSON),
            registrations_per_month: analytics.registrations_per_month,
            transactions_per_bank: analytics.transactions_per_bank,
        }
    }
}

fn parse<T: DeserializeOwned + Default>(name: &str, raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("demo fixture {name} is invalid: {e}");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_parse() {
        let data = DemoData::load();
        assert_eq!(data.pilgrims.len(), 6);
        assert!(!data.package.name.is_empty());
        assert!(data.company.name.contains('&'));
        assert_eq!(data.registrations_per_month.len(), 6);
        assert_eq!(data.transactions_per_bank.len(), 4);
    }

    #[test]
    fn pilgrim_ids_are_unique() {
        let data = DemoData::load();
        let mut ids: Vec<u64> = data.pilgrims.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), data.pilgrims.len());
    }

    #[test]
    fn broken_fixture_falls_back_to_default() {
        let pilgrims: Vec<Pilgrim> = parse("broken.json", "{not json");
        assert!(pilgrims.is_empty());
    }
}
