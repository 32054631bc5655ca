use std::time::Duration;

use reqwest::Client;
use shared::domain::{ActiveProgram, Customer, Report};
use thiserror::Error;
use tracing::info;

pub mod protocol;

use protocol::{
    Record, RecordsQuery, RecordsQueryResponse, ReportDefinition, SortField, SortOrder,
};

pub const DEFAULT_BASE_URL: &str = "https://api.quickbase.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Field ids in the programs table.
const PROGRAM_FID_RECORD_ID: u32 = 3;
const PROGRAM_FID_NAME: u32 = 6;
const PROGRAM_FID_CUSTOMER_CODE: u32 = 11;
const PROGRAM_FID_STATUS: u32 = 17;
const PROGRAM_FID_YEAR: u32 = 111;

// Field ids in the customers table.
const CUSTOMER_FID_NAME: u32 = 6;
const CUSTOMER_FID_CODE: u32 = 9;

/// Matches any status containing "Active", including suffixed variants
/// like "Active*".
const ACTIVE_STATUS_FILTER: &str = "{17.CT.'Active'}OR{17.CT.'Active*'}";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("quickbase request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed quickbase response: {context}")]
    MalformedResponse { context: String },
}

impl UpstreamError {
    fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context: context.into(),
        }
    }
}

/// Table identifiers for the three record sets, supplied by the caller.
#[derive(Debug, Clone)]
pub struct TableIds {
    pub reports: String,
    pub programs: String,
    pub customers: String,
}

/// Read-only client for the three Quickbase record sets. Authorization is
/// an explicit constructor parameter; every request carries the realm
/// hostname and user-token headers. Requests are bounded by a timeout so a
/// hung upstream call fails fast instead of stalling the whole run.
pub struct QuickbaseClient {
    http: Client,
    base_url: String,
    realm_hostname: String,
    user_token: String,
}

impl QuickbaseClient {
    pub fn new(
        base_url: impl Into<String>,
        realm_hostname: impl Into<String>,
        user_token: impl Into<String>,
    ) -> Result<Self, UpstreamError> {
        Self::with_timeout(base_url, realm_hostname, user_token, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        realm_hostname: impl Into<String>,
        user_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            realm_hostname: realm_hostname.into(),
            user_token: user_token.into(),
        })
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("QB-Realm-Hostname", &self.realm_hostname)
            .header("Authorization", format!("QB-USER-TOKEN {}", self.user_token))
    }

    /// Link to a saved report in the realm, derived from its query id.
    fn report_link(&self, table_id: &str, qid: &str) -> String {
        format!(
            "https://{}/db/{}?a=q&qid={}",
            self.realm_hostname, table_id, qid
        )
    }

    /// Fetches every report definition for the given table and derives the
    /// navigable link for each. No retry; any transport or status failure
    /// surfaces as [`UpstreamError`].
    pub async fn fetch_reports(&self, table_id: &str) -> Result<Vec<Report>, UpstreamError> {
        let definitions: Vec<ReportDefinition> = self
            .authed(self.http.get(format!("{}/v1/reports", self.base_url)))
            .query(&[("tableId", table_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let reports = definitions
            .into_iter()
            .map(|def| Report {
                link: self.report_link(table_id, &def.id),
                name: def.name,
                qid: def.id,
            })
            .collect::<Vec<_>>();

        info!(table_id, count = reports.len(), "fetched report definitions");
        Ok(reports)
    }

    /// Fetches programs whose status field contains "Active", sorted by
    /// record id ascending, and derives each program's join key as
    /// `"<program name> <year>"`.
    pub async fn fetch_active_programs(
        &self,
        table_id: &str,
    ) -> Result<Vec<ActiveProgram>, UpstreamError> {
        let query = RecordsQuery {
            from: table_id.to_string(),
            select: vec![
                PROGRAM_FID_RECORD_ID,
                PROGRAM_FID_NAME,
                PROGRAM_FID_CUSTOMER_CODE,
                PROGRAM_FID_STATUS,
                PROGRAM_FID_YEAR,
            ],
            filter: Some(ACTIVE_STATUS_FILTER.to_string()),
            sort_by: vec![SortField {
                field_id: PROGRAM_FID_RECORD_ID,
                order: SortOrder::Asc,
            }],
        };

        let response = self.run_records_query(&query).await?;
        let programs = response
            .data
            .iter()
            .map(|record| {
                let name = field_text(record, PROGRAM_FID_NAME)?;
                let year = field_text(record, PROGRAM_FID_YEAR)?;
                Ok(ActiveProgram {
                    customer_code: field_text(record, PROGRAM_FID_CUSTOMER_CODE)?,
                    program_key: format!("{name} {year}"),
                    report_link: None,
                })
            })
            .collect::<Result<Vec<_>, UpstreamError>>()?;

        info!(table_id, count = programs.len(), "fetched active programs");
        Ok(programs)
    }

    /// Fetches every customer's name and code, unfiltered.
    pub async fn fetch_customers(&self, table_id: &str) -> Result<Vec<Customer>, UpstreamError> {
        let query = RecordsQuery {
            from: table_id.to_string(),
            select: vec![CUSTOMER_FID_NAME, CUSTOMER_FID_CODE],
            filter: None,
            sort_by: Vec::new(),
        };

        let response = self.run_records_query(&query).await?;
        let customers = response
            .data
            .iter()
            .map(|record| {
                Ok(Customer {
                    name: field_text(record, CUSTOMER_FID_NAME)?,
                    code: field_text(record, CUSTOMER_FID_CODE)?,
                })
            })
            .collect::<Result<Vec<_>, UpstreamError>>()?;

        info!(table_id, count = customers.len(), "fetched customers");
        Ok(customers)
    }

    /// Runs the three independent fetches concurrently. The first failure
    /// aborts the whole run; there is no partial result.
    pub async fn fetch_all(
        &self,
        tables: &TableIds,
    ) -> Result<(Vec<Report>, Vec<ActiveProgram>, Vec<Customer>), UpstreamError> {
        tokio::try_join!(
            self.fetch_reports(&tables.reports),
            self.fetch_active_programs(&tables.programs),
            self.fetch_customers(&tables.customers),
        )
    }

    async fn run_records_query(
        &self,
        query: &RecordsQuery,
    ) -> Result<RecordsQueryResponse, UpstreamError> {
        let response = self
            .authed(self.http.post(format!("{}/v1/records/query", self.base_url)))
            .json(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

fn field_text(record: &Record, field_id: u32) -> Result<String, UpstreamError> {
    let field = record
        .get(&field_id.to_string())
        .ok_or_else(|| UpstreamError::malformed(format!("record missing field {field_id}")))?;
    field
        .as_text()
        .ok_or_else(|| UpstreamError::malformed(format!("field {field_id} has no text value")))
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
