use civitas_models::v0::{Category, ReportStatistics, ReportStatus, ReportStatusString};
use civitas_result::Result;

use crate::Report;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Fetch all reports matching the given equality filters
    ///
    /// No ordering is guaranteed; ordering is the caller's concern.
    async fn fetch_reports(
        &self,
        status: Option<&ReportStatusString>,
        category: Option<&Category>,
    ) -> Result<Vec<Report>>;

    /// Replace the status of a report
    async fn update_report_status(&self, id: &str, status: &ReportStatus) -> Result<()>;

    /// Replace the category of a report
    async fn update_report_category(&self, id: &str, category: &Category) -> Result<()>;

    /// Delete a report from the database
    async fn delete_report(&self, id: &str) -> Result<()>;

    /// Count reports by status from a single consistent snapshot
    async fn fetch_report_statistics(&self) -> Result<ReportStatistics>;
}
