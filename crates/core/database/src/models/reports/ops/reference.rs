use civitas_models::v0::{Category, ReportStatistics, ReportStatus, ReportStatusString};
use civitas_result::Result;

use crate::ReferenceDb;
use crate::Report;

use super::AbstractReports;

#[async_trait]
impl AbstractReports for ReferenceDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.contains_key(&report.id) {
            Err(create_database_error!("insert", "reports"))
        } else {
            reports.insert(report.id.to_string(), report.clone());
            Ok(())
        }
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all reports matching the given equality filters
    async fn fetch_reports(
        &self,
        status: Option<&ReportStatusString>,
        category: Option<&Category>,
    ) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        Ok(reports
            .values()
            .filter(|report| {
                status.map_or(true, |status| report.status.status_string() == *status)
            })
            .filter(|report| category.map_or(true, |category| report.category == *category))
            .cloned()
            .collect())
    }

    /// Replace the status of a report
    async fn update_report_status(&self, id: &str, status: &ReportStatus) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.get_mut(id) {
            report.status = status.clone();
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Replace the category of a report
    async fn update_report_category(&self, id: &str, category: &Category) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.get_mut(id) {
            report.category = *category;
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Delete a report from the database
    async fn delete_report(&self, id: &str) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Count reports by status under a single lock acquisition
    async fn fetch_report_statistics(&self) -> Result<ReportStatistics> {
        let reports = self.reports.lock().await;
        let mut stats = ReportStatistics::default();

        for report in reports.values() {
            match report.status.status_string() {
                ReportStatusString::Pending => stats.pending += 1,
                ReportStatusString::Verifying => stats.verifying += 1,
                ReportStatusString::Solved => stats.solved += 1,
                ReportStatusString::Rejected => stats.rejected += 1,
            }

            stats.total += 1;
        }

        Ok(stats)
    }
}
