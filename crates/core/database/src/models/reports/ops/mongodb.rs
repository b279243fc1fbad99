use bson::to_document;
use civitas_models::v0::{Category, ReportStatistics, ReportStatus, ReportStatusString};
use civitas_result::Result;

use crate::MongoDb;
use crate::Report;

use super::AbstractReports;

static COL: &str = "reports";

#[async_trait]
impl AbstractReports for MongoDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        query!(self, insert_one, COL, &report).map(|_| ())
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all reports matching the given equality filters
    async fn fetch_reports(
        &self,
        status: Option<&ReportStatusString>,
        category: Option<&Category>,
    ) -> Result<Vec<Report>> {
        let mut filter = doc! {};

        if let Some(status) = status {
            filter.insert("status", status.to_string());
        }

        if let Some(category) = category {
            filter.insert("category", category.to_string());
        }

        query!(self, find, COL, filter)
    }

    /// Replace the status of a report
    ///
    /// The status tag and its side fields (rejection reason, close
    /// timestamp) are swapped in a single update so no stale field
    /// survives a transition.
    async fn update_report_status(&self, id: &str, status: &ReportStatus) -> Result<()> {
        let set =
            to_document(status).map_err(|_| create_database_error!("to_document", COL))?;

        let mut unset = doc! {};
        for field in ["rejection_reason", "closed_at"] {
            if !set.contains_key(field) {
                unset.insert(field, 1_i32);
            }
        }

        let mut update = doc! { "$set": set };
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }

        let result = query!(self, update_one_by_id, COL, id, update)?;
        if result.matched_count == 0 {
            Err(create_error!(NotFound))
        } else {
            Ok(())
        }
    }

    /// Replace the category of a report
    async fn update_report_category(&self, id: &str, category: &Category) -> Result<()> {
        let update = doc! {
            "$set": {
                "category": category.to_string()
            }
        };

        let result = query!(self, update_one_by_id, COL, id, update)?;
        if result.matched_count == 0 {
            Err(create_error!(NotFound))
        } else {
            Ok(())
        }
    }

    /// Delete a report from the database
    async fn delete_report(&self, id: &str) -> Result<()> {
        let result = query!(self, delete_one_by_id, COL, id)?;
        if result.deleted_count == 0 {
            Err(create_error!(NotFound))
        } else {
            Ok(())
        }
    }

    /// Count reports by status using a single aggregation command
    async fn fetch_report_statistics(&self) -> Result<ReportStatistics> {
        let documents = query!(
            self,
            aggregate,
            COL,
            vec![doc! {
                "$group": {
                    "_id": "$status",
                    "count": {
                        "$sum": 1_i64
                    }
                }
            }]
        )?;

        let mut stats = ReportStatistics::default();
        for document in documents {
            let count = document.get_i64("count").unwrap_or_default() as u64;

            match document.get_str("_id") {
                Ok("Pending") => stats.pending = count,
                Ok("Verifying") => stats.verifying = count,
                Ok("Solved") => stats.solved = count,
                Ok("Rejected") => stats.rejected = count,
                _ => continue,
            }

            stats.total += count;
        }

        Ok(stats)
    }
}
