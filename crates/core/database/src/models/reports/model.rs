use civitas_models::v0::{
    self, Category, DataCreateReport, ReportStatistics, ReportStatus, ReportStatusString,
};
use civitas_result::Result;
use iso8601_timestamp::Timestamp;

use crate::Database;

/// Minimum length for citizen comments
pub const MIN_COMMENT_LENGTH: usize = 10;

/// Minimum length for rejection reasons and deletion justifications
pub const MIN_REASON_LENGTH: usize = 10;

auto_derived!(
    /// Citizen-submitted infrastructure report
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Category of the reported problem
        pub category: Category,
        /// Free-text description provided by the citizen
        pub comment: String,
        /// User-supplied reference text for the location
        pub location_label: String,
        /// Display address derived from reverse geocoding
        pub address: String,
        /// Latitude of the reported problem
        pub lat: f64,
        /// Longitude of the reported problem
        pub lng: f64,
        /// Id of the stored photo
        pub photo_id: String,
        /// Contact email provided for follow-up
        #[serde(skip_serializing_if = "Option::is_none")]
        pub contact_email: Option<String>,
        /// Status of the report
        #[serde(flatten)]
        pub status: ReportStatus,
        /// When this report was submitted
        pub created_at: Timestamp,
    }
);

impl Report {
    /// Create a new report from a citizen submission
    ///
    /// Every report starts out Pending; the address must already be
    /// resolved by the caller.
    pub async fn create(db: &Database, data: DataCreateReport, address: String) -> Result<Report> {
        if data.comment.trim().chars().count() < MIN_COMMENT_LENGTH {
            return Err(create_error!(FailedValidation {
                error: format!("comment must be at least {} characters", MIN_COMMENT_LENGTH),
            }));
        }

        if data.photo_id.trim().is_empty() {
            return Err(create_error!(FailedValidation {
                error: "a photo reference is required".to_string(),
            }));
        }

        let report = Report {
            id: ulid::Ulid::new().to_string(),
            category: data.category,
            comment: data.comment,
            location_label: data.location_label,
            address,
            lat: data.lat,
            lng: data.lng,
            photo_id: data.photo_id,
            contact_email: data.contact_email,
            status: ReportStatus::Pending {},
            created_at: Timestamp::now_utc(),
        };

        db.insert_report(&report).await?;
        Ok(report)
    }

    /// Fetch a report by its id
    pub async fn fetch(db: &Database, id: &str) -> Result<Report> {
        db.fetch_report(id).await
    }

    /// List reports matching the given filters, most recent first
    ///
    /// Reflects current database state on every call.
    pub async fn query(
        db: &Database,
        status: Option<ReportStatusString>,
        category: Option<Category>,
    ) -> Result<Vec<Report>> {
        let mut reports = db.fetch_reports(status.as_ref(), category.as_ref()).await?;
        reports.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(reports)
    }

    /// Count reports by status from a single consistent snapshot
    pub async fn statistics(db: &Database) -> Result<ReportStatistics> {
        db.fetch_report_statistics().await
    }

    /// Transition this report to a new status
    ///
    /// Any status may move to any other; self-transitions succeed as
    /// no-ops. Rejecting requires a reason of at least
    /// [`MIN_REASON_LENGTH`] characters, which lives inside the Rejected
    /// status and is discarded whenever the report moves elsewhere.
    pub async fn update_status(
        &mut self,
        db: &Database,
        status: ReportStatusString,
        rejection_reason: Option<String>,
    ) -> Result<()> {
        let status = match status {
            ReportStatusString::Pending => ReportStatus::Pending {},
            ReportStatusString::Verifying => ReportStatus::Verifying {},
            ReportStatusString::Solved => ReportStatus::Solved {
                closed_at: Some(Timestamp::now_utc()),
            },
            ReportStatusString::Rejected => {
                let reason = rejection_reason.as_deref().map(str::trim).unwrap_or("");
                if reason.chars().count() < MIN_REASON_LENGTH {
                    return Err(create_error!(ReasonTooShort {
                        min: MIN_REASON_LENGTH
                    }));
                }

                ReportStatus::Rejected {
                    rejection_reason: reason.to_string(),
                    closed_at: Some(Timestamp::now_utc()),
                }
            }
        };

        db.update_report_status(&self.id, &status).await?;
        self.status = status;
        Ok(())
    }

    /// Assign a different category to this report
    pub async fn update_category(&mut self, db: &Database, category: Category) -> Result<()> {
        db.update_report_category(&self.id, &category).await?;
        self.category = category;
        Ok(())
    }

    /// Permanently remove this report
    ///
    /// The justification is validated here but persisted nowhere; the
    /// caller is responsible for writing it to the audit log.
    pub async fn delete(&self, db: &Database, justification: &str) -> Result<()> {
        if justification.trim().chars().count() < MIN_REASON_LENGTH {
            return Err(create_error!(ReasonTooShort {
                min: MIN_REASON_LENGTH
            }));
        }

        db.delete_report(&self.id).await?;
        info!("Deleted report {}.", self.id);
        Ok(())
    }

    /// Convert to API representation
    ///
    /// The contact email is only included for admin-capability readers.
    pub fn into_v0(self, include_contact: bool) -> v0::Report {
        v0::Report {
            id: self.id,
            category: self.category,
            comment: self.comment,
            location_label: self.location_label,
            address: self.address,
            lat: self.lat,
            lng: self.lng,
            photo_id: self.photo_id,
            contact_email: if include_contact {
                self.contact_email
            } else {
                None
            },
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use civitas_models::v0::{
        Category, DataCreateReport, ReportStatus, ReportStatusString,
    };
    use civitas_result::ErrorType;

    use crate::Report;

    fn submission(comment: &str) -> DataCreateReport {
        DataCreateReport {
            category: Category::PublicLighting,
            comment: comment.to_string(),
            location_label: "Corner of 5th and Main".to_string(),
            lat: 4.60971,
            lng: -74.08175,
            photo_id: "photo".to_string(),
            contact_email: Some("citizen@example.com".to_string()),
            address: None,
        }
    }

    #[async_std::test]
    async fn create_starts_pending_and_round_trips() {
        database_test!(|db| async move {
            let report = Report::create(
                &db,
                submission("The street light has been out for a week."),
                "Main St 123".to_string(),
            )
            .await
            .unwrap();

            assert_eq!(report.status, ReportStatus::Pending {});

            let fetched = Report::fetch(&db, &report.id).await.unwrap();
            assert_eq!(fetched, report);
            assert_eq!(fetched.address, "Main St 123");
            assert_eq!(
                fetched.contact_email.as_deref(),
                Some("citizen@example.com")
            );
        });
    }

    #[async_std::test]
    async fn create_rejects_short_comment() {
        database_test!(|db| async move {
            let error = Report::create(&db, submission("too short"), "Main St".to_string())
                .await
                .unwrap_err();

            assert!(matches!(
                error.error_type,
                ErrorType::FailedValidation { .. }
            ));
            assert!(Report::query(&db, None, None).await.unwrap().is_empty());
        });
    }

    #[async_std::test]
    async fn rejection_requires_a_reason() {
        database_test!(|db| async move {
            let mut report = Report::create(
                &db,
                submission("Broken light on the north side."),
                "Main St".to_string(),
            )
            .await
            .unwrap();

            let error = report
                .update_status(&db, ReportStatusString::Rejected, Some("short".to_string()))
                .await
                .unwrap_err();
            assert!(matches!(
                error.error_type,
                ErrorType::ReasonTooShort { min: 10 }
            ));

            // Store must be untouched
            let fetched = Report::fetch(&db, &report.id).await.unwrap();
            assert_eq!(fetched.status, ReportStatus::Pending {});

            let error = report
                .update_status(&db, ReportStatusString::Rejected, None)
                .await
                .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::ReasonTooShort { .. }));
        });
    }

    #[async_std::test]
    async fn leaving_rejected_discards_the_reason() {
        database_test!(|db| async move {
            let mut report = Report::create(
                &db,
                submission("Water main leaking onto the sidewalk."),
                "Main St".to_string(),
            )
            .await
            .unwrap();

            report
                .update_status(
                    &db,
                    ReportStatusString::Rejected,
                    Some("duplicate of #123456".to_string()),
                )
                .await
                .unwrap();

            let fetched = Report::fetch(&db, &report.id).await.unwrap();
            match &fetched.status {
                ReportStatus::Rejected {
                    rejection_reason, ..
                } => assert_eq!(rejection_reason, "duplicate of #123456"),
                status => panic!("expected Rejected, got {status:?}"),
            }

            report
                .update_status(&db, ReportStatusString::Solved, None)
                .await
                .unwrap();

            let fetched = Report::fetch(&db, &report.id).await.unwrap();
            assert!(matches!(fetched.status, ReportStatus::Solved { .. }));
        });
    }

    #[async_std::test]
    async fn self_transition_is_an_idempotent_no_op() {
        database_test!(|db| async move {
            let mut report = Report::create(
                &db,
                submission("Overflowing bin at the park entrance."),
                "Main St".to_string(),
            )
            .await
            .unwrap();

            report
                .update_status(&db, ReportStatusString::Pending, None)
                .await
                .unwrap();
            report
                .update_status(&db, ReportStatusString::Pending, None)
                .await
                .unwrap();

            let fetched = Report::fetch(&db, &report.id).await.unwrap();
            assert_eq!(fetched.status, ReportStatus::Pending {});
        });
    }

    #[async_std::test]
    async fn category_can_be_reassigned() {
        database_test!(|db| async move {
            let mut report = Report::create(
                &db,
                submission("Pothole swallowing bicycle wheels."),
                "Main St".to_string(),
            )
            .await
            .unwrap();

            report
                .update_category(&db, Category::RoadsTraffic)
                .await
                .unwrap();

            let fetched = Report::fetch(&db, &report.id).await.unwrap();
            assert_eq!(fetched.category, Category::RoadsTraffic);
        });
    }

    #[async_std::test]
    async fn deletion_requires_a_justification() {
        database_test!(|db| async move {
            let report = Report::create(
                &db,
                submission("Fallen tree blocking the cycle path."),
                "Main St".to_string(),
            )
            .await
            .unwrap();

            let error = report.delete(&db, "short").await.unwrap_err();
            assert!(matches!(error.error_type, ErrorType::ReasonTooShort { .. }));
            assert!(Report::fetch(&db, &report.id).await.is_ok());

            report.delete(&db, "removing duplicate entry").await.unwrap();

            let error = Report::fetch(&db, &report.id).await.unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotFound));
        });
    }

    #[async_std::test]
    async fn unknown_ids_are_not_found() {
        database_test!(|db| async move {
            let error = Report::fetch(&db, "01J00000000000000000000000")
                .await
                .unwrap_err();
            assert!(matches!(error.error_type, ErrorType::NotFound));
        });
    }

    #[async_std::test]
    async fn query_filters_and_orders_newest_first() {
        database_test!(|db| async move {
            let mut ids = vec![];
            for comment in [
                "First streetlight out on Elm.",
                "Second streetlight out on Oak.",
                "Third streetlight out on Pine.",
            ] {
                let report = Report::create(&db, submission(comment), "Main St".to_string())
                    .await
                    .unwrap();
                ids.push(report.id);
                // Distinct creation timestamps for a stable order
                async_std::task::sleep(Duration::from_millis(5)).await;
            }

            let mut third = Report::fetch(&db, &ids[2]).await.unwrap();
            third
                .update_status(&db, ReportStatusString::Verifying, None)
                .await
                .unwrap();

            let all = Report::query(&db, None, None).await.unwrap();
            assert_eq!(
                all.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
                vec![ids[2].as_str(), ids[1].as_str(), ids[0].as_str()]
            );

            let pending = Report::query(&db, Some(ReportStatusString::Pending), None)
                .await
                .unwrap();
            assert_eq!(
                pending.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
                vec![ids[1].as_str(), ids[0].as_str()]
            );

            let lighting = Report::query(&db, None, Some(Category::PublicLighting))
                .await
                .unwrap();
            assert_eq!(lighting.len(), 3);

            let none = Report::query(&db, None, Some(Category::PublicTransport))
                .await
                .unwrap();
            assert!(none.is_empty());
        });
    }

    #[async_std::test]
    async fn statistics_reconcile_with_queries() {
        database_test!(|db| async move {
            let statuses = [
                None,
                None,
                Some(ReportStatusString::Verifying),
                Some(ReportStatusString::Solved),
                Some(ReportStatusString::Rejected),
            ];

            for (index, status) in statuses.iter().enumerate() {
                let mut report = Report::create(
                    &db,
                    submission(&format!("Streetlight number {index} has failed.")),
                    "Main St".to_string(),
                )
                .await
                .unwrap();

                if let Some(status) = status {
                    report
                        .update_status(
                            &db,
                            *status,
                            Some("not a municipal responsibility".to_string()),
                        )
                        .await
                        .unwrap();
                }
            }

            let stats = Report::statistics(&db).await.unwrap();
            assert_eq!(stats.total, 5);
            assert_eq!(stats.pending, 2);
            assert_eq!(stats.verifying, 1);
            assert_eq!(stats.solved, 1);
            assert_eq!(stats.rejected, 1);

            for (status, expected) in [
                (ReportStatusString::Pending, stats.pending),
                (ReportStatusString::Verifying, stats.verifying),
                (ReportStatusString::Solved, stats.solved),
                (ReportStatusString::Rejected, stats.rejected),
            ] {
                let matching = Report::query(&db, Some(status), None).await.unwrap();
                assert_eq!(matching.len() as u64, expected);
            }
        });
    }
}
