use std::fmt;
use std::str::FromStr;

use iso8601_timestamp::Timestamp;

#[cfg(feature = "validator")]
use validator::Validate;

auto_derived!(
    /// Citizen-submitted infrastructure report
    pub struct Report {
        /// Unique Id
        #[cfg_attr(feature = "serde", serde(rename = "_id"))]
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
        /// Contact email, only present for admin-capability readers
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        pub contact_email: Option<String>,
        /// Status of the report
        #[cfg_attr(feature = "serde", serde(flatten))]
        pub status: ReportStatus,
        /// When this report was submitted
        pub created_at: Timestamp,
    }

    /// Category of a reported problem
    #[derive(Copy, Eq, Hash)]
    pub enum Category {
        #[cfg_attr(feature = "serde", serde(rename = "Roads & Traffic"))]
        RoadsTraffic,
        #[cfg_attr(feature = "serde", serde(rename = "Public Lighting"))]
        PublicLighting,
        #[cfg_attr(feature = "serde", serde(rename = "Water & Sanitation"))]
        WaterSanitation,
        #[cfg_attr(feature = "serde", serde(rename = "Waste & Cleaning"))]
        WasteCleaning,
        #[cfg_attr(feature = "serde", serde(rename = "Parks & Public Spaces"))]
        ParksPublicSpaces,
        #[cfg_attr(feature = "serde", serde(rename = "Electricity & Telecom"))]
        ElectricityTelecom,
        #[cfg_attr(feature = "serde", serde(rename = "Public Buildings"))]
        PublicBuildings,
        #[cfg_attr(feature = "serde", serde(rename = "Urban Security"))]
        UrbanSecurity,
        #[cfg_attr(feature = "serde", serde(rename = "Public Transport"))]
        PublicTransport,
        Other,
    }

    /// Status of the report
    #[cfg_attr(feature = "serde", serde(tag = "status"))]
    pub enum ReportStatus {
        /// Report is waiting for triage
        Pending {},

        /// Report is being verified by an administrator
        Verifying {},

        /// Report was actioned and solved
        Solved {
            #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
            closed_at: Option<Timestamp>,
        },

        /// Report was rejected
        Rejected {
            rejection_reason: String,
            #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
            closed_at: Option<Timestamp>,
        },
    }

    /// Just the status of the report
    #[derive(Copy, Eq, Hash)]
    pub enum ReportStatusString {
        /// Report is waiting for triage
        Pending,

        /// Report is being verified by an administrator
        Verifying,

        /// Report was actioned and solved
        Solved,

        /// Report was rejected
        Rejected,
    }

    /// Counts of reports by status at a single instant
    #[derive(Copy, Eq, Default)]
    #[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
    pub struct ReportStatistics {
        /// Sum of the four status counts
        pub total: u64,
        pub pending: u64,
        pub verifying: u64,
        pub solved: u64,
        pub rejected: u64,
    }

    /// New report submission
    #[cfg_attr(feature = "validator", derive(Validate))]
    pub struct DataCreateReport {
        /// Category of the reported problem
        pub category: Category,
        /// Description of the problem
        #[cfg_attr(feature = "validator", validate(length(min = 10, max = 2000)))]
        pub comment: String,
        /// Reference text for the location
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 128)))]
        pub location_label: String,
        /// Latitude picked on the map
        #[cfg_attr(feature = "validator", validate(range(min = -90.0, max = 90.0)))]
        pub lat: f64,
        /// Longitude picked on the map
        #[cfg_attr(feature = "validator", validate(range(min = -180.0, max = 180.0)))]
        pub lng: f64,
        /// Id of a previously uploaded photo
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 128)))]
        pub photo_id: String,
        /// Optional contact email for follow-up
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        #[cfg_attr(feature = "validator", validate(email))]
        pub contact_email: Option<String>,
        /// Pre-resolved display address, if the client already has one
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        #[cfg_attr(feature = "validator", validate(length(min = 1, max = 256)))]
        pub address: Option<String>,
    }

    /// New status for a report
    pub struct DataEditStatus {
        /// Status to transition to
        pub status: ReportStatusString,
        /// Reason for rejecting the report, required when status is Rejected
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        pub rejection_reason: Option<String>,
    }

    /// New category for a report
    pub struct DataEditCategory {
        /// Category to assign
        pub category: Category,
    }

    /// Justification for permanently removing a report
    pub struct DataDeleteReport {
        /// Why this report is being removed, kept in the audit log only
        pub justification: String,
    }
);

impl Category {
    /// Display string for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RoadsTraffic => "Roads & Traffic",
            Category::PublicLighting => "Public Lighting",
            Category::WaterSanitation => "Water & Sanitation",
            Category::WasteCleaning => "Waste & Cleaning",
            Category::ParksPublicSpaces => "Parks & Public Spaces",
            Category::ElectricityTelecom => "Electricity & Telecom",
            Category::PublicBuildings => "Public Buildings",
            Category::UrbanSecurity => "Urban Security",
            Category::PublicTransport => "Public Transport",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Roads & Traffic" => Ok(Category::RoadsTraffic),
            "Public Lighting" => Ok(Category::PublicLighting),
            "Water & Sanitation" => Ok(Category::WaterSanitation),
            "Waste & Cleaning" => Ok(Category::WasteCleaning),
            "Parks & Public Spaces" => Ok(Category::ParksPublicSpaces),
            "Electricity & Telecom" => Ok(Category::ElectricityTelecom),
            "Public Buildings" => Ok(Category::PublicBuildings),
            "Urban Security" => Ok(Category::UrbanSecurity),
            "Public Transport" => Ok(Category::PublicTransport),
            "Other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

impl ReportStatus {
    /// Reduce this status to its bare name
    pub fn status_string(&self) -> ReportStatusString {
        match self {
            ReportStatus::Pending {} => ReportStatusString::Pending,
            ReportStatus::Verifying {} => ReportStatusString::Verifying,
            ReportStatus::Solved { .. } => ReportStatusString::Solved,
            ReportStatus::Rejected { .. } => ReportStatusString::Rejected,
        }
    }
}

impl fmt::Display for ReportStatusString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportStatusString::Pending => "Pending",
            ReportStatusString::Verifying => "Verifying",
            ReportStatusString::Solved => "Solved",
            ReportStatusString::Rejected => "Rejected",
        })
    }
}

impl FromStr for ReportStatusString {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ReportStatusString::Pending),
            "Verifying" => Ok(ReportStatusString::Verifying),
            "Solved" => Ok(ReportStatusString::Solved),
            "Rejected" => Ok(ReportStatusString::Rejected),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Category, ReportStatus, ReportStatusString};

    #[test]
    fn category_display_strings_round_trip() {
        for category in [
            Category::RoadsTraffic,
            Category::PublicLighting,
            Category::WaterSanitation,
            Category::WasteCleaning,
            Category::ParksPublicSpaces,
            Category::ElectricityTelecom,
            Category::PublicBuildings,
            Category::UrbanSecurity,
            Category::PublicTransport,
            Category::Other,
        ] {
            assert_eq!(Category::from_str(category.as_str()), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(Category::from_str("Potholes").is_err());
        assert!(Category::from_str("roads & traffic").is_err());
    }

    #[test]
    fn status_reduces_to_bare_name() {
        assert_eq!(
            ReportStatus::Rejected {
                rejection_reason: "duplicate of an earlier report".to_string(),
                closed_at: None,
            }
            .status_string(),
            ReportStatusString::Rejected
        );
        assert_eq!(
            ReportStatus::Pending {}.status_string(),
            ReportStatusString::Pending
        );
    }

    #[test]
    fn status_string_parses_exact_names_only() {
        assert_eq!(
            ReportStatusString::from_str("Verifying"),
            Ok(ReportStatusString::Verifying)
        );
        assert!(ReportStatusString::from_str("verifying").is_err());
        assert!(ReportStatusString::from_str("Todos").is_err());
    }
}
