//! The record kinds served by the hub API.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::view::FilterField;
use crate::view::FilterSpec;

/// One kind of record the hub publishes.
///
/// Each kind has its own REST collection (`/api/{path}`), admin collection
/// (`/api/admin/{path}`) and CSV export (`/api/{path}/export/csv`), and its
/// own filterable and searchable fields.
///
/// # Example
///
/// ```
/// use avhub_lib::resource::ResourceKind;
///
/// let kind: ResourceKind = "curbside".parse().unwrap();
/// assert_eq!(kind, ResourceKind::Curbside);
/// assert_eq!(kind.filter_spec().field_for("zone_type"), Some("regulation_type"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// AV legislation and executive orders.
    Policies,
    /// Operator deployments and pilots.
    Deployments,
    /// Grant and funding programs.
    Funding,
    /// Reported safety incidents.
    Safety,
    /// Reports, studies and guidance documents.
    Resources,
    /// Curbside and pick-up/drop-off regulations.
    Curbside,
}

const POLICY_FILTERS: &[FilterField] = &[
    FilterField::same("status"),
    FilterField::same("jurisdiction"),
    FilterField::same("state_code"),
];
const DEPLOYMENT_FILTERS: &[FilterField] = &[
    FilterField::same("status"),
    FilterField::same("operator"),
    FilterField::same("city"),
    FilterField::same("state"),
];
const FUNDING_FILTERS: &[FilterField] = &[
    FilterField::same("status"),
    FilterField::same("agency"),
    FilterField::same("funding_type"),
];
const SAFETY_FILTERS: &[FilterField] = &[
    FilterField::same("severity"),
    FilterField::same("manufacturer"),
    FilterField::same("incident_type"),
    FilterField::same("state"),
];
const RESOURCE_FILTERS: &[FilterField] = &[
    FilterField::same("resource_type"),
    FilterField::mapped("category", "topic_area"),
];
const CURBSIDE_FILTERS: &[FilterField] = &[
    FilterField::same("status"),
    FilterField::same("city"),
    FilterField::same("state"),
    FilterField::mapped("zone_type", "regulation_type"),
];

impl ResourceKind {
    /// All kinds, in navigation order.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Policies,
        ResourceKind::Deployments,
        ResourceKind::Funding,
        ResourceKind::Safety,
        ResourceKind::Resources,
        ResourceKind::Curbside,
    ];

    /// Path segment of the REST collection.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Policies => "policies",
            Self::Deployments => "deployments",
            Self::Funding => "funding",
            Self::Safety => "safety",
            Self::Resources => "resources",
            Self::Curbside => "curbside",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Policies => "Policies & Legislation",
            Self::Deployments => "Deployments",
            Self::Funding => "Funding Programs",
            Self::Safety => "Safety Incidents",
            Self::Resources => "Resources",
            Self::Curbside => "Curbside Regulations",
        }
    }

    /// Plural noun for messages, e.g. "No funding programs found."
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Policies => "policies",
            Self::Deployments => "deployments",
            Self::Funding => "funding programs",
            Self::Safety => "safety incidents",
            Self::Resources => "resources",
            Self::Curbside => "curbside regulations",
        }
    }

    /// File name the server uses for CSV exports.
    pub fn export_file_name(&self) -> String {
        format!("{}.csv", self.path())
    }

    /// Filterable and searchable fields.
    pub fn filter_spec(&self) -> FilterSpec<'static> {
        match self {
            Self::Policies => FilterSpec {
                fields: POLICY_FILTERS,
                search: &["title", "jurisdiction", "summary"],
            },
            Self::Deployments => FilterSpec {
                fields: DEPLOYMENT_FILTERS,
                search: &["operator", "city", "state", "description"],
            },
            Self::Funding => FilterSpec {
                fields: FUNDING_FILTERS,
                search: &["program_name", "agency", "description"],
            },
            Self::Safety => FilterSpec {
                fields: SAFETY_FILTERS,
                search: &["manufacturer", "vehicle_model", "description", "city"],
            },
            Self::Resources => FilterSpec {
                fields: RESOURCE_FILTERS,
                search: &["title", "summary", "author_org"],
            },
            Self::Curbside => FilterSpec {
                fields: CURBSIDE_FILTERS,
                search: &["regulation_type", "city", "state", "description"],
            },
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "policies" | "policy" | "legislation" => Ok(Self::Policies),
            "deployments" | "deployment" => Ok(Self::Deployments),
            "funding" | "funding_programs" => Ok(Self::Funding),
            "safety" | "incidents" | "safety_incidents" => Ok(Self::Safety),
            "resources" | "resource" => Ok(Self::Resources),
            "curbside" | "curbside_regulations" => Ok(Self::Curbside),
            other => Err(ConfigError::UnknownResource(other.to_string())),
        }
    }
}
