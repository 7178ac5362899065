// src/feed/model.rs

//! Data model for the NVD CVE JSON 1.0 feed
//!
//! Mirrors the upstream schema: a snapshot wraps format/version metadata plus
//! the list of CVE items, and each item carries the CVE body, CPE
//! configurations, and CVSS v2 impact metrics. Unknown fields in the source
//! payload are ignored so upstream schema growth does not break decoding;
//! missing optional sub-structures default to empty.

use serde::{Deserialize, Serialize};

/// One fetched feed: format descriptor, publication timestamp, and records.
///
/// Immutable once decoded; lives for the duration of one check cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    #[serde(rename = "CVE_data_type", default)]
    pub data_type: String,
    #[serde(rename = "CVE_data_format", default)]
    pub data_format: String,
    #[serde(rename = "CVE_data_version", default)]
    pub data_version: String,
    #[serde(rename = "CVE_data_numberOfCVEs", default)]
    pub number_of_cves: String,
    #[serde(rename = "CVE_data_timestamp", default)]
    pub timestamp: String,
    #[serde(rename = "CVE_Items", default)]
    pub items: Vec<CveItem>,
}

/// One vulnerability record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CveItem {
    #[serde(default)]
    pub cve: Cve,
    #[serde(default)]
    pub configurations: Configurations,
    #[serde(default)]
    pub impact: Impact,
    #[serde(rename = "publishedDate", default)]
    pub published_date: String,
    #[serde(rename = "lastModifiedDate", default)]
    pub last_modified_date: String,
}

impl CveItem {
    /// The upstream-assigned identifier (e.g. "CVE-2023-12345")
    pub fn id(&self) -> &str {
        &self.cve.meta.id
    }

    /// First English description, if any
    pub fn summary(&self) -> Option<&str> {
        self.cve
            .description
            .description_data
            .iter()
            .find(|d| d.lang == "en")
            .map(|d| d.value.as_str())
    }

    /// CVSS v2 severity string, if scored
    pub fn severity(&self) -> Option<&str> {
        let severity = self.impact.base_metric_v2.severity.as_str();
        if severity.is_empty() {
            None
        } else {
            Some(severity)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cve {
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub data_format: String,
    #[serde(default)]
    pub data_version: String,
    #[serde(rename = "CVE_data_meta", default)]
    pub meta: DataMeta,
    #[serde(default)]
    pub affects: Affects,
    #[serde(default)]
    pub problemtype: ProblemType,
    #[serde(default)]
    pub references: References,
    #[serde(default)]
    pub description: CveDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataMeta {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "ASSIGNER", default)]
    pub assigner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Affects {
    #[serde(default)]
    pub vendor: Vendor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(default)]
    pub vendor_data: Vec<VendorData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorData {
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub product: Product,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub product_data: Vec<ProductData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub version: ProductVersion,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductVersion {
    #[serde(default)]
    pub version_data: Vec<VersionData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionData {
    #[serde(default)]
    pub version_value: String,
    #[serde(default)]
    pub version_affected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemType {
    #[serde(default)]
    pub problemtype_data: Vec<ProblemTypeData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemTypeData {
    #[serde(default)]
    pub description: Vec<Description>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CveDescription {
    #[serde(default)]
    pub description_data: Vec<Description>,
}

/// A language-tagged text value, used for descriptions and problem types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct References {
    #[serde(default)]
    pub reference_data: Vec<ReferenceData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub refsource: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configurations {
    #[serde(rename = "CVE_data_version", default)]
    pub data_version: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub cpe_match: Vec<CpeMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpeMatch {
    #[serde(default)]
    pub vulnerable: bool,
    #[serde(rename = "cpe23Uri", default)]
    pub cpe23_uri: String,
    #[serde(rename = "versionEndExcluding", default, skip_serializing_if = "Option::is_none")]
    pub version_end_excluding: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    #[serde(rename = "baseMetricV2", default)]
    pub base_metric_v2: BaseMetricV2,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseMetricV2 {
    #[serde(rename = "cvssV2", default)]
    pub cvss_v2: CvssV2,
    #[serde(default)]
    pub severity: String,
    #[serde(rename = "exploitabilityScore", default)]
    pub exploitability_score: f64,
    #[serde(rename = "impactScore", default)]
    pub impact_score: f64,
    #[serde(rename = "obtainAllPrivilege", default)]
    pub obtain_all_privilege: bool,
    #[serde(rename = "obtainUserPrivilege", default)]
    pub obtain_user_privilege: bool,
    #[serde(rename = "obtainOtherPrivilege", default)]
    pub obtain_other_privilege: bool,
    #[serde(rename = "userInteractionRequired", default)]
    pub user_interaction_required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvssV2 {
    #[serde(default)]
    pub version: String,
    #[serde(rename = "vectorString", default)]
    pub vector_string: String,
    #[serde(rename = "accessVector", default)]
    pub access_vector: String,
    #[serde(rename = "accessComplexity", default)]
    pub access_complexity: String,
    #[serde(default)]
    pub authentication: String,
    #[serde(rename = "confidentialityImpact", default)]
    pub confidentiality_impact: String,
    #[serde(rename = "integrityImpact", default)]
    pub integrity_impact: String,
    #[serde(rename = "availabilityImpact", default)]
    pub availability_impact: String,
    #[serde(rename = "baseScore", default)]
    pub base_score: f64,
}
