//! Response shapes served by the lookup endpoints.
//!
//! Both shapes serialize absent optional fields as `null`. Passthrough fields are kept
//! as opaque JSON objects; the service never inspects their structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A loosely-typed record passed through from the store unmodified.
pub type Record = Map<String, Value>;

/// Lightweight listing entry returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceSummary {
    pub name: String,
    pub summary: Option<String>,
    pub featured: Option<bool>,
    pub url: Option<String>,
}

/// One entry of a substance's flattened interaction list, usually `name` and `status`.
pub type Interaction = BTreeMap<String, String>;

/// Full substance record returned by the detail endpoint.
///
/// `id` is always the string form of the store identifier and is emitted as `_id`,
/// the key existing clients read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub featured: Option<bool>,
    pub roas: Option<Vec<Record>>,
    pub images: Option<Vec<Record>>,
    pub interactions_flat: Option<Vec<Interaction>>,
    #[serde(rename = "addictionPotential")]
    pub addiction_potential: Option<String>,
    pub tolerance: Option<Record>,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRes {
    pub status: String,
}

impl HealthRes {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

/// Body of the 404 and 500 error responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// One problem found while validating request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
}

/// Body of a 422 response: `{"detail": [issue, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationBody {
    pub detail: Vec<ValidationIssue>,
}
