//! Shaping of raw store records into response models.

use bson::Bson;
use serde::Deserialize;
use subdex_core::{
    document::FromBson,
    error::{DocumentStoreError, DocumentStoreResult},
};

use crate::model::{Interaction, Record, SubstanceDetail, SubstanceSummary};

/// A substance record as stored, before identifier stringification.
#[derive(Debug, Deserialize)]
struct StoredSubstance {
    #[serde(rename = "_id")]
    id: Bson,
    name: String,
    url: Option<String>,
    summary: Option<String>,
    featured: Option<bool>,
    roas: Option<Vec<Record>>,
    images: Option<Vec<Record>>,
    interactions_flat: Option<Vec<Interaction>>,
    #[serde(rename = "addictionPotential")]
    addiction_potential: Option<String>,
    tolerance: Option<Record>,
}

/// Renders a store identifier as a string; ObjectIds become their hex form.
pub fn stringify_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn require_name(name: &str) -> DocumentStoreResult<()> {
    if name.is_empty() {
        return Err(DocumentStoreError::InvalidDocument("substance record has an empty name".into()));
    }

    Ok(())
}

/// Projects a record onto the summary fields; any other field is ignored.
pub fn to_summary(record: Bson) -> DocumentStoreResult<SubstanceSummary> {
    let summary = SubstanceSummary::from_bson(record)?;
    require_name(&summary.name)?;

    Ok(summary)
}

/// Shapes a full record, stringifying its identifier and passing the loose fields through.
pub fn to_detail(record: Bson) -> DocumentStoreResult<SubstanceDetail> {
    let stored = StoredSubstance::from_bson(record)?;
    require_name(&stored.name)?;

    Ok(SubstanceDetail {
        id: stringify_id(&stored.id),
        name: stored.name,
        url: stored.url,
        summary: stored.summary,
        featured: stored.featured,
        roas: stored.roas,
        images: stored.images,
        interactions_flat: stored.interactions_flat,
        addiction_potential: stored.addiction_potential,
        tolerance: stored.tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn summary_copies_modeled_fields_only() {
        let summary = to_summary(Bson::Document(doc! {
            "name": "Caffeine",
            "summary": "A stimulant.",
            "featured": true,
            "url": "https://example.org/caffeine",
            "roas": [ { "name": "oral" } ],
        }))
        .unwrap();

        assert_eq!(summary, SubstanceSummary {
            name: "Caffeine".into(),
            summary: Some("A stimulant.".into()),
            featured: Some(true),
            url: Some("https://example.org/caffeine".into()),
        });
    }

    #[test]
    fn summary_missing_fields_become_none() {
        let summary = to_summary(Bson::Document(doc! { "name": "LSD", "featured": Bson::Null })).unwrap();

        assert_eq!(summary.summary, None);
        assert_eq!(summary.featured, None);
        assert_eq!(summary.url, None);
    }

    #[test]
    fn summary_serializes_absent_fields_as_null() {
        let summary = to_summary(Bson::Document(doc! { "name": "LSD" })).unwrap();

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "name": "LSD", "summary": null, "featured": null, "url": null }),
        );
    }

    #[test]
    fn empty_or_missing_name_is_invalid() {
        assert!(matches!(
            to_summary(Bson::Document(doc! { "name": "" })),
            Err(DocumentStoreError::InvalidDocument(_))
        ));
        assert!(matches!(
            to_summary(Bson::Document(doc! { "summary": "nameless" })),
            Err(DocumentStoreError::Serialization(_))
        ));
    }

    #[test]
    fn detail_stringifies_object_id() {
        let oid = ObjectId::new();
        let detail = to_detail(Bson::Document(doc! { "_id": oid, "name": "LSD" })).unwrap();

        assert_eq!(detail.id, oid.to_hex());
        assert_eq!(detail.id.len(), 24);
    }

    #[test]
    fn other_identifiers_are_stringified_too() {
        assert_eq!(stringify_id(&Bson::String("lsd-1".into())), "lsd-1");
        assert_eq!(stringify_id(&Bson::Int32(42)), "42");
    }

    #[test]
    fn detail_passes_loose_fields_through() {
        let oid = ObjectId::new();
        let detail = to_detail(Bson::Document(doc! {
            "_id": oid,
            "name": "Caffeine",
            "roas": [ { "name": "oral", "dose": { "units": "mg", "light": { "min": 10, "max": 50 } } } ],
            "images": [ { "thumb": "a.png", "image": "b.png" } ],
            "interactions_flat": [ { "name": "Alcohol", "status": "Caution" } ],
            "addictionPotential": "moderate",
            "tolerance": { "full": "with prolonged use" },
            "internal_note": "not modeled",
        }))
        .unwrap();

        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["_id"], json!(oid.to_hex()));
        assert_eq!(json["roas"][0]["dose"]["light"]["max"], json!(50));
        assert_eq!(json["images"][0]["thumb"], json!("a.png"));
        assert_eq!(json["interactions_flat"], json!([{ "name": "Alcohol", "status": "Caution" }]));
        assert_eq!(json["addictionPotential"], json!("moderate"));
        assert_eq!(json["tolerance"], json!({ "full": "with prolonged use" }));
        assert!(json.get("internal_note").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn interaction_entries_pass_through_as_string_maps() {
        let detail = to_detail(Bson::Document(doc! {
            "_id": ObjectId::new(),
            "name": "LSD",
            "interactions_flat": [
                { "name": "Lithium", "status": "Dangerous", "note": "seizures" },
                { "name": "Cannabis" },
            ],
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&detail).unwrap()["interactions_flat"],
            json!([
                { "name": "Lithium", "note": "seizures", "status": "Dangerous" },
                { "name": "Cannabis" }
            ]),
        );
    }

    #[test]
    fn detail_without_identifier_is_rejected() {
        assert!(to_detail(Bson::Document(doc! { "name": "LSD" })).is_err());
    }
}
