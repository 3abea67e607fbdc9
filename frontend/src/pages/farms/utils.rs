use serde_json::Value;

use crate::api::{Boundary, Farm, FarmPayload};

/// Outer ring of the first `Polygon` (or the first polygon of the first
/// `MultiPolygon`) in a GeoJSON `FeatureCollection`.
pub fn extract_polygon(geojson: &Value) -> Option<Vec<[f64; 2]>> {
    if geojson.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return None;
    }
    let features = geojson.get("features")?.as_array()?;
    let geometry = features.iter().find_map(|feature| {
        let geometry = feature.get("geometry")?;
        match geometry.get("type").and_then(Value::as_str) {
            Some("Polygon") | Some("MultiPolygon") => Some(geometry),
            _ => None,
        }
    })?;
    let coordinates = geometry.get("coordinates")?;
    let ring = match geometry.get("type").and_then(Value::as_str)? {
        "Polygon" => coordinates.get(0)?,
        _ => coordinates.get(0)?.get(0)?,
    };
    serde_json::from_value(ring.clone()).ok()
}

pub fn parse_geojson(raw: &str) -> Result<Boundary, String> {
    let value: Value =
        serde_json::from_str(raw).map_err(|_| "Error reading GeoJSON file".to_string())?;
    extract_polygon(&value)
        .map(Boundary)
        .ok_or_else(|| "GeoJSON does not contain valid polygon coordinates.".to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FarmDraft {
    pub name: String,
    pub location: String,
    pub boundaries: Boundary,
    pub description: String,
}

impl FarmDraft {
    pub fn from_farm(farm: &Farm) -> Self {
        Self {
            name: farm.name.clone(),
            location: farm.location.clone(),
            boundaries: farm.boundaries.clone(),
            description: farm.description.clone().unwrap_or_default(),
        }
    }

    pub fn into_payload(self, user_id: Option<String>) -> Result<FarmPayload, String> {
        if self.name.trim().is_empty()
            || self.location.trim().is_empty()
            || self.boundaries.len() < 3
        {
            return Err(
                "Please fill all fields and ensure boundaries are a valid GeoJSON polygon."
                    .to_string(),
            );
        }
        Ok(FarmPayload {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            boundaries: self.boundaries,
            description: self.description,
            user_id,
        })
    }
}

/// Replaces the farm with the same id, or appends it.
pub fn upsert_farm(farms: &mut Vec<Farm>, farm: Farm) {
    match farms.iter_mut().find(|existing| existing.id == farm.id) {
        Some(existing) => *existing = farm,
        None => farms.push(farm),
    }
}

pub fn remove_farm(farms: &mut Vec<Farm>, farm_id: &str) {
    farms.retain(|farm| farm.id != farm_id);
}

pub fn describe_boundary(boundary: &Boundary) -> String {
    match boundary.len() {
        0 => "No boundary".to_string(),
        1 => "1 point".to_string(),
        n => format!("{} points", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn farm(id: &str, name: &str) -> Farm {
        Farm {
            id: id.into(),
            name: name.into(),
            location: "Kisumu".into(),
            boundaries: Boundary::default(),
            description: None,
            user_id: None,
        }
    }

    #[test]
    fn extract_polygon_reads_polygon_outer_ring() {
        let geojson = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [1.0, 1.0] } },
                { "type": "Feature", "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]], [[0.2, 0.2], [0.3, 0.2], [0.2, 0.3]]]
                } }
            ]
        });
        let ring = extract_polygon(&geojson).unwrap();
        assert_eq!(ring, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn extract_polygon_reads_first_multipolygon_ring() {
        let geojson = json!({
            "type": "FeatureCollection",
            "features": [{ "type": "Feature", "geometry": {
                "type": "MultiPolygon",
                "coordinates": [[[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0]]], [[[9.0, 9.0], [8.0, 9.0], [8.0, 8.0]]]]
            } }]
        });
        assert_eq!(
            extract_polygon(&geojson).unwrap(),
            vec![[5.0, 5.0], [6.0, 5.0], [6.0, 6.0]]
        );
    }

    #[test]
    fn extract_polygon_rejects_bare_geometry() {
        let geometry = json!({ "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0]]] });
        assert!(extract_polygon(&geometry).is_none());
    }

    #[test]
    fn parse_geojson_reports_readable_errors() {
        assert_eq!(parse_geojson("{").unwrap_err(), "Error reading GeoJSON file");
        assert_eq!(
            parse_geojson(r#"{"type":"FeatureCollection","features":[]}"#).unwrap_err(),
            "GeoJSON does not contain valid polygon coordinates."
        );
    }

    #[test]
    fn draft_requires_name_location_and_polygon() {
        let mut draft = FarmDraft {
            name: "North Field".into(),
            location: "Kisumu".into(),
            boundaries: Boundary(vec![[0.0, 0.0], [1.0, 0.0]]),
            description: String::new(),
        };
        assert!(draft.clone().into_payload(None).is_err());

        draft.boundaries.0.push([1.0, 1.0]);
        let payload = draft.clone().into_payload(Some("u1".into())).unwrap();
        assert_eq!(payload.user_id.as_deref(), Some("u1"));

        draft.location = "  ".into();
        assert!(draft.into_payload(None).is_err());
    }

    #[test]
    fn upsert_replaces_or_appends() {
        let mut farms = vec![farm("f1", "North Field")];
        upsert_farm(&mut farms, farm("f1", "North Field West"));
        assert_eq!(farms.len(), 1);
        assert_eq!(farms[0].name, "North Field West");

        upsert_farm(&mut farms, farm("f2", "River Plot"));
        assert_eq!(farms.len(), 2);

        remove_farm(&mut farms, "f1");
        assert_eq!(farms.len(), 1);
        assert_eq!(farms[0].id, "f2");
    }

    #[test]
    fn draft_from_farm_copies_editable_fields() {
        let mut existing = farm("f1", "North Field");
        existing.description = Some("Maize".into());
        let draft = FarmDraft::from_farm(&existing);
        assert_eq!(draft.name, "North Field");
        assert_eq!(draft.description, "Maize");
    }
}
