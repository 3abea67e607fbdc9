use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::state::session::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login reply. On success the backend puts the session fields at the top
/// level next to `success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LoginResponse {
    /// `None` unless the login succeeded and carried both `userId` and
    /// `accessToken`.
    pub fn into_session(self) -> Option<Session> {
        if !self.success {
            return None;
        }
        serde_json::from_value(Value::Object(self.fields))
            .map_err(|err| log::warn!("Login response is missing session fields: {}", err))
            .ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RefreshResponseBody {
    #[serde(rename = "accessToken")]
    access_token: String,
}

pub(crate) fn parse_refresh_token(body: &str) -> Result<String, serde_json::Error> {
    serde_json::from_str::<RefreshResponseBody>(body).map(|body| body.access_token)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// Polygon outline as `[lng, lat]` pairs.
///
/// The backend stores the outline as a JSON-encoded string but some responses
/// carry it already decoded, so both shapes are accepted. It is always sent
/// back encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundary(pub Vec<[f64; 2]>);

impl Boundary {
    pub fn points(&self) -> &[[f64; 2]] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for Boundary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = serde_json::to_string(&self.0).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for Boundary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Null(()),
            Points(Vec<[f64; 2]>),
            Encoded(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Null(()) => Ok(Boundary::default()),
            Raw::Points(points) => Ok(Boundary(points)),
            Raw::Encoded(raw) if raw.trim().is_empty() => Ok(Boundary::default()),
            Raw::Encoded(raw) => serde_json::from_str(&raw)
                .map(Boundary)
                .map_err(de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub boundaries: Boundary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmPayload {
    pub name: String,
    pub location: String,
    pub boundaries: Boundary,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl From<&Farm> for FarmPayload {
    fn from(farm: &Farm) -> Self {
        Self {
            name: farm.name.clone(),
            location: farm.location.clone(),
            boundaries: farm.boundaries.clone(),
            description: farm.description.clone().unwrap_or_default(),
            user_id: farm.user_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdviRequest {
    pub farm_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviStats {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviResult {
    #[serde(default)]
    pub date: Option<String>,
    pub stats: NdviStats,
    /// URL or data URI of the rendered NDVI raster.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviHistoryEntry {
    pub date: String,
    pub stats: NdviStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn login_response_into_session_requires_success() {
        let failed: LoginResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Invalid credentials"
        }))
        .unwrap();
        assert_eq!(failed.message.as_deref(), Some("Invalid credentials"));
        assert!(failed.into_session().is_none());

        let ok: LoginResponse = serde_json::from_value(json!({
            "success": true,
            "userId": "u1",
            "accessToken": "t1",
            "firstName": "Ada"
        }))
        .unwrap();
        let session = ok.into_session().unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.access_token, "t1");
        assert_eq!(session.first_name.as_deref(), Some("Ada"));
        assert!(!session.extra.contains_key("success"));
    }

    #[wasm_bindgen_test]
    fn login_response_accepts_numeric_user_id() {
        let ok: LoginResponse = serde_json::from_value(json!({
            "success": true,
            "userId": 42,
            "accessToken": "t1"
        }))
        .unwrap();
        assert_eq!(ok.into_session().unwrap().user_id, "42");
    }

    #[wasm_bindgen_test]
    fn login_response_without_token_yields_no_session() {
        let partial: LoginResponse =
            serde_json::from_value(json!({ "success": true, "userId": "u1" })).unwrap();
        assert!(partial.into_session().is_none());
    }

    #[wasm_bindgen_test]
    fn boundary_accepts_encoded_and_decoded_shapes() {
        let decoded: Boundary = serde_json::from_value(json!([[1.0, 2.0], [3.0, 4.0]])).unwrap();
        let encoded: Boundary = serde_json::from_value(json!("[[1.0,2.0],[3.0,4.0]]")).unwrap();
        assert_eq!(decoded, encoded);
        assert_eq!(decoded.len(), 2);

        let blank: Boundary = serde_json::from_value(json!("")).unwrap();
        assert!(blank.is_empty());
    }

    #[wasm_bindgen_test]
    fn boundary_rejects_malformed_string() {
        assert!(serde_json::from_value::<Boundary>(json!("[[1.0]]")).is_err());
        assert!(serde_json::from_value::<Boundary>(json!("north field")).is_err());
    }

    #[wasm_bindgen_test]
    fn farm_payload_serializes_camel_case_with_encoded_boundary() {
        let payload = FarmPayload {
            name: "North Field".into(),
            location: "Kisumu".into(),
            boundaries: Boundary(vec![[34.7, -0.1], [34.8, -0.1], [34.8, -0.2]]),
            description: String::new(),
            user_id: Some("u1".into()),
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["userId"], json!("u1"));
        assert_eq!(v["boundaries"], json!("[[34.7,-0.1],[34.8,-0.1],[34.8,-0.2]]"));
    }

    #[wasm_bindgen_test]
    fn farm_tolerates_missing_optional_fields() {
        let farm: Farm = serde_json::from_value(json!({ "id": "f1", "name": "North Field" })).unwrap();
        assert_eq!(farm.location, "");
        assert!(farm.boundaries.is_empty());
        assert!(farm.description.is_none());
    }

    #[wasm_bindgen_test]
    fn ndvi_request_serializes_iso_date() {
        let req = NdviRequest {
            farm_id: "f1".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({ "farmId": "f1", "date": "2024-06-01" }));
    }

    #[wasm_bindgen_test]
    fn profile_update_omits_passwords_unless_changing() {
        let update = ProfileUpdate {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            old_password: None,
            new_password: None,
        };
        let v = serde_json::to_value(&update).unwrap();
        assert!(v.get("oldPassword").is_none());
        assert!(v.get("newPassword").is_none());
        assert_eq!(v["firstName"], json!("Ada"));
    }

    #[wasm_bindgen_test]
    fn refresh_body_reads_access_token() {
        assert_eq!(parse_refresh_token(r#"{"accessToken":"t2"}"#).unwrap(), "t2");
        assert!(parse_refresh_token(r#"{"refreshToken":"r1"}"#).is_err());
    }
}
