//! Vehicle API response and request shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `GET /dynamic/v1/{vin}`
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicResponse {
    #[serde(rename = "attributesMap", default)]
    pub attributes_map: Map<String, Value>,
}

/// `GET /navigation/v1/{vin}` is a flat object
pub type NavigationResponse = Map<String, Value>;

/// `GET /efficiency/v1/{vin}`
#[derive(Debug, Clone, Deserialize)]
pub struct EfficiencyResponse {
    #[serde(rename = "lastTripList", default)]
    pub last_trip_list: Vec<TripEntry>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripEntry {
    pub name: String,
    #[serde(rename = "lastTrip", default)]
    pub last_trip: Value,
}

/// `POST /myinfo/v1`
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload<'a> {
    pub vins: [&'a str; 1],
    pub message: &'a str,
    pub subject: &'a str,
}

/// Render a JSON value the way the item store expects it: strings unquoted,
/// everything else in its JSON form.
pub fn value_to_state(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_efficiency_response() {
        let json = r#"{
            "modelType": "BEV",
            "lastTripList": [
                {"name": "LASTTRIP_DELTA_KM", "unit": "KM", "lastTrip": "12.0"},
                {"name": "AVERAGE_ELECTRIC_CONSUMPTION", "unit": "KWH_PER_100KM", "lastTrip": "14.3"}
            ]
        }"#;
        let resp: EfficiencyResponse =
            serde_json::from_str(json).expect("Failed to parse efficiency test JSON");
        assert_eq!(resp.last_trip_list.len(), 2);
        assert_eq!(resp.last_trip_list[1].name, "AVERAGE_ELECTRIC_CONSUMPTION");
        assert_eq!(value_to_state(&resp.last_trip_list[1].last_trip), "14.3");
        assert_eq!(resp.other.get("modelType"), Some(&json!("BEV")));
    }

    #[test]
    fn test_message_payload_shape() {
        let payload = MessagePayload {
            vins: ["WBY1Z21000V123456"],
            message: "Charge before 7",
            subject: "Reminder",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"vins": ["WBY1Z21000V123456"], "message": "Charge before 7", "subject": "Reminder"})
        );
    }

    #[test]
    fn test_value_to_state() {
        assert_eq!(value_to_state(&json!("LOCKED")), "LOCKED");
        assert_eq!(value_to_state(&json!(84)), "84");
        assert_eq!(value_to_state(&json!(true)), "true");
    }
}
