//! Vehicle status query.
//!
//! Reads the dynamic, navigation and efficiency endpoints one after another
//! and publishes the interesting fields to the item store. A failing
//! endpoint marks the whole query as a communication error but does not stop
//! the remaining endpoints from being read.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::VehicleClient;
use crate::models::{value_to_state, EfficiencyResponse};
use crate::status::ExitStatus;
use crate::store::{items, publish, ItemStore};

/// `attributesMap` key to item, published when the key is present
const DYNAMIC_ITEMS: &[(&str, &str)] = &[
    ("door_lock_state", items::DOOR_LOCK_STATE),
    ("chargingLevelHv", items::CHARGING_LEVEL_HV),
    ("beRemainingRangeElectric", items::REMAINING_RANGE_ELECTRIC),
    ("mileage", items::MILEAGE),
    ("beRemainingRangeFuel", items::REMAINING_RANGE_FUEL),
    ("chargingSystemStatus", items::CHARGING_SYSTEM_STATUS),
    ("remaining_fuel", items::REMAINING_FUEL),
];

/// `lastTripList` entry name to item
const LAST_TRIP_ITEMS: &[(&str, &str)] = &[
    ("AVERAGE_ELECTRIC_CONSUMPTION", items::LAST_TRIP_AVG_CONSUMPTION),
    ("AVERAGE_RECUPERATED_ENERGY_PER_100_KM", items::LAST_TRIP_AVG_RECUPERATION),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryReport {
    pub status: ExitStatus,
    /// Every raw key/value received, in endpoint order
    pub received: Vec<(String, String)>,
    /// Item updates derived from the response
    pub updates: Vec<(&'static str, String)>,
}

pub fn dynamic_updates(attributes: &Map<String, Value>) -> Vec<(&'static str, String)> {
    let mut updates: Vec<(&'static str, String)> = DYNAMIC_ITEMS
        .iter()
        .filter_map(|(key, item)| attributes.get(*key).map(|v| (*item, value_to_state(v))))
        .collect();

    if let Some(date) = attributes.get("updateTime_converted_date") {
        let time = attributes
            .get("updateTime_converted_time")
            .map(value_to_state)
            .unwrap_or_default();
        let converted = format!("{} {}", value_to_state(date), time);
        updates.push((items::UPDATE_TIME_CONVERTED, converted.trim_end().to_string()));
    }

    // Position is only meaningful as a pair
    if let (Some(lng), Some(lat)) = (attributes.get("gps_lng"), attributes.get("gps_lat")) {
        updates.push((items::POSITION_LNG, value_to_state(lng)));
        updates.push((items::POSITION_LAT, value_to_state(lat)));
    }

    updates
}

pub fn navigation_updates(navigation: &Map<String, Value>) -> Vec<(&'static str, String)> {
    navigation
        .get("socMax")
        .map(|soc| vec![(items::SOC_MAX, value_to_state(soc))])
        .unwrap_or_default()
}

pub fn efficiency_updates(efficiency: &EfficiencyResponse) -> Vec<(&'static str, String)> {
    efficiency
        .last_trip_list
        .iter()
        .filter_map(|entry| {
            LAST_TRIP_ITEMS
                .iter()
                .find(|(name, _)| *name == entry.name)
                .map(|(_, item)| (*item, value_to_state(&entry.last_trip)))
        })
        .collect()
}

fn raw_pairs(map: &Map<String, Value>) -> impl Iterator<Item = (String, String)> + '_ {
    map.iter().map(|(k, v)| (k.clone(), value_to_state(v)))
}

/// Query all endpoints and publish the derived items.
pub async fn query(api: &VehicleClient, store: &dyn ItemStore) -> TelemetryReport {
    let mut report = TelemetryReport {
        status: ExitStatus::Success,
        received: Vec::new(),
        updates: Vec::new(),
    };

    match api.fetch_dynamic().await {
        Ok(dynamic) => {
            report.received.extend(raw_pairs(&dynamic.attributes_map));
            report.updates.extend(dynamic_updates(&dynamic.attributes_map));
        }
        Err(e) => {
            warn!(endpoint = "dynamic", error = %e, "Vehicle query failed");
            report.status = e.exit_status();
        }
    }

    match api.fetch_navigation().await {
        Ok(navigation) => {
            report.received.extend(raw_pairs(&navigation));
            report.updates.extend(navigation_updates(&navigation));
        }
        Err(e) => {
            warn!(endpoint = "navigation", error = %e, "Vehicle query failed");
            report.status = e.exit_status();
        }
    }

    match api.fetch_efficiency().await {
        Ok(efficiency) => {
            report.received.extend(raw_pairs(&efficiency.other));
            report.received.extend(efficiency.last_trip_list.iter().map(|entry| {
                (entry.name.clone(), value_to_state(&entry.last_trip))
            }));
            report.updates.extend(efficiency_updates(&efficiency));
        }
        Err(e) => {
            warn!(endpoint = "efficiency", error = %e, "Vehicle query failed");
            report.status = e.exit_status();
        }
    }

    for (item, value) in &report.updates {
        publish(store, item, value).await;
    }
    debug!(
        updates = report.updates.len(),
        status = %report.status,
        "Vehicle query finished"
    );

    report
}
