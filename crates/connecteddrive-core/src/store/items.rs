//! Item names in the store.

// Account (read from the item label)
pub const USERNAME: &str = "Bmw_Username";
pub const PASSWORD: &str = "Bmw_Password";
pub const VIN: &str = "Bmw_Vin";

// Session (read from and written to the item state)
pub const ACCESS_TOKEN: &str = "Bmw_accessToken";
pub const TOKEN_EXPIRES: &str = "Bmw_tokenExpires";

// Dynamic vehicle status
pub const DOOR_LOCK_STATE: &str = "Bmw_doorLockState";
pub const CHARGING_LEVEL_HV: &str = "Bmw_chargingLevelHv";
pub const REMAINING_RANGE_ELECTRIC: &str = "Bmw_beRemainingRangeElectric";
pub const MILEAGE: &str = "Bmw_mileage";
pub const REMAINING_RANGE_FUEL: &str = "Bmw_beRemainingRangeFuel";
pub const UPDATE_TIME_CONVERTED: &str = "Bmw_updateTimeConverted";
pub const CHARGING_SYSTEM_STATUS: &str = "Bmw_chargingSystemStatus";
pub const REMAINING_FUEL: &str = "Bmw_remainingFuel";
pub const POSITION_LNG: &str = "Bmw_positionLng";
pub const POSITION_LAT: &str = "Bmw_positionLat";

// Navigation
pub const SOC_MAX: &str = "Bmw_socMax";

// Efficiency, last trip
pub const LAST_TRIP_AVG_CONSUMPTION: &str = "Bmw_lastTripAvgConsum";
pub const LAST_TRIP_AVG_RECUPERATION: &str = "Bmw_lastTripAvgRecup";
