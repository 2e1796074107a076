//! Managed device as listed by the console API

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A firewall or other managed device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier; the API sends either a string or a number
    #[serde(deserialize_with = "string_or_number")]
    pub device_id: String,
    pub device_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// High-availability state as reported by the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ha_state: Option<String>,
}

impl Device {
    /// Whether this device belongs to `vendor` (ASCII case-insensitive)
    pub fn is_vendor(&self, vendor: &str) -> bool {
        self.vendor
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case(vendor))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "device_id must be a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_device_id() {
        let device: Device = serde_json::from_value(json!({
            "device_id": 42,
            "device_name": "fw-edge-1",
            "vendor": "paloalto"
        }))
        .unwrap();
        assert_eq!(device.device_id, "42");
        assert!(device.is_vendor("PaloAlto"));
        assert_eq!(device.ha_state, None);
    }

    #[test]
    fn test_missing_vendor() {
        let device: Device =
            serde_json::from_value(json!({"device_id": "a1", "device_name": "sw"})).unwrap();
        assert!(!device.is_vendor("paloalto"));
    }

    #[test]
    fn test_bad_device_id() {
        let result: Result<Device, _> =
            serde_json::from_value(json!({"device_id": [1], "device_name": "x"}));
        assert!(result.is_err());
    }
}
