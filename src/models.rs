//! Docker Engine API shapes that rely on raw values to stay forward compatible.
//!
//! Daemons newer than these models send fields that are not declared here;
//! they remain readable through [`Record::raw_values`] and are re-emitted on
//! encode.

use crate::record::{RawValues, RawValuesMut, Record};
use serde::{Deserialize, Serialize};

/// Response of `GET /version`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Version {
    #[serde(rename = "Version")]
    pub version: Option<String>,
    #[serde(rename = "ApiVersion")]
    pub api_version: Option<String>,
    #[serde(rename = "Os")]
    pub os: Option<String>,
    #[serde(rename = "Arch")]
    pub arch: Option<String>,
    #[serde(rename = "GoVersion")]
    pub go_version: Option<String>,
    #[serde(skip)]
    raw: RawValues,
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.api_version == other.api_version
            && self.os == other.os
            && self.arch == other.arch
            && self.go_version == other.go_version
    }
}

impl Record for Version {
    fn raw_values(&self) -> &RawValues {
        &self.raw
    }

    fn raw_values_mut(&mut self) -> RawValuesMut<'_> {
        RawValuesMut::new(&mut self.raw)
    }
}

/// One entry of `GET /containers/json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSummary {
    #[serde(rename = "Id")]
    pub id: Option<String>,
    #[serde(rename = "Names")]
    pub names: Vec<String>,
    #[serde(rename = "Image")]
    pub image: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(skip)]
    raw: RawValues,
}

impl PartialEq for ContainerSummary {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.names == other.names
            && self.image == other.image
            && self.state == other.state
            && self.status == other.status
    }
}

impl Record for ContainerSummary {
    fn raw_values(&self) -> &RawValues {
        &self.raw
    }

    fn raw_values_mut(&mut self) -> RawValuesMut<'_> {
        RawValuesMut::new(&mut self.raw)
    }
}

/// Model selector used by the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Kind {
    Version,
    Container,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use serde_json::json;

    #[test]
    fn test_version_keeps_fields_from_newer_daemons() {
        let input = json!({
            "Version": "27.3.1",
            "ApiVersion": "1.47",
            "Os": "linux",
            "Arch": "amd64",
            "MinAPIVersion": "1.24",
            "Components": [{"Name": "Engine"}]
        });

        let version: Version = Codec::default().from_value(input).unwrap();
        assert_eq!(version.api_version.as_deref(), Some("1.47"));
        assert_eq!(version.go_version, None);
        assert_eq!(version.raw_values().get_str("MinAPIVersion"), Some("1.24"));

        let unbound = Codec::default().unbound_keys(&version).unwrap();
        assert_eq!(unbound, vec!["MinAPIVersion", "Components"]);
    }

    #[test]
    fn test_container_roundtrip_reemits_unknown_fields() {
        let input = json!({
            "Id": "4f2c",
            "Names": ["/web"],
            "Image": "nginx:latest",
            "State": "running",
            "Status": "Up 2 minutes",
            "Labels": {"tier": "frontend"}
        });

        let codec = Codec::default();
        let container: ContainerSummary = codec.from_value(input.clone()).unwrap();
        assert_eq!(container.names, vec!["/web".to_string()]);

        assert_eq!(codec.to_value(&container).unwrap(), input);
    }

    #[test]
    fn test_unset_declared_field_is_refilled_from_captured_value() {
        let codec = Codec::default();
        let mut version: Version = codec
            .from_str(r#"{"Version": "1", "Os": "linux"}"#)
            .unwrap();

        version.os = None;
        let encoded = codec.to_value(&version).unwrap();
        assert_eq!(encoded["Os"], json!("linux"));

        version.raw_values_mut().remove("Os");
        let encoded = codec.to_value(&version).unwrap();
        assert_eq!(encoded["Os"], serde_json::Value::Null);
        assert_eq!(encoded["Version"], json!("1"));
    }

    #[test]
    fn test_equality_ignores_raw_values() {
        let mut a = ContainerSummary {
            id: Some("1".to_string()),
            ..Default::default()
        };
        let b = a.clone();
        a.raw_values_mut().insert("Labels", json!({}));

        assert_eq!(a, b);
    }
}
