use serde::{de::Visitor, Deserialize, Deserializer, Serialize};
use std::fmt;

/// One rescue case as the nearby-cases page hands it to the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerDescriptor {
    #[serde(default, deserialize_with = "deserialize_lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_coordinate")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Options accepted by the nearby-cases map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NearbyMapOptions {
    #[serde(default, deserialize_with = "deserialize_lenient_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_coordinate")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub markers: Vec<MarkerDescriptor>,
}

/// The backend sends coordinates as numbers, numeric strings or null.
/// Anything that does not parse becomes `None`.
fn deserialize_lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientCoordinateVisitor;

    impl<'de> Visitor<'de> for LenientCoordinateVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("number, numeric string or null")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trim().parse::<f64>().ok())
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientCoordinateVisitor)
        }
    }

    deserializer.deserialize_any(LenientCoordinateVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_strings_and_null() {
        let options: NearbyMapOptions = serde_json::from_str(
            r#"{
                "lat": "19.0760",
                "lng": 72.8777,
                "markers": [
                    {"title": "Cat on roof", "latitude": 19, "longitude": "72.9", "status": "open"},
                    {"title": "No coords", "latitude": null},
                    {"title": "Garbage", "latitude": "north", "longitude": 1.0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(options.lat, Some(19.076));
        assert_eq!(options.lng, Some(72.8777));
        assert_eq!(options.markers[0].latitude, Some(19.0));
        assert_eq!(options.markers[0].longitude, Some(72.9));
        assert_eq!(options.markers[1].latitude, None);
        assert_eq!(options.markers[1].longitude, None);
        assert_eq!(options.markers[2].latitude, None);
    }

    #[test]
    fn empty_object_is_valid_options() {
        let options: NearbyMapOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, NearbyMapOptions::default());
    }

    #[test]
    fn options_decode_from_an_in_memory_object() {
        let object = serde_json::json!({
            "lat": 12,
            "lng": 77.5,
            "markers": [{"title": "Pup", "latitude": 12.1, "longitude": -3, "status": "open"}]
        });
        let options: NearbyMapOptions = serde_json::from_value(object).unwrap();

        assert_eq!(options.lat, Some(12.0));
        assert_eq!(options.markers[0].longitude, Some(-3.0));
        assert_eq!(options.markers[0].status.as_deref(), Some("open"));
    }
}
