use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weather conditions for one city at one point in time.
///
/// Field names follow the OpenWeatherMap "current weather" document so the
/// upstream payload deserializes directly. Absent fields default to zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: Measurements,
    pub visibility: i64,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Unix timestamp of the observation
    pub dt: i64,
    pub sys: Sys,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
    pub temp: f64,
    pub pressure: i64,
    pub humidity: i64,
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: i64,
}

/// Station and sun metadata
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type")]
    pub kind: i64,
    pub id: i64,
    pub message: f64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Forecasts for a batch of cities, keyed by the city name as requested.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecasts {
    pub cities: HashMap<String, Forecast>,
}

impl Forecasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, city: impl Into<String>, forecast: Forecast) {
        self.cities.insert(city.into(), forecast);
    }

    pub fn get(&self, city: &str) -> Option<&Forecast> {
        self.cities.get(city)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.13, "lat": 51.51},
        "weather": [{"id": 300, "main": "Drizzle", "description": "light intensity drizzle", "icon": "09d"}],
        "base": "stations",
        "main": {"temp": 280.32, "pressure": 1012, "humidity": 81, "temp_min": 279.15, "temp_max": 281.15},
        "visibility": 10000,
        "wind": {"speed": 4.1, "deg": 80},
        "clouds": {"all": 90},
        "dt": 1485789600,
        "sys": {"type": 1, "id": 5091, "message": 0.0103, "country": "GB", "sunrise": 1485762037, "sunset": 1485794875},
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn test_deserialize_upstream_document() {
        let forecast: Forecast = serde_json::from_str(LONDON).unwrap();

        assert_eq!(forecast.name, "London");
        assert_eq!(forecast.id, 2643743);
        assert_eq!(forecast.weather.len(), 1);
        assert_eq!(forecast.weather[0].main, "Drizzle");
        assert_eq!(forecast.main.pressure, 1012);
        assert_eq!(forecast.sys.kind, 1);
        assert_eq!(forecast.sys.country, "GB");
        assert_eq!(forecast.dt, 1485789600);
    }

    #[test]
    fn test_missing_fields_default() {
        let forecast: Forecast = serde_json::from_str(r#"{"name": "Nowhere"}"#).unwrap();

        assert_eq!(forecast.name, "Nowhere");
        assert!(forecast.weather.is_empty());
        assert_eq!(forecast.main, Measurements::default());
    }

    #[test]
    fn test_sys_type_keeps_wire_name() {
        let forecast: Forecast = serde_json::from_str(LONDON).unwrap();
        let value = serde_json::to_value(&forecast).unwrap();

        assert_eq!(value["sys"]["type"], 1);
        assert!(value["sys"].get("kind").is_none());
    }

    #[test]
    fn test_forecasts_wire_shape() {
        let mut forecasts = Forecasts::new();
        assert!(forecasts.is_empty());

        forecasts.insert("london", serde_json::from_str(LONDON).unwrap());
        let value = serde_json::to_value(&forecasts).unwrap();

        assert_eq!(forecasts.len(), 1);
        assert_eq!(value["cities"]["london"]["name"], "London");
        assert_eq!(forecasts.get("london").map(|f| f.id), Some(2643743));
    }
}
