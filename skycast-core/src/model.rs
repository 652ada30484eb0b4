use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// Format weatherapi.com uses for `localtime` and hourly `time`.
const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A city as the search endpoint reports it, before country filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMatch {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
}

/// One entry of the city search result list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub name: String,
    pub region: String,
}

impl From<CityMatch> for SearchResult {
    fn from(city: CityMatch) -> Self {
        Self { id: city.id, name: city.name, region: city.region }
    }
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.region.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}, {}", self.name, self.region)
        }
    }
}

/// Full forecast payload. Every successful fetch replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

impl ForecastSnapshot {
    /// `"<name>, <region>, <country>"`
    pub fn headline(&self) -> String {
        [&self.location.name, &self.location.region, &self.location.country]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn local_time(&self) -> Option<NaiveDateTime> {
        parse_local_time(&self.location.localtime)
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.forecast.forecastday
    }

    /// Daytime is 06:00 to 17:59 local time. Falls back to the API's `is_day`
    /// when `localtime` does not parse.
    pub fn is_day(&self) -> bool {
        match self.local_time() {
            Some(t) => (6..18).contains(&t.hour()),
            None => self.current.is_day != 0,
        }
    }

    /// Category for the current conditions, using local-time daylight.
    pub fn current_condition(&self) -> Condition {
        Condition::from_code(self.current.condition.code, self.is_day())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionInfo {
    pub text: String,
    #[serde(default)]
    pub icon: String,
    pub code: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: u8,
}

impl AirQuality {
    /// Banded US EPA index. An index of 0 means no reading.
    pub fn category(&self) -> Option<AirQualityCategory> {
        match self.us_epa_index {
            0 => None,
            1 => Some(AirQualityCategory::Good),
            2 => Some(AirQualityCategory::Moderate),
            3 => Some(AirQualityCategory::Unhealthy),
            _ => Some(AirQualityCategory::Severe),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirQualityCategory {
    Good,
    Moderate,
    Unhealthy,
    Severe,
}

impl AirQualityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AirQualityCategory::Good => "Good",
            AirQualityCategory::Moderate => "Moderate",
            AirQualityCategory::Unhealthy => "Unhealthy",
            AirQualityCategory::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for AirQualityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(default = "default_is_day")]
    pub is_day: u8,
    pub condition: ConditionInfo,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub precip_mm: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub feelslike_c: f64,
    pub vis_km: f64,
    pub uv: f64,
    /// Present only when the request asked for air quality.
    #[serde(default)]
    pub air_quality: Option<AirQuality>,
}

const fn default_is_day() -> u8 {
    1
}

impl CurrentConditions {
    pub fn condition(&self) -> Condition {
        Condition::from_code(self.condition.code, self.is_day != 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DaySummary,
    #[serde(default)]
    pub hour: Vec<HourForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub avghumidity: f64,
    #[serde(default)]
    pub daily_chance_of_rain: u8,
    pub condition: ConditionInfo,
    pub uv: f64,
}

impl DaySummary {
    pub fn condition(&self) -> Condition {
        Condition::from_code(self.condition.code, true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    pub time: String,
    pub temp_c: f64,
    pub condition: ConditionInfo,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub precip_mm: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub feelslike_c: f64,
    #[serde(default)]
    pub chance_of_rain: u8,
}

impl HourForecast {
    pub fn time(&self) -> Option<NaiveDateTime> {
        parse_local_time(&self.time)
    }
}

fn parse_local_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), LOCAL_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn location(region: &str) -> Location {
        Location {
            name: "Pune".into(),
            region: region.into(),
            country: "India".into(),
            localtime: "2025-04-20 9:05".into(),
        }
    }

    #[test]
    fn search_result_drops_country() {
        let city = CityMatch {
            id: 7,
            name: "Pune".into(),
            region: "Maharashtra".into(),
            country: "India".into(),
        };

        let result = SearchResult::from(city);
        assert_eq!(
            result,
            SearchResult { id: 7, name: "Pune".into(), region: "Maharashtra".into() }
        );
        assert_eq!(result.to_string(), "Pune, Maharashtra");
    }

    #[test]
    fn search_result_display_without_region() {
        let result = SearchResult { id: 1, name: "Leh".into(), region: String::new() };
        assert_eq!(result.to_string(), "Leh");
    }

    #[test]
    fn air_quality_category_boundaries() {
        let category = |us_epa_index| AirQuality { us_epa_index }.category();

        assert_eq!(category(0), None);
        assert_eq!(category(1), Some(AirQualityCategory::Good));
        assert_eq!(category(2), Some(AirQualityCategory::Moderate));
        assert_eq!(category(3), Some(AirQualityCategory::Unhealthy));
        assert_eq!(category(4), Some(AirQualityCategory::Severe));
        assert_eq!(category(6), Some(AirQualityCategory::Severe));
        assert_eq!(category(u8::MAX), Some(AirQualityCategory::Severe));
        assert_eq!(category(3).map(|c| c.label()), Some("Unhealthy"));
    }

    #[test]
    fn local_time_accepts_unpadded_hour() {
        let parsed = parse_local_time(&location("Maharashtra").localtime).expect("should parse");
        assert_eq!(parsed.day(), 20);
        assert_eq!(parsed.hour(), 9);
        assert_eq!(parsed.minute(), 5);
    }

    #[test]
    fn local_time_rejects_garbage() {
        assert!(parse_local_time("yesterday").is_none());
    }

    #[test]
    fn air_quality_uses_hyphenated_key() {
        let aq: AirQuality = serde_json::from_str(r#"{"us-epa-index": 2, "pm2_5": 31.4}"#).unwrap();
        assert_eq!(aq.us_epa_index, 2);
    }

    fn snapshot(location: Location, is_day: u8) -> ForecastSnapshot {
        ForecastSnapshot {
            location,
            current: CurrentConditions {
                temp_c: 30.0,
                temp_f: 86.0,
                is_day,
                condition: ConditionInfo { text: "Clear".into(), icon: String::new(), code: 1000 },
                wind_kph: 10.0,
                wind_dir: "W".into(),
                pressure_mb: 1008.0,
                precip_mm: 0.0,
                humidity: 40.0,
                cloud: 0.0,
                feelslike_c: 31.0,
                vis_km: 10.0,
                uv: 8.0,
                air_quality: None,
            },
            forecast: Forecast { forecastday: vec![] },
        }
    }

    #[test]
    fn headline_skips_empty_region() {
        let snapshot = snapshot(location(""), 1);

        assert_eq!(snapshot.headline(), "Pune, India");
        assert_eq!(snapshot.current.condition(), Condition::Clear);
    }

    #[test]
    fn daylight_follows_local_hour() {
        let at = |localtime: &str| {
            let loc = Location { localtime: localtime.into(), ..location("Maharashtra") };
            // `is_day` from the API disagrees on purpose; local time wins.
            snapshot(loc, 0)
        };

        assert!(!at("2025-04-20 05:59").is_day());
        assert!(at("2025-04-20 06:00").is_day());
        assert!(at("2025-04-20 17:59").is_day());
        assert!(!at("2025-04-20 18:00").is_day());
        assert_eq!(at("2025-04-20 12:00").current_condition(), Condition::Clear);
        assert_eq!(at("2025-04-20 23:30").current_condition(), Condition::ClearNight);
    }

    #[test]
    fn daylight_falls_back_to_api_flag() {
        let loc = Location { localtime: "soon".into(), ..location("Maharashtra") };

        assert!(snapshot(loc.clone(), 1).is_day());
        assert!(!snapshot(loc, 0).is_day());
    }
}
