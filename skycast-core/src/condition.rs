//! Display categories for weatherapi.com condition codes.

/// Coarse weather category used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Clear,
    ClearNight,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunder,
}

const FOG: &[u32] = &[1030, 1135, 1147];
const DRIZZLE: &[u32] = &[1063, 1150, 1153, 1180, 1183, 1186, 1189, 1240];
const RAIN: &[u32] = &[1192, 1195, 1243, 1246];
const SNOW: &[u32] = &[1066, 1114, 1117, 1210, 1213, 1216, 1219, 1222, 1225, 1255, 1258];
const THUNDER: &[u32] = &[1087, 1273, 1276, 1279, 1282];

impl Condition {
    /// Map a condition code to a category. Unknown codes fall back to `Cloudy`.
    pub fn from_code(code: u32, is_day: bool) -> Self {
        match code {
            1000 if is_day => Condition::Clear,
            1000 => Condition::ClearNight,
            1003 => Condition::PartlyCloudy,
            1006 | 1009 => Condition::Cloudy,
            c if FOG.contains(&c) => Condition::Fog,
            c if DRIZZLE.contains(&c) => Condition::Drizzle,
            c if RAIN.contains(&c) => Condition::Rain,
            c if SNOW.contains(&c) => Condition::Snow,
            c if THUNDER.contains(&c) => Condition::Thunder,
            _ => Condition::Cloudy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::ClearNight => "clear night",
            Condition::PartlyCloudy => "partly cloudy",
            Condition::Cloudy => "cloudy",
            Condition::Fog => "fog",
            Condition::Drizzle => "drizzle",
            Condition::Rain => "rain",
            Condition::Snow => "snow",
            Condition::Thunder => "thunder",
        }
    }

    /// Single-glyph icon for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Condition::Clear => "☀",
            Condition::ClearNight => "☾",
            Condition::PartlyCloudy => "⛅",
            Condition::Cloudy => "☁",
            Condition::Fog => "≡",
            Condition::Drizzle => "☂",
            Condition::Rain => "⛆",
            Condition::Snow => "❄",
            Condition::Thunder => "⚡",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
