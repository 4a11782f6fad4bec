//! Outfit rules: activity x temperature band, plus a weather extra.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::forecast::Forecast;
use crate::error::ValidationError;

pub const CHOOSE_ACTIVITY: &str = "✨ Please choose an activity once forecast loads!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    School,
    Church,
    Date,
    Casual,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::School,
        Activity::Church,
        Activity::Date,
        Activity::Casual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::School => "school",
            Activity::Church => "church",
            Activity::Date => "date",
            Activity::Casual => "casual",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "activity",
                message: format!("unknown activity '{wanted}' (expected school, church, date or casual)"),
            })
    }
}

/// Temperature bands in °F. Bounds are exclusive upper limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBand {
    /// Below 45.
    Cold,
    /// 45 up to 70.
    Mild,
    /// 70 and above.
    Warm,
}

impl TempBand {
    pub fn of(temp_f: f64) -> Self {
        if temp_f < 45.0 {
            TempBand::Cold
        } else if temp_f < 70.0 {
            TempBand::Mild
        } else {
            TempBand::Warm
        }
    }
}

/// Base outfit for an activity in a band.
pub fn base_outfit(activity: Activity, band: TempBand) -> &'static str {
    use Activity::*;
    use TempBand::*;
    match (activity, band) {
        (School, Cold) => "🧥 Thick coat, hoodie, jeans, and boots.",
        (School, Mild) => "👖 Jeans + sweater + sneakers.",
        (School, Warm) => "👚 Tee + shorts/jeans + sneakers.",
        (Church, Cold) => "👗 Midi dress, tights, coat, flats.",
        (Church, Mild) => "👗 Dress + cardigan + flats.",
        (Church, Warm) => "👗 Sundress + sandals.",
        (Date, Cold) => "👖 Sweater, jeans, coat + boots.",
        (Date, Mild) => "👖 Jeans, blouse + ankle boots.",
        (Date, Warm) => "👗 Cute dress + light jacket.",
        (Casual, Cold) => "🧋 Hoodie, joggers + beanie.",
        (Casual, Mild) => "👖 Mom jeans + sweater.",
        (Casual, Warm) => "👚 Tee + leggings + slides.",
    }
}

/// Extra note for a forecast condition label (`Rain`, `Snow`, ...).
pub fn weather_extra(condition: &str) -> Option<&'static str> {
    match condition {
        "Rain" => Some(" ☔ Umbrella!"),
        "Snow" => Some(" ❄ Gloves + scarf."),
        _ => None,
    }
}

/// Outfit text for one reading, extra included.
pub fn suggest(activity: Activity, temp_f: f64, condition: &str) -> String {
    let mut out = base_outfit(activity, TempBand::of(temp_f)).to_string();
    if let Some(extra) = weather_extra(condition) {
        out.push_str(extra);
    }
    out
}

/// Full advice line for the current forecast interval.
///
/// Without a forecast, an activity or at least one sample this asks the
/// user to pick an activity instead.
pub fn advise(forecast: Option<&Forecast>, activity: Option<Activity>) -> String {
    let (Some(forecast), Some(activity)) = (forecast, activity) else {
        return CHOOSE_ACTIVITY.to_string();
    };
    let Some(now) = forecast.timeline.first() else {
        return CHOOSE_ACTIVITY.to_string();
    };
    format!(
        "Currently {}°F ({}) in {}. Suggested for {}: {}",
        now.temp.round() as i64,
        now.condition,
        forecast.city,
        activity,
        suggest(activity, now.temp, &now.condition)
    )
}
