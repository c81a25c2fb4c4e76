use std::fmt::Display;

use celestia_protocol::model::celestial_body::CelestialBody;
use chrono::TimeDelta;

pub fn format_uptime(td: TimeDelta) -> FormattedUptime {
    FormattedUptime(td)
}

#[derive(Debug)]
pub struct FormattedUptime(TimeDelta);

impl Display for FormattedUptime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let days = self.0.num_days();
        let hours = self.0.num_hours() % 24;
        let minutes = self.0.num_minutes() % 60;
        let seconds = self.0.num_seconds() % 60;
        if days > 0 {
            write!(f, "{days} days ")?;
        }
        write!(f, "{hours}h {minutes}m {seconds}s")
    }
}

/// One line per body, `-` for missing values.
pub fn format_body(body: &CelestialBody) -> String {
    fn or_dash<T: Display>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map_or_else(|| "-".to_owned(), ToString::to_string)
    }

    let fields = &body.fields;
    format!(
        "{:>5}  {}  type={}  radius_km={}  mass_kg={}  distance_km={}",
        body.id.0,
        fields.name,
        or_dash(&fields.body_type),
        or_dash(&fields.mean_radius_km),
        or_dash(&fields.mass_kg),
        or_dash(&fields.distance_from_sun_km),
    )
}
