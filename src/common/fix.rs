use crate::common::geo::GeoPoint;
use chrono::{DateTime, Utc};

/// A timestamped position report from the positioning source.
///
/// Produced externally and read-only to the engine.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fix {
    t: DateTime<Utc>,
    pos: GeoPoint,
    alt: f64,
    ground_speed: Option<f64>,
}

impl Fix {
    pub const fn new(t: DateTime<Utc>, pos: GeoPoint, alt: f64) -> Self {
        Self { t, pos, alt, ground_speed: None }
    }

    pub const fn with_ground_speed(t: DateTime<Utc>, pos: GeoPoint, alt: f64, speed: f64) -> Self {
        Self { t, pos, alt, ground_speed: Some(speed) }
    }

    pub const fn t(&self) -> DateTime<Utc> { self.t }

    pub const fn pos(&self) -> GeoPoint { self.pos }

    /// Altitude above mean sea level in meters.
    pub const fn alt(&self) -> f64 { self.alt }

    /// Ground speed in meters per second, if the source reported one.
    pub const fn ground_speed(&self) -> Option<f64> { self.ground_speed }
}

impl std::fmt::Display for Fix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}, alt {:.0}m", self.t.format("%H:%M:%S"), self.pos, self.alt)
    }
}
