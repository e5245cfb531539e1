//! Result renderer: projects a coverage outcome into the text shown in the
//! results panel and the camera targets its entries navigate to.

use std::fmt;

use super::CoverageResult;
use crate::error::SatVizError;
use crate::geo::Geodetic;
use crate::options::CameraOptions;
use crate::scene::SceneInterface;

/// Placeholder for a statistic the backend did not provide.
const MISSING: &str = "N/A";

/// Aggregate statistics block.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsBlock {
    /// Events over the whole window.
    pub total_events: u64,
    /// Mean revisit interval in hours.
    pub average_revisit_hours: Option<f64>,
    /// Shortest revisit interval in hours.
    pub min_revisit_hours: Option<f64>,
    /// Longest revisit interval in hours.
    pub max_revisit_hours: Option<f64>,
    /// Coverage share in percent.
    pub coverage_percentage: Option<f64>,
    /// Latitude the backend evaluated.
    pub latitude: f64,
    /// Longitude the backend evaluated.
    pub longitude: f64,
}

/// One listed coverage event, wired to a camera flight.
#[derive(Debug, Clone, PartialEq)]
pub struct EventItem {
    /// Satellite name.
    pub satellite: String,
    /// Event time for display.
    pub time: String,
    /// Ground distance from the query point in kilometers.
    pub distance_km: f64,
    /// Satellite position at the event.
    pub position: Geodetic,
    /// Camera destination when the item is activated.
    pub fly_to: Geodetic,
    /// Flight duration in seconds.
    pub duration: f64,
}

/// Rendered list of coverage events.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Statistics block.
    pub stats: StatsBlock,
    /// Listed events in time order.
    pub events: Vec<EventItem>,
    /// `(shown, total)` when more events exist than are listed.
    pub truncated: Option<(usize, u64)>,
}

/// What the results panel currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultPanel {
    /// Nothing queried yet.
    #[default]
    Empty,
    /// Query dispatched, waiting for the backend.
    Pending,
    /// The query failed.
    Error(String),
    /// The point is never covered in the window.
    NoCoverage,
    /// Statistics and events.
    Report(CoverageReport),
}

impl ResultPanel {
    /// Render a backend result. Zero events is the explicit no-coverage
    /// view, not an error.
    #[must_use]
    pub fn from_result(result: &CoverageResult, camera: &CameraOptions) -> Self {
        if result.total_coverage_events == 0 {
            return Self::NoCoverage;
        }
        let stats = StatsBlock {
            total_events: result.total_coverage_events,
            average_revisit_hours: result.average_revisit_hours,
            min_revisit_hours: result.min_revisit_hours,
            max_revisit_hours: result.max_revisit_hours,
            coverage_percentage: result.coverage_percentage,
            latitude: result.query_point.latitude,
            longitude: result.query_point.longitude,
        };
        let events = result
            .coverage_times
            .iter()
            .map(|event| {
                let position = Geodetic::from(event.satellite_position);
                EventItem {
                    satellite: event.satellite.clone(),
                    time: event.timestamp().map_or_else(
                        || event.time.clone(),
                        |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                    ),
                    distance_km: event.distance_km,
                    position,
                    fly_to: position.raised(camera.event_altitude_offset_m),
                    duration: camera.event_duration,
                }
            })
            .collect();
        let truncated = result
            .is_truncated()
            .then_some((result.coverage_times.len(), result.total_coverage_events));
        Self::Report(CoverageReport {
            stats,
            events,
            truncated,
        })
    }

    /// Render a query failure.
    #[must_use]
    pub fn from_error(error: &SatVizError) -> Self {
        Self::Error(match error {
            SatVizError::Query {
                status: Some(status),
                message,
            } => format!("{message} (HTTP {status})"),
            SatVizError::Query {
                status: None,
                message,
            } => message.clone(),
            other => other.to_string(),
        })
    }

    /// Listed events, empty unless a report is shown.
    #[must_use]
    pub fn events(&self) -> &[EventItem] {
        match self {
            Self::Report(report) => &report.events,
            _ => &[],
        }
    }

    /// Fly the camera to listed event `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Validation`] if no such event is listed.
    pub fn activate<S: SceneInterface>(
        &self,
        index: usize,
        scene: &mut S,
    ) -> Result<(), SatVizError> {
        let item = self.events().get(index).ok_or_else(|| {
            SatVizError::Validation(format!("no coverage event at position {index}"))
        })?;
        log::debug!("flying to {} event at {}", item.satellite, item.time);
        scene.fly_camera(item.fly_to, item.duration);
        Ok(())
    }
}

fn or_missing(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_owned(), |v| format!("{v:.2}"))
}

impl fmt::Display for StatsBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Coverage statistics")?;
        writeln!(f, "Total coverage events: {}", self.total_events)?;
        writeln!(
            f,
            "Average revisit time: {} h",
            or_missing(self.average_revisit_hours)
        )?;
        writeln!(f, "Minimum revisit time: {} h", or_missing(self.min_revisit_hours))?;
        writeln!(f, "Maximum revisit time: {} h", or_missing(self.max_revisit_hours))?;
        writeln!(f, "Coverage percentage: {} %", or_missing(self.coverage_percentage))?;
        write!(
            f,
            "Query location: latitude {:.4}°, longitude {:.4}°",
            self.latitude, self.longitude
        )
    }
}

impl fmt::Display for EventItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.satellite)?;
        writeln!(f, "  Time: {}", self.time)?;
        writeln!(f, "  Distance: {:.2} km", self.distance_km)?;
        write!(
            f,
            "  Satellite position: longitude {:.2}°, latitude {:.2}°, altitude {:.0} m",
            self.position.lon_deg, self.position.lat_deg, self.position.alt_m
        )
    }
}

impl fmt::Display for ResultPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Pending => write!(f, "Calculating, please wait..."),
            Self::Error(message) => write!(f, "Query failed: {message}"),
            Self::NoCoverage => {
                write!(f, "No satellite covers this location within 24 hours")
            }
            Self::Report(report) => {
                write!(f, "{}", report.stats)?;
                for event in &report.events {
                    write!(f, "\n\n{event}")?;
                }
                if let Some((shown, total)) = report.truncated {
                    write!(
                        f,
                        "\n\n... showing the first {shown} of {total} events"
                    )?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::parse_timestamp;
    use crate::coverage::{CoverageEvent, QueryPoint, SatellitePosition};
    use crate::scene::{CameraFlight, MemoryScene};

    fn event(name: &str) -> CoverageEvent {
        CoverageEvent {
            satellite: name.to_owned(),
            time: "2024-01-01T06:30:00".to_owned(),
            distance_km: 42.123,
            satellite_position: SatellitePosition {
                longitude: 10.0,
                latitude: 20.0,
                altitude: 500_000.0,
            },
        }
    }

    fn result(total: u64, listed: usize) -> CoverageResult {
        CoverageResult {
            total_coverage_events: total,
            average_revisit_hours: Some(3.5),
            min_revisit_hours: Some(0.0),
            max_revisit_hours: None,
            coverage_percentage: Some(1.25),
            query_point: QueryPoint {
                latitude: 45.1234,
                longitude: -122.6789,
            },
            coverage_times: (0..listed).map(|i| event(&format!("SAT-{i}"))).collect(),
        }
    }

    #[test]
    fn zero_events_is_no_coverage() {
        let panel = ResultPanel::from_result(&result(0, 0), &CameraOptions::default());
        assert_eq!(panel, ResultPanel::NoCoverage);
        assert!(panel.events().is_empty());
        assert!(panel.to_string().contains("No satellite covers"));
    }

    #[test]
    fn missing_stats_render_as_na_but_zero_does_not() {
        let panel = ResultPanel::from_result(&result(2, 2), &CameraOptions::default());
        let text = panel.to_string();
        assert!(text.contains("Maximum revisit time: N/A h"));
        assert!(text.contains("Minimum revisit time: 0.00 h"));
        assert!(text.contains("Average revisit time: 3.50 h"));
        assert!(text.contains("latitude 45.1234°, longitude -122.6789°"));
        assert!(!text.contains("showing the first"));
    }

    #[test]
    fn truncation_notice_carries_counts() {
        let panel = ResultPanel::from_result(&result(35, 20), &CameraOptions::default());
        let ResultPanel::Report(report) = &panel else {
            panic!("expected report");
        };
        assert_eq!(report.truncated, Some((20, 35)));
        assert!(panel.to_string().ends_with("showing the first 20 of 35 events"));
    }

    #[test]
    fn event_lines_are_formatted() {
        let panel = ResultPanel::from_result(&result(1, 1), &CameraOptions::default());
        let text = panel.to_string();
        assert!(text.contains("SAT-0\n  Time: 2024-01-01 06:30:00 UTC"));
        assert!(text.contains("Distance: 42.12 km"));
        assert!(text.contains("altitude 500000 m"));
    }

    #[test]
    fn activating_an_event_flies_above_the_satellite() {
        let mut scene =
            MemoryScene::new(parse_timestamp("2024-01-01T00:00:00Z").unwrap());
        let panel = ResultPanel::from_result(&result(3, 3), &CameraOptions::default());
        panel.activate(1, &mut scene).unwrap();
        assert_eq!(
            scene.last_flight(),
            Some(&CameraFlight::ToPosition {
                destination: Geodetic::new(10.0, 20.0, 600_000.0),
                duration: 1.5,
            })
        );
        assert!(panel.activate(7, &mut scene).unwrap_err().is_validation());
    }

    #[test]
    fn error_panel_shows_message() {
        let err = SatVizError::Query {
            status: Some(500),
            message: "boom".to_owned(),
        };
        assert_eq!(
            ResultPanel::from_error(&err).to_string(),
            "Query failed: boom (HTTP 500)"
        );
    }
}
