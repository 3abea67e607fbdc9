use chrono::NaiveDate;

use crate::api::NdviHistoryEntry;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAP_WIDTH: f64 = 400.0;
pub const MAP_HEIGHT: f64 = 300.0;
pub const TREND_WIDTH: f64 = 400.0;
pub const TREND_HEIGHT: f64 = 160.0;

/// Swaps GeoJSON `[lng, lat]` pairs into `[lat, lng]`.
pub fn to_lat_lng(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    points.iter().map(|[lng, lat]| [*lat, *lng]).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Default for LatLngBounds {
    fn default() -> Self {
        Self {
            south: 0.0,
            west: 0.0,
            north: 0.0,
            east: 0.0,
        }
    }
}

impl LatLngBounds {
    /// Bounding box of `[lat, lng]` points; the zero box when there are none.
    pub fn from_points(points: &[[f64; 2]]) -> Self {
        let Some(([lat, lng], rest)) = points.split_first() else {
            return Self::default();
        };
        rest.iter().fold(
            Self {
                south: *lat,
                west: *lng,
                north: *lat,
                east: *lng,
            },
            |bounds, [lat, lng]| Self {
                south: bounds.south.min(*lat),
                west: bounds.west.min(*lng),
                north: bounds.north.max(*lat),
                east: bounds.east.max(*lng),
            },
        )
    }

    /// Projects `[lat, lng]` into a `width` x `height` box, north up.
    pub fn project(&self, [lat, lng]: [f64; 2], width: f64, height: f64) -> (f64, f64) {
        let lng_span = self.east - self.west;
        let lat_span = self.north - self.south;
        let x = if lng_span > 0.0 {
            (lng - self.west) / lng_span * width
        } else {
            width / 2.0
        };
        let y = if lat_span > 0.0 {
            (self.north - lat) / lat_span * height
        } else {
            height / 2.0
        };
        (x, y)
    }
}

/// SVG `points` attribute for the farm outline.
pub fn outline_points(lat_lng: &[[f64; 2]], bounds: &LatLngBounds) -> String {
    lat_lng
        .iter()
        .map(|point| {
            let (x, y) = bounds.project(*point, MAP_WIDTH, MAP_HEIGHT);
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_stat(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn sorted_history(mut history: Vec<NdviHistoryEntry>) -> Vec<NdviHistoryEntry> {
    history.sort_by(|a, b| a.date.cmp(&b.date));
    history
}

/// SVG polyline for mean NDVI over time; -1..1 maps to height..0.
pub fn trend_points(history: &[NdviHistoryEntry], width: f64, height: f64) -> String {
    let last = history.len().saturating_sub(1);
    history
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let x = if last == 0 {
                width / 2.0
            } else {
                index as f64 / last as f64 * width
            };
            let mean = entry.stats.mean.clamp(-1.0, 1.0);
            let y = (1.0 - (mean + 1.0) / 2.0) * height;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_selected_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| "Please select a valid date.".to_string())?;
    if date > today {
        return Err("NDVI is not available for future dates.".to_string());
    }
    Ok(date)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NdviStats;

    fn entry(date: &str, mean: f64) -> NdviHistoryEntry {
        NdviHistoryEntry {
            date: date.into(),
            stats: NdviStats {
                mean,
                stddev: 0.1,
                min: -0.2,
                max: 0.9,
            },
        }
    }

    #[test]
    fn to_lat_lng_swaps_pairs() {
        assert_eq!(
            to_lat_lng(&[[36.8, -1.2], [36.9, -1.3]]),
            vec![[-1.2, 36.8], [-1.3, 36.9]]
        );
    }

    #[test]
    fn bounds_cover_all_points() {
        let bounds = LatLngBounds::from_points(&[[-1.2, 36.8], [-1.3, 36.9], [-1.25, 36.7]]);
        assert_eq!(
            bounds,
            LatLngBounds {
                south: -1.3,
                west: 36.7,
                north: -1.2,
                east: 36.9
            }
        );
        assert_eq!(LatLngBounds::from_points(&[]), LatLngBounds::default());
    }

    #[test]
    fn outline_projects_corners_north_up() {
        let points = [[1.0, 0.0], [0.0, 0.0], [0.0, 2.0]];
        let bounds = LatLngBounds::from_points(&points);
        assert_eq!(outline_points(&points, &bounds), "0.0,0.0 0.0,300.0 400.0,300.0");
    }

    #[test]
    fn format_stat_rounds_to_two_places() {
        assert_eq!(format_stat(0.456), "0.46");
        assert_eq!(format_stat(-0.1), "-0.10");
    }

    #[test]
    fn trend_maps_ndvi_range_onto_height() {
        let history = sorted_history(vec![entry("2024-05-02", -1.0), entry("2024-05-01", 1.0)]);
        assert_eq!(history[0].date, "2024-05-01");
        assert_eq!(trend_points(&history, 100.0, 50.0), "0.0,0.0 100.0,50.0");
        assert_eq!(trend_points(&[entry("2024-05-01", 0.0)], 100.0, 50.0), "50.0,25.0");
        assert_eq!(trend_points(&[], 100.0, 50.0), "");
    }

    #[test]
    fn selected_date_cannot_be_in_future() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(
            parse_selected_date("2024-05-10", today).unwrap(),
            today
        );
        assert!(parse_selected_date("2024-05-11", today).is_err());
        assert!(parse_selected_date("10/05/2024", today).is_err());
    }
}
