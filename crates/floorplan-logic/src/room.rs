//! Room specifications and the validation boundary.
//!
//! `RawRoom` is whatever the upstream service handed back, deserialized
//! leniently: positions, color and floor may be missing. `validate_room`
//! turns it into a `RoomSpec` whose numbers are clamped into the legal
//! footprint and whose color is a palette member. Nothing past this point
//! has to deal with malformed input.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::PlannerConfig;
use crate::constants::footprint::{EDGE_EPSILON, MAX_FLOOR};
use crate::error::LayoutError;
use crate::palette::normalize_color;

/// Room object as produced upstream, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawRoom {
    pub name: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    pub dx: f32,
    pub dy: f32,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "deserialize_floor")]
    pub floor: Option<u32>,
}

/// Accept any non-negative integral number, including `1.0`. Values past
/// `u32::MAX` saturate; `validate_room` clamps them anyway.
fn deserialize_floor<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(Some(v as u32)),
        Some(v) => Err(serde::de::Error::custom(format!(
            "floor must be a non-negative integer, got {}",
            v
        ))),
    }
}

/// A validated room: clamped rectangle, palette color, floor index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: String,
    pub floor: u32,
}

impl RoomSpec {
    pub fn area(&self) -> f32 {
        self.dx * self.dy
    }

    pub fn right(&self) -> f32 {
        self.x + self.dx
    }

    pub fn top(&self) -> f32 {
        self.y + self.dy
    }

    pub fn centroid(&self) -> (f32, f32) {
        (self.x + self.dx / 2.0, self.y + self.dy / 2.0)
    }

    /// True if the two rectangles share positive area. Touching edges do not count.
    pub fn overlaps(&self, other: &RoomSpec) -> bool {
        let overlap_x =
            self.right() - EDGE_EPSILON > other.x && other.right() - EDGE_EPSILON > self.x;
        let overlap_y =
            self.top() - EDGE_EPSILON > other.y && other.top() - EDGE_EPSILON > self.y;
        overlap_x && overlap_y
    }

    /// Same room with a new position.
    pub fn placed_at(&self, x: f32, y: f32) -> RoomSpec {
        RoomSpec {
            x,
            y,
            ..self.clone()
        }
    }
}

impl From<&RoomSpec> for RawRoom {
    fn from(room: &RoomSpec) -> Self {
        RawRoom {
            name: room.name.clone(),
            x: Some(room.x),
            y: Some(room.y),
            dx: room.dx,
            dy: room.dy,
            color: Some(room.color.clone()),
            floor: Some(room.floor),
        }
    }
}

/// Parse a JSON array of room objects.
///
/// A missing `name`, `dx` or `dy`, or any numeric field holding a
/// non-number, is reported as `MalformedSpec`.
pub fn parse_raw_rooms(json: &str) -> Result<Vec<RawRoom>, LayoutError> {
    Ok(serde_json::from_str(json)?)
}

fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Clamp a raw room into the legal domain and settle its color.
///
/// Positions go to `[0, max_dimension]`, extents to
/// `[min_dimension, max_dimension]`, floor to `[0, MAX_FLOOR]`. Absent
/// positions and floor become 0.
pub fn validate_room(raw: &RawRoom, config: &PlannerConfig, rng: &mut impl Rng) -> RoomSpec {
    let max = config.max_dimension;
    RoomSpec {
        name: raw.name.clone(),
        x: clamp(raw.x.unwrap_or(0.0), 0.0, max),
        y: clamp(raw.y.unwrap_or(0.0), 0.0, max),
        dx: clamp(raw.dx, config.min_dimension, max),
        dy: clamp(raw.dy, config.min_dimension, max),
        color: normalize_color(raw.color.as_deref(), rng),
        floor: raw.floor.unwrap_or(0).min(MAX_FLOOR),
    }
}

/// Validate every room, preserving order.
pub fn validate_rooms(
    raw: &[RawRoom],
    config: &PlannerConfig,
    rng: &mut impl Rng,
) -> Vec<RoomSpec> {
    raw.iter().map(|r| validate_room(r, config, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::is_palette_color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn raw(name: &str, x: f32, y: f32, dx: f32, dy: f32) -> RawRoom {
        RawRoom {
            name: name.to_string(),
            x: Some(x),
            y: Some(y),
            dx,
            dy,
            color: Some("red".to_string()),
            floor: Some(0),
        }
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = PlannerConfig::default();
        let room = validate_room(&raw("Hall", -3.0, 80.0, 0.2, 75.0), &config, &mut rng);
        assert_eq!(room.x, 0.0);
        assert_eq!(room.y, 50.0);
        assert_eq!(room.dx, 1.0);
        assert_eq!(room.dy, 50.0);
    }

    #[test]
    fn test_in_range_values_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = PlannerConfig::default();
        let room = validate_room(&raw("Den", 3.5, 7.0, 4.0, 2.5), &config, &mut rng);
        assert_eq!((room.x, room.y, room.dx, room.dy), (3.5, 7.0, 4.0, 2.5));
        assert_eq!(room.color, "red");
    }

    #[test]
    fn test_validation_idempotent() {
        let mut rng = StdRng::seed_from_u64(2);
        let config = PlannerConfig::default();
        let mut input = raw("Study", 60.0, -1.0, 100.0, 0.0);
        input.color = Some("not-a-color".to_string());
        let once = validate_room(&input, &config, &mut rng);
        let twice = validate_room(&RawRoom::from(&once), &config, &mut rng);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_fields_default() {
        let rooms = parse_raw_rooms(r#"[{"name": "Hall", "dx": 4, "dy": 5}]"#).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let room = validate_room(&rooms[0], &PlannerConfig::default(), &mut rng);
        assert_eq!((room.x, room.y), (0.0, 0.0));
        assert_eq!(room.floor, 0);
        assert!(is_palette_color(&room.color));
    }

    #[test]
    fn test_null_position_defaults() {
        let rooms =
            parse_raw_rooms(r#"[{"name": "Hall", "x": null, "dx": 4, "dy": 5}]"#).unwrap();
        assert_eq!(rooms[0].x, None);
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let err = parse_raw_rooms(r#"[{"name": "Hall", "dx": "wide", "dy": 5}]"#).unwrap_err();
        assert!(matches!(err, LayoutError::MalformedSpec(_)));
    }

    #[test]
    fn test_missing_extent_is_malformed() {
        let err = parse_raw_rooms(r#"[{"name": "Hall", "dx": 4}]"#).unwrap_err();
        assert!(matches!(err, LayoutError::MalformedSpec(_)));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let rooms =
            parse_raw_rooms(r#"[{"name": "Puja", "dx": 2, "dy": 2, "direction": "NE"}]"#).unwrap();
        assert_eq!(rooms[0].name, "Puja");
    }

    #[test]
    fn test_integral_float_floor_accepted() {
        let rooms = parse_raw_rooms(
            r#"[{"name": "Loft", "dx": 4, "dy": 5, "floor": 1.0},
                {"name": "Den", "dx": 3, "dy": 3, "floor": null}]"#,
        )
        .unwrap();
        assert_eq!(rooms[0].floor, Some(1));
        assert_eq!(rooms[1].floor, None);
    }

    #[test]
    fn test_bad_floor_is_malformed() {
        for floor in ["1.5", "-1", "\"first\""] {
            let json = format!(r#"[{{"name": "Hall", "dx": 4, "dy": 5, "floor": {}}}]"#, floor);
            let err = parse_raw_rooms(&json).unwrap_err();
            assert!(matches!(err, LayoutError::MalformedSpec(_)), "floor {}", floor);
        }
    }

    #[test]
    fn test_huge_floor_clamped() {
        let rooms = parse_raw_rooms(
            r#"[{"name": "Hall", "dx": 4, "dy": 5, "floor": 4294967295},
                {"name": "Attic", "dx": 4, "dy": 5, "floor": 1e12}]"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let config = PlannerConfig::default();
        for room in validate_rooms(&rooms, &config, &mut rng) {
            assert_eq!(room.floor, MAX_FLOOR);
        }
        let once = validate_room(&rooms[0], &config, &mut rng);
        let twice = validate_room(&RawRoom::from(&once), &config, &mut rng);
        assert_eq!(once.floor, twice.floor);
    }

    #[test]
    fn test_overlap_excludes_touching() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = PlannerConfig::default();
        let a = validate_room(&raw("A", 0.0, 0.0, 4.0, 4.0), &config, &mut rng);
        let b = validate_room(&raw("B", 4.0, 0.0, 4.0, 4.0), &config, &mut rng);
        let c = validate_room(&raw("C", 3.0, 3.0, 4.0, 4.0), &config, &mut rng);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }
}
