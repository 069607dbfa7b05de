//! One generation request: fetch room text, plan, report.

use floorplan_logic::building::{plan_from_text, Building};
use floorplan_logic::config::PlannerConfig;
use rand::Rng;
use serde::Serialize;

use crate::error::GenerationError;
use crate::source::RoomSource;

/// Outcome shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum GenerationStatus {
    Ok,
    Failed(String),
}

/// Result of a generation request. A failed request carries an empty building.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub status: GenerationStatus,
    pub building: Building,
}

impl GenerationReport {
    pub fn is_ok(&self) -> bool {
        self.status == GenerationStatus::Ok
    }
}

/// Fetch and plan, propagating the first failure.
pub fn try_generate(
    source: &dyn RoomSource,
    requirements: &str,
    config: &PlannerConfig,
    rng: &mut impl Rng,
) -> Result<Building, GenerationError> {
    let text = source.fetch(requirements)?;
    Ok(plan_from_text(&text, config, rng)?)
}

/// Fetch and plan. Never fails: errors become a `Failed` status with an
/// empty building, and are logged once. No retry happens here; a source
/// may retry internally.
pub fn generate(
    source: &dyn RoomSource,
    requirements: &str,
    config: &PlannerConfig,
    rng: &mut impl Rng,
) -> GenerationReport {
    match try_generate(source, requirements, config, rng) {
        Ok(building) => GenerationReport {
            status: GenerationStatus::Ok,
            building,
        },
        Err(e) => {
            log::error!("Error in generating floor plan: {}", e);
            GenerationReport {
                status: GenerationStatus::Failed(e.to_string()),
                building: Building::default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::source::FixedSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct TimingOut;

    impl RoomSource for TimingOut {
        fn fetch(&self, _requirements: &str) -> Result<String, UpstreamError> {
            Err(UpstreamError::Timeout)
        }
    }

    #[test]
    fn test_fixed_source_plans() {
        let source = FixedSource::new(
            r#"Plan: [{"name": "Hall", "dx": 4, "dy": 5}, {"name": "Kitchen", "dx": 3, "dy": 3}]"#,
        );
        let mut rng = StdRng::seed_from_u64(1);
        let report = generate(&source, "2BHK", &PlannerConfig::default(), &mut rng);
        assert!(report.is_ok());
        assert_eq!(report.building.room_count(), 2);
        assert_eq!(report.building.doors.len(), 1);
    }

    #[test]
    fn test_timeout_gives_empty_failed_report() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = generate(&TimingOut, "2BHK", &PlannerConfig::default(), &mut rng);
        assert_eq!(
            report.status,
            GenerationStatus::Failed("upstream request timed out".to_string())
        );
        assert!(report.building.is_empty());
    }

    #[test]
    fn test_no_array_gives_failed_report() {
        let source = FixedSource::new("I'd be happy to help with your home!");
        let mut rng = StdRng::seed_from_u64(1);
        let report = generate(&source, "2BHK", &PlannerConfig::default(), &mut rng);
        assert!(!report.is_ok());
        assert!(report.building.is_empty());
    }

    #[test]
    fn test_try_generate_keeps_error_kind() {
        let source = FixedSource::new(r#"[{"name": "Hall", "dx": null, "dy": 5}]"#);
        let mut rng = StdRng::seed_from_u64(1);
        let err = try_generate(&source, "", &PlannerConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::Layout(_)));
    }

    #[test]
    fn test_report_serializes_status() {
        let report = GenerationReport {
            status: GenerationStatus::Failed("boom".to_string()),
            building: Building::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"]["status"], "failed");
        assert_eq!(json["status"]["message"], "boom");
    }
}
