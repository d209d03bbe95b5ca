use crate::types::HealthRes;

/// Simple health service used by the REST API and the CLI.
///
/// This service provides a standardised way to report the health status of the patient
/// records service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Builds a health response for a service currently holding `patients` records.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health(patients: usize) -> HealthRes {
        HealthRes {
            ok: true,
            message: "Patient Management System is alive".into(),
            patients: patients as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_health_reports_count() {
        let res = HealthService::check_health(3);
        assert!(res.ok);
        assert_eq!(res.patients, 3);
        assert!(res.message.contains("alive"));
    }
}
