//! Utilidades de validación
//! 
//! Validadores custom usados por los derives de `validator` en los
//! requests de la API.

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::ServiceAlertRequest;

/// Longitud exacta de un VIN
pub const VIN_LENGTH: usize = 17;

/// Máximo representable en NUMERIC(10,2)
fn max_cost() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Validar que el VIN tenga exactamente 17 caracteres
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len != VIN_LENGTH {
        let mut error = ValidationError::new("vin");
        error.add_param("value".into(), &value.to_string());
        error.add_param("length".into(), &VIN_LENGTH);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que el coste no sea negativo y quepa en NUMERIC(10,2)
pub fn validate_cost(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > max_cost() {
        let mut error = ValidationError::new("cost");
        error.add_param("value".into(), &value.to_string());
        error.add_param("range".into(), &"0.00 to 99999999.99".to_string());
        return Err(error);
    }
    Ok(())
}

/// Los campos de resolución solo se aceptan en alertas resueltas
pub fn validate_resolution(request: &ServiceAlertRequest) -> Result<(), ValidationError> {
    if !request.is_resolved && request.has_resolution_details() {
        let mut error = ValidationError::new("resolution");
        error.add_param(
            "message".into(),
            &"resolvedDate, resolvedBy and resolutionNotes require isResolved = true".to_string(),
        );
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertPriority;
    use std::str::FromStr;

    fn alert_request(is_resolved: bool, resolved_by: Option<&str>) -> ServiceAlertRequest {
        ServiceAlertRequest {
            id: None,
            vehicle_id: 1,
            alert_type: "Inspection Due".to_string(),
            priority: AlertPriority::High,
            description: "Annual inspection".to_string(),
            created_date: None,
            due_date: None,
            is_resolved,
            resolved_date: None,
            resolved_by: resolved_by.map(str::to_string),
            resolution_notes: None,
        }
    }

    #[test]
    fn test_validate_vin() {
        assert!(validate_vin("1HGCM82633A004352").is_ok());
        assert!(validate_vin("1HGCM82633A00435").is_err());
        assert!(validate_vin("1HGCM82633A0043521").is_err());
        assert!(validate_vin("1HGCM82633A00435-").is_ok());
        assert!(validate_vin("ÑHGCM82633A00435-").is_ok());
        assert!(validate_vin("").is_err());
    }

    #[test]
    fn test_validate_cost() {
        assert!(validate_cost(&Decimal::ZERO).is_ok());
        assert!(validate_cost(&Decimal::from_str("2499.99").unwrap()).is_ok());
        assert!(validate_cost(&Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(validate_cost(&Decimal::from_str("100000000").unwrap()).is_err());
        assert!(validate_cost(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_resolution() {
        assert!(validate_resolution(&alert_request(false, None)).is_ok());
        assert!(validate_resolution(&alert_request(true, Some("Jane Doe"))).is_ok());
        assert!(validate_resolution(&alert_request(true, None)).is_ok());
        assert!(validate_resolution(&alert_request(false, Some("Jane Doe"))).is_err());
    }
}
