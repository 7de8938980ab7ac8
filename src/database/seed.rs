//! Datos de ejemplo
//!
//! Genera vehículos, mantenimientos y alertas aleatorios cuando la flota
//! está vacía, para que la API tenga datos de demo. Todo lo generado
//! respeta las reglas del modelo: VIN de 17 caracteres y único, referencias
//! a vehículos existentes y campos de resolución solo en alertas resueltas.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::info;

use crate::models::{
    AlertPriority, NewMaintenanceRecord, NewServiceAlert, NewVehicle, VehicleStatus,
};
use crate::repositories::{MaintenanceRepository, ServiceAlertRepository, VehicleRepository};
use crate::utils::errors::AppResult;
use crate::utils::validation::VIN_LENGTH;

pub const SEED_VEHICLES: usize = 50;
pub const SEED_MAINTENANCE_RECORDS: usize = 200;
pub const SEED_ALERTS: usize = 75;

// Sin I, O ni Q, como en los VIN reales
const VIN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

const MAKES_AND_MODELS: &[(&str, &[&str])] = &[
    ("Ford", &["F-150", "Transit", "Explorer", "Ranger"]),
    ("Toyota", &["Hilux", "Camry", "Tacoma", "RAV4"]),
    ("Chevrolet", &["Silverado", "Express", "Tahoe"]),
    ("Ram", &["1500", "ProMaster"]),
    ("Nissan", &["Frontier", "NV200", "Leaf"]),
    ("Mercedes-Benz", &["Sprinter", "Vito"]),
    ("Tesla", &["Model 3", "Model Y"]),
];

const DEPARTMENTS: &[&str] = &["Transportation", "Maintenance", "Admin", "Field Operations"];

const SERVICE_TYPES: &[&str] = &[
    "Oil Change",
    "Tire Rotation",
    "Brake Service",
    "Engine Repair",
    "Transmission Service",
    "Inspection",
    "Battery Replacement",
    "Air Filter Replacement",
];

const PARTS: &[&str] = &[
    "Oil filter",
    "Brake pads",
    "Air filter",
    "Battery",
    "Spark plugs",
    "Wiper blades",
    "Serpentine belt",
];

const ALERT_TYPES: &[&str] = &[
    "Inspection Due",
    "Maintenance Overdue",
    "Registration Expiring",
    "Safety Recall",
    "Emissions Test Due",
];

const FIRST_NAMES: &[&str] = &["Ana", "Luis", "Marta", "Jorge", "Sara", "Pablo", "Elena", "David"];
const LAST_NAMES: &[&str] = &["García", "Martín", "López", "Sánchez", "Ruiz", "Torres", "Navarro"];

const NOTES: &[&str] = &[
    "Routine service completed without issues.",
    "Customer reported noise from the front axle.",
    "Parts ordered, follow-up visit scheduled.",
    "Vehicle returned to service the same day.",
    "Wear within tolerance, recheck at next service.",
];

/// Cuántos registros se insertaron
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub vehicles: usize,
    pub maintenance_records: usize,
    pub alerts: usize,
}

/// Carga los datos de ejemplo solo si no hay ningún vehículo
pub async fn seed_if_empty(
    vehicles: &dyn VehicleRepository,
    maintenance: &dyn MaintenanceRepository,
    alerts: &dyn ServiceAlertRepository,
) -> AppResult<Option<SeedSummary>> {
    let mut rng = StdRng::from_entropy();
    seed_if_empty_with(vehicles, maintenance, alerts, &mut rng, Utc::now()).await
}

pub async fn seed_if_empty_with(
    vehicles: &dyn VehicleRepository,
    maintenance: &dyn MaintenanceRepository,
    alerts: &dyn ServiceAlertRepository,
    rng: &mut StdRng,
    now: DateTime<Utc>,
) -> AppResult<Option<SeedSummary>> {
    if vehicles.count(None).await? > 0 {
        info!("La base de datos ya tiene datos, se omite el seed");
        return Ok(None);
    }

    let mut vehicle_ids = Vec::with_capacity(SEED_VEHICLES);
    for vehicle in generate_vehicles(rng, now, SEED_VEHICLES) {
        vehicle_ids.push(vehicles.create(vehicle).await?.id);
    }

    let records = generate_maintenance_records(rng, now, &vehicle_ids, SEED_MAINTENANCE_RECORDS);
    let maintenance_records = records.len();
    for record in records {
        maintenance.create(record).await?;
    }

    let generated_alerts = generate_alerts(rng, now, &vehicle_ids, SEED_ALERTS);
    let alert_count = generated_alerts.len();
    for alert in generated_alerts {
        alerts.create(alert).await?;
    }

    let summary = SeedSummary {
        vehicles: vehicle_ids.len(),
        maintenance_records,
        alerts: alert_count,
    };
    info!(
        "Seed completado: {} vehículos, {} mantenimientos, {} alertas",
        summary.vehicles, summary.maintenance_records, summary.alerts
    );
    Ok(Some(summary))
}

/// Genera hasta `count` vehículos con VIN únicos
pub fn generate_vehicles<R: Rng>(rng: &mut R, now: DateTime<Utc>, count: usize) -> Vec<NewVehicle> {
    let mut used_vins = HashSet::with_capacity(count);
    let mut vehicles = Vec::with_capacity(count);

    while vehicles.len() < count {
        let Some(vin) = random_vin(rng) else {
            break;
        };
        if !used_vins.insert(vin.clone()) {
            continue;
        }
        match random_vehicle(rng, now, vin) {
            Some(vehicle) => vehicles.push(vehicle),
            None => break,
        }
    }

    vehicles
}

fn random_vehicle<R: Rng>(rng: &mut R, now: DateTime<Utc>, vin: String) -> Option<NewVehicle> {
    let (make, models) = pick(rng, MAKES_AND_MODELS)?;
    Some(NewVehicle {
        vin,
        make: make.to_string(),
        model: pick(rng, models)?.to_string(),
        year: rng.gen_range(2015..=2024),
        mileage: rng.gen_range(1000..=150_000),
        status: *pick(rng, &VehicleStatus::ALL)?,
        department: Some(pick(rng, DEPARTMENTS)?.to_string()),
        date_acquired: days_before(rng, now, 5 * 365),
        last_service_date: Some(days_before(rng, now, 90)),
    })
}

/// Registros de mantenimiento repartidos entre `vehicle_ids`; vacío si no hay vehículos
pub fn generate_maintenance_records<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    vehicle_ids: &[i32],
    count: usize,
) -> Vec<NewMaintenanceRecord> {
    (0..count)
        .filter_map(|_| random_maintenance_record(rng, now, vehicle_ids))
        .collect()
}

fn random_maintenance_record<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    vehicle_ids: &[i32],
) -> Option<NewMaintenanceRecord> {
    let vehicle_id = *pick(rng, vehicle_ids)?;
    let service_date = days_before(rng, now, 2 * 365);
    Some(NewMaintenanceRecord {
        vehicle_id,
        service_date,
        service_type: pick(rng, SERVICE_TYPES)?.to_string(),
        performed_by: Some(random_name(rng)?),
        cost: Decimal::new(rng.gen_range(5_000..=250_000), 2),
        mileage_at_service: rng.gen_range(10_000..=150_000),
        notes: Some(pick(rng, NOTES)?.to_string()),
        parts_replaced: Some(pick(rng, PARTS)?.to_string()),
        is_warranty_covered: rng.gen_bool(0.2),
        created_date: service_date,
    })
}

/// Alertas repartidas entre `vehicle_ids`; vacío si no hay vehículos
pub fn generate_alerts<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    vehicle_ids: &[i32],
    count: usize,
) -> Vec<NewServiceAlert> {
    (0..count)
        .filter_map(|_| random_alert(rng, now, vehicle_ids))
        .collect()
}

fn random_alert<R: Rng>(rng: &mut R, now: DateTime<Utc>, vehicle_ids: &[i32]) -> Option<NewServiceAlert> {
    let vehicle_id = *pick(rng, vehicle_ids)?;
    let is_resolved = rng.gen_bool(0.3);

    let (resolved_date, resolved_by, resolution_notes) = if is_resolved {
        (
            Some(days_before(rng, now, 30)),
            Some(random_name(rng)?),
            Some(pick(rng, NOTES)?.to_string()),
        )
    } else {
        (None, None, None)
    };

    Some(NewServiceAlert {
        vehicle_id,
        alert_type: pick(rng, ALERT_TYPES)?.to_string(),
        priority: *pick(rng, &AlertPriority::ALL)?,
        description: pick(rng, NOTES)?.to_string(),
        created_date: days_before(rng, now, 60),
        due_date: Some(now + Duration::days(rng.gen_range(1..=365))),
        is_resolved,
        resolved_date,
        resolved_by,
        resolution_notes,
    })
}

fn random_vin<R: Rng>(rng: &mut R) -> Option<String> {
    (0..VIN_LENGTH)
        .map(|_| pick(rng, VIN_ALPHABET).map(|&b| char::from(b)))
        .collect()
}

fn random_name<R: Rng>(rng: &mut R) -> Option<String> {
    Some(format!("{} {}", pick(rng, FIRST_NAMES)?, pick(rng, LAST_NAMES)?))
}

fn days_before<R: Rng>(rng: &mut R, now: DateTime<Utc>, max_days: i64) -> DateTime<Utc> {
    now - Duration::days(rng.gen_range(0..=max_days)) - Duration::minutes(rng.gen_range(0..1440))
}

/// `None` solo con una lista vacía
fn pick<'a, R: Rng, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryFleetStore;
    use crate::utils::validation::validate_vin;

    #[test]
    fn test_generated_vehicles_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let vehicles = generate_vehicles(&mut rng, now, SEED_VEHICLES);

        assert_eq!(vehicles.len(), SEED_VEHICLES);
        let vins: HashSet<_> = vehicles.iter().map(|v| v.vin.clone()).collect();
        assert_eq!(vins.len(), SEED_VEHICLES);
        for vehicle in &vehicles {
            assert!(validate_vin(&vehicle.vin).is_ok());
            assert!((2015..=2024).contains(&vehicle.year));
            assert!((0..=999_999).contains(&vehicle.mileage));
            assert!(vehicle.date_acquired <= now);
        }
    }

    #[test]
    fn test_resolution_fields_only_on_resolved_alerts() {
        let mut rng = StdRng::seed_from_u64(11);
        let alerts = generate_alerts(&mut rng, Utc::now(), &[1, 2, 3], 500);

        assert!(alerts.iter().any(|a| a.is_resolved));
        assert!(alerts.iter().any(|a| !a.is_resolved));
        for alert in &alerts {
            let has_details = alert.resolved_date.is_some()
                || alert.resolved_by.is_some()
                || alert.resolution_notes.is_some();
            assert_eq!(alert.is_resolved, has_details);
            assert!([1, 2, 3].contains(&alert.vehicle_id));
        }
    }

    #[test]
    fn test_costs_have_two_decimals() {
        let mut rng = StdRng::seed_from_u64(3);
        let records = generate_maintenance_records(&mut rng, Utc::now(), &[1], 100);
        for record in &records {
            assert!(record.cost.scale() <= 2);
            assert!(record.cost >= Decimal::new(50, 0));
            assert!(record.cost <= Decimal::new(2500, 0));
        }
    }

    #[test]
    fn test_no_vehicles_means_no_dependents() {
        let mut rng = StdRng::seed_from_u64(5);
        let now = Utc::now();
        assert!(generate_maintenance_records(&mut rng, now, &[], 10).is_empty());
        assert!(generate_alerts(&mut rng, now, &[], 10).is_empty());
        assert!(pick::<_, i32>(&mut rng, &[]).is_none());
    }

    #[tokio::test]
    async fn test_seed_populates_empty_store_once() {
        let store = InMemoryFleetStore::new();
        let mut rng = StdRng::seed_from_u64(42);

        let summary = seed_if_empty_with(&store, &store, &store, &mut rng, Utc::now())
            .await
            .unwrap();
        assert_eq!(
            summary,
            Some(SeedSummary {
                vehicles: SEED_VEHICLES,
                maintenance_records: SEED_MAINTENANCE_RECORDS,
                alerts: SEED_ALERTS,
            })
        );

        let again = seed_if_empty_with(&store, &store, &store, &mut rng, Utc::now())
            .await
            .unwrap();
        assert!(again.is_none());
        assert_eq!(VehicleRepository::count(&store, None).await.unwrap(), SEED_VEHICLES as i64);
    }
}
