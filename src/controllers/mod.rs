//! Controllers
//! 
//! Reglas de cada petición antes de llegar al repositorio: validación de campos,
//! coincidencia de ids entre path y body, unicidad del VIN y logging.

pub mod maintenance_controller;
pub mod service_alert_controller;
pub mod vehicle_controller;

pub use maintenance_controller::MaintenanceController;
pub use service_alert_controller::ServiceAlertController;
pub use vehicle_controller::VehicleController;
