//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL de la flota (ver `migrations/`).

pub mod dashboard;
pub mod health;
pub mod maintenance_record;
pub mod service_alert;
pub mod vehicle;

pub use dashboard::*;
pub use health::*;
pub use maintenance_record::*;
pub use service_alert::*;
pub use vehicle::*;
