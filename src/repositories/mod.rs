//! Repositorios
//!
//! Acceso SQL por entidad. Todas las funciones reciben la conexión para que
//! un controlador pueda ejecutar varias dentro de la misma transacción.

pub mod maintenance_record_repository;
pub mod maintenance_type_repository;
pub mod mechanic_repository;
pub mod observation_repository;
pub mod vehicle_repository;

pub use maintenance_record_repository::{MaintenanceRecordRepository, NewMaintenanceRecord};
pub use maintenance_type_repository::MaintenanceTypeRepository;
pub use mechanic_repository::MechanicRepository;
pub use observation_repository::ObservationRepository;
pub use vehicle_repository::{NewConfiguration, VehicleRepository};
