//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema SQLite de mantenimiento.

pub mod maintenance_record;
pub mod maintenance_type;
pub mod mechanic;
pub mod observation;
pub mod vehicle;

pub use maintenance_record::*;
pub use maintenance_type::*;
pub use mechanic::*;
pub use observation::*;
pub use vehicle::*;
