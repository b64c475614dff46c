pub mod maintenance_controller;
pub mod maintenance_type_controller;
pub mod mechanic_controller;
pub mod suggestion_controller;
pub mod vehicle_controller;
