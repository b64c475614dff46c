pub mod maintenance_dto;
pub mod maintenance_type_dto;
pub mod mechanic_dto;
pub mod response_dto;
pub mod suggestion_dto;
pub mod vehicle_dto;

pub use maintenance_dto::*;
pub use maintenance_type_dto::*;
pub use mechanic_dto::*;
pub use response_dto::*;
pub use suggestion_dto::*;
pub use vehicle_dto::*;
