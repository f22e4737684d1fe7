pub mod node_resource;
pub mod reservation;
pub mod resource_set;
