pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::{Role, Student};
pub use router::init_students_router;
