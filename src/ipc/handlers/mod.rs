pub mod classes;
pub mod core;
pub mod grades;
pub mod parents;
pub mod planner;
pub mod session;
pub mod students;
pub mod teachers;
pub mod views;
