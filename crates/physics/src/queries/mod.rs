pub mod affection;
pub mod intersection;
