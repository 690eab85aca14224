pub mod moves;
pub mod provider;
pub mod species;
pub mod type_chart;
