pub mod alerts;
pub mod dashboard;
pub mod rules;
pub mod system;
