/// Battery dispatch strategies.
pub mod controller;
pub mod engine;
pub mod kpi;
pub mod types;
