// Application layer: concrete pipelines wiring core logic, rendering and storage together.

pub mod pipelines;
pub mod report;
