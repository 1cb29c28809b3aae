//! Pure data structures (DTOs) exchanged with the patient backend.

pub mod dashboard;
pub mod patient;

pub use dashboard::*;
pub use patient::*;
