//! The patient dashboard: doctor visits, medications and appointments with the three
//! patient actions (send a message, book an appointment, add a medication).

pub mod backend;
pub mod view;

pub use backend::*;
pub use view::*;
