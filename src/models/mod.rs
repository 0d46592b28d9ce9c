mod department;
mod record;

pub use department::Department;
pub use record::{IntakeRecord, NewIntakeRecord};
