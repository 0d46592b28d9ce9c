mod intake;

pub use intake::{generate_pet_id, FormField, IntakeForm, ValidationError, DATE_FORMAT};
