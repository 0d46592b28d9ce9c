use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One submitted intake form, as persisted. Records are append-only: this
/// system never updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub id: i32,
    pub full_name: String,
    pub pet_id: Option<String>,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub visit_date: Option<NaiveDate>,
    pub department: Option<String>,
    pub symptoms: Option<String>,
    pub allergies: Option<String>,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Field values collected from the form. `id` and `created_at` are assigned
/// by the database at insert time.
#[derive(Debug, Clone, Serialize)]
pub struct NewIntakeRecord {
    pub full_name: String,
    pub pet_id: String,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub visit_date: Option<NaiveDate>,
    pub department: String,
    pub symptoms: Option<String>,
    pub allergies: Option<String>,
    pub additional_notes: Option<String>,
}
