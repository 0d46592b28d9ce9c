use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Department, NewIntakeRecord};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pre-filled date of birth, far enough in the past for most patients.
pub const DEFAULT_DATE_OF_BIRTH: &str = "1990-01-01";

/// Visit dates before this are rejected.
pub fn earliest_visit_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid calendar date")
}

/// `PET-` plus 10 uppercase hex characters from a random UUID. A
/// human-readable session token shown on the form; the database key is the
/// serial `id`, and uniqueness of this token is not enforced server-side.
pub fn generate_pet_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("PET-{}", hex[..10].to_uppercase())
}

/// Fields the cursor can land on. The pet id is displayed read-only and is
/// never focusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FullName,
    DateOfBirth,
    Phone,
    Email,
    Address,
    VisitDate,
    Department,
    Symptoms,
    Allergies,
    AdditionalNotes,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::FullName,
        FormField::DateOfBirth,
        FormField::Phone,
        FormField::Email,
        FormField::Address,
        FormField::VisitDate,
        FormField::Department,
        FormField::Symptoms,
        FormField::Allergies,
        FormField::AdditionalNotes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "Full name",
            FormField::DateOfBirth => "Date of birth",
            FormField::Phone => "Pet Owner Phone number",
            FormField::Email => "Pet Owner Email address",
            FormField::Address => "Home address",
            FormField::VisitDate => "Visit date",
            FormField::Department => "Department",
            FormField::Symptoms => "Symptoms / Reason for visit",
            FormField::Allergies => "Known allergies (if any)",
            FormField::AdditionalNotes => "Additional notes",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::FullName => "Jane Doe",
            FormField::Phone => "+1 555-123-4567",
            FormField::Email => "jane.doe@example.com",
            FormField::Address => "123 Main St, City, State",
            FormField::DateOfBirth | FormField::VisitDate => "YYYY-MM-DD",
            _ => "",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Problems found on submit. Required fields use the intake form's own
/// phrasing; date problems are listed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
    pub invalid: Vec<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!(
                "Please complete the required fields: {}.",
                self.missing.join(", ")
            ));
        }
        parts.extend(self.invalid.iter().cloned());
        write!(f, "{}", parts.join(" "))
    }
}

/// State of one form-fill session: a text buffer per field, the selected
/// department, the editing focus, and the session pet id.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    pub full_name: String,
    pub pet_id: String,
    pub date_of_birth: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub visit_date: String,
    pub department: Department,
    pub symptoms: String,
    pub allergies: String,
    pub additional_notes: String,
    pub focus: FormField,
}

impl IntakeForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            full_name: String::new(),
            pet_id: generate_pet_id(),
            date_of_birth: DEFAULT_DATE_OF_BIRTH.to_string(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            visit_date: today.format(DATE_FORMAT).to_string(),
            department: Department::default(),
            symptoms: String::new(),
            allergies: String::new(),
            additional_notes: String::new(),
            focus: FormField::FullName,
        }
    }

    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::Address => &self.address,
            FormField::VisitDate => &self.visit_date,
            FormField::Department => self.department.label(),
            FormField::Symptoms => &self.symptoms,
            FormField::Allergies => &self.allergies,
            FormField::AdditionalNotes => &self.additional_notes,
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::FullName => Some(&mut self.full_name),
            FormField::DateOfBirth => Some(&mut self.date_of_birth),
            FormField::Phone => Some(&mut self.phone),
            FormField::Email => Some(&mut self.email),
            FormField::Address => Some(&mut self.address),
            FormField::VisitDate => Some(&mut self.visit_date),
            // The department is a closed list, not free text
            FormField::Department => None,
            FormField::Symptoms => Some(&mut self.symptoms),
            FormField::Allergies => Some(&mut self.allergies),
            FormField::AdditionalNotes => Some(&mut self.additional_notes),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// A fresh identifier for the next entry, called after a successful
    /// submission.
    pub fn rotate_pet_id(&mut self) {
        self.pet_id = generate_pet_id();
    }

    /// Validate the form and assemble the insert payload. Validation
    /// failures never reach the database.
    pub fn build_record(
        &self,
        today: NaiveDate,
    ) -> std::result::Result<NewIntakeRecord, ValidationError> {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        if self.full_name.trim().is_empty() {
            missing.push("Full name");
        }
        if self.date_of_birth.trim().is_empty() {
            missing.push("Date of birth");
        }

        let date_of_birth = match parse_date(&self.date_of_birth) {
            // Already reported as missing above
            ParsedDate::Empty => None,
            ParsedDate::Invalid => {
                invalid.push("Date of birth must use the YYYY-MM-DD format.".to_string());
                None
            }
            ParsedDate::Valid(date) if date > today => {
                invalid.push("Date of birth must not be in the future.".to_string());
                None
            }
            ParsedDate::Valid(date) => Some(date),
        };

        let visit_date = match parse_date(&self.visit_date) {
            ParsedDate::Empty => None,
            ParsedDate::Invalid => {
                invalid.push("Visit date must use the YYYY-MM-DD format.".to_string());
                None
            }
            ParsedDate::Valid(date) if date < earliest_visit_date() || date > today => {
                invalid.push(format!(
                    "Visit date must fall between {} and today.",
                    earliest_visit_date().format(DATE_FORMAT)
                ));
                None
            }
            ParsedDate::Valid(date) => Some(date),
        };

        if !missing.is_empty() || !invalid.is_empty() {
            return Err(ValidationError { missing, invalid });
        }

        let Some(date_of_birth) = date_of_birth else {
            return Err(ValidationError {
                missing: vec!["Date of birth"],
                invalid: Vec::new(),
            });
        };

        Ok(NewIntakeRecord {
            full_name: self.full_name.trim().to_string(),
            pet_id: self.pet_id.clone(),
            date_of_birth,
            phone: non_empty(&self.phone),
            email: non_empty(&self.email),
            address: non_empty(&self.address),
            visit_date,
            department: self.department.label().to_string(),
            symptoms: non_empty(&self.symptoms),
            allergies: non_empty(&self.allergies),
            additional_notes: non_empty(&self.additional_notes),
        })
    }
}

enum ParsedDate {
    Empty,
    Invalid,
    Valid(NaiveDate),
}

fn parse_date(text: &str) -> ParsedDate {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedDate::Empty;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => ParsedDate::Valid(date),
        Err(_) => ParsedDate::Invalid,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
