/// Closed list of clinic departments offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Department {
    #[default]
    GeneralMedicine,
    Pediatrics,
    Cardiology,
    Orthopedics,
    Dermatology,
    Neurology,
    Emergency,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::GeneralMedicine,
        Department::Pediatrics,
        Department::Cardiology,
        Department::Orthopedics,
        Department::Dermatology,
        Department::Neurology,
        Department::Emergency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Department::GeneralMedicine => "General Medicine",
            Department::Pediatrics => "Pediatrics",
            Department::Cardiology => "Cardiology",
            Department::Orthopedics => "Orthopedics",
            Department::Dermatology => "Dermatology",
            Department::Neurology => "Neurology",
            Department::Emergency => "Emergency",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_departments() {
        let mut department = Department::default();
        for _ in 0..Department::ALL.len() {
            department = department.next();
        }
        assert_eq!(department, Department::GeneralMedicine);
    }

    #[test]
    fn prev_undoes_next() {
        assert_eq!(Department::Cardiology.next().prev(), Department::Cardiology);
        assert_eq!(Department::GeneralMedicine.prev(), Department::Emergency);
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<_> = Department::ALL.iter().map(|d| d.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Department::ALL.len());
    }
}
