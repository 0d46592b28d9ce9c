//! Schema and statement text for the intake table. Identifiers are
//! compile-time constants; only field values are ever bound as statement
//! parameters.

pub const SCHEMA_NAME: &str = "public";
pub const TABLE_NAME: &str = "pet_records";

pub const QUALIFIED_TABLE: &str = r#""public"."pet_records""#;

pub const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS "public"."pet_records" (
    id SERIAL PRIMARY KEY,
    full_name TEXT NOT NULL,
    pet_id TEXT,
    date_of_birth DATE NOT NULL,
    phone TEXT,
    email TEXT,
    address TEXT,
    visit_date DATE,
    department TEXT,
    symptoms TEXT,
    allergies TEXT,
    additional_notes TEXT,
    created_at TIMESTAMPTZ DEFAULT NOW()
);
"#;

pub const INSERT_SQL: &str = r#"
INSERT INTO "public"."pet_records" (
    full_name,
    pet_id,
    date_of_birth,
    phone,
    email,
    address,
    visit_date,
    department,
    symptoms,
    allergies,
    additional_notes
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
"#;

pub const SELECT_ALL_SQL: &str = r#"
SELECT
    id,
    full_name,
    pet_id,
    date_of_birth,
    phone,
    email,
    address,
    visit_date,
    department,
    symptoms,
    allergies,
    additional_notes,
    created_at
FROM "public"."pet_records"
ORDER BY created_at DESC
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_target_the_qualified_table() {
        for sql in [CREATE_TABLE_SQL, INSERT_SQL, SELECT_ALL_SQL] {
            assert!(sql.contains(QUALIFIED_TABLE));
        }
        assert!(QUALIFIED_TABLE.contains(SCHEMA_NAME));
        assert!(QUALIFIED_TABLE.contains(TABLE_NAME));
    }

    #[test]
    fn listing_is_ordered_by_recency() {
        assert!(SELECT_ALL_SQL.contains("ORDER BY created_at DESC"));
    }

    #[test]
    fn insert_binds_all_user_fields() {
        // Eleven placeholders, none for id or created_at
        for n in 1..=11 {
            assert!(INSERT_SQL.contains(&format!("${n}")));
        }
        assert!(!INSERT_SQL.contains("$12"));
    }
}
