use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};

/// Connection handle shared with handlers through `Extension`.
pub type Db = Arc<DatabaseConnection>;

/// True when `err` is Postgres rejecting a duplicate key.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err
            .to_string()
            .contains("duplicate key value violates unique constraint")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_duplicate_key_message() {
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \"adocoes_pet_id_key\"".into(),
        );
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn other_errors_are_not_duplicates() {
        assert!(!is_unique_violation(&DbErr::Custom("connection reset".into())));
        assert!(!is_unique_violation(&DbErr::RecordNotUpdated));
    }
}
