use sea_orm::{DbErr, SqlErr};

pub trait DbErrExt {
    /// Whether the store rejected the statement because of a unique or
    /// primary-key collision.
    fn is_unique_violation(&self) -> bool;

    /// Whether the statement referenced a parent row that does not exist.
    fn is_foreign_key_violation(&self) -> bool;
}

impl DbErrExt for DbErr {
    fn is_unique_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    fn is_foreign_key_violation(&self) -> bool {
        matches!(self.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
    }
}
