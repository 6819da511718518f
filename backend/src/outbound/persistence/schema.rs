//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the migrations exactly. Regenerate with `diesel print-schema`
//! when the schema changes.

diesel::table! {
    /// Patient records.
    ///
    /// `passport_number` deliberately carries no unique index; uniqueness is
    /// enforced transactionally by the repository adapter.
    patients (id) {
        /// Primary key: string-encoded UUID v4.
        id -> Varchar,
        /// Creation timestamp, stored as UTC without an offset.
        created_at -> Timestamp,
        /// Patient given name.
        name -> Varchar,
        /// Patient family name.
        surname -> Varchar,
        /// Identity document number; unique by application contract only.
        passport_number -> Varchar,
    }
}
