//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::patients;

/// Row struct for reading from the patients table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub surname: String,
    pub passport_number: String,
}

/// Insertable struct for creating new patient records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patients)]
pub(crate) struct NewPatientRow<'a> {
    pub id: &'a str,
    pub created_at: NaiveDateTime,
    pub name: &'a str,
    pub surname: &'a str,
    pub passport_number: &'a str,
}
