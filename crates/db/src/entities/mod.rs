//! `SeaORM` entity definitions.

pub mod loan_applications;
