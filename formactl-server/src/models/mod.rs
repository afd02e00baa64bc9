//! Domain models for the training reference tables
//!
//! Records are read-only from this crate's point of view: the store owns
//! them, handlers only list and aggregate them.

pub mod reference;

pub use reference::{
    Cohort, DocumentType, Gender, ProgramRef, ReferenceSnapshot, Role, StudentState,
    TrainingProgram,
};
