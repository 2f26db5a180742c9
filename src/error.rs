//! Error types for projection and record loading

use thiserror::Error;

/// Precondition violations raised by the retirement calculator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("retirement age must exceed current age")]
    RetirementBeforeCurrentAge {
        current_age: u32,
        retirement_age: u32,
    },

    #[error("life expectancy must exceed retirement age")]
    LifeExpectancyBeforeRetirement {
        retirement_age: u32,
        life_expectancy: u32,
    },
}

/// Failures while reading snapshot or plan records from CSV
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
