//! Seeding errors.

use std::path::PathBuf;

use vivero_commerce::CommerceError;
use vivero_platform::PlatformError;

use crate::orchestrator::SeedStep;

/// Error type for seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error("No store found; initialize the platform before seeding")]
    NoStore,

    #[error("Invalid seed data: {0}")]
    InvalidData(String),

    #[error("Failed to read seed data from {path}: {source}")]
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed data: {0}")]
    ParseData(#[from] toml::de::Error),

    #[error("Failed to write publishable key to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Step {} ({}) failed: {source}", .step.number(), .step.label())]
    Step {
        step: SeedStep,
        #[source]
        source: Box<SeedError>,
    },
}

impl SeedError {
    /// Attribute an error to the step it happened in.
    pub(crate) fn at(step: SeedStep, err: impl Into<SeedError>) -> Self {
        SeedError::Step {
            step,
            source: Box::new(err.into()),
        }
    }

    /// The innermost error, looking through step attribution.
    pub fn root(&self) -> &SeedError {
        match self {
            SeedError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// The step that failed, if the error happened inside one.
    pub fn step(&self) -> Option<SeedStep> {
        match self {
            SeedError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}
