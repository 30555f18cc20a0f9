use thiserror::Error;

/// A failure described on the command line, attached to an emitted record.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct CliFailure(pub String);
