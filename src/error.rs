use thiserror::Error;

/// Top-level error type for the crosec conversion library.
#[derive(Debug, Error)]
pub enum CrosecError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Section(#[from] SectionError),
}

/// Errors raised while querying the tabular export data.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("no row in table {table:?} with {column} = {key:?}")]
    RowNotFound {
        table: &'static str,
        column: &'static str,
        key: String,
    },

    #[error("row has no column {0:?}")]
    MissingColumn(&'static str),

    #[error("column {column:?} holds {found}, expected {expected}")]
    ColumnType {
        column: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors raised while building section geometry or stiffness models.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("shape {shape:?} of section {section:?} is not supported")]
    UnsupportedShape { section: String, shape: String },

    #[error("nonprismatic section {section:?} tapering from {start:?} to {end:?} is not supported")]
    UnsupportedTaper {
        section: String,
        start: String,
        end: String,
    },

    #[error("variation law {law:?} is not supported")]
    UnsupportedVariation { law: String },

    #[error("nonprismatic section {0:?} references itself through its taper chain")]
    CyclicTaper(String),
}

/// Convenience type alias for results using [`CrosecError`].
pub type Result<T> = std::result::Result<T, CrosecError>;
