// rubberband-compare/src/compare/errors.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestRunLoadError {
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Header must name an instance column followed by at least one metric column")]
    MissingColumns,
    #[error("Duplicate instance name: {0}")]
    DuplicateInstance(String),
    #[error("Test run '{0}' has no instance rows")]
    EmptyTable(String),
}

#[derive(Error, Debug)]
pub enum ComparisonTableBuilderError {
    #[error("Unitialized field on ComparisonTableBuilder: {0}")]
    UninitializedFieldError(String),
    #[error("At least one comparison run is required")]
    NoComparisonRuns,
    #[error("No shared instances between the base run and the comparison runs")]
    NoCommonInstances,
}
