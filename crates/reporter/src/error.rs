use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error while writing report: {0}")]
    Csv(#[from] csv::Error),
}
