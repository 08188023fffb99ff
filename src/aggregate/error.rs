use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregateError {
    #[error("Cannot fit a trend over {distinct_years} distinct year(s); at least 2 are required")]
    DegenerateTrend { distinct_years: usize },

    #[error("Series length mismatch: {dates} dates but {values} values")]
    LengthMismatch { dates: usize, values: usize },
}

pub(crate) fn ensure_aligned<T>(dates: &[impl AsRef<str>], values: &[T]) -> Result<(), AggregateError> {
    if dates.len() == values.len() {
        Ok(())
    } else {
        Err(AggregateError::LengthMismatch {
            dates: dates.len(),
            values: values.len(),
        })
    }
}
