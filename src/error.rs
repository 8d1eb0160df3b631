use std::fmt::Formatter;

/// Hard failure of the pipeline. Parse-level problems never surface here:
/// the driver logs them and continues with the runs collected so far, so
/// only input I/O can fail the extraction outright.
#[derive(Debug)]
pub enum OffsetError {
    IoError(std::io::Error),
}

impl std::fmt::Display for OffsetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            OffsetError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for OffsetError {}

impl From<std::io::Error> for OffsetError {
    fn from(e: std::io::Error) -> Self {
        OffsetError::IoError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_carries_the_cause() {
        let e = OffsetError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert!(matches!(e, OffsetError::IoError(_)));
        assert_eq!(e.to_string(), "IO error: no such file");
    }
}
