use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FepResult<T> = Result<T, FepError>;
pub type ParserResult<T> = FepResult<T>;
pub type ComputeResult<T> = FepResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FepErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
}

impl FepErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FepError {
    category: FepErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl FepError {
    pub fn new(
        category: FepErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            FepErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FepErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(FepErrorCategory::ComputationError, placeholder, message)
    }

    /// A results-file line that could not be turned into a sample record.
    pub fn malformed_record(
        source_name: &str,
        line_number: usize,
        line: &str,
        reason: impl Display,
    ) -> Self {
        Self::input_validation(
            "INPUT.MALFORMED_RECORD",
            format!(
                "malformed record in '{}' at line {}: {} (line: '{}')",
                source_name,
                line_number,
                reason,
                line.trim_end()
            ),
        )
    }

    pub const fn category(&self) -> FepErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for FepError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for FepError {}

#[cfg(test)]
mod tests {
    use super::{FepError, FepErrorCategory};

    #[test]
    fn exit_codes_are_stable() {
        let cases = [
            (FepErrorCategory::Success, 0),
            (FepErrorCategory::InputValidationError, 2),
            (FepErrorCategory::IoSystemError, 3),
            (FepErrorCategory::ComputationError, 4),
        ];

        for (category, exit_code) in cases {
            assert_eq!(category.exit_code(), exit_code);
        }
        assert!(!FepErrorCategory::Success.is_fatal());
    }

    #[test]
    fn malformed_record_renders_line_context() {
        let error = FepError::malformed_record("results.dat", 7, "0.02/x_0.02_a 1\n", "too short");

        assert_eq!(error.category(), FepErrorCategory::InputValidationError);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.MALFORMED_RECORD] malformed record in 'results.dat' at line 7: too short (line: '0.02/x_0.02_a 1')"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 2")
        );
    }
}
