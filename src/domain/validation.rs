use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidGroupId,
    TooManyContactVariables { max: usize, actual: usize },
    InvalidContactVariableName { name: String },
    UnknownProtocol { input: String },
    UnknownTransportMode { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { .. } => write!(f, "Invalid Phone Number."),
            Self::InvalidGroupId => write!(f, "Invalid Group ID."),
            Self::TooManyContactVariables { max, actual } => {
                write!(f, "Too many contact variables: {actual} (max {max}).")
            }
            Self::InvalidContactVariableName { name } => {
                write!(f, "Invalid contact variable name: {name:?}.")
            }
            Self::UnknownProtocol { input } => write!(f, "unknown protocol: {input}"),
            Self::UnknownTransportMode { input } => write!(f, "unknown transport mode: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "connection_id",
        };
        assert_eq!(err.to_string(), "connection_id must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "abcd".to_owned(),
        };
        assert_eq!(err.to_string(), "Invalid Phone Number.");

        assert_eq!(ValidationError::InvalidGroupId.to_string(), "Invalid Group ID.");

        let err = ValidationError::TooManyContactVariables { max: 25, actual: 26 };
        assert_eq!(err.to_string(), "Too many contact variables: 26 (max 25).");

        let err = ValidationError::InvalidContactVariableName {
            name: "password".to_owned(),
        };
        assert_eq!(err.to_string(), "Invalid contact variable name: \"password\".");

        let err = ValidationError::UnknownProtocol {
            input: "FTP".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown protocol: FTP");
    }
}
