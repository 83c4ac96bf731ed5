//! Server status codes for statement failures
//!
//! The server reports each statement-level failure with a status code of the
//! form `Neo.<Classification>.<Category>.<Title>` and a message. This module
//! turns the code string into a matchable enum so callers can branch on the
//! kind of failure without string parsing.
//!
//! ## Known Codes
//!
//! | Code | Variant |
//! |------|---------|
//! | Neo.ClientError.Schema.ConstraintViolation | ConstraintViolation |
//! | Neo.ClientError.Statement.InvalidSyntax | InvalidSyntax |
//! | Neo.ClientError.Statement.SyntaxError | SyntaxError |
//! | Neo.ClientError.Statement.InvalidSemantics | InvalidSemantics |
//! | Neo.ClientError.Statement.EntityNotFound | EntityNotFound |
//! | Neo.ClientError.Statement.ParameterMissing | ParameterMissing |
//! | Neo.ClientError.Statement.InvalidType | InvalidType |
//! | Neo.ClientError.Statement.ArithmeticError | ArithmeticError |
//! | Neo.ClientError.Transaction.UnknownId | UnknownTransaction |
//! | Neo.ClientError.Request.InvalidFormat | InvalidFormat |
//! | Neo.ClientError.Security.AuthorizationFailed | AuthorizationFailed |
//! | Neo.TransientError.Transaction.DeadlockDetected | DeadlockDetected |
//! | Neo.DatabaseError.Statement.ExecutionFailure | ExecutionFailure |
//! | Neo.DatabaseError.General.UnknownFailure | UnknownFailure |
//!
//! Anything else is kept verbatim in [`ErrorCode::Other`].

use std::fmt;

/// Statement failure discriminator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Schema constraint (uniqueness, existence) violated
    ConstraintViolation,
    /// Statement failed to parse (legacy code)
    InvalidSyntax,
    /// Statement failed to parse
    SyntaxError,
    /// Statement parsed but is semantically invalid
    InvalidSemantics,
    /// Referenced entity does not exist
    EntityNotFound,
    /// A referenced parameter was not supplied
    ParameterMissing,
    /// A value had the wrong type
    InvalidType,
    /// Arithmetic failure (division by zero, overflow)
    ArithmeticError,
    /// The server does not know the transaction
    UnknownTransaction,
    /// The request body was malformed
    InvalidFormat,
    /// The caller is not allowed to run the statement
    AuthorizationFailed,
    /// Transaction deadlocked with another; may succeed on retry
    DeadlockDetected,
    /// Statement failed inside the database
    ExecutionFailure,
    /// Unclassified database failure
    UnknownFailure,
    /// Any code without a dedicated variant
    Other(String),
}

/// Top-level classification of a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The request was at fault; retrying unchanged will fail again
    ClientError,
    /// Temporary failure; retrying may succeed
    TransientError,
    /// The database failed
    DatabaseError,
    /// Code does not follow the `Neo.<Classification>...` layout
    Unknown,
}

impl ErrorCode {
    /// Parse a status code string
    pub fn parse(code: &str) -> Self {
        match code {
            "Neo.ClientError.Schema.ConstraintViolation" => ErrorCode::ConstraintViolation,
            "Neo.ClientError.Statement.InvalidSyntax" => ErrorCode::InvalidSyntax,
            "Neo.ClientError.Statement.SyntaxError" => ErrorCode::SyntaxError,
            "Neo.ClientError.Statement.InvalidSemantics" => ErrorCode::InvalidSemantics,
            "Neo.ClientError.Statement.EntityNotFound" => ErrorCode::EntityNotFound,
            "Neo.ClientError.Statement.ParameterMissing" => ErrorCode::ParameterMissing,
            "Neo.ClientError.Statement.InvalidType" => ErrorCode::InvalidType,
            "Neo.ClientError.Statement.ArithmeticError" => ErrorCode::ArithmeticError,
            "Neo.ClientError.Transaction.UnknownId" => ErrorCode::UnknownTransaction,
            "Neo.ClientError.Request.InvalidFormat" => ErrorCode::InvalidFormat,
            "Neo.ClientError.Security.AuthorizationFailed" => ErrorCode::AuthorizationFailed,
            "Neo.TransientError.Transaction.DeadlockDetected" => ErrorCode::DeadlockDetected,
            "Neo.DatabaseError.Statement.ExecutionFailure" => ErrorCode::ExecutionFailure,
            "Neo.DatabaseError.General.UnknownFailure" => ErrorCode::UnknownFailure,
            other => ErrorCode::Other(other.to_string()),
        }
    }

    /// The wire string for this code
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::ConstraintViolation => "Neo.ClientError.Schema.ConstraintViolation",
            ErrorCode::InvalidSyntax => "Neo.ClientError.Statement.InvalidSyntax",
            ErrorCode::SyntaxError => "Neo.ClientError.Statement.SyntaxError",
            ErrorCode::InvalidSemantics => "Neo.ClientError.Statement.InvalidSemantics",
            ErrorCode::EntityNotFound => "Neo.ClientError.Statement.EntityNotFound",
            ErrorCode::ParameterMissing => "Neo.ClientError.Statement.ParameterMissing",
            ErrorCode::InvalidType => "Neo.ClientError.Statement.InvalidType",
            ErrorCode::ArithmeticError => "Neo.ClientError.Statement.ArithmeticError",
            ErrorCode::UnknownTransaction => "Neo.ClientError.Transaction.UnknownId",
            ErrorCode::InvalidFormat => "Neo.ClientError.Request.InvalidFormat",
            ErrorCode::AuthorizationFailed => "Neo.ClientError.Security.AuthorizationFailed",
            ErrorCode::DeadlockDetected => "Neo.TransientError.Transaction.DeadlockDetected",
            ErrorCode::ExecutionFailure => "Neo.DatabaseError.Statement.ExecutionFailure",
            ErrorCode::UnknownFailure => "Neo.DatabaseError.General.UnknownFailure",
            ErrorCode::Other(code) => code,
        }
    }

    /// Classification segment of the code
    pub fn classification(&self) -> Classification {
        match self.as_str().split('.').nth(1) {
            Some("ClientError") => Classification::ClientError,
            Some("TransientError") => Classification::TransientError,
            Some("DatabaseError") => Classification::DatabaseError,
            _ => Classification::Unknown,
        }
    }

    /// Last segment of the code (`ConstraintViolation`, `UnknownId`, ...)
    pub fn title(&self) -> &str {
        let code = self.as_str();
        code.rsplit('.').next().unwrap_or(code)
    }

    /// Check if the failure is transient
    pub fn is_transient(&self) -> bool {
        self.classification() == Classification::TransientError
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        ErrorCode::parse(code)
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        ErrorCode::parse(&code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
