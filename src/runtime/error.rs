use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File at {:?} not found.", path)]
    FileNotFound { path: std::path::PathBuf },

    #[error("File at {:?} is invalid{}.", path, Error::format_msg_as_detail(msg))]
    FileNotValid {
        path: std::path::PathBuf,
        msg: Option<String>,
    },

    #[error("I/O failure on {:?}: {}", path, source)]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {}: '{}' does not match {}", context, value, expected)]
    Malformed {
        context: String,
        value: String,
        expected: String,
    },

    #[error("Failed to convert {} '{}' to {} type", field, value, target)]
    Conversion {
        field: String,
        value: String,
        target: String,
    },

    #[error("Invalid configuration: {}", msg)]
    InvalidConfig { msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    #[cold]
    pub fn file_not_found<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cold]
    pub fn file_not_valid<P: AsRef<std::path::Path>, M: Into<String>>(
        path: P,
        msg: Option<M>,
    ) -> Self {
        Error::FileNotValid {
            path: path.as_ref().to_path_buf(),
            msg: msg.map(|m| m.into()),
        }
    }

    #[cold]
    pub fn io<P: AsRef<std::path::Path>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    #[cold]
    pub fn malformed<C: Into<String>, V: Into<String>, E: Into<String>>(
        context: C,
        value: V,
        expected: E,
    ) -> Self {
        Error::Malformed {
            context: context.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    #[cold]
    pub fn conversion<F: Into<String>, V: Into<String>, T: Into<String>>(
        field: F,
        value: V,
        target: T,
    ) -> Self {
        Error::Conversion {
            field: field.into(),
            value: value.into(),
            target: target.into(),
        }
    }

    #[cold]
    pub fn invalid_config<M: Into<String>>(msg: M) -> Self {
        Error::InvalidConfig { msg: msg.into() }
    }

    ///////////////////////////////
    /// Label used when reporting the error to the user.
    /// Malformed input and misconfiguration are logic errors, failing files are runtime errors
    pub fn category(&self) -> &'static str {
        match self {
            Error::FileNotFound { .. } | Error::FileNotValid { .. } | Error::Io { .. } => {
                "Runtime error"
            }
            Error::Malformed { .. } | Error::Conversion { .. } | Error::InvalidConfig { .. } => {
                "Logical error"
            }
        }
    }

    pub fn format_msg_as_detail(msg: &Option<String>) -> String {
        match msg {
            Some(m) => format!(" ({})", m),
            None => String::new(),
        }
    }
}
