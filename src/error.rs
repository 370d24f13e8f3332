use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON input: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Failed to bind {type_name}: {source}")]
    Bind {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode declared fields: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Bind hook for {type_name} rejected input: {message}")]
    Hook {
        type_name: &'static str,
        message: String,
    },
}

impl Error {
    /// Stable short name used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Parse(_) => "parse",
            Error::NotAnObject { .. } => "not_an_object",
            Error::Bind { .. } => "bind",
            Error::Encode(_) => "encode",
            Error::Hook { .. } => "hook",
        }
    }

    pub(crate) fn not_an_object(value: &serde_json::Value) -> Self {
        let found = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        };
        Error::NotAnObject { found }
    }

    pub(crate) fn bind<R>(source: serde_json::Error) -> Self {
        Error::Bind {
            type_name: std::any::type_name::<R>(),
            source,
        }
    }
}
