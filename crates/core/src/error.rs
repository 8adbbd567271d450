#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    #[error("Cannot convert {field} to {expected}: {value}")]
    Coercion {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}
