#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown filter '{filter}' for {resource}")]
    UnknownFilter {
        resource: &'static str,
        filter: String,
    },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Session store error: {0}")]
    SessionStore(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();

        if messages.is_empty() {
            return CoreError::Validation(errors.to_string());
        }
        messages.sort();
        CoreError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "is required"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn validation_errors_flatten_sorted_by_field() {
        let form = Form {
            name: String::new(),
            email: "nope".into(),
        };
        let err = CoreError::from(form.validate().unwrap_err());
        assert_eq!(
            err.to_string(),
            "Validation failed: email: email, name: is required"
        );
    }
}
