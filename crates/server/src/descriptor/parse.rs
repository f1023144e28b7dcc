//! Generic descriptor parsing.
//!
//! Every piece of descriptor ingestion goes through [`parse_document`], so
//! error wrapping and success/failure signaling are identical regardless of
//! the target shape: expected validation problems come back as a
//! `ValidationError`, never as a panic.

use serde::de::DeserializeOwned;
use tracing::error;

use crate::api::models::ValidationError;

/// A document to parse: raw YAML text or an already-parsed value.
pub enum DocumentSource {
    Text(String),
    Value(serde_yaml::Value),
}

impl From<&str> for DocumentSource {
    fn from(text: &str) -> Self {
        DocumentSource::Text(text.to_string())
    }
}

impl From<String> for DocumentSource {
    fn from(text: String) -> Self {
        DocumentSource::Text(text)
    }
}

impl From<serde_yaml::Value> for DocumentSource {
    fn from(value: serde_yaml::Value) -> Self {
        DocumentSource::Value(value)
    }
}

/// Last path segment of a type name, for human-readable error messages.
fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

fn validation_failure<T>(err: &serde_yaml::Error) -> ValidationError {
    error!(model = short_type_name::<T>(), %err, "descriptor validation failed");
    ValidationError {
        errors: vec![format!(
            "An error occurred parsing the document as {}. Exception: {}",
            short_type_name::<T>(),
            err
        )],
    }
}

/// Parse a document against a target shape.
///
/// Returns either a populated instance or a structured validation failure
/// referencing the target model and the underlying cause.
pub fn parse_document<T>(source: impl Into<DocumentSource>) -> Result<T, ValidationError>
where
    T: DeserializeOwned,
{
    let value = match source.into() {
        DocumentSource::Text(text) => {
            serde_yaml::from_str(&text).map_err(|e| validation_failure::<T>(&e))?
        }
        DocumentSource::Value(value) => value,
    };
    serde_yaml::from_value(value).map_err(|e| validation_failure::<T>(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Article {
        title: String,
        description: String,
    }

    #[test]
    fn test_parse_from_text() {
        let person: Person = parse_document("name: John Doe\nage: 30\n").unwrap();
        assert_eq!(person.name, "John Doe");
        assert_eq!(person.age, 30);

        let article: Article =
            parse_document("title: Example\ndescription: This is an example\n").unwrap();
        assert_eq!(article.title, "Example");
        assert_eq!(article.description, "This is an example");
    }

    #[test]
    fn test_parse_from_value() {
        let value: serde_yaml::Value = serde_yaml::from_str("name: Jane\nage: 41\n").unwrap();
        let person: Person = parse_document(value).unwrap();
        assert_eq!(person.name, "Jane");
        assert_eq!(person.age, 41);
    }

    #[test]
    fn test_invalid_document_becomes_validation_error() {
        let failure = parse_document::<Person>("name: John Doe\nage: not-a-number\n").unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert!(failure.errors[0].contains("Person"));
    }

    #[test]
    fn test_missing_field_becomes_validation_error() {
        let failure = parse_document::<Article>("title: Lonely\n").unwrap_err();
        assert!(failure.errors[0].contains("Article"));
        assert!(failure.errors[0].contains("description"));
    }
}
