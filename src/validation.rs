use serde_json::{Map, Value};

use crate::store::Book;

/// Checks an untyped JSON payload against the book schema.
///
/// Returns the normalized [`Book`] when every rule passes, or one
/// human-readable error per violated rule, in field order. Callers match the
/// year failures by the `"year"` substring, so those messages must name the
/// field.
pub fn validate_book(payload: &Value) -> Result<Book, Vec<String>> {
    let Some(object) = payload.as_object() else {
        return Err(vec!["payload must be a JSON object".to_string()]);
    };

    let mut errors = Vec::new();

    let isbn = string_field(object, "isbn", &mut errors);
    let title = string_field(object, "title", &mut errors);
    let author = string_field(object, "author", &mut errors);
    let publisher = string_field(object, "publisher", &mut errors);
    let year = year_field(object, &mut errors);

    match (isbn, title, author, publisher, year) {
        (Some(isbn), Some(title), Some(author), Some(publisher), Some(year)) => Ok(Book {
            isbn,
            title,
            author,
            publisher,
            year,
        }),
        _ => Err(errors),
    }
}

fn string_field(object: &Map<String, Value>, name: &str, errors: &mut Vec<String>) -> Option<String> {
    let Some(value) = object.get(name) else {
        errors.push(format!("{name} is required"));
        return None;
    };

    let Some(value) = value.as_str() else {
        errors.push(format!("{name} must be a string"));
        return None;
    };

    if value.is_empty() {
        errors.push(format!("{name} must not be empty"));
        return None;
    }

    Some(value.to_string())
}

fn year_field(object: &Map<String, Value>, errors: &mut Vec<String>) -> Option<i32> {
    let Some(value) = object.get("year") else {
        errors.push("year is required".to_string());
        return None;
    };

    let Some(year) = value.as_i64() else {
        errors.push("year must be an integer".to_string());
        return None;
    };

    if year <= 0 || year > i64::from(i32::MAX) {
        errors.push("year must be a positive integer".to_string());
        return None;
    }

    Some(year as i32)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn valid_payload_normalizes_into_a_book() {
        let payload = json!({
            "isbn": "1234567890",
            "title": "Test Book",
            "author": "Tester",
            "publisher": "Test Pub",
            "year": 2024
        });

        let book = validate_book(&payload).expect("payload is valid");

        assert_eq!(book.isbn, "1234567890");
        assert_eq!(book.title, "Test Book");
        assert_eq!(book.author, "Tester");
        assert_eq!(book.publisher, "Test Pub");
        assert_eq!(book.year, 2024);
    }

    #[test]
    fn missing_fields_produce_one_error_each_in_field_order() {
        let payload = json!({ "title": "Incomplete Book" });

        let errors = validate_book(&payload).expect_err("payload is incomplete");

        assert_eq!(
            errors,
            vec![
                "isbn is required",
                "author is required",
                "publisher is required",
                "year is required",
            ]
        );
    }

    #[test]
    fn empty_payload_reports_all_five_fields() {
        let errors = validate_book(&json!({})).expect_err("payload is empty");

        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn non_string_fields_are_rejected() {
        let payload = json!({
            "isbn": 1234567890,
            "title": "Test Book",
            "author": "Tester",
            "publisher": "Test Pub",
            "year": 2024
        });

        let errors = validate_book(&payload).expect_err("isbn is not a string");

        assert_eq!(errors, vec!["isbn must be a string"]);
    }

    #[test]
    fn empty_strings_are_rejected() {
        let payload = json!({
            "isbn": "1234567890",
            "title": "",
            "author": "Tester",
            "publisher": "Test Pub",
            "year": 2024
        });

        let errors = validate_book(&payload).expect_err("title is empty");

        assert_eq!(errors, vec!["title must not be empty"]);
    }

    #[test]
    fn negative_year_error_mentions_year() {
        let payload = json!({
            "isbn": "0987654321",
            "title": "Bad Year",
            "author": "Tester",
            "publisher": "Test Pub",
            "year": -1
        });

        let errors = validate_book(&payload).expect_err("year is negative");

        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("year"));
    }

    #[test]
    fn non_integer_year_error_mentions_year() {
        for year in [json!("not a number"), json!(2024.5), json!(null)] {
            let payload = json!({
                "isbn": "0987654321",
                "title": "Bad Year",
                "author": "Tester",
                "publisher": "Test Pub",
                "year": year
            });

            let errors = validate_book(&payload).expect_err("year is not an integer");

            assert_eq!(errors, vec!["year must be an integer"]);
        }
    }

    #[test]
    fn non_object_payload_is_rejected_with_a_single_error() {
        let errors = validate_book(&json!(["not", "an", "object"])).expect_err("payload is an array");

        assert_eq!(errors.len(), 1);
    }
}
