//! New catalog entries.
//!
//! The add-book and add-author forms are checked here before anything is
//! sent: every failing field is reported at once, and the validated draft is
//! what goes on the wire.

use crate::catalog::{Author, Book};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields of the add-book and add-author forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Isbn,
    Title,
    Author,
    Price,
    Pages,
    Quantity,
    Name,
    Age,
}

impl EntryField {
    pub fn label(&self) -> &'static str {
        match self {
            EntryField::Isbn => "ISBN",
            EntryField::Title => "Title",
            EntryField::Author => "Author",
            EntryField::Price => "Price",
            EntryField::Pages => "Pages",
            EntryField::Quantity => "Quantity",
            EntryField::Name => "Name",
            EntryField::Age => "Age",
        }
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryError {
    pub field: EntryField,
    pub message: String,
}

impl EntryError {
    fn new(field: EntryField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Strip the hyphens and spaces people type into an ISBN.
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

/// An ISBN is 10 or 13 digits once hyphens and spaces are removed.
pub fn is_valid_isbn(isbn: &str) -> bool {
    let digits = normalize_isbn(isbn);
    matches!(digits.len(), 10 | 13) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Add-book form input as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookForm {
    pub isbn: String,
    pub title: String,
    pub author_id: String,
    pub price: String,
    pub pages: String,
    pub quantity: String,
    pub description: String,
    pub cover_url: String,
}

/// Body of `POST /api/books`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    /// Digits only.
    pub isbn: String,
    pub title: String,
    pub author_id: u64,
    /// Rounded to cents.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl NewBookForm {
    /// Check every field and build the request body.
    ///
    /// ISBN, title and author are required. Price defaults to zero and is
    /// rounded to cents; quantity defaults to zero; pages are optional.
    pub fn validate(&self) -> Result<NewBook, CommerceError> {
        let mut errors = Vec::new();

        let isbn = normalize_isbn(&self.isbn);
        if isbn.is_empty() {
            errors.push(EntryError::new(EntryField::Isbn, "ISBN is required"));
        } else if !is_valid_isbn(&isbn) {
            errors.push(EntryError::new(EntryField::Isbn, "ISBN must have 10 or 13 digits"));
        }

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(EntryError::new(EntryField::Title, "Title is required"));
        }

        let author_id = match self.author_id.trim() {
            "" => {
                errors.push(EntryError::new(EntryField::Author, "Author is required"));
                None
            }
            raw => match raw.parse::<u64>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push(EntryError::new(EntryField::Author, "Select an existing author"));
                    None
                }
            },
        };

        let price = match self.price.trim() {
            "" => Some(0.0),
            raw => match raw.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => Some((p * 100.0).round() / 100.0),
                _ => {
                    errors.push(EntryError::new(EntryField::Price, "Enter a valid price"));
                    None
                }
            },
        };

        let pages = match self.pages.trim() {
            "" => Some(None),
            raw => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(Some(n)),
                _ => {
                    errors.push(EntryError::new(EntryField::Pages, "Enter a valid page count"));
                    None
                }
            },
        };

        let quantity = match self.quantity.trim() {
            "" => Some(0),
            raw => match raw.parse::<i64>() {
                Ok(n) if n >= 0 => Some(n),
                _ => {
                    errors.push(EntryError::new(EntryField::Quantity, "Enter a valid quantity"));
                    None
                }
            },
        };

        match (author_id, price, pages, quantity) {
            (Some(author_id), Some(price), Some(pages), Some(quantity)) if errors.is_empty() => {
                Ok(NewBook {
                    isbn,
                    title: title.to_string(),
                    author_id,
                    price,
                    pages,
                    quantity,
                    description: non_empty(&self.description),
                    cover_url: non_empty(&self.cover_url),
                })
            }
            _ => Err(CommerceError::InvalidEntry(errors)),
        }
    }
}

/// Add-author form input as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthorForm {
    pub name: String,
    pub age: String,
}

/// Body of `POST /api/authors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub age: u32,
}

impl NewAuthorForm {
    /// Name and age are both required; age must be a positive whole number.
    pub fn validate(&self) -> Result<NewAuthor, CommerceError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(EntryError::new(EntryField::Name, "Name is required"));
        }

        let age = match self.age.trim() {
            "" => {
                errors.push(EntryError::new(EntryField::Age, "Age is required"));
                None
            }
            raw => match raw.parse::<u32>() {
                Ok(age) if age > 0 => Some(age),
                _ => {
                    errors.push(EntryError::new(EntryField::Age, "Enter a valid age"));
                    None
                }
            },
        };

        match age {
            Some(age) if errors.is_empty() => Ok(NewAuthor {
                name: name.to_string(),
                age,
            }),
            _ => Err(CommerceError::InvalidEntry(errors)),
        }
    }
}

/// Response of `POST /api/books` and `POST /api/authors`.
///
/// `success` defaults to true: a 2xx without the flag is an accepted entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCreated {
    #[serde(default = "accepted")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub book: Option<Book>,
    #[serde(default)]
    pub author: Option<Author>,
}

fn accepted() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_form() -> NewBookForm {
        NewBookForm {
            isbn: "978-0-13-239227-3".into(),
            title: "Distributed Systems".into(),
            author_id: "4".into(),
            price: "79.999".into(),
            pages: "".into(),
            quantity: "".into(),
            description: "  ".into(),
            cover_url: "https://covers.example/ds.jpg".into(),
        }
    }

    fn fields(err: CommerceError) -> Vec<EntryField> {
        match err {
            CommerceError::InvalidEntry(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_isbn_lengths() {
        assert!(is_valid_isbn("0-13-239227-5"));
        assert!(is_valid_isbn("978 0 13 239227 3"));
        assert!(!is_valid_isbn("978-0-13-2392"));
        assert!(!is_valid_isbn("12345678901"));
        assert!(!is_valid_isbn("abcdefghij"));
        assert_eq!(normalize_isbn(" 0-13 -239227-5 "), "0132392275");
    }

    #[test]
    fn test_valid_book_is_normalized() {
        let book = book_form().validate().unwrap();
        assert_eq!(book.isbn, "9780132392273");
        assert_eq!(book.author_id, 4);
        assert_eq!(book.price, 80.0);
        assert_eq!(book.quantity, 0);
        assert_eq!(book.pages, None);
        assert_eq!(book.description, None);

        let body = serde_json::to_value(&book).unwrap();
        assert!(body.get("pages").is_none());
        assert_eq!(body["cover_url"], "https://covers.example/ds.jpg");
    }

    #[test]
    fn test_book_reports_every_bad_field() {
        let form = NewBookForm {
            isbn: "12-34".into(),
            price: "free".into(),
            quantity: "-1".into(),
            ..NewBookForm::default()
        };
        assert_eq!(
            fields(form.validate().unwrap_err()),
            vec![
                EntryField::Isbn,
                EntryField::Title,
                EntryField::Author,
                EntryField::Price,
                EntryField::Quantity
            ]
        );
    }

    #[test]
    fn test_author_requires_name_and_age() {
        let author = NewAuthorForm {
            name: " Andrew S. Tanenbaum ".into(),
            age: "80".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(author.name, "Andrew S. Tanenbaum");
        assert_eq!(author.age, 80);

        let err = NewAuthorForm::default().validate().unwrap_err();
        assert_eq!(fields(err), vec![EntryField::Name, EntryField::Age]);

        let err = NewAuthorForm {
            name: "X".into(),
            age: "0".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(err), vec![EntryField::Age]);
    }

    #[test]
    fn test_created_defaults_to_success() {
        let created: EntryCreated = serde_json::from_str(r#"{"author": {"name": "Kleppmann"}}"#).unwrap();
        assert!(created.success);
        assert_eq!(created.author.unwrap().name, "Kleppmann");
    }
}
