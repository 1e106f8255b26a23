//! Built-in demo catalog

use crate::models::Book;

/// The catalog the demo store starts with. Ids are short and fixed so demos
/// and docs can reference them.
pub fn sample_books() -> Vec<Book> {
    vec![
        book("1", "Clean Code", "Robert C. Martin", 3),
        book("2", "The Pragmatic Programmer", "Andrew Hunt & David Thomas", 2),
        book("3", "You Don't Know JS", "Kyle Simpson", 4),
        book("4", "Design Patterns", "Gang of Four", 2),
    ]
}

fn book(id: &str, title: &str, author: &str, total_stock: u32) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        total_stock,
        available_stock: total_stock,
    }
}
