//! Inventory service integration tests
//!
//! End-to-end lending scenarios over the in-memory store.

use shelfmark::{
    config::LendingConfig,
    error::AppError,
    models::{BorrowRecord, BorrowStatus, CreateBook},
    repository::Repository,
    services::inventory::InventoryService,
};

fn seeded_service() -> InventoryService {
    InventoryService::new(Repository::in_memory_seeded(), LendingConfig::default())
}

#[tokio::test]
async fn seeded_catalog_lists_in_insertion_order() {
    let service = seeded_service();

    let books = service.list_books().await.unwrap();
    assert_eq!(books.len(), 4);
    let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Clean Code",
            "The Pragmatic Programmer",
            "You Don't Know JS",
            "Design Patterns"
        ]
    );
}

#[tokio::test]
async fn add_book_appends_with_all_copies_available() {
    let service = seeded_service();
    let before = service.list_books().await.unwrap().len();

    let book = service
        .add_book(CreateBook {
            title: "New Test Book".to_string(),
            author: "Test Author".to_string(),
            total_stock: 5,
        })
        .await
        .unwrap();

    assert_eq!(book.total_stock, 5);
    assert_eq!(book.available_stock, 5);

    let books = service.list_books().await.unwrap();
    assert_eq!(books.len(), before + 1);
    assert_eq!(books.last().unwrap().id, book.id);
}

#[tokio::test]
async fn add_book_rejects_blank_fields_and_zero_stock() {
    let service = seeded_service();

    let bad_inputs = [
        CreateBook {
            title: String::new(),
            author: "Someone".to_string(),
            total_stock: 1,
        },
        CreateBook {
            title: "Something".to_string(),
            author: String::new(),
            total_stock: 1,
        },
        CreateBook {
            title: "Something".to_string(),
            author: "Someone".to_string(),
            total_stock: 0,
        },
    ];
    for input in bad_inputs {
        let err = service.add_book(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    assert_eq!(service.list_books().await.unwrap().len(), 4);
}

#[tokio::test]
async fn borrow_decrements_stock_and_opens_a_record() {
    // Demo catalog: book 1 starts with 3 of 3 copies in.
    let service = seeded_service();

    let book = service.borrow_book("1", "u1", "Alice").await.unwrap();
    assert_eq!(book.available_stock, 2);

    let records = service.list_borrow_records().await.unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.book_id, "1");
    assert_eq!(record.user_id, "u1");
    assert_eq!(record.user_name, "Alice");
    assert_eq!(record.book_title, "Clean Code");
    assert_eq!(record.book_author, "Robert C. Martin");
    assert_eq!(record.status, BorrowStatus::Borrowed);
    assert!(record.return_date.is_none());
}

#[tokio::test]
async fn due_date_is_exactly_fourteen_days_out() {
    let service = seeded_service();
    service.borrow_book("1", "u1", "Alice").await.unwrap();

    let records = service.list_borrow_records().await.unwrap();
    let record = &records[0];
    assert_eq!(
        record.due_date - record.borrow_date,
        chrono::Duration::days(14)
    );
}

#[tokio::test]
async fn borrow_of_unknown_book_is_not_found() {
    let service = seeded_service();

    let err = service.borrow_book("999", "u1", "Alice").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(service.list_borrow_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn borrow_out_of_stock_fails_and_changes_nothing() {
    let service = seeded_service();
    // Book 2 has two copies; drain them with different users.
    service.borrow_book("2", "u1", "Alice").await.unwrap();
    service.borrow_book("2", "u2", "Bob").await.unwrap();

    let err = service.borrow_book("2", "u3", "Carol").await.unwrap_err();
    match err {
        AppError::OutOfStock(message) => {
            assert_eq!(message, "Book not available - out of stock")
        }
        other => panic!("expected OutOfStock, got {other:?}"),
    }

    let books = service.list_books().await.unwrap();
    let book = books.iter().find(|b| b.id == "2").unwrap();
    assert!(!book.in_stock());
    assert_eq!(book.borrowed_count(), 2);
    assert_eq!(service.list_borrow_records().await.unwrap().len(), 2);
}

#[tokio::test]
async fn third_borrow_hits_the_limit_and_leaves_state_unchanged() {
    let service = seeded_service();
    service.borrow_book("1", "u1", "Alice").await.unwrap();
    service.borrow_book("2", "u1", "Alice").await.unwrap();

    let err = service.borrow_book("3", "u1", "Alice").await.unwrap_err();
    match err {
        AppError::LimitExceeded(message) => {
            assert_eq!(message, "You've reached the maximum borrowing limit (2 books)")
        }
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    assert_eq!(service.list_borrow_records().await.unwrap().len(), 2);
    let books = service.list_books().await.unwrap();
    let book = books.iter().find(|b| b.id == "3").unwrap();
    assert_eq!(book.available_stock, book.total_stock);
}

#[tokio::test]
async fn return_restores_stock_and_closes_the_record() {
    let service = seeded_service();
    service.borrow_book("1", "u1", "Alice").await.unwrap();

    let book = service.return_book("1", "u1").await.unwrap();
    assert_eq!(book.available_stock, 3);

    let records = service.list_borrow_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, BorrowStatus::Returned);
    assert!(records[0].return_date.is_some());
}

#[tokio::test]
async fn return_without_borrow_is_not_found() {
    let service = seeded_service();

    let err = service.return_book("1", "u1").await.unwrap_err();
    match err {
        AppError::NotFound(message) => {
            assert_eq!(message, "You haven't borrowed this book")
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn double_return_is_not_found() {
    let service = seeded_service();
    service.borrow_book("1", "u1", "Alice").await.unwrap();
    service.return_book("1", "u1").await.unwrap();

    let err = service.return_book("1", "u1").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Stock is untouched by the failed second return.
    let books = service.list_books().await.unwrap();
    assert_eq!(books[0].available_stock, books[0].total_stock);
}

#[tokio::test]
async fn returning_frees_capacity_to_borrow_again() {
    let service = seeded_service();
    service.borrow_book("1", "u1", "Alice").await.unwrap();
    service.borrow_book("2", "u1", "Alice").await.unwrap();
    assert!(service.borrow_book("3", "u1", "Alice").await.is_err());

    service.return_book("1", "u1").await.unwrap();
    service.borrow_book("3", "u1", "Alice").await.unwrap();

    let active = service.list_active_borrows_for_user("u1").await.unwrap();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn users_are_tracked_separately() {
    let service = seeded_service();
    service.borrow_book("1", "u1", "User One").await.unwrap();
    service.borrow_book("2", "u2", "User Two").await.unwrap();

    let u1 = service.list_active_borrows_for_user("u1").await.unwrap();
    let u2 = service.list_active_borrows_for_user("u2").await.unwrap();
    assert_eq!(u1.len(), 1);
    assert_eq!(u2.len(), 1);
    assert_eq!(u1[0].book_id, "1");
    assert_eq!(u2[0].book_id, "2");
}

#[tokio::test]
async fn duplicate_borrow_of_one_title_closes_oldest_record_first() {
    // Current behavior: a user may hold two copies of the same title while
    // under the cap; a return closes the oldest matching record.
    let service = seeded_service();
    service.borrow_book("1", "u1", "Alice").await.unwrap();
    service.borrow_book("1", "u1", "Alice").await.unwrap();

    let records = service.list_borrow_records().await.unwrap();
    assert_eq!(records.len(), 2);
    let first_id = records[0].id.clone();

    service.return_book("1", "u1").await.unwrap();

    let records = service.list_borrow_records().await.unwrap();
    let closed = records.iter().find(|r| r.id == first_id).unwrap();
    assert_eq!(closed.status, BorrowStatus::Returned);
    assert_eq!(records.iter().filter(|r| r.is_active()).count(), 1);
}

#[tokio::test]
async fn stock_never_leaves_its_bounds() {
    let service = seeded_service();
    let ops = [
        ("borrow", "1", "u1"),
        ("borrow", "1", "u2"),
        ("return", "1", "u1"),
        ("borrow", "2", "u1"),
        ("borrow", "2", "u3"),
        ("return", "2", "u3"),
        ("borrow", "3", "u3"),
        ("return", "1", "u2"),
    ];

    for (op, book_id, user_id) in ops {
        match op {
            "borrow" => {
                service.borrow_book(book_id, user_id, user_id).await.unwrap();
            }
            _ => {
                service.return_book(book_id, user_id).await.unwrap();
            }
        }
        for book in service.list_books().await.unwrap() {
            assert!(book.available_stock <= book.total_stock);
        }
    }
}

#[tokio::test]
async fn inconsistent_ledger_trips_the_double_increment_guard() {
    // Plant an active record without decrementing stock; the return must
    // refuse to push available past total.
    let repository = Repository::in_memory_seeded();
    let book = repository.books.find("1").await.unwrap().unwrap();
    let now = chrono::Utc::now();
    let record = BorrowRecord::open(&book, "u1", "Alice", now, now + chrono::Duration::days(14));
    repository.borrows.insert(record).await.unwrap();

    let service = InventoryService::new(repository, LendingConfig::default());
    let err = service.return_book("1", "u1").await.unwrap_err();
    assert!(matches!(err, AppError::InvariantViolation(_)));
}

#[tokio::test]
async fn lending_policy_is_configurable() {
    let service = InventoryService::new(
        Repository::in_memory_seeded(),
        LendingConfig {
            max_active_borrows: 1,
            loan_period_days: 7,
        },
    );

    service.borrow_book("1", "u1", "Alice").await.unwrap();
    let err = service.borrow_book("2", "u1", "Alice").await.unwrap_err();
    assert!(matches!(err, AppError::LimitExceeded(_)));

    let records = service.list_borrow_records().await.unwrap();
    assert_eq!(
        records[0].due_date - records[0].borrow_date,
        chrono::Duration::days(7)
    );
}
