//! Data models for the LocalLibrary catalog

pub mod book;
pub mod book_instance;

// Re-export commonly used types
pub use book::{Book, BookTitle};
pub use book_instance::{
    BookInstance, BookInstanceDetails, BookInstanceForm, BookInstanceInput, BookInstanceStatus,
    NewBookInstance,
};
