//! Data models for Shelfmark

pub mod book;

pub use book::{Book, BookQuery, CreateBookRequest, UpdateBookRequest};
