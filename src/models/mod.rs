//! Domain models

pub mod book;
pub mod loan;
pub mod member;

pub use book::Book;
pub use loan::Loan;
pub use member::Member;
