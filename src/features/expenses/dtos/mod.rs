pub mod expense_dto;

pub use expense_dto::{ExpenseRequestDto, ExpenseResponseDto};
