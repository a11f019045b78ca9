mod expense;

pub use expense::{Expense, ExpenseWithCategory};
