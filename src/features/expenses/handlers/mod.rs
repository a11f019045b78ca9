pub mod expense_handler;

pub use expense_handler::{
    __path_create_expense, __path_delete_expense, __path_get_expense, __path_list_expenses,
    __path_update_expense, create_expense, delete_expense, get_expense, list_expenses,
    update_expense,
};
