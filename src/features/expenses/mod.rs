//! Per-user expense records, each pointing at a shared category.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/expenses` | Yes | List the caller's expenses, newest first |
//! | GET | `/api/expenses/{id}` | Yes | Get one of the caller's expenses |
//! | POST | `/api/expenses` | Yes | Record an expense |
//! | PUT | `/api/expenses/{id}` | Yes | Update one of the caller's expenses |
//! | DELETE | `/api/expenses/{id}` | Yes | Delete one of the caller's expenses |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ExpenseService;
