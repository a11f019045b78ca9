//! Expense category catalog shared by every account.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | Yes | Page through categories (search, sort) |
//! | GET | `/api/categories/{id}` | Yes | Get one category |
//! | POST | `/api/categories` | Yes | Create a category |
//! | PUT | `/api/categories/{id}` | Yes | Update a category |
//! | DELETE | `/api/categories/{id}` | Yes | Delete an unreferenced category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
