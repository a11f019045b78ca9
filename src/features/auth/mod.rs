//! Registration, login, and bearer-token verification.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/register` | No | Create an account and issue a token |
//! | POST | `/api/auth/login` | No | Exchange credentials for a token |

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod password;
pub mod routes;
pub mod services;
pub mod token;

pub use services::AuthService;
pub use token::JwtKeys;
