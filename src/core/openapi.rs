use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{self, dtos as auth_dtos};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::expenses::{dtos as expenses_dtos, handlers as expenses_handlers};
use crate::shared::types::Page;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Expenses
        expenses_handlers::list_expenses,
        expenses_handlers::get_expense,
        expenses_handlers::create_expense,
        expenses_handlers::update_expense,
        expenses_handlers::delete_expense,
    ),
    components(
        schemas(
            // Auth
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthResponseDto,
            // Categories
            categories_dtos::CategoryRequestDto,
            categories_dtos::CategoryResponseDto,
            Page<categories_dtos::CategoryResponseDto>,
            // Expenses
            expenses_dtos::ExpenseRequestDto,
            expenses_dtos::ExpenseResponseDto,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "categories", description = "Expense categories shared by every account"),
        (name = "expenses", description = "The authenticated user's expenses"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Expenses API",
        version = "0.1.0",
        description = "API documentation for the expenses service",
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme the protected paths reference.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the static info block with values from `SwaggerConfig`.
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
