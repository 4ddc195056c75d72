//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "Signup, login and product catalog backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Users", description = "Account signup and login"),
        (name = "Products", description = "Product catalog")
    )
)]
struct ShopInfo;

/// Combined OpenAPI documentation for all APIs.
///
/// Domain routes live at the root, so the domain documents are merged rather
/// than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        ShopInfo::openapi()
            .merge_from(domain_users::ApiDoc::openapi())
            .merge_from(domain_products::ApiDoc::openapi())
    }
}
