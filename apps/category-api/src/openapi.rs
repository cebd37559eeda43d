//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Category Service API",
        version = "1.0.0",
        description = "Category Service API information."
    ),
    servers(
        (url = "http://localhost:3001", description = "WMS Category Service Server")
    ),
    nest(
        (path = "/api/categories", api = domain_categories::ApiDoc)
    ),
    tags(
        (name = "categories", description = "Category management endpoints")
    )
)]
pub struct ApiDoc;
