use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, put},
};
use axum_helpers::{
    AppJson, ParsedPath,
    errors::responses::{
        BadRequestIdentifierResponse, InternalServerErrorResponse, JsonExtractionResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{
    Category, CategoryFilter, CategoryId, CategoryListResponse, CreateCategory, MessageResponse,
    UpdateCategory,
};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

/// OpenAPI documentation for the Categories API
#[derive(OpenApi)]
#[openapi(
    paths(list_categories, create_category, update_category, delete_category),
    components(
        schemas(
            Category,
            CreateCategory,
            UpdateCategory,
            CategoryListResponse,
            MessageResponse
        ),
        responses(
            BadRequestIdentifierResponse,
            JsonExtractionResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "categories", description = "Category management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the categories router with all HTTP endpoints
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/{id}", put(update_category).delete(delete_category))
        .with_state(shared_service)
}

/// Get all categories.
///
/// Get all categories by default, or those whose name contains `name`
/// (case-insensitive).
#[utoipa::path(
    get,
    path = "",
    tag = "categories",
    params(CategoryFilter),
    responses(
        (status = 200, description = "Success get all categories.", body = CategoryListResponse,
            example = json!({
                "success": true,
                "data": [{
                    "id": "64056dc7c2c95ac1303b4b21",
                    "name": "Senjata Api",
                    "description": "Ini adalah senjata api."
                }]
            })),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Query(filter): Query<CategoryFilter>,
) -> CategoryResult<Json<CategoryListResponse>> {
    let categories = service.list_categories(filter).await?;
    Ok(Json(CategoryListResponse::ok(categories)))
}

/// Create a new category.
#[utoipa::path(
    post,
    path = "",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 200, description = "Success add new category.", body = MessageResponse,
            example = json!({
                "success": true,
                "message": "Category [Senjata Tajam] successfully added!"
            })),
        (status = 400, response = JsonExtractionResponse),
        (status = 422, description = "A category with this name already exists", body = MessageResponse,
            example = json!({
                "success": false,
                "message": "Category [Senjata Tajam] is already exists!"
            })),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    AppJson(input): AppJson<CreateCategory>,
) -> CategoryResult<Json<MessageResponse>> {
    let category = service.create_category(input).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Category [{}] successfully added!",
        category.name
    ))))
}

/// Update a category.
///
/// Update a category by its ID. Only `name` and `description` may be sent; a
/// request without a body changes nothing.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "The category ID.", example = "64056dc7c2c95ac1303b4b21")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Success update the category.", body = MessageResponse,
            example = json!({
                "success": true,
                "message": "Category [Senjata Api] successfully updated!"
            })),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 422, description = "Category not found, or the body has unknown fields", body = MessageResponse,
            example = json!({
                "success": false,
                "message": "Category not found!"
            })),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ParsedPath(id): ParsedPath<CategoryId>,
    input: Option<AppJson<UpdateCategory>>,
) -> CategoryResult<Json<MessageResponse>> {
    let input = input.map(|AppJson(input)| input).unwrap_or_default();
    let category = service.update_category(id, input).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Category [{}] successfully updated!",
        category.name
    ))))
}

/// Delete a category.
///
/// Delete a category by its ID.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "The category ID.", example = "64056dc7c2c95ac1303b4b21")
    ),
    responses(
        (status = 200, description = "Success delete the category.", body = MessageResponse,
            example = json!({
                "success": true,
                "message": "Category [Senjata Api] successfully removed!"
            })),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 422, description = "Category not found", body = MessageResponse,
            example = json!({
                "success": false,
                "message": "Category not found!"
            })),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ParsedPath(id): ParsedPath<CategoryId>,
) -> CategoryResult<Json<MessageResponse>> {
    let category = service.delete_category(id).await?;
    Ok(Json(MessageResponse::ok(format!(
        "Category [{}] successfully removed!",
        category.name
    ))))
}
