use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::app::AppState;
use crate::models::catalog::{self, Product};
use crate::services::cart_store::CartView;

pub async fn list_products() -> Json<&'static [Product]> {
    Json(catalog::PRODUCTS)
}

pub async fn get_cart(State(state): State<AppState>) -> Json<CartView> {
    Json(state.cart.view())
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
}

pub async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>, (StatusCode, Json<Value>)> {
    let Some(product) = catalog::find_product(&request.product_id) else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Produto nao encontrado" })),
        ));
    };

    info!("Adding {} to cart", product.id);
    state.cart.add(product);
    Ok(Json(state.cart.view()))
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Json<CartView> {
    state.cart.update_quantity(&id, request.quantity);
    Json(state.cart.view())
}

pub async fn remove_item(State(state): State<AppState>, Path(id): Path<String>) -> Json<CartView> {
    state.cart.remove(&id);
    Json(state.cart.view())
}

#[derive(Debug, Deserialize)]
pub struct ApplyCouponRequest {
    pub code: String,
}

pub async fn apply_coupon(
    State(state): State<AppState>,
    Json(request): Json<ApplyCouponRequest>,
) -> Json<CartView> {
    state.cart.apply_coupon(&request.code);
    Json(state.cart.view())
}

pub async fn remove_coupon(State(state): State<AppState>) -> Json<CartView> {
    state.cart.remove_coupon();
    Json(state.cart.view())
}

pub async fn close_cart(State(state): State<AppState>) -> Json<CartView> {
    state.cart.close_view();
    Json(state.cart.view())
}
