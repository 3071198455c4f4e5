//! The route handler for listing the predefined categories.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    app_state::CategoryState,
    category::Category,
    transaction::TransactionType,
};

/// The query parameters for listing categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    /// Only list categories that apply to this transaction type, "expense" or "income".
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
}

/// A route handler that responds with the predefined categories in display order.
///
/// If the `type` query parameter is given, only the categories that can be used
/// with that transaction type are listed.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
    Query(query): Query<CategoriesQuery>,
) -> Result<Json<Vec<&'static Category>>, Error> {
    let transaction_type = query
        .transaction_type
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::parse::<TransactionType>)
        .transpose()?;

    let categories = match transaction_type {
        Some(transaction_type) => state.categories.for_type(transaction_type),
        None => state.categories.all().iter().collect(),
    };

    Ok(Json(categories))
}
