//! Order requests.
//!
//! Nothing is persisted: an order is priced against the live gear catalog and
//! turned into two emails, one for the dealership and one confirmation for
//! the customer. Both must be delivered for the order to succeed.

use std::collections::{BTreeSet, HashMap};

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use dealership_core::cart::{Cart, CartLine};
use dealership_core::error::CoreError;
use dealership_core::types::{Cents, DbId};
use dealership_db::repositories::GearProductRepo;
use dealership_notify::templates::{
    order_customer_confirmation, order_merchant_notification, OrderContact,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct OrderCustomer {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, max = 30))]
    pub phone: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub id: DbId,
    #[validate(range(min = 1, max = 99))]
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderRequest {
    #[validate(nested)]
    pub customer: OrderCustomer,
    #[validate(length(min = 1, max = 50))]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub subtotal_cents: Cents,
}

/// POST /api/v1/orders
pub async fn submit_order(
    State(state): State<AppState>,
    Json(input): Json<OrderRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if input.customer.name.trim().is_empty() || input.customer.phone.trim().is_empty() {
        return Err(CoreError::Validation("Name and phone must not be blank".into()).into());
    }

    let cart = price_cart(&state, &input.items).await?;
    let subtotal_cents = cart.subtotal_cents()?;

    let customer = OrderContact {
        name: input.customer.name.trim().to_string(),
        email: input.customer.email.trim().to_string(),
        phone: input.customer.phone.trim().to_string(),
        address: input
            .customer
            .address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
    };

    let merchant_email = order_merchant_notification(
        &state.config.merchant_email,
        &customer,
        &cart,
        input.message.as_deref(),
    )?;
    let customer_email = order_customer_confirmation(
        &state.config.merchant_email,
        &state.config.site_url,
        &customer,
        &cart,
    )?;

    tokio::try_join!(
        state.mailer.send(&merchant_email),
        state.mailer.send(&customer_email),
    )?;

    tracing::info!(
        item_count = cart.item_count(),
        subtotal_cents,
        "Order submitted",
    );

    Ok(Json(DataResponse {
        data: OrderConfirmation {
            item_count: cart.item_count(),
            subtotal_cents,
            lines: cart.lines().to_vec(),
        },
    }))
}

/// Rebuild the cart from requested ids using current catalog prices.
///
/// Any id that is unknown or not active rejects the whole order.
async fn price_cart(state: &AppState, items: &[OrderItemRequest]) -> AppResult<Cart> {
    let ids: Vec<DbId> = items
        .iter()
        .map(|i| i.id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let products: HashMap<DbId, _> = GearProductRepo::find_active_by_ids(&state.pool, &ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !products.contains_key(id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "Unknown or unavailable products: {}",
            missing.join(", ")
        ))
        .into());
    }

    let lines = items.iter().filter_map(|item| {
        products.get(&item.id).map(|product| CartLine {
            id: product.id,
            title: product.title.clone(),
            price_cents: product.price_cents,
            image: product.cover_image.clone(),
            quantity: item.quantity,
        })
    });

    Ok(Cart::from_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: Vec<OrderItemRequest>) -> OrderRequest {
        OrderRequest {
            customer: OrderCustomer {
                name: "Jeanne Martin".into(),
                email: "jeanne@example.com".into(),
                phone: "0612345678".into(),
                address: None,
            },
            items,
            message: None,
        }
    }

    #[test]
    fn item_list_length_and_quantities_are_validated() {
        assert!(request(vec![OrderItemRequest { id: 1, quantity: 2 }])
            .validate()
            .is_ok());

        let errors = request(vec![]).validate().unwrap_err();
        assert!(errors.errors().contains_key("items"));

        let errors = request(vec![OrderItemRequest { id: 1, quantity: 0 }])
            .validate()
            .unwrap_err();
        assert!(errors.errors().contains_key("items"));

        let too_many = (0..51).map(|id| OrderItemRequest { id, quantity: 1 }).collect();
        assert!(request(too_many).validate().is_err());
    }
}
