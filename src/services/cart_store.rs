use std::sync::Mutex;

use serde::Serialize;
use tracing::info;

use crate::models::cart::{coupon_percent, CartItem};
use crate::models::catalog::Product;
use crate::models::checkout::DEFAULT_PRODUCT_NAME;
use crate::utils::money::percent_discount;

#[derive(Debug, Default)]
struct CartState {
    items: Vec<CartItem>,
    applied_coupon: Option<String>,
    coupon_error: Option<String>,
    open: bool,
}

// Carrinho unico em memoria; nao persiste entre execucoes
pub struct CartStore {
    state: Mutex<CartState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub subtotal_cents: u64,
    pub discount_cents: u64,
    pub total_cents: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_coupon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_error: Option<String>,
    pub open: bool,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CartState::default()),
        }
    }

    // Mesmo produto incrementa a quantidade; adicionar sempre abre o carrinho
    pub fn add(&self, product: &Product) {
        let mut state = self.state.lock().unwrap();
        if let Some(item) = state.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity += 1;
        } else {
            state.items.push(CartItem {
                id: product.id.to_string(),
                name: product.name.to_string(),
                unit_price_cents: product.price_cents,
                original_price_cents: product.original_price_cents,
                image: product.image.to_string(),
                quantity: 1,
            });
        }
        state.open = true;
    }

    pub fn update_quantity(&self, id: &str, quantity: u32) {
        // decremento para zero e no-op; remover e uma acao separada
        if quantity < 1 {
            return;
        }
        let mut state = self.state.lock().unwrap();
        if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    pub fn remove(&self, id: &str) {
        let mut state = self.state.lock().unwrap();
        state.items.retain(|item| item.id != id);
    }

    pub fn apply_coupon(&self, code: &str) {
        let normalized = code.trim().to_uppercase();
        let mut state = self.state.lock().unwrap();
        match coupon_percent(&normalized) {
            Some(_) => {
                state.applied_coupon = Some(normalized);
                state.coupon_error = None;
            }
            None => {
                state.applied_coupon = None;
                state.coupon_error = Some("Cupom invalido".to_string());
            }
        }
    }

    pub fn remove_coupon(&self) {
        let mut state = self.state.lock().unwrap();
        state.applied_coupon = None;
        state.coupon_error = None;
    }

    pub fn close_view(&self) {
        self.state.lock().unwrap().open = false;
    }

    // Chamado quando o pagamento confirma
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.items.clear();
        state.applied_coupon = None;
        state.coupon_error = None;
        info!("Cart cleared after confirmed payment");
    }

    pub fn total_cents(&self) -> u64 {
        let state = self.state.lock().unwrap();
        let subtotal = subtotal_cents(&state.items);
        subtotal - discount_cents(&state, subtotal)
    }

    pub fn product_name(&self) -> String {
        let state = self.state.lock().unwrap();
        match state.items.as_slice() {
            [] => DEFAULT_PRODUCT_NAME.to_string(),
            [only] => only.name.clone(),
            items => items
                .iter()
                .map(|item| item.name.as_str())
                .collect::<Vec<_>>()
                .join(" + "),
        }
    }

    pub fn view(&self) -> CartView {
        let state = self.state.lock().unwrap();
        let subtotal = subtotal_cents(&state.items);
        let discount = discount_cents(&state, subtotal);
        CartView {
            item_count: state.items.iter().map(|item| item.quantity).sum(),
            items: state.items.clone(),
            subtotal_cents: subtotal,
            discount_cents: discount,
            total_cents: subtotal - discount,
            applied_coupon: state.applied_coupon.clone(),
            coupon_percent: state
                .applied_coupon
                .as_deref()
                .and_then(coupon_percent),
            coupon_error: state.coupon_error.clone(),
            open: state.open,
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

fn subtotal_cents(items: &[CartItem]) -> u64 {
    items.iter().map(CartItem::line_total_cents).sum()
}

fn discount_cents(state: &CartState, subtotal: u64) -> u64 {
    state
        .applied_coupon
        .as_deref()
        .and_then(coupon_percent)
        .map(|percent| percent_discount(subtotal, percent))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::find_product;
    use proptest::prelude::*;

    fn store_with_android() -> CartStore {
        let store = CartStore::new();
        store.add(find_product("painel-android").unwrap());
        store
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let store = store_with_android();
        assert_eq!(store.view().items[0].quantity, 1);

        store.add(find_product("painel-android").unwrap());
        let view = store.view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert!(view.open);
    }

    #[test]
    fn test_update_quantity_guards_below_one() {
        let store = store_with_android();
        store.update_quantity("painel-android", 0);
        assert_eq!(store.view().items[0].quantity, 1);

        store.update_quantity("painel-android", 5);
        assert_eq!(store.view().items[0].quantity, 5);
    }

    #[test]
    fn test_remove_deletes_regardless_of_quantity() {
        let store = store_with_android();
        store.update_quantity("painel-android", 4);
        store.remove("painel-android");
        assert!(store.view().items.is_empty());
    }

    #[test]
    fn test_totals_with_coupon() {
        let store = store_with_android();
        store.add(find_product("painel-iphone").unwrap());
        let view = store.view();
        assert_eq!(view.subtotal_cents, 1290 + 1990);
        assert_eq!(view.total_cents, view.subtotal_cents);

        store.apply_coupon("uriel10 ");
        let view = store.view();
        assert_eq!(view.applied_coupon.as_deref(), Some("URIEL10"));
        assert_eq!(view.discount_cents, 328);
        assert_eq!(view.total_cents, view.subtotal_cents - 328);
        assert_eq!(store.total_cents(), view.total_cents);
    }

    #[test]
    fn test_unknown_coupon_sets_error_and_clears_applied() {
        let store = store_with_android();
        store.apply_coupon("URIEL10");
        assert!(store.view().coupon_error.is_none());

        store.apply_coupon("NATAL25");
        let view = store.view();
        assert_eq!(view.applied_coupon, None);
        assert_eq!(view.coupon_error.as_deref(), Some("Cupom invalido"));
        assert_eq!(view.discount_cents, 0);

        // cupom valido limpa o erro anterior
        store.apply_coupon("DESCONTO50");
        let view = store.view();
        assert!(view.coupon_error.is_none());
        assert_eq!(view.applied_coupon.as_deref(), Some("DESCONTO50"));
    }

    #[test]
    fn test_clear_resets_items_and_coupon() {
        let store = store_with_android();
        store.apply_coupon("URIEL20");
        store.clear();
        let view = store.view();
        assert!(view.items.is_empty());
        assert_eq!(view.applied_coupon, None);
        assert_eq!(view.total_cents, 0);
    }

    #[test]
    fn test_product_name_composition() {
        let store = CartStore::new();
        assert_eq!(store.product_name(), "Painel do Uriel");

        store.add(find_product("painel-android").unwrap());
        assert_eq!(store.product_name(), "Painel Uriel - Android");

        store.add(find_product("painel-iphone").unwrap());
        assert_eq!(
            store.product_name(),
            "Painel Uriel - Android + Painel Uriel - iPhone"
        );
    }

    proptest! {
        #[test]
        fn prop_cart_invariants(
            android_adds in 1u32..20,
            iphone_adds in 0u32..20,
            coupon_idx in 0usize..4,
        ) {
            let store = CartStore::new();
            for _ in 0..android_adds {
                store.add(find_product("painel-android").unwrap());
            }
            for _ in 0..iphone_adds {
                store.add(find_product("painel-iphone").unwrap());
            }
            let codes = ["URIEL10", "URIEL20", "DESCONTO50", "INVALIDO"];
            store.apply_coupon(codes[coupon_idx]);

            let view = store.view();
            for item in &view.items {
                prop_assert!(item.quantity >= 1);
            }
            let expected_subtotal: u64 = view
                .items
                .iter()
                .map(|item| item.unit_price_cents * u64::from(item.quantity))
                .sum();
            prop_assert_eq!(view.subtotal_cents, expected_subtotal);
            prop_assert!(view.discount_cents <= view.subtotal_cents);
            prop_assert_eq!(view.total_cents, view.subtotal_cents - view.discount_cents);
        }
    }
}
