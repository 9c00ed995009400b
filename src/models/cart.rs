use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub unit_price_cents: u64,
    pub original_price_cents: u64,
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents * u64::from(self.quantity)
    }
}

// Cupons aceitos e o percentual de desconto de cada um
const COUPONS: &[(&str, u8)] = &[("URIEL10", 10), ("URIEL20", 20), ("DESCONTO50", 50)];

pub fn coupon_percent(code: &str) -> Option<u8> {
    COUPONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, percent)| *percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_percent_known_codes() {
        assert_eq!(coupon_percent("URIEL10"), Some(10));
        assert_eq!(coupon_percent("URIEL20"), Some(20));
        assert_eq!(coupon_percent("DESCONTO50"), Some(50));
    }

    #[test]
    fn test_coupon_percent_unknown_code() {
        assert_eq!(coupon_percent("NATAL"), None);
        assert_eq!(coupon_percent(""), None);
        // a normalizacao (trim + uppercase) acontece no carrinho
        assert_eq!(coupon_percent("uriel10"), None);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            id: "painel-android".to_string(),
            name: "Painel Uriel - Android".to_string(),
            unit_price_cents: 1290,
            original_price_cents: 7990,
            image: String::new(),
            quantity: 3,
        };
        assert_eq!(item.line_total_cents(), 3870);
    }
}
