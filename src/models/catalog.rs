use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub price_cents: u64,
    pub original_price_cents: u64,
    pub image: &'static str,
    pub badge: &'static str,
    pub features: &'static [&'static str],
}

pub const PRODUCTS: &[Product] = &[
    Product {
        id: "painel-android",
        name: "Painel Uriel - Android",
        price_cents: 1290,
        original_price_cents: 7990,
        image: "https://i.ibb.co/vMG8xRc/Natal-android.jpg",
        badge: "Mais Vendido",
        features: &[
            "Compativel com todos Android",
            "Atualizacoes automaticas",
            "Suporte 24/7",
            "Funcionalidades exclusivas",
            "Anti-ban integrado",
        ],
    },
    Product {
        id: "painel-iphone",
        name: "Painel Uriel - iPhone",
        price_cents: 1990,
        original_price_cents: 8990,
        image: "https://i.ibb.co/nN1Rcsx0/Natal-iphone-rage.jpg",
        badge: "Exclusivo",
        features: &[
            "Compativel com todos iPhone",
            "Atualizacoes automaticas",
            "Suporte 24/7",
            "Funcionalidades premium",
            "Anti-ban integrado",
        ],
    },
];

pub fn find_product(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|product| product.id == id)
}
