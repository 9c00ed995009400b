use rand::Rng;
use serde::Serialize;

// Prova social randomizada; nenhum dado real envolvido
const FIRST_NAMES: &[&str] = &[
    "Lucas", "Gabriel", "Pedro", "Rafael", "Mateus", "Felipe", "Gustavo", "Bruno", "Leonardo",
    "Diego", "Joao", "Arthur", "Henrique", "Vitor", "Enzo", "Thiago", "Caio", "Guilherme",
    "Bernardo", "Nicolas", "Miguel", "Daniel", "Igor", "Samuel", "Eduardo",
];

const LOCATIONS: &[&str] = &[
    "Sao Paulo, SP",
    "Rio de Janeiro, RJ",
    "Belo Horizonte, MG",
    "Curitiba, PR",
    "Porto Alegre, RS",
    "Salvador, BA",
    "Brasilia, DF",
    "Fortaleza, CE",
    "Recife, PE",
    "Manaus, AM",
    "Goiania, GO",
    "Campinas, SP",
    "Florianopolis, SC",
    "Vitoria, ES",
    "Natal, RN",
    "Campo Grande, MS",
    "Macae, RJ",
    "Uberlandia, MG",
];

const PRODUCT_NAMES: &[&str] = &["Painel Uriel - Android", "Painel Uriel - iPhone"];

const DISPLAY_MS: u64 = 4000;
const MIN_DELAY_MS: u64 = 8000;
const DELAY_SPREAD_MS: u64 = 7000;

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseNotification {
    pub name: &'static str,
    pub product: &'static str,
    pub location: &'static str,
    pub display_ms: u64,
    pub next_delay_ms: u64,
}

pub fn sample() -> PurchaseNotification {
    let mut rng = rand::thread_rng();
    PurchaseNotification {
        name: FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
        product: PRODUCT_NAMES[rng.gen_range(0..PRODUCT_NAMES.len())],
        location: LOCATIONS[rng.gen_range(0..LOCATIONS.len())],
        display_ms: DISPLAY_MS,
        next_delay_ms: MIN_DELAY_MS + rng.gen_range(0..=DELAY_SPREAD_MS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_never_yields_empty_fields() {
        for _ in 0..100 {
            let notification = sample();
            assert!(!notification.name.is_empty());
            assert!(!notification.product.is_empty());
            assert!(!notification.location.is_empty());
        }
    }

    #[test]
    fn test_sample_cadence_bounds() {
        for _ in 0..100 {
            let notification = sample();
            assert_eq!(notification.display_ms, 4000);
            assert!((8000..=15000).contains(&notification.next_delay_ms));
        }
    }
}
