use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_PRODUCT_ID: &str = "painel_uriel";
pub const DEFAULT_PRODUCT_NAME: &str = "Painel do Uriel";

// Corpo cru recebido no checkout; tudo opcional ate a normalizacao
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChargeRequest {
    pub amount: Option<u64>,
    pub buyer: Option<BuyerInput>,
    pub product: Option<ProductDescriptor>,
    pub offer: Option<OfferInput>,
    pub tracking: Option<TrackingInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuyerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferInput {
    // o gateway exige string; aceita numero e coage
    pub id: Option<Value>,
    pub name: Option<String>,
    pub quantity: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackingInput {
    #[serde(rename = "ref")]
    pub referral: Option<String>,
    pub src: Option<String>,
    pub sck: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_id: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

// Payload normalizado enviado ao gateway
#[derive(Debug, Clone, Serialize)]
pub struct ChargePayload {
    pub amount: u64,
    pub buyer: BuyerWire,
    pub product: ProductDescriptor,
    pub offer: OfferWire,
    pub tracking: TrackingWire,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuyerWire {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferWire {
    pub id: String,
    pub name: String,
    pub quantity: u64,
}

// O gateway rejeita atribuicao incompleta: todo campo sempre preenchido
#[derive(Debug, Clone, Serialize)]
pub struct TrackingWire {
    #[serde(rename = "ref")]
    pub referral: String,
    pub src: String,
    pub sck: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_id: String,
    pub utm_term: String,
    pub utm_content: String,
}

impl TrackingWire {
    fn with_defaults(input: Option<TrackingInput>) -> Self {
        let input = input.unwrap_or_default();
        Self {
            referral: input.referral.unwrap_or_else(|| "direct".to_string()),
            src: input.src.unwrap_or_else(|| "site".to_string()),
            sck: input.sck.unwrap_or_else(|| "organic".to_string()),
            utm_source: input.utm_source.unwrap_or_else(|| "direct".to_string()),
            utm_medium: input.utm_medium.unwrap_or_else(|| "none".to_string()),
            utm_campaign: input.utm_campaign.unwrap_or_else(|| "checkout".to_string()),
            utm_id: input.utm_id.unwrap_or_default(),
            utm_term: input.utm_term.unwrap_or_default(),
            utm_content: input.utm_content.unwrap_or_default(),
        }
    }
}

pub fn has_full_name(name: &str) -> bool {
    name.split_whitespace().nth(1).is_some()
}

pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !local.contains(char::is_whitespace)
                && !domain.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

pub fn normalize(request: ChargeRequest) -> Result<ChargePayload, &'static str> {
    let amount = request.amount.unwrap_or(0);
    let buyer = request.buyer.unwrap_or_default();
    let name = buyer.name.as_deref().map(str::trim).unwrap_or("");
    let email = buyer.email.as_deref().map(str::trim).unwrap_or("");

    if amount == 0 || name.is_empty() || email.is_empty() {
        return Err("Campos obrigatorios ausentes");
    }
    if !has_full_name(name) {
        return Err("buyer.name precisa ser Nome e Sobrenome.");
    }

    let offer = request.offer.unwrap_or_default();

    Ok(ChargePayload {
        amount,
        buyer: BuyerWire {
            name: name.to_string(),
            email: email.to_string(),
            document: buyer.document.filter(|value| !value.is_empty()),
            phone: buyer.phone.filter(|value| !value.is_empty()),
        },
        product: request.product.unwrap_or_else(|| ProductDescriptor {
            id: DEFAULT_PRODUCT_ID.to_string(),
            name: DEFAULT_PRODUCT_NAME.to_string(),
        }),
        offer: OfferWire {
            id: coerce_offer_id(offer.id),
            name: offer.name.unwrap_or_else(|| "Oferta Promocional".to_string()),
            quantity: coerce_quantity(offer.quantity.as_ref()),
        },
        tracking: TrackingWire::with_defaults(request.tracking),
    })
}

fn coerce_offer_id(id: Option<Value>) -> String {
    match id {
        Some(Value::String(id)) if !id.is_empty() => id,
        Some(Value::Number(id)) => id.to_string(),
        _ => "oferta_promocional".to_string(),
    }
}

fn coerce_quantity(quantity: Option<&Value>) -> u64 {
    quantity
        .and_then(Value::as_u64)
        .filter(|quantity| *quantity >= 1)
        .unwrap_or(1)
}

// Resultado de uma cobranca criada; external_id e a chave do polling
#[derive(Debug, Clone, Serialize)]
pub struct ChargeResult {
    pub external_id: String,
    pub pix_code: String,
    pub qr_base64: String,
}

impl ChargeResult {
    pub fn from_response(body: &Value) -> Option<Self> {
        let data = body.get("data")?;
        let pix = data.get("pix")?;
        Some(Self {
            external_id: data.get("external_id")?.as_str()?.to_string(),
            pix_code: pix.get("code")?.as_str()?.to_string(),
            qr_base64: pix.get("qrcode_base64")?.as_str()?.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn from_response(body: &Value) -> Self {
        match body.pointer("/data/status").and_then(Value::as_str) {
            Some("paid") => Self::Paid,
            Some("failed") => Self::Failed,
            // qualquer outro status segue aguardando
            _ => Self::Pending,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }
}

pub fn create_error_message(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.pointer("/detail/message").and_then(Value::as_str))
        .or_else(|| body.pointer("/errors/0/message").and_then(Value::as_str))
        .unwrap_or("Erro ao criar checkout")
        .to_string()
}

pub fn status_error_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or("Erro ao consultar status")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> ChargeRequest {
        ChargeRequest {
            amount: Some(1990),
            buyer: Some(BuyerInput {
                name: Some("Uriel Teste".to_string()),
                email: Some("u@x.com".to_string()),
                document: None,
                phone: None,
            }),
            ..ChargeRequest::default()
        }
    }

    #[test]
    fn test_normalize_rejects_zero_amount() {
        let mut request = valid_request();
        request.amount = Some(0);
        assert_eq!(normalize(request).unwrap_err(), "Campos obrigatorios ausentes");
    }

    #[test]
    fn test_normalize_rejects_missing_buyer() {
        let mut request = valid_request();
        request.buyer = None;
        assert_eq!(normalize(request).unwrap_err(), "Campos obrigatorios ausentes");
    }

    #[test]
    fn test_normalize_rejects_single_token_name() {
        let mut request = valid_request();
        request.buyer.as_mut().unwrap().name = Some("Uriel".to_string());
        assert_eq!(
            normalize(request).unwrap_err(),
            "buyer.name precisa ser Nome e Sobrenome."
        );
    }

    #[test]
    fn test_normalize_accepts_valid_request() {
        let payload = normalize(valid_request()).unwrap();
        assert_eq!(payload.amount, 1990);
        assert_eq!(payload.buyer.name, "Uriel Teste");
        assert_eq!(payload.product.id, "painel_uriel");
        assert_eq!(payload.offer.id, "oferta_promocional");
        assert_eq!(payload.offer.quantity, 1);
        assert_eq!(payload.tracking.referral, "direct");
        assert_eq!(payload.tracking.utm_campaign, "checkout");
    }

    #[test]
    fn test_normalize_trims_buyer_fields() {
        let mut request = valid_request();
        request.buyer.as_mut().unwrap().name = Some("  Uriel Teste  ".to_string());
        request.buyer.as_mut().unwrap().email = Some(" u@x.com ".to_string());
        let payload = normalize(request).unwrap();
        assert_eq!(payload.buyer.name, "Uriel Teste");
        assert_eq!(payload.buyer.email, "u@x.com");
    }

    #[test]
    fn test_normalize_coerces_numeric_offer_id() {
        let mut request = valid_request();
        request.offer = Some(OfferInput {
            id: Some(json!(42)),
            name: None,
            quantity: Some(json!(2)),
        });
        let payload = normalize(request).unwrap();
        assert_eq!(payload.offer.id, "42");
        assert_eq!(payload.offer.quantity, 2);
    }

    #[test]
    fn test_normalize_defaults_bad_quantity() {
        for quantity in [json!(0), json!(-3), json!(2.5), json!("dois"), Value::Null] {
            let mut request = valid_request();
            request.offer = Some(OfferInput {
                id: None,
                name: None,
                quantity: Some(quantity),
            });
            assert_eq!(normalize(request).unwrap().offer.quantity, 1);
        }
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = normalize(valid_request()).unwrap();
        let wire = serde_json::to_value(&payload).unwrap();
        // document/phone ausentes ficam fora do JSON
        assert!(wire["buyer"].get("document").is_none());
        assert!(wire["buyer"].get("phone").is_none());
        // o campo de atribuicao vai como "ref" no fio
        assert_eq!(wire["tracking"]["ref"], "direct");
        assert_eq!(wire["tracking"]["utm_id"], "");
    }

    #[test]
    fn test_deserializes_request_from_wire_json() {
        let request: ChargeRequest = serde_json::from_value(json!({
            "amount": 1990,
            "buyer": { "name": "Uriel Teste", "email": "u@x.com" },
            "tracking": { "ref": "promo" }
        }))
        .unwrap();
        let payload = normalize(request).unwrap();
        assert_eq!(payload.tracking.referral, "promo");
        assert_eq!(payload.tracking.src, "site");
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("u@x.com"));
        assert!(is_valid_email("nome.sobrenome@dominio.com.br"));
        assert!(!is_valid_email("sem-arroba"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@dominio."));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_charge_result_from_response() {
        let body = json!({
            "data": {
                "external_id": "chg_123",
                "pix": { "code": "00020126...", "qrcode_base64": "iVBOR..." }
            }
        });
        let result = ChargeResult::from_response(&body).unwrap();
        assert_eq!(result.external_id, "chg_123");
        assert_eq!(result.pix_code, "00020126...");
    }

    #[test]
    fn test_charge_result_missing_pix() {
        let body = json!({ "data": { "external_id": "chg_123" } });
        assert!(ChargeResult::from_response(&body).is_none());
        assert!(ChargeResult::from_response(&json!({})).is_none());
    }

    #[test]
    fn test_payment_status_parsing() {
        let paid = json!({ "data": { "status": "paid" } });
        let failed = json!({ "data": { "status": "failed" } });
        let waiting = json!({ "data": { "status": "waiting_payment" } });
        assert_eq!(PaymentStatus::from_response(&paid), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from_response(&failed), PaymentStatus::Failed);
        assert_eq!(PaymentStatus::from_response(&waiting), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_response(&json!({})), PaymentStatus::Pending);
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
    }

    #[test]
    fn test_create_error_message_priority() {
        assert_eq!(
            create_error_message(&json!({ "error": "a", "message": "b" })),
            "a"
        );
        assert_eq!(create_error_message(&json!({ "message": "b" })), "b");
        assert_eq!(
            create_error_message(&json!({ "detail": { "message": "c" } })),
            "c"
        );
        assert_eq!(
            create_error_message(&json!({ "errors": [{ "message": "d" }] })),
            "d"
        );
        assert_eq!(create_error_message(&json!({})), "Erro ao criar checkout");
    }

    #[test]
    fn test_status_error_message() {
        assert_eq!(status_error_message(&json!({ "message": "expirado" })), "expirado");
        assert_eq!(status_error_message(&json!({})), "Erro ao consultar status");
    }
}
