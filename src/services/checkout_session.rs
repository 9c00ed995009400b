use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::checkout::{
    create_error_message, has_full_name, is_valid_email, normalize, BuyerInput, ChargeRequest,
    ChargeResult, OfferInput, PaymentStatus, ProductDescriptor, DEFAULT_PRODUCT_ID,
};
use crate::services::cart_store::CartStore;
use crate::services::gateway::{GatewayError, PixGateway};
use crate::services::metrics::CheckoutMetrics;
use crate::utils::money::format_brl;

// Janela do aviso "codigo copiado"
const COPIED_ACK: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    #[default]
    Form,
    Qrcode,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuyerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

pub fn validate_form(form: &BuyerForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let name = form.name.trim();
    if name.is_empty() {
        errors.name = Some("Nome obrigatorio");
    } else if !has_full_name(name) {
        errors.name = Some("Informe nome e sobrenome");
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.email = Some("Email obrigatorio");
    } else if !is_valid_email(email) {
        errors.email = Some("Email invalido");
    }

    errors
}

#[derive(Debug, Default)]
struct SessionState {
    step: CheckoutStep,
    field_errors: FieldErrors,
    loading: bool,
    // uma cobranca por tentativa de checkout; so arma depois do gateway confirmar
    created: bool,
    charge: Option<ChargeResult>,
    charged_at: Option<DateTime<Utc>>,
    error_message: Option<String>,
    copied_until: Option<Instant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub session_id: Uuid,
    pub step: CheckoutStep,
    pub amount_cents: u64,
    pub amount_display: String,
    pub product_name: String,
    pub field_errors: FieldErrors,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charged_at: Option<DateTime<Utc>>,
    pub copied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

pub struct CheckoutSession {
    id: Uuid,
    amount_cents: u64,
    product_name: String,
    poll_interval: Duration,
    gateway: Arc<dyn PixGateway>,
    cart: Arc<CartStore>,
    metrics: Arc<CheckoutMetrics>,
    state: Mutex<SessionState>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl CheckoutSession {
    pub fn new(
        amount_cents: u64,
        product_name: String,
        gateway: Arc<dyn PixGateway>,
        cart: Arc<CartStore>,
        metrics: Arc<CheckoutMetrics>,
        poll_interval: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            amount_cents,
            product_name,
            poll_interval,
            gateway,
            cart,
            metrics,
            state: Mutex::new(SessionState::default()),
            poller: Mutex::new(None),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().unwrap();
        Snapshot {
            session_id: self.id,
            step: state.step,
            amount_cents: self.amount_cents,
            amount_display: format_brl(self.amount_cents),
            product_name: self.product_name.clone(),
            field_errors: state.field_errors.clone(),
            loading: state.loading,
            pix_code: state.charge.as_ref().map(|charge| charge.pix_code.clone()),
            qr_base64: state.charge.as_ref().map(|charge| charge.qr_base64.clone()),
            external_id: state
                .charge
                .as_ref()
                .map(|charge| charge.external_id.clone()),
            charged_at: state.charged_at,
            copied: state
                .copied_until
                .map_or(false, |until| Instant::now() < until),
            error_message: state.error_message.clone(),
        }
    }

    pub async fn submit(self: Arc<Self>, form: BuyerForm) -> Snapshot {
        {
            let mut state = self.state.lock().unwrap();
            if state.step != CheckoutStep::Form || state.loading || state.created {
                drop(state);
                return self.snapshot();
            }

            let errors = validate_form(&form);
            if !errors.is_empty() {
                state.field_errors = errors;
                drop(state);
                return self.snapshot();
            }

            state.field_errors = FieldErrors::default();
            state.loading = true;
        }

        let payload = match normalize(self.charge_request(&form)) {
            Ok(payload) => payload,
            Err(message) => return self.fail_submit(message.to_string()),
        };

        let outcome = self.gateway.create_charge(&payload).await;

        let external_id = {
            let mut state = self.state.lock().unwrap();
            state.loading = false;
            match outcome {
                Ok(body) => match ChargeResult::from_response(&body) {
                    Some(charge) => {
                        info!(
                            "Charge {} created for checkout session {}",
                            charge.external_id, self.id
                        );
                        state.created = true;
                        state.charged_at = Some(Utc::now());
                        state.step = CheckoutStep::Qrcode;
                        let external_id = charge.external_id.clone();
                        state.charge = Some(charge);
                        self.metrics.increment_created();
                        Some(external_id)
                    }
                    None => {
                        warn!("Gateway returned a charge without pix data");
                        state.step = CheckoutStep::Error;
                        state.error_message = Some("Resposta inesperada do servidor".to_string());
                        None
                    }
                },
                Err(GatewayError::Rejected { body, .. }) => {
                    state.step = CheckoutStep::Error;
                    state.error_message = Some(create_error_message(&body));
                    None
                }
                Err(GatewayError::Unavailable(reason)) => {
                    error!("Charge creation failed: {}", reason);
                    state.step = CheckoutStep::Error;
                    state.error_message = Some("Erro interno do servidor".to_string());
                    None
                }
            }
        };

        if let Some(external_id) = external_id {
            Self::start_polling(&self, external_id);
        }
        self.snapshot()
    }

    fn charge_request(&self, form: &BuyerForm) -> ChargeRequest {
        ChargeRequest {
            amount: Some(self.amount_cents),
            buyer: Some(BuyerInput {
                name: Some(form.name.trim().to_string()),
                email: Some(form.email.trim().to_string()),
                document: None,
                phone: None,
            }),
            product: Some(ProductDescriptor {
                id: DEFAULT_PRODUCT_ID.to_string(),
                name: self.product_name.clone(),
            }),
            offer: Some(OfferInput {
                id: None,
                name: Some("Oferta Promocional - Painel do Uriel".to_string()),
                quantity: None,
            }),
            tracking: None,
        }
    }

    fn fail_submit(&self, message: String) -> Snapshot {
        {
            let mut state = self.state.lock().unwrap();
            state.loading = false;
            state.step = CheckoutStep::Error;
            state.error_message = Some(message);
        }
        self.snapshot()
    }

    fn start_polling(session: &Arc<Self>, external_id: String) {
        let mut poller = session.poller.lock().unwrap();
        // no maximo um poller por sessao
        if let Some(previous) = poller.take() {
            previous.abort();
        }

        let interval = session.poll_interval;
        let session = Arc::downgrade(session);
        *poller = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(session) = session.upgrade() else {
                    break;
                };
                let status = match session.gateway.charge_status(&external_id).await {
                    Ok(body) => PaymentStatus::from_response(&body),
                    // falha transitoria: tenta de novo no proximo tick
                    Err(_) => PaymentStatus::Pending,
                };
                match status {
                    PaymentStatus::Paid => {
                        session.finish_paid();
                        break;
                    }
                    PaymentStatus::Failed => {
                        session.finish_failed();
                        break;
                    }
                    PaymentStatus::Pending => {}
                }
            }
        }));
    }

    fn finish_paid(&self) {
        self.stop_polling();
        {
            let mut state = self.state.lock().unwrap();
            state.step = CheckoutStep::Success;
            state.error_message = None;
        }
        info!("Payment confirmed for checkout session {}", self.id);
        self.metrics.increment_confirmed();
        self.cart.clear();
    }

    fn finish_failed(&self) {
        self.stop_polling();
        let mut state = self.state.lock().unwrap();
        state.step = CheckoutStep::Error;
        state.error_message = Some("Pagamento falhou ou expirou. Tente novamente.".to_string());
        warn!("Payment failed or expired for checkout session {}", self.id);
        self.metrics.increment_failed();
    }

    fn stop_polling(&self) {
        if let Some(handle) = self.poller.lock().unwrap().take() {
            handle.abort();
        }
    }

    // Fechar o fluxo zera tudo e encerra o poller
    pub fn close(&self) {
        self.stop_polling();
        let mut state = self.state.lock().unwrap();
        *state = SessionState::default();
        info!("Checkout session {} closed", self.id);
    }

    pub fn retry(&self) -> Snapshot {
        {
            let mut state = self.state.lock().unwrap();
            if state.step == CheckoutStep::Error {
                state.created = false;
                state.error_message = None;
                state.step = CheckoutStep::Form;
            }
        }
        self.snapshot()
    }

    // Volta para edicao sem cancelar o pagamento em andamento;
    // o guard de criacao continua valendo contra cobranca dupla
    pub fn back(&self) -> Snapshot {
        {
            let mut state = self.state.lock().unwrap();
            if state.step == CheckoutStep::Qrcode {
                state.step = CheckoutStep::Form;
            }
        }
        self.snapshot()
    }

    pub fn mark_copied(&self) -> Snapshot {
        {
            let mut state = self.state.lock().unwrap();
            if state.charge.is_some() {
                state.copied_until = Some(Instant::now() + COPIED_ACK);
            }
        }
        self.snapshot()
    }
}

impl Drop for CheckoutSession {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
