use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use super::{CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway};
use crate::core::config::PaymentConfig;

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Stripe Checkout over the form-encoded REST API
pub struct StripeClient {
    secret_key: String,
    api_base: String,
    currency: String,
    product_name: String,
    http_client: Client,
}

impl StripeClient {
    pub fn new(config: &PaymentConfig, http_client: Client) -> Self {
        Self {
            secret_key: config.stripe_secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            currency: config.currency.clone(),
            product_name: config.product_name.clone(),
            http_client,
        }
    }

    fn session_form(&self, request: &CheckoutRequest) -> Vec<(String, String)> {
        let mut form = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            (
                "line_items[0][price_data][currency]".to_string(),
                self.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                self.product_name.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                request.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            (
                "customer_email".to_string(),
                request.customer_email.clone(),
            ),
            ("success_url".to_string(), request.success_url.clone()),
            ("cancel_url".to_string(), request.cancel_url.clone()),
        ];

        if let Some(name) = &request.donor_name {
            form.push(("metadata[donor_name]".to_string(), name.clone()));
        }
        form
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/checkout/sessions", self.api_base);
        debug!(
            "Creating checkout session for {} ({} {})",
            request.customer_email, request.unit_amount, self.currency
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&self.session_form(&request))
            .send()
            .await
            .map_err(|e| PaymentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!("Stripe API error creating checkout session: HTTP {} - {}", status, message);
            return Err(PaymentError::Processor { status, message });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Request(format!("Failed to parse session: {}", e)))?;

        let url = session.url.ok_or_else(|| {
            PaymentError::Request(format!("Checkout session {} has no URL", session.id))
        })?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_form_fields() {
        let client = StripeClient::new(
            &PaymentConfig {
                stripe_secret_key: "sk_test".to_string(),
                webhook_secret: None,
                api_base: "https://api.stripe.com/v1/".to_string(),
                currency: "usd".to_string(),
                product_name: "Donation".to_string(),
            },
            Client::new(),
        );

        let form = client.session_form(&CheckoutRequest {
            unit_amount: 2550,
            customer_email: "donor@example.com".to_string(),
            donor_name: Some("Ada".to_string()),
            success_url: "http://localhost:5173/donate?success=true".to_string(),
            cancel_url: "http://localhost:5173/donate?canceled=true".to_string(),
        });

        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(client.api_base, "https://api.stripe.com/v1");
        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("2550"));
        assert_eq!(get("customer_email"), Some("donor@example.com"));
        assert_eq!(get("metadata[donor_name]"), Some("Ada"));
    }
}
