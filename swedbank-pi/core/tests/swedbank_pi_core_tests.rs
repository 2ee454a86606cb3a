use std::sync::{Arc, Mutex};
use swedbank_pi_core::{
    Country, DefaultProviderResolver, Environment, Error, Gateway, GatewayConfig, HTTPMethod,
    JWSAlgorithm, Locale, Observer, PaymentInitiationRequest, ProviderResolver, RequestRecord,
    ResponseRecord, TransactionStatus, JWS_SIGNATURE_HEADER,
};

/// This will run once at load time (i.e. presumably before main function is called).
#[ctor::ctor]
fn overall_init() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .init();
}

const MERCHANT_PRIVATE_KEY_PEM: &str = include_str!("../../jws/tests/data/rsa2048.pkcs8.pem");
const MERCHANT_PUBLIC_KEY_PEM: &str = include_str!("../../jws/tests/data/rsa2048.pub.pem");
const BANK_PRIVATE_KEY_PEM: &str = include_str!("../../jws/tests/data/p256.pkcs8.pem");
const BANK_CERT_PEM: &str = include_str!("../../jws/tests/data/p256.cert.pem");

fn test_config() -> GatewayConfig {
    GatewayConfig::new(
        "M1".to_string(),
        Country::LV,
        MERCHANT_PRIVATE_KEY_PEM.to_string(),
        BANK_CERT_PEM.to_string(),
        Environment::Production,
    )
}

fn test_gateway() -> Gateway {
    Gateway::new(test_config()).expect("pass")
}

/// Signs a response body the way the bank does.
fn bank_sign(body: &[u8], url: &str, iat: time::OffsetDateTime) -> String {
    swedbank_pi_jws::sign_at(
        body,
        url,
        "BANK",
        "LV",
        BANK_PRIVATE_KEY_PEM,
        JWSAlgorithm::ES256,
        iat,
    )
    .expect("pass")
    .into_string()
}

#[derive(Default)]
struct RecordingObserver {
    request_v: Mutex<Vec<(String, String, usize)>>,
    response_v: Mutex<Vec<(u16, bool, bool)>>,
}

impl Observer for RecordingObserver {
    fn on_request(&self, request_record: &RequestRecord<'_>) {
        self.request_v.lock().expect("pass").push((
            request_record.method.to_string(),
            request_record.url.to_string(),
            request_record.body.len(),
        ));
    }
    fn on_response(&self, response_record: &ResponseRecord<'_>) {
        self.response_v.lock().expect("pass").push((
            response_record.status_code,
            response_record.signature_o.is_some(),
            response_record.verified,
        ));
    }
}

#[test]
fn test_gateway_config() {
    let config: GatewayConfig = serde_json::from_value(serde_json::json!({
        "merchantId": "M1",
        "country": "EE",
        "privateKeyPem": MERCHANT_PRIVATE_KEY_PEM,
        "bankPublicKeyPem": BANK_CERT_PEM,
        "baseUrl": "https://pi-playground.swedbank.com",
    }))
    .expect("pass");
    assert_eq!(config.algorithm, JWSAlgorithm::RS512);
    assert_eq!(config.max_age_seconds, 120);
    assert_eq!(config.default_locale, Locale::En);
    assert_eq!(config.base_url, Environment::Sandbox.base_url());
    config.validate().expect("pass");
    // Key material stays out of logs.
    let debug_string = format!("{:?}", config);
    assert!(debug_string.contains("M1"));
    assert!(!debug_string.contains("PRIVATE KEY"));

    let config: GatewayConfig = serde_json::from_value(serde_json::json!({
        "merchantId": "M1",
        "country": "LT",
        "algorithm": "ES256",
        "privateKeyPem": BANK_PRIVATE_KEY_PEM,
        "bankPublicKeyPem": BANK_CERT_PEM,
        "baseUrl": "https://pi.swedbank.com",
        "maxAgeSeconds": 0,
        "defaultLocale": "lt",
    }))
    .expect("pass");
    assert_eq!(config.algorithm, JWSAlgorithm::ES256);
    assert_eq!(config.max_age_seconds, 0);
    assert_eq!(config.default_locale, Locale::Lt);

    serde_json::from_value::<GatewayConfig>(serde_json::json!({
        "merchantId": "M1",
        "country": "FI",
        "privateKeyPem": "",
        "bankPublicKeyPem": "",
        "baseUrl": "https://pi.swedbank.com",
    }))
    .expect_err("pass");

    let mut config = test_config();
    config.merchant_id = String::new();
    assert!(matches!(Gateway::new(config), Err(Error::Invalid(_))));
    let config = test_config().with_base_url(url::Url::parse("ftp://pi.swedbank.com").expect("pass"));
    assert!(matches!(config.validate(), Err(Error::Invalid(_))));
}

#[test]
fn test_country_and_locale() {
    for country in Country::ALL {
        assert_eq!(country.to_string().parse::<Country>().expect("pass"), country);
    }
    assert!(matches!("ee".parse::<Country>(), Err(Error::Invalid(_))));
    for locale in Locale::ALL {
        assert_eq!(locale.as_str().parse::<Locale>().expect("pass"), locale);
    }
    assert!(matches!("de".parse::<Locale>(), Err(Error::Invalid(_))));
    assert_eq!(
        "production".parse::<Environment>().expect("pass"),
        Environment::Production
    );
}

#[test]
fn test_endpoint_urls() {
    let gateway = test_gateway();
    assert_eq!(
        gateway.providers_url().expect("pass").as_str(),
        "https://pi.swedbank.com/public/api/v3/agreement/providers"
    );
    assert_eq!(
        gateway.payment_initiation_url("HABALT22").expect("pass").as_str(),
        "https://pi.swedbank.com/public/api/v3/transactions/providers/HABALT22"
    );
    assert_eq!(
        gateway.transaction_status_url("TX-123_a").expect("pass").as_str(),
        "https://pi.swedbank.com/public/api/v3/transactions/TX-123_a/status"
    );
    for transaction_id in ["", "../x", "a/b", "a?b", "a b"] {
        assert!(matches!(
            gateway.transaction_status_url(transaction_id),
            Err(Error::Invalid(_))
        ));
    }
    assert!(gateway.payment_initiation_url("HABA/../X").is_err());

    // A base URL with a path prefix and trailing slash.
    let gateway = Gateway::new(
        test_config().with_base_url(url::Url::parse("http://localhost:8080/pi/").expect("pass")),
    )
    .expect("pass");
    assert_eq!(
        gateway.providers_url().expect("pass").as_str(),
        "http://localhost:8080/pi/public/api/v3/agreement/providers"
    );
}

#[test]
fn test_sign_request() {
    let observer_a = Arc::new(RecordingObserver::default());
    let gateway = test_gateway().with_observer(observer_a.clone());
    let url = gateway.payment_initiation_url("HABALV22").expect("pass");
    let body = br#"{"amount":"1.00"}"#.to_vec();
    let signed_request = gateway
        .sign_request(HTTPMethod::POST, url.clone(), body.clone())
        .expect("pass");
    assert_eq!(signed_request.method, HTTPMethod::POST);
    assert_eq!(signed_request.url, url);
    assert_eq!(signed_request.body, body);
    assert_eq!(
        signed_request.header_value("Content-Type"),
        Some("application/json")
    );
    let jws = signed_request.jws().expect("pass");
    assert_eq!(signed_request.header_value(JWS_SIGNATURE_HEADER), Some(jws));

    // The bank checks it against the merchant's public key.
    assert!(swedbank_pi_jws::verify(jws, &body, MERCHANT_PUBLIC_KEY_PEM, 120).expect("pass"));
    let detached_jws = swedbank_pi_jws::DetachedJWS::try_from(jws).expect("pass");
    assert_eq!(detached_jws.header().kid_o.as_deref(), Some("LV:M1"));
    assert_eq!(detached_jws.header().url_o.as_deref(), Some(url.as_str()));
    assert_eq!(detached_jws.header().alg, JWSAlgorithm::RS512);

    let request_v = observer_a.request_v.lock().expect("pass");
    assert_eq!(request_v.len(), 1);
    assert_eq!(request_v[0], ("POST".to_string(), url.to_string(), body.len()));
}

#[test]
fn test_verify_response() {
    let observer_a = Arc::new(RecordingObserver::default());
    let gateway = test_gateway().with_observer(observer_a.clone());
    let now = time::OffsetDateTime::from_unix_timestamp(1_750_000_000).expect("pass");
    let url = "https://pi.swedbank.com/public/api/v3/transactions/TX1/status";
    let body = br#"{"status":"EXECUTED", "bic":"HABALV22"}"#;
    let signature = bank_sign(body, url, now);

    gateway
        .verify_response_at(200, Some(&signature), body, now)
        .expect("pass");
    // Surrounding whitespace in the header value is tolerated.
    gateway
        .verify_response_at(200, Some(&format!(" {}\r\n", signature)), body, now)
        .expect("pass");

    assert!(matches!(
        gateway.verify_response_at(200, None, body, now),
        Err(Error::MissingSignature(_))
    ));
    // Re-serializing the body changes the bytes, so the signature no longer matches.
    assert!(matches!(
        gateway.verify_response_at(200, Some(&signature), br#"{"status":"EXECUTED","bic":"HABALV22"}"#, now),
        Err(Error::SignatureMismatch(_))
    ));
    assert!(gateway
        .verify_response_at(
            200,
            Some(&signature),
            body,
            now + time::Duration::seconds(121)
        )
        .expect_err("pass")
        .is_stale_signature());
    assert!(matches!(
        gateway.verify_response_at(200, Some("garbage"), body, now),
        Err(Error::JWSError(swedbank_pi_jws::Error::MalformedToken(_)))
    ));

    let response_v = observer_a.response_v.lock().expect("pass");
    assert_eq!(
        *response_v,
        vec![
            (200, true, true),
            (200, true, true),
            (200, false, false),
            (200, true, false),
            (200, true, false),
            (200, true, false),
        ]
    );
}

#[test]
fn test_verify_response_with_disabled_freshness() {
    let gateway = Gateway::new(test_config().with_max_age_seconds(0)).expect("pass");
    let iat = time::OffsetDateTime::from_unix_timestamp(1_000_000_000).expect("pass");
    let body = b"[]";
    let signature = bank_sign(body, "https://pi.swedbank.com/public/api/v3/agreement/providers", iat);
    gateway.verify_response(200, Some(&signature), body).expect("pass");
}

#[test]
fn test_prepare_payment_initiation() {
    let gateway = test_gateway();
    let request = PaymentInitiationRequest::new(
        "10.5",
        "Invoice 1/2",
        "https://merchant.example/return",
        "https://merchant.example/notify",
    )
    .with_reference("1234561")
    .with_client_info(Some("192.0.2.1".to_string()), Some("Mozilla/5.0".to_string()));
    let signed_request = gateway
        .prepare_payment_initiation(&request, "SWEDBANK_LT", None)
        .expect("pass");
    assert_eq!(signed_request.method, HTTPMethod::POST);
    assert_eq!(
        signed_request.url.as_str(),
        "https://pi.swedbank.com/public/api/v3/transactions/providers/HABALT22"
    );
    let body_json: serde_json::Value = serde_json::from_slice(&signed_request.body).expect("pass");
    assert_eq!(
        body_json,
        serde_json::json!({
            "amount": "10.50",
            "currency": "EUR",
            "description": "Invoice 1/2",
            "reference": "1234561",
            "redirectUrl": "https://merchant.example/return",
            "notificationUrl": "https://merchant.example/notify",
            "locale": "en",
            "ipAddress": "192.0.2.1",
            "userAgent": "Mozilla/5.0",
        })
    );
    assert!(swedbank_pi_jws::verify(
        signed_request.jws().expect("pass"),
        &signed_request.body,
        MERCHANT_PUBLIC_KEY_PEM,
        120
    )
    .expect("pass"));

    // A BIC passes through the default resolver unchanged.
    let signed_request = gateway
        .prepare_payment_initiation(&request.clone().with_locale(Locale::Ru), "PARXLV22", None)
        .expect("pass");
    assert!(signed_request.url.as_str().ends_with("/providers/PARXLV22"));
    assert!(std::str::from_utf8(&signed_request.body)
        .expect("pass")
        .contains(r#""locale":"ru""#));

    // Validation failures name the field.
    for (invalid_request, field_name) in [
        (
            PaymentInitiationRequest {
                amount: "0.00".to_string(),
                ..request.clone()
            },
            "amount",
        ),
        (
            PaymentInitiationRequest {
                currency: "USD".to_string(),
                ..request.clone()
            },
            "currency",
        ),
        (
            PaymentInitiationRequest {
                description: String::new(),
                ..request.clone()
            },
            "description",
        ),
        (request.clone().with_reference("1234562"), "reference"),
        (
            PaymentInitiationRequest {
                redirect_url: "merchant.example/return".to_string(),
                ..request.clone()
            },
            "redirectUrl",
        ),
        (
            PaymentInitiationRequest {
                notification_url: "javascript:alert(1)".to_string(),
                ..request.clone()
            },
            "notificationUrl",
        ),
        (
            request
                .clone()
                .with_client_info(Some("not-an-ip".to_string()), None),
            "ipAddress",
        ),
    ] {
        match gateway.prepare_payment_initiation(&invalid_request, "SWEDBANK_LT", None) {
            Err(Error::Invalid(message)) => assert!(
                message.contains(field_name),
                "message {:?} should name {}",
                message,
                field_name
            ),
            other => panic!("expected Invalid for {}, got {:?}", field_name, other),
        }
    }

    assert!(matches!(
        gateway.prepare_payment_initiation(&request, "not a bank", None),
        Err(Error::Invalid(_))
    ));
}

struct FixedProviderResolver;

impl ProviderResolver for FixedProviderResolver {
    fn resolve(&self, payment_type: &str) -> Option<String> {
        match payment_type {
            "CARD" => Some("HABAEE2X".to_string()),
            _ => None,
        }
    }
}

#[test]
fn test_provider_resolution() {
    let gateway = test_gateway();
    assert_eq!(
        gateway.resolve_provider("SWEDBANK_EE", None).expect("pass"),
        "HABAEE2X"
    );
    assert_eq!(
        gateway.resolve_provider("SWEDBANK_LV", None).expect("pass"),
        "HABALV22"
    );
    assert_eq!(
        gateway.resolve_provider("HABALT22XXX", None).expect("pass"),
        "HABALT22XXX"
    );
    assert!(DefaultProviderResolver.resolve("habalt22").is_none());

    // The override takes precedence over the gateway's resolver.
    assert_eq!(
        gateway
            .resolve_provider("CARD", Some(&FixedProviderResolver))
            .expect("pass"),
        "HABAEE2X"
    );
    assert!(gateway
        .resolve_provider("SWEDBANK_EE", Some(&FixedProviderResolver))
        .is_err());

    let gateway = test_gateway().with_provider_resolver(Arc::new(FixedProviderResolver));
    assert_eq!(gateway.resolve_provider("CARD", None).expect("pass"), "HABAEE2X");
}

#[test]
fn test_parse_responses() {
    let gateway = test_gateway();

    let response = gateway
        .parse_payment_initiation_response(
            br#"{"id":"TX1","redirectUrl":"https://pi.swedbank.com/redirect/TX1"}"#,
        )
        .expect("pass");
    assert_eq!(response.id, "TX1");
    assert_eq!(response.redirect_url, "https://pi.swedbank.com/redirect/TX1");

    let response = gateway
        .parse_transaction_status_response(
            br#"{"status":"EXECUTED","bic":"HABALV22","amount":"10.00","currency":"EUR","debtorIban":"LV80HABA0001234567890","debtorName":"Jane Doe"}"#,
        )
        .expect("pass");
    assert_eq!(response.status, TransactionStatus::Executed);
    assert!(response.status.is_final());
    assert_eq!(response.debtor_name_o.as_deref(), Some("Jane Doe"));

    // Unknown states are preserved, and optional fields may be absent.
    let response = gateway
        .parse_transaction_status_response(br#"{"status":"SETTLING"}"#)
        .expect("pass");
    assert_eq!(
        response.status,
        TransactionStatus::Unknown("SETTLING".to_string())
    );
    assert!(!response.status.is_final());
    assert!(response.bic_o.is_none());
    assert_eq!(
        serde_json::to_string(&response).expect("pass"),
        r#"{"status":"SETTLING"}"#
    );

    let provider_v = gateway
        .parse_providers_response(
            br#"[{"bic":"HABAEE2X","name":"Swedbank","country":"EE"},{"bic":"HABALV22","name":"Swedbank","country":"LV"}]"#,
        )
        .expect("pass");
    assert_eq!(provider_v.len(), 2);
    assert_eq!(provider_v[1].country, Country::LV);

    assert!(matches!(
        gateway.parse_transaction_status_response(b"<html>"),
        Err(Error::Malformed(_))
    ));
}

#[test]
fn test_prepare_get_requests() {
    let gateway = Gateway::new(test_config().with_algorithm(JWSAlgorithm::RS512)).expect("pass");
    for signed_request in [
        gateway.prepare_providers().expect("pass"),
        gateway.prepare_transaction_status("TX1").expect("pass"),
    ] {
        assert_eq!(signed_request.method, HTTPMethod::GET);
        assert!(signed_request.body.is_empty());
        assert!(swedbank_pi_jws::verify(
            signed_request.jws().expect("pass"),
            b"",
            MERCHANT_PUBLIC_KEY_PEM,
            120
        )
        .expect("pass"));
    }

    // A merchant key of the wrong type surfaces as the codec's InvalidKey.
    let gateway = Gateway::new(test_config().with_algorithm(JWSAlgorithm::ES256)).expect("pass");
    assert!(matches!(
        gateway.prepare_providers(),
        Err(Error::JWSError(swedbank_pi_jws::Error::InvalidKey(_)))
    ));
}
