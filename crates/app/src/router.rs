//! Directive router: the driving port of the application.
//!
//! [`DirectiveRouter::handle`] takes a raw request and always produces a
//! [`ResponseEnvelope`]: it validates the envelope shape and payload version,
//! resolves the handler through the dispatch table in [`crate::routes`], and
//! renders any [`SkillError`] as an `ErrorResponse`.
//!
//! The router holds no per-request state, so one instance can serve any
//! number of concurrent directives.

use serde_json::Value;

use skillhub_domain::directive::Directive;
use skillhub_domain::error::SkillError;
use skillhub_domain::response::{ResponseBuilder, ResponseEnvelope};

use crate::authority::AcceptAll;
use crate::handlers;
use crate::ports::{Authority, DeviceGateway};
use crate::routes::{Route, namespace};

/// Routes directives to their handlers.
///
/// Generic over the [`DeviceGateway`] and [`Authority`] to avoid dynamic
/// dispatch; the authority defaults to [`AcceptAll`].
#[derive(Debug, Clone)]
pub struct DirectiveRouter<G, A = AcceptAll> {
    gateway: G,
    authority: A,
}

impl<G> DirectiveRouter<G> {
    /// Create a router with the permissive default authority.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            authority: AcceptAll,
        }
    }
}

impl<G, A> DirectiveRouter<G, A> {
    /// Replace the authority.
    #[must_use]
    pub fn with_authority<B>(self, authority: B) -> DirectiveRouter<G, B> {
        DirectiveRouter {
            gateway: self.gateway,
            authority,
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

impl<G, A> DirectiveRouter<G, A>
where
    G: DeviceGateway + Sync,
    A: Authority + Sync,
{
    /// Handle one raw request (`{"directive": …}`) and build the response.
    ///
    /// Never fails: every error becomes an `ErrorResponse` envelope.
    pub async fn handle(&self, request: &Value) -> ResponseEnvelope {
        let envelope = match Directive::from_request(request) {
            Ok(directive) => {
                tracing::debug!(
                    directive = %directive.qualified_name(),
                    message_id = directive.header.message_id.as_deref().unwrap_or_default(),
                    "directive received"
                );
                match self.dispatch(&directive).await {
                    Ok(response) => response.get(),
                    Err(err) => {
                        tracing::warn!(
                            directive = %directive.qualified_name(),
                            error_type = %err.error_type(),
                            error = %err,
                            "directive failed"
                        );
                        error_response(Some(&directive), &err).get()
                    }
                }
            }
            Err(err) => {
                let err = SkillError::from(err);
                tracing::warn!(error = %err.message(), "rejecting malformed request");
                error_response(None, &err).get()
            }
        };

        tracing::debug!(
            name = %envelope.header().name,
            message_id = %envelope.header().message_id,
            "response built"
        );
        envelope
    }

    #[tracing::instrument(
        skip(self, directive),
        fields(namespace = %directive.namespace(), name = %directive.name())
    )]
    async fn dispatch(&self, directive: &Directive) -> Result<ResponseBuilder, SkillError> {
        if !directive.has_supported_version() {
            return Err(SkillError::UnsupportedVersion(
                directive.payload_version(),
            ));
        }

        let route = Route::resolve(directive.namespace(), directive.name()).ok_or_else(|| {
            SkillError::UnknownDirective {
                namespace: directive.namespace().to_string(),
                name: directive.name().to_string(),
            }
        })?;

        match route {
            Route::AcceptGrant => handlers::authorization::accept_grant(&self.authority, directive).await,
            Route::ReportState => {
                handlers::report_state::report_state(&self.gateway, &self.authority, directive).await
            }
            Route::Discover => {
                handlers::discovery::discover(&self.gateway, &self.authority, directive).await
            }
            Route::SetColor => {
                handlers::color::set_color(&self.gateway, &self.authority, directive).await
            }
            Route::SetPower(power) => {
                handlers::power::set_power(&self.gateway, &self.authority, directive, power).await
            }
        }
    }
}

/// Build the `ErrorResponse` for `err`.
///
/// Once the directive is known its correlation token and endpoint are echoed;
/// grant failures stay in the `Alexa.Authorization` namespace.
fn error_response(directive: Option<&Directive>, err: &SkillError) -> ResponseBuilder {
    let mut response = ResponseBuilder::error(err.error_type(), err.message());
    let Some(directive) = directive else {
        return response;
    };

    if matches!(err, SkillError::GrantRejected) {
        response = response.with_namespace(namespace::AUTHORIZATION);
    }
    if let Ok(endpoint_id) = directive.endpoint_id() {
        let token = directive.bearer_token().ok().map(str::to_string);
        response = response.with_endpoint(endpoint_id.clone(), token);
    }
    response.with_correlation_token(directive.correlation_token().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::{LogCapture, RejectAll, StubGateway, color_request, power_request, request};
    use serde_json::json;
    use skillhub_domain::color::DeviceColor;
    use skillhub_domain::device::{Connectivity, Device, PowerState, StateChange};
    use skillhub_domain::error::ErrorType;
    use skillhub_domain::id::EndpointId;

    fn router() -> DirectiveRouter<StubGateway> {
        DirectiveRouter::new(StubGateway::with_devices(vec![
            Device::new("light-01", "Desk Lamp")
                .with_power(PowerState::On)
                .with_color(DeviceColor::new(0x00_FF00)),
            Device::new("light-02", "Hall Light"),
        ]))
    }

    // ------------------------------------------------------------------
    // Envelope validation
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn should_reject_request_without_directive() {
        let envelope = router().handle(&json!({ "foo": "bar" })).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
        assert_eq!(envelope.header().namespace, "Alexa");
        assert!(envelope.context.is_none());
    }

    #[tokio::test]
    async fn should_reject_non_object_request() {
        let envelope = router().handle(&json!("not a directive")).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
    }

    #[tokio::test]
    async fn should_reject_unsupported_payload_version() {
        let mut req = power_request("TurnOn");
        req["directive"]["header"]["payloadVersion"] = json!("2");
        let router = router();
        let envelope = router.handle(&req).await;

        assert_eq!(envelope.error_type(), Some(ErrorType::InternalError));
        assert!(router.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_non_string_payload_version() {
        let mut req = power_request("TurnOn");
        req["directive"]["header"]["payloadVersion"] = json!(3);
        let router = router();
        let envelope = router.handle(&req).await;

        assert_eq!(envelope.error_type(), Some(ErrorType::InternalError));
        assert!(router.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_missing_payload_version() {
        let mut req = power_request("TurnOn");
        req["directive"]["header"]
            .as_object_mut()
            .unwrap()
            .remove("payloadVersion");
        let envelope = router().handle(&req).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
    }

    #[tokio::test]
    async fn should_keep_bearer_tokens_out_of_logs() {
        let logs = LogCapture::default();
        let _guard = logs.install();

        router().handle(&power_request("TurnOn")).await;
        router()
            .handle(&request(
                "Alexa.Authorization",
                "AcceptGrant",
                json!({
                    "grant": { "code": "grant-code" },
                    "grantee": { "token": "grantee-token" }
                }),
            ))
            .await;

        let output = logs.contents();
        assert!(output.contains("directive received"));
        assert!(!output.contains("access-token"));
        assert!(!output.contains("grantee-token"));
    }

    #[tokio::test]
    async fn should_reject_unknown_directive() {
        let envelope = router()
            .handle(&request("Alexa.Speaker", "SetVolume", json!({ "volume": 50 })))
            .await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
    }

    #[tokio::test]
    async fn should_reject_unknown_power_directive_name() {
        let envelope = router().handle(&power_request("Toggle")).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
    }

    // ------------------------------------------------------------------
    // Correlation token
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn should_echo_correlation_token_when_present() {
        let envelope = router().handle(&power_request("TurnOn")).await;
        assert_eq!(
            envelope.header().correlation_token.as_deref(),
            Some("corr-token")
        );
    }

    #[tokio::test]
    async fn should_omit_correlation_token_when_absent() {
        let mut req = power_request("TurnOn");
        req["directive"]["header"]
            .as_object_mut()
            .unwrap()
            .remove("correlationToken");
        let envelope = router().handle(&req).await;

        assert!(envelope.header().correlation_token.is_none());
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json["event"]["header"].get("correlationToken").is_none());
    }

    #[tokio::test]
    async fn should_echo_correlation_token_on_errors() {
        let router = DirectiveRouter::new(StubGateway::unreachable());
        let envelope = router.handle(&power_request("TurnOn")).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::EndpointUnreachable));
        assert_eq!(
            envelope.header().correlation_token.as_deref(),
            Some("corr-token")
        );
    }

    // ------------------------------------------------------------------
    // Authorization
    // ------------------------------------------------------------------

    fn accept_grant_request() -> Value {
        request(
            "Alexa.Authorization",
            "AcceptGrant",
            json!({
                "grant": { "type": "OAuth2.AuthorizationCode", "code": "grant-code" },
                "grantee": { "type": "BearerToken", "token": "grantee-token" }
            }),
        )
    }

    #[tokio::test]
    async fn should_accept_grant_by_default() {
        let envelope = router().handle(&accept_grant_request()).await;
        assert_eq!(envelope.header().namespace, "Alexa.Authorization");
        assert_eq!(envelope.header().name, "AcceptGrant.Response");
        assert!(envelope.context.is_none());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event"]["payload"], json!({}));
    }

    #[tokio::test]
    async fn should_reject_grant_without_code() {
        let envelope = router()
            .handle(&request(
                "Alexa.Authorization",
                "AcceptGrant",
                json!({ "grantee": { "token": "grantee-token" } }),
            ))
            .await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
    }

    #[tokio::test]
    async fn should_report_grant_failure_when_authority_rejects() {
        let router = router().with_authority(RejectAll);
        let envelope = router.handle(&accept_grant_request()).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::AcceptGrantFailed));
        assert_eq!(envelope.header().namespace, "Alexa.Authorization");
    }

    #[tokio::test]
    async fn should_not_call_gateway_when_token_rejected() {
        let router = router().with_authority(RejectAll);
        let envelope = router.handle(&power_request("TurnOn")).await;
        assert_eq!(
            envelope.error_type(),
            Some(ErrorType::InvalidAuthorizationCredential)
        );
        assert!(router.gateway().calls().is_empty());
    }

    // ------------------------------------------------------------------
    // Discovery
    // ------------------------------------------------------------------

    fn discover_request(name: &str) -> Value {
        request(
            "Alexa.Discovery",
            name,
            json!({ "scope": { "type": "BearerToken", "token": "access-token" } }),
        )
    }

    #[tokio::test]
    async fn should_describe_every_listed_device() {
        let router = router();
        let envelope = router.handle(&discover_request("Discover")).await;

        assert_eq!(envelope.header().namespace, "Alexa.Discovery");
        assert_eq!(envelope.header().name, "Discover.Response");
        assert_eq!(envelope.endpoints().len(), 2);
        for endpoint in envelope.endpoints() {
            assert_eq!(endpoint.capabilities.len(), 4);
        }
        assert_eq!(envelope.endpoints()[0].friendly_name, "Desk Lamp");
        assert_eq!(router.gateway().tokens(), vec!["access-token".to_string()]);
        assert!(envelope.context.is_none());
    }

    #[tokio::test]
    async fn should_tolerate_discover_response_name() {
        let envelope = router().handle(&discover_request("Discover.Response")).await;
        assert_eq!(envelope.endpoints().len(), 2);
    }

    #[tokio::test]
    async fn should_return_empty_endpoint_list_when_no_devices() {
        let router = DirectiveRouter::new(StubGateway::with_devices(Vec::new()));
        let envelope = router.handle(&discover_request("Discover")).await;
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event"]["payload"]["endpoints"], json!([]));
    }

    #[tokio::test]
    async fn should_reject_discovery_without_scope_token() {
        let envelope = router()
            .handle(&request("Alexa.Discovery", "Discover", json!({})))
            .await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
    }

    #[tokio::test]
    async fn should_report_unreachable_when_listing_fails() {
        let router = DirectiveRouter::new(StubGateway::unreachable());
        let envelope = router.handle(&discover_request("Discover")).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::EndpointUnreachable));
    }

    // ------------------------------------------------------------------
    // ReportState
    // ------------------------------------------------------------------

    fn report_request(endpoint_id: &str) -> Value {
        let mut req = power_request("ReportState");
        req["directive"]["header"]["namespace"] = json!("Alexa");
        req["directive"]["endpoint"]["endpointId"] = json!(endpoint_id);
        req
    }

    #[tokio::test]
    async fn should_report_live_state() {
        let envelope = router().handle(&report_request("light-01")).await;

        assert_eq!(envelope.header().namespace, "Alexa");
        assert_eq!(envelope.header().name, "StateReport");
        let endpoint = envelope.event.endpoint.as_ref().unwrap();
        assert_eq!(endpoint.endpoint_id, EndpointId::from("light-01"));

        let connectivity = envelope
            .property("Alexa.EndpointHealth", "connectivity")
            .unwrap();
        assert_eq!(connectivity.value, json!({ "value": "OK" }));
        let power = envelope
            .property("Alexa.PowerController", "powerState")
            .unwrap();
        assert_eq!(power.value, json!("ON"));
        let color = envelope.property("Alexa.ColorController", "color").unwrap();
        let hue = color.value["hue"].as_f64().unwrap();
        assert!((hue - 120.0).abs() < 1e-6);
        assert_eq!(color.value["saturation"], json!(1.0));
        assert_eq!(color.value["brightness"], json!(1.0));
    }

    #[tokio::test]
    async fn should_report_only_connectivity_when_state_unknown() {
        let envelope = router().handle(&report_request("light-02")).await;
        assert_eq!(envelope.properties().len(), 1);
        assert_eq!(envelope.properties()[0].name, "connectivity");
    }

    #[tokio::test]
    async fn should_report_unreachable_connectivity() {
        let router = DirectiveRouter::new(StubGateway::with_devices(vec![
            Device::new("light-01", "Desk Lamp").with_connectivity(Connectivity::Unreachable),
        ]));
        let envelope = router.handle(&report_request("light-01")).await;
        let connectivity = envelope
            .property("Alexa.EndpointHealth", "connectivity")
            .unwrap();
        assert_eq!(connectivity.value, json!({ "value": "UNREACHABLE" }));
    }

    #[tokio::test]
    async fn should_report_no_such_endpoint_for_unknown_device() {
        let envelope = router().handle(&report_request("light-99")).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::NoSuchEndpoint));
    }

    // ------------------------------------------------------------------
    // PowerController
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn should_turn_on_and_echo_power_state() {
        let router = router();
        let envelope = router.handle(&power_request("TurnOn")).await;

        assert_eq!(envelope.header().namespace, "Alexa");
        assert_eq!(envelope.header().name, "Response");
        let power = envelope
            .property("Alexa.PowerController", "powerState")
            .unwrap();
        assert_eq!(power.value, json!("ON"));
        assert_eq!(
            router.gateway().calls(),
            vec![(
                EndpointId::from("light-01"),
                StateChange::Power(PowerState::On),
                "access-token".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn should_turn_off_and_echo_power_state() {
        let router = router();
        let envelope = router.handle(&power_request("TurnOff")).await;

        let power = envelope
            .property("Alexa.PowerController", "powerState")
            .unwrap();
        assert_eq!(power.value, json!("OFF"));
        assert_eq!(
            router.gateway().calls()[0].1,
            StateChange::Power(PowerState::Off)
        );
    }

    #[tokio::test]
    async fn should_report_any_gateway_failure_as_unreachable() {
        let router = DirectiveRouter::new(StubGateway::rejecting_endpoints());

        let envelope = router.handle(&power_request("TurnOn")).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::EndpointUnreachable));

        let envelope = router
            .handle(&color_request(
                json!({ "hue": 0, "saturation": 1, "brightness": 1 }),
            ))
            .await;
        assert_eq!(envelope.error_type(), Some(ErrorType::EndpointUnreachable));

        let envelope = router.handle(&discover_request("Discover")).await;
        assert_eq!(envelope.error_type(), Some(ErrorType::EndpointUnreachable));
    }

    #[tokio::test]
    async fn should_reject_power_directive_without_token() {
        let mut req = power_request("TurnOn");
        req["directive"]["endpoint"]
            .as_object_mut()
            .unwrap()
            .remove("scope");
        let router = router();
        let envelope = router.handle(&req).await;

        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
        assert!(router.gateway().calls().is_empty());
    }

    // ------------------------------------------------------------------
    // ColorController
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn should_push_converted_color_and_echo_original() {
        let router = router();
        let sent = json!({ "hue": 240, "saturation": 1, "brightness": 1 });
        let envelope = router.handle(&color_request(sent.clone())).await;

        let color = envelope.property("Alexa.ColorController", "color").unwrap();
        assert_eq!(color.value, sent);
        assert_eq!(
            router.gateway().calls(),
            vec![(
                EndpointId::from("light-01"),
                StateChange::Color(DeviceColor::new(0x00_00FF)),
                "access-token".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn should_report_unreachable_without_context_when_color_push_fails() {
        let router = DirectiveRouter::new(StubGateway::unreachable());
        let envelope = router
            .handle(&color_request(
                json!({ "hue": 0, "saturation": 1, "brightness": 1 }),
            ))
            .await;

        assert_eq!(envelope.error_type(), Some(ErrorType::EndpointUnreachable));
        assert!(envelope.context.is_none());
    }

    #[tokio::test]
    async fn should_reject_color_directive_without_color() {
        let router = router();
        let mut req = color_request(json!({}));
        req["directive"]["payload"] = json!({});
        let envelope = router.handle(&req).await;

        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
        assert!(router.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_malformed_color() {
        let router = router();
        let envelope = router
            .handle(&color_request(json!({ "hue": "red" })))
            .await;
        assert_eq!(envelope.error_type(), Some(ErrorType::InvalidDirective));
        assert!(router.gateway().calls().is_empty());
    }
}
