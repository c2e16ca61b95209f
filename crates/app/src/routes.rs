//! Dispatch table: maps a directive's `(namespace, name)` to a [`Route`].
//!
//! Pairs absent from [`ROUTES`] have no route; the router answers them with
//! `INVALID_DIRECTIVE`.

use skillhub_domain::device::PowerState;

/// Interface namespaces this skill handles.
pub mod namespace {
    pub const ALEXA: &str = "Alexa";
    pub const AUTHORIZATION: &str = "Alexa.Authorization";
    pub const DISCOVERY: &str = "Alexa.Discovery";
    pub const POWER_CONTROLLER: &str = "Alexa.PowerController";
    pub const COLOR_CONTROLLER: &str = "Alexa.ColorController";
    pub const ENDPOINT_HEALTH: &str = "Alexa.EndpointHealth";
}

/// What to do with a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AcceptGrant,
    ReportState,
    Discover,
    SetColor,
    SetPower(PowerState),
}

/// One row of the dispatch table. `name: None` matches any directive name.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub namespace: &'static str,
    pub name: Option<&'static str>,
    pub route: Route,
}

impl RouteEntry {
    const fn exact(namespace: &'static str, name: &'static str, route: Route) -> Self {
        Self {
            namespace,
            name: Some(name),
            route,
        }
    }

    const fn any_name(namespace: &'static str, route: Route) -> Self {
        Self {
            namespace,
            name: None,
            route,
        }
    }

    fn matches(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name.is_none_or(|expected| expected == name)
    }
}

/// Every supported directive, first match wins.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry::exact(namespace::AUTHORIZATION, "AcceptGrant", Route::AcceptGrant),
    RouteEntry::exact(namespace::ALEXA, "ReportState", Route::ReportState),
    RouteEntry::exact(namespace::DISCOVERY, "Discover", Route::Discover),
    RouteEntry::exact(namespace::DISCOVERY, "Discover.Response", Route::Discover),
    RouteEntry::any_name(namespace::COLOR_CONTROLLER, Route::SetColor),
    RouteEntry::exact(
        namespace::POWER_CONTROLLER,
        "TurnOn",
        Route::SetPower(PowerState::On),
    ),
    RouteEntry::exact(
        namespace::POWER_CONTROLLER,
        "TurnOff",
        Route::SetPower(PowerState::Off),
    ),
];

impl Route {
    /// Look up the route for a `(namespace, name)` pair.
    #[must_use]
    pub fn resolve(namespace: &str, name: &str) -> Option<Self> {
        ROUTES
            .iter()
            .find(|entry| entry.matches(namespace, name))
            .map(|entry| entry.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_route_accept_grant() {
        assert_eq!(
            Route::resolve("Alexa.Authorization", "AcceptGrant"),
            Some(Route::AcceptGrant)
        );
    }

    #[test]
    fn should_route_report_state() {
        assert_eq!(
            Route::resolve("Alexa", "ReportState"),
            Some(Route::ReportState)
        );
    }

    #[test]
    fn should_route_discovery_and_tolerate_discover_response() {
        assert_eq!(
            Route::resolve("Alexa.Discovery", "Discover"),
            Some(Route::Discover)
        );
        assert_eq!(
            Route::resolve("Alexa.Discovery", "Discover.Response"),
            Some(Route::Discover)
        );
    }

    #[test]
    fn should_route_any_color_controller_name() {
        assert_eq!(
            Route::resolve("Alexa.ColorController", "SetColor"),
            Some(Route::SetColor)
        );
        assert_eq!(
            Route::resolve("Alexa.ColorController", "Whatever"),
            Some(Route::SetColor)
        );
    }

    #[test]
    fn should_map_power_directives_to_power_state() {
        assert_eq!(
            Route::resolve("Alexa.PowerController", "TurnOn"),
            Some(Route::SetPower(PowerState::On))
        );
        assert_eq!(
            Route::resolve("Alexa.PowerController", "TurnOff"),
            Some(Route::SetPower(PowerState::Off))
        );
    }

    #[test]
    fn should_not_route_unknown_pairs() {
        assert_eq!(Route::resolve("Alexa.PowerController", "Toggle"), None);
        assert_eq!(Route::resolve("Alexa.Speaker", "SetVolume"), None);
        assert_eq!(Route::resolve("Alexa", "Discover"), None);
        assert_eq!(Route::resolve("Alexa.Authorization", "AcceptGrant.Response"), None);
    }

    #[test]
    fn should_match_namespaces_case_sensitively() {
        assert_eq!(Route::resolve("alexa.powercontroller", "TurnOn"), None);
    }
}
