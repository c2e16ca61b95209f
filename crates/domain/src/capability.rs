//! Discovery descriptors: what an endpoint is and which interfaces it speaks.

use serde::{Deserialize, Serialize};

use crate::id::EndpointId;

/// Interface version shared by every capability this skill declares.
pub const INTERFACE_VERSION: &str = "3";

/// A declared capability interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub interface: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,
}

/// Properties block of a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    pub supported: Vec<SupportedProperty>,
    pub proactively_reported: bool,
    pub retrievable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedProperty {
    pub name: String,
}

impl Default for CapabilityDescriptor {
    fn default() -> Self {
        Self::alexa()
    }
}

impl CapabilityDescriptor {
    /// The base `Alexa` interface every endpoint must declare.
    #[must_use]
    pub fn alexa() -> Self {
        Self::interface("Alexa")
    }

    /// Start describing `interface` (e.g. `Alexa.PowerController`).
    ///
    /// Without [`supported`](Self::supported) the descriptor carries no
    /// `properties` block.
    #[must_use]
    pub fn interface(interface: impl Into<String>) -> Self {
        Self {
            kind: "AlexaInterface".to_string(),
            interface: interface.into(),
            version: INTERFACE_VERSION.to_string(),
            properties: None,
        }
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Declare the supported properties. An empty list removes the block.
    #[must_use]
    pub fn supported<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let supported: Vec<SupportedProperty> = names
            .into_iter()
            .map(|name| SupportedProperty { name: name.into() })
            .collect();
        self.properties = if supported.is_empty() {
            None
        } else {
            let previous = self.properties.take();
            Some(CapabilityProperties {
                supported,
                proactively_reported: previous.as_ref().is_some_and(|p| p.proactively_reported),
                retrievable: previous.as_ref().is_some_and(|p| p.retrievable),
            })
        };
        self
    }

    /// Only meaningful once [`supported`](Self::supported) has been set.
    #[must_use]
    pub fn proactively_reported(mut self, value: bool) -> Self {
        if let Some(properties) = self.properties.as_mut() {
            properties.proactively_reported = value;
        }
        self
    }

    /// Only meaningful once [`supported`](Self::supported) has been set.
    #[must_use]
    pub fn retrievable(mut self, value: bool) -> Self {
        if let Some(properties) = self.properties.as_mut() {
            properties.retrievable = value;
        }
        self
    }
}

/// One discovered endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    pub endpoint_id: EndpointId,
    pub friendly_name: String,
    pub description: String,
    pub manufacturer_name: String,
    pub display_categories: Vec<String>,
    pub capabilities: Vec<CapabilityDescriptor>,
}

impl EndpointDescriptor {
    /// Create a builder for constructing an [`EndpointDescriptor`].
    #[must_use]
    pub fn builder(
        endpoint_id: impl Into<EndpointId>,
        friendly_name: impl Into<String>,
    ) -> EndpointDescriptorBuilder {
        EndpointDescriptorBuilder {
            endpoint_id: endpoint_id.into(),
            friendly_name: friendly_name.into(),
            description: None,
            manufacturer_name: None,
            display_categories: Vec::new(),
            capabilities: Vec::new(),
        }
    }
}

/// Step-by-step builder for [`EndpointDescriptor`].
#[derive(Debug)]
pub struct EndpointDescriptorBuilder {
    endpoint_id: EndpointId,
    friendly_name: String,
    description: Option<String>,
    manufacturer_name: Option<String>,
    display_categories: Vec<String>,
    capabilities: Vec<CapabilityDescriptor>,
}

impl EndpointDescriptorBuilder {
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn manufacturer_name(mut self, manufacturer_name: impl Into<String>) -> Self {
        self.manufacturer_name = Some(manufacturer_name.into());
        self
    }

    #[must_use]
    pub fn display_category(mut self, category: impl Into<String>) -> Self {
        self.display_categories.push(category.into());
        self
    }

    #[must_use]
    pub fn capability(mut self, capability: CapabilityDescriptor) -> Self {
        self.capabilities.push(capability);
        self
    }

    #[must_use]
    pub fn capabilities(mut self, capabilities: impl IntoIterator<Item = CapabilityDescriptor>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    /// Finish the descriptor, filling protocol defaults for unset fields.
    ///
    /// Defaults: description `"Smart light"`, manufacturer `"skillhub"`,
    /// display category `LIGHT`.
    #[must_use]
    pub fn build(self) -> EndpointDescriptor {
        let display_categories = if self.display_categories.is_empty() {
            vec!["LIGHT".to_string()]
        } else {
            self.display_categories
        };
        EndpointDescriptor {
            endpoint_id: self.endpoint_id,
            friendly_name: self.friendly_name,
            description: self.description.unwrap_or_else(|| "Smart light".to_string()),
            manufacturer_name: self
                .manufacturer_name
                .unwrap_or_else(|| "skillhub".to_string()),
            display_categories,
            capabilities: self.capabilities,
        }
    }
}
