//! Shape of a persisted state document as far as imported resources go
//!
//! Only the fields downstream consumers read are modelled; anything else in
//! the document is ignored during deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// In-memory representation of a state file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<StateResource>,
}

/// A named, typed resource tracked in state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateResource {
    pub name: String,

    #[serde(rename = "type")]
    pub resource_type: String,

    pub provider: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub instances: Vec<ResourceInstance>,
}

impl StateResource {
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

/// One instance of a resource, without the bookkeeping state adds around it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstance {
    #[serde(rename = "attributes", default, deserialize_with = "null_as_default")]
    pub data: ResourceData,
}

/// Attributes of a remote resource as recorded in state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_assumed_signin: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub provisioning: Vec<AppProvisioning>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parameters: Vec<AppParameters>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub configuration: Vec<AppConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppProvisioning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// A custom parameter (attribute mapping) on an app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_key_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_attribute_mappings: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_attribute_macros: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_transformations: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_values: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_if_blank: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_entitlements: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_entitlements_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_saml_assertion: Option<bool>,
}

/// SSO connector configuration (SAML or OIDC)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_expiration_minutes: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oidc_application_type: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_endpoint_auth_method: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_expiration_minutes: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_arn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_algorithm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<i64>,
}

/// Treat an explicit `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
