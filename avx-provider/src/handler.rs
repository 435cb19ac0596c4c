//! Handler traits implemented by every resource and data source
//!
//! A handler owns three things for its type: the schema, the marshaling
//! between attributes and client models, and the remote calls for each
//! lifecycle step. Sequencing (validation, read-back after writes, change
//! detection, not-found handling) lives in [`crate::AviatrixProvider`].

use async_trait::async_trait;
use avx_client::ControllerApi;
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::identifier;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::Attributes;
use avx_core::schema::ResourceSchema;

use crate::poll::PollSettings;

/// Everything a handler may touch during one lifecycle call
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub client: &'a dyn ControllerApi,
    pub controller_ip: &'a str,
    pub poll: &'a PollSettings,
}

impl Context<'_> {
    /// Identifier used by singleton configuration on this controller
    pub fn controller_id(&self) -> String {
        identifier::controller_id(self.controller_ip)
    }

    /// Reject identifiers that belong to a different controller
    pub fn check_controller_id(&self, identifier: &str) -> ProviderResult<()> {
        let expected = self.controller_id();
        if identifier == expected {
            Ok(())
        } else {
            Err(ProviderError::validation(format!(
                "ID: {} does not match controller IP. Please provide correct ID for importing",
                identifier
            )))
        }
    }
}

/// Lifecycle callbacks for one managed resource type
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    /// Cross-attribute rules the schema cannot express; never performs I/O
    fn validate(&self, _config: Fields<'_>) -> ProviderResult<()> {
        Ok(())
    }

    /// Natural-key attributes encoded in an identifier
    fn parse_identifier(&self, _identifier: &str) -> ProviderResult<Attributes> {
        Ok(Attributes::new())
    }

    /// Create the remote object and return its identifier
    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String>;

    /// Fetch current attributes, `None` when the controller no longer has the object
    ///
    /// `prior` is empty on import.
    async fn read(
        &self,
        ctx: &Context<'_>,
        identifier: &str,
        prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>>;

    /// Apply in-place changes; only called when something changed
    async fn update(
        &self,
        _ctx: &Context<'_>,
        _identifier: &str,
        _changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        Err(ProviderError::unsupported(format!(
            "{} does not support in-place updates",
            self.type_name()
        )))
    }

    async fn delete(
        &self,
        ctx: &Context<'_>,
        identifier: &str,
        state: Fields<'_>,
    ) -> ProviderResult<()>;
}

/// Read-only lookup
#[async_trait]
pub trait DataSourceHandler: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    /// Returns the identifier and the computed attributes
    async fn read(
        &self,
        ctx: &Context<'_>,
        config: Fields<'_>,
    ) -> ProviderResult<(String, Attributes)>;
}

/// Conversions from client results into provider results
pub trait ClientResultExt<T> {
    /// Wrap a failure as `failed to <op> <what>: <err>`
    fn or_fail(self, op: &str, what: &str) -> ProviderResult<T>;

    /// Turn the not-found sentinel into `Ok(None)`
    fn found(self) -> avx_client::Result<Option<T>>;
}

impl<T> ClientResultExt<T> for avx_client::Result<T> {
    fn or_fail(self, op: &str, what: &str) -> ProviderResult<T> {
        self.map_err(|e| {
            ProviderError::remote(format!("failed to {} {}: {}", op, what, e)).with_cause(e)
        })
    }

    fn found(self) -> avx_client::Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
