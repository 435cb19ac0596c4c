//! controller_bgp_max_as_limit_config - Controller-wide BGP AS-path length limits

use std::collections::HashMap;

use async_trait::async_trait;
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "controller BGP max AS limit config";
const WHAT_NON_RFC1918: &str = "controller BGP max AS limit config for non-RFC 1918 CIDRs";

pub struct BgpMaxAsLimitConfig;

fn as_limit() -> AttributeType {
    types::custom("AsLimit", AttributeType::Int, |value| {
        types::check_int_range(value, 1, 254)
    })
}

async fn set_rfc1918(ctx: &Context<'_>, limit: Option<i64>, op: &str) -> ProviderResult<()> {
    let result = match limit {
        Some(limit) => ctx.client.set_controller_bgp_max_as_limit(limit).await,
        None => ctx.client.disable_controller_bgp_max_as_limit().await,
    };
    result.or_fail(op, WHAT)
}

async fn set_non_rfc1918(ctx: &Context<'_>, limit: Option<i64>, op: &str) -> ProviderResult<()> {
    let result = match limit {
        Some(limit) => {
            ctx.client
                .set_controller_bgp_max_as_limit_non_rfc1918(limit)
                .await
        }
        None => {
            ctx.client
                .disable_controller_bgp_max_as_limit_non_rfc1918()
                .await
        }
    };
    result.or_fail(op, WHAT_NON_RFC1918)
}

#[async_trait]
impl ResourceHandler for BgpMaxAsLimitConfig {
    fn type_name(&self) -> &'static str {
        "controller_bgp_max_as_limit_config"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("Maximum AS-path length accepted by transit gateways")
            .attribute(
                AttributeSchema::new("max_as_limit", as_limit())
                    .with_description("Limit for RFC 1918 CIDRs; unset disables it"),
            )
            .attribute(
                AttributeSchema::new("max_as_limit_non_rfc1918", as_limit())
                    .with_description("Limit for non-RFC 1918 CIDRs; unset disables it"),
            )
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        if !config.is_set("max_as_limit") && !config.is_set("max_as_limit_non_rfc1918") {
            return Err(ProviderError::validation(
                "at least one of max_as_limit and max_as_limit_non_rfc1918 must be provided",
            ));
        }
        Ok(())
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        if let Some(limit) = config.optional_int("max_as_limit")? {
            set_rfc1918(ctx, Some(limit), "create").await?;
        }
        if let Some(limit) = config.optional_int("max_as_limit_non_rfc1918")? {
            set_non_rfc1918(ctx, Some(limit), "create").await?;
        }
        Ok(ctx.controller_id())
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        ctx.check_controller_id(id)?;

        let Some(limits) = ctx
            .client
            .get_controller_bgp_max_as_limit()
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        // Disabled limits read back as 0, the unset value
        Ok(Some(HashMap::from([
            (
                "max_as_limit".to_string(),
                Value::Int(limits.max_as_limit.unwrap_or(0)),
            ),
            (
                "max_as_limit_non_rfc1918".to_string(),
                Value::Int(limits.max_as_limit_non_rfc1918.unwrap_or(0)),
            ),
        ])))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        _id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        let new = changes.new_fields();
        if changes.has_change("max_as_limit") {
            set_rfc1918(ctx, new.optional_int("max_as_limit")?, "update").await?;
        }
        if changes.has_change("max_as_limit_non_rfc1918") {
            set_non_rfc1918(ctx, new.optional_int("max_as_limit_non_rfc1918")?, "update").await?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &Context<'_>, _id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        set_rfc1918(ctx, None, "delete").await?;
        set_non_rfc1918(ctx, None, "delete").await
    }
}
