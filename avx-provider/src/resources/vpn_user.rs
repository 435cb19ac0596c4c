//! vpn_user - VPN user attached to a VPN gateway or load balancer

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models;
use avx_core::differ::{Changes, set_diff};
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "VPN user";

pub struct VpnUser;

fn user(config: Fields<'_>) -> ProviderResult<models::VpnUser> {
    let profiles = if config.bool("manage_user_attachment")? {
        config.string_set("profiles")?.into_iter().collect()
    } else {
        Vec::new()
    };
    Ok(models::VpnUser {
        vpc_id: config.string("vpc_id")?,
        gw_name: config.string("gw_name")?,
        user_name: config.string("user_name")?,
        user_email: config.string("user_email")?,
        saml_endpoint: config.string("saml_endpoint")?,
        profiles,
    })
}

/// Profile membership is only tracked when this resource manages attachments
fn manages_attachment(prior: Fields<'_>) -> ProviderResult<bool> {
    // Imports carry no prior configuration and fall back to the default
    match prior.get("manage_user_attachment") {
        None => Ok(true),
        Some(_) => Ok(prior.bool("manage_user_attachment")?),
    }
}

#[async_trait]
impl ResourceHandler for VpnUser {
    fn type_name(&self) -> &'static str {
        "vpn_user"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("VPN user")
            .attribute(
                AttributeSchema::new("vpc_id", AttributeType::String)
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("gw_name", AttributeType::String)
                    .required()
                    .force_new()
                    .with_description("VPN gateway or load balancer name"),
            )
            .attribute(
                AttributeSchema::new("user_name", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(AttributeSchema::new("user_email", AttributeType::String).force_new())
            .attribute(
                AttributeSchema::new("saml_endpoint", AttributeType::String)
                    .force_new()
                    .with_description("SAML endpoint used to authenticate the user"),
            )
            .attribute(
                AttributeSchema::new("manage_user_attachment", AttributeType::Bool)
                    .with_default(true)
                    .with_description(
                        "Manage profile attachments here instead of in the profile resource",
                    ),
            )
            .attribute(
                AttributeSchema::new("profiles", types::string_set())
                    .optional_computed()
                    .with_description("Profiles the user belongs to"),
            )
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        if !config.bool("manage_user_attachment")? && config.is_set("profiles") {
            return Err(ProviderError::validation(
                "profiles can only be set when manage_user_attachment is enabled",
            ));
        }
        Ok(())
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        Ok(HashMap::from([
            ("user_name".to_string(), Value::from(id)),
            ("manage_user_attachment".to_string(), Value::Bool(true)),
        ]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let user = user(config)?;
        log::info!("creating VPN user {} on {}", user.user_name, user.gw_name);
        ctx.client
            .create_vpn_user(&user)
            .await
            .or_fail("create", WHAT)?;
        Ok(user.user_name)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let Some(user) = ctx
            .client
            .get_vpn_user(id)
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        let manage = manages_attachment(prior)?;
        let mut attrs = HashMap::from([
            ("user_name".to_string(), Value::from(user.user_name)),
            ("vpc_id".to_string(), Value::from(user.vpc_id)),
            ("gw_name".to_string(), Value::from(user.gw_name)),
            ("user_email".to_string(), Value::from(user.user_email)),
            ("saml_endpoint".to_string(), Value::from(user.saml_endpoint)),
            ("manage_user_attachment".to_string(), Value::Bool(manage)),
        ]);
        if manage {
            let mut profiles = user.profiles;
            profiles.sort();
            attrs.insert("profiles".to_string(), Value::strings(profiles));
        }
        Ok(Some(attrs))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        let new = changes.new_fields();
        if !new.bool("manage_user_attachment")? || !changes.has_change("profiles") {
            return Ok(());
        }

        let diff = set_diff(
            &changes.old().string_set("profiles")?,
            &new.string_set("profiles")?,
        );
        for profile in &diff.removed {
            ctx.client
                .detach_vpn_user_from_profile(id, profile)
                .await
                .or_fail("detach profile from", WHAT)?;
        }
        for profile in &diff.added {
            ctx.client
                .attach_vpn_user_to_profile(id, profile)
                .await
                .or_fail("attach profile to", WHAT)?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, state: Fields<'_>) -> ProviderResult<()> {
        let user = models::VpnUser {
            user_name: id.to_string(),
            ..user(state)?
        };
        ctx.client
            .delete_vpn_user(&user)
            .await
            .or_fail("delete", WHAT)
    }
}
