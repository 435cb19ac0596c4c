//! aws_tgw_network_domain - Network domain on an AWS TGW

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::NetworkDomain;
use avx_core::fields::Fields;
use avx_core::identifier::{self, DELIMITER};
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "network domain";

/// Mutually exclusive inspection flags
const FIREWALL_FLAGS: [&str; 3] = ["aviatrix_firewall", "native_egress", "native_firewall"];

pub struct AwsTgwNetworkDomain;

fn domain(config: Fields<'_>) -> ProviderResult<NetworkDomain> {
    Ok(NetworkDomain {
        name: config.string("name")?,
        tgw_name: config.string("tgw_name")?,
        aviatrix_firewall: config.bool("aviatrix_firewall")?,
        native_egress: config.bool("native_egress")?,
        native_firewall: config.bool("native_firewall")?,
        force_delete: false,
    })
}

fn attributes(domain: &NetworkDomain) -> Attributes {
    HashMap::from([
        ("name".to_string(), Value::from(domain.name.as_str())),
        ("tgw_name".to_string(), Value::from(domain.tgw_name.as_str())),
        ("aviatrix_firewall".to_string(), Value::from(domain.aviatrix_firewall)),
        ("native_egress".to_string(), Value::from(domain.native_egress)),
        ("native_firewall".to_string(), Value::from(domain.native_firewall)),
    ])
}

#[async_trait]
impl ResourceHandler for AwsTgwNetworkDomain {
    fn type_name(&self) -> &'static str {
        "aws_tgw_network_domain"
    }

    fn schema(&self) -> ResourceSchema {
        let flag = |name: &str, description: &str| {
            AttributeSchema::new(name, AttributeType::Bool)
                .with_default(false)
                .force_new()
                .with_description(description)
        };

        ResourceSchema::new(self.type_name())
            .with_description("Network domain on an AWS TGW")
            .attribute(
                AttributeSchema::new("name", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("tgw_name", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(flag(
                "aviatrix_firewall",
                "Set to true to create an Aviatrix firewall domain",
            ))
            .attribute(flag(
                "native_egress",
                "Set to true to create a native egress domain",
            ))
            .attribute(flag(
                "native_firewall",
                "Set to true to create a native firewall domain",
            ))
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        let mut enabled = Vec::new();
        for flag in FIREWALL_FLAGS {
            if config.bool(flag)? {
                enabled.push(flag);
            }
        }
        if enabled.len() > 1 {
            return Err(ProviderError::validation(format!(
                "only one of {} can be set to true",
                enabled.join(", ")
            )));
        }
        Ok(())
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        let [tgw_name, name] = identifier::split::<2>(id, DELIMITER)?;
        Ok(HashMap::from([
            ("tgw_name".to_string(), Value::from(tgw_name)),
            ("name".to_string(), Value::from(name)),
        ]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let domain = domain(config)?;
        log::info!("creating network domain {} on {}", domain.name, domain.tgw_name);
        ctx.client
            .create_network_domain(&domain)
            .await
            .or_fail("create", WHAT)?;
        Ok(identifier::join(
            [domain.tgw_name.as_str(), domain.name.as_str()],
            DELIMITER,
        )?)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let [tgw_name, name] = identifier::split::<2>(id, DELIMITER)?;
        let domain = ctx
            .client
            .get_network_domain(&tgw_name, &name)
            .await
            .found()
            .or_fail("find", WHAT)?;
        Ok(domain.as_ref().map(attributes))
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        let [tgw_name, name] = identifier::split::<2>(id, DELIMITER)?;
        let mut domain = NetworkDomain {
            name,
            tgw_name,
            ..Default::default()
        };
        domain.force_delete = domain.is_default_domain();
        ctx.client
            .delete_network_domain(&domain)
            .await
            .or_fail("delete", WHAT)
    }
}
