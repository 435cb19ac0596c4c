//! aws_tgw_peering_domain_conn - Connection between domains on two peered TGWs
//!
//! Identified as `tgw1:domain1~tgw2:domain2`.

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::TgwDomainConnection;
use avx_core::fields::Fields;
use avx_core::identifier::{self, DELIMITER, PAIR_DELIMITER};
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "domain connection";

pub struct AwsTgwPeeringDomainConn;

fn connection(config: Fields<'_>) -> ProviderResult<TgwDomainConnection> {
    Ok(TgwDomainConnection {
        tgw_name1: config.string("tgw_name1")?,
        domain_name1: config.string("domain_name1")?,
        tgw_name2: config.string("tgw_name2")?,
        domain_name2: config.string("domain_name2")?,
    })
}

fn format_id(conn: &TgwDomainConnection) -> ProviderResult<String> {
    let source = identifier::join(
        [conn.tgw_name1.as_str(), conn.domain_name1.as_str()],
        PAIR_DELIMITER,
    )?;
    let destination = identifier::join(
        [conn.tgw_name2.as_str(), conn.domain_name2.as_str()],
        PAIR_DELIMITER,
    )?;
    Ok(identifier::join(
        [source.as_str(), destination.as_str()],
        DELIMITER,
    )?)
}

fn parse_id(id: &str) -> ProviderResult<TgwDomainConnection> {
    let [source, destination] = identifier::split::<2>(id, DELIMITER)?;
    let [tgw_name1, domain_name1] = identifier::split::<2>(&source, PAIR_DELIMITER)?;
    let [tgw_name2, domain_name2] = identifier::split::<2>(&destination, PAIR_DELIMITER)?;
    Ok(TgwDomainConnection {
        tgw_name1,
        domain_name1,
        tgw_name2,
        domain_name2,
    })
}

fn attributes(conn: &TgwDomainConnection) -> Attributes {
    HashMap::from([
        ("tgw_name1".to_string(), Value::from(conn.tgw_name1.as_str())),
        ("domain_name1".to_string(), Value::from(conn.domain_name1.as_str())),
        ("tgw_name2".to_string(), Value::from(conn.tgw_name2.as_str())),
        ("domain_name2".to_string(), Value::from(conn.domain_name2.as_str())),
    ])
}

#[async_trait]
impl ResourceHandler for AwsTgwPeeringDomainConn {
    fn type_name(&self) -> &'static str {
        "aws_tgw_peering_domain_conn"
    }

    fn schema(&self) -> ResourceSchema {
        let key = |name: &str, description: &str| {
            AttributeSchema::new(name, types::natural_key())
                .required()
                .force_new()
                .with_description(description)
        };
        ResourceSchema::new(self.type_name())
            .with_description("Connection between network domains of two peered AWS TGWs")
            .attribute(key("tgw_name1", "AWS TGW name of the source domain"))
            .attribute(key("domain_name1", "Source network domain"))
            .attribute(key("tgw_name2", "AWS TGW name of the destination domain"))
            .attribute(key("domain_name2", "Destination network domain"))
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        Ok(attributes(&parse_id(id)?))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let conn = connection(config)?;
        let id = format_id(&conn)?;
        ctx.client
            .create_domain_connection(&conn)
            .await
            .or_fail("create", WHAT)?;
        Ok(id)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let conn = parse_id(id)?;
        let connected = ctx
            .client
            .list_connected_domains(&conn.tgw_name1, &conn.domain_name1)
            .await
            .found()
            .or_fail("find", WHAT)?
            .unwrap_or_default();

        let destination = conn.destination();
        if connected.iter().any(|d| *d == destination) {
            Ok(Some(attributes(&conn)))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        let conn = parse_id(id)?;
        ctx.client
            .delete_domain_connection(&conn)
            .await
            .or_fail("delete", WHAT)
    }
}
