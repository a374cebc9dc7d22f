//! # Query Engine Service
//!
//! Routes a query name to its projection, decodes params, and renders the
//! result as JSON.
//!
//! | Module | Queries |
//! |--------|---------|
//! | `nodes` | node keys, info, MQ addresses, tokens, IdP lookups, proxies |
//! | `identity` | namespaces, reference groups, accessors, governance |
//! | `catalog` | services, AS destinations, error codes |
//! | `requests` | requests and AS data signatures |

mod catalog;
mod identity;
mod nodes;
mod requests;

use crate::domain::{ChainInfo, ChainInfoView, QueryError};
use crate::ports::QueryApi;
use il_01_entity_store::StateReader;
use il_03_node_registry::KeyKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{QueryOutcome, QueryRequest};
use tracing::debug;

/// Stateless query router.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }
}

impl QueryApi for QueryEngine {
    fn query(
        &self,
        reader: &dyn StateReader,
        chain: &ChainInfo,
        request: &QueryRequest,
    ) -> QueryOutcome {
        match route(reader, chain, &request.method, &request.params) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(method = %request.method, error = %e, "Query failed");
                QueryOutcome::error(e.to_string())
            }
        }
    }
}

fn route(
    reader: &dyn StateReader,
    chain: &ChainInfo,
    method: &str,
    raw: &str,
) -> Result<QueryOutcome, QueryError> {
    match method {
        // Nodes
        "GetNodePublicKey" => nodes::node_key(reader, &parse(method, raw)?, KeyKind::Signing),
        "GetNodeMasterPublicKey" => nodes::node_key(reader, &parse(method, raw)?, KeyKind::Master),
        "GetMqAddresses" => nodes::mq_addresses(reader, &parse(method, raw)?),
        "GetNodeInfo" => nodes::node_info(reader, &parse(method, raw)?),
        "GetNodeIDList" => nodes::node_id_list(reader, &parse(method, raw)?),
        "GetNodesBehindProxyNode" => nodes::nodes_behind_proxy(reader, &parse(method, raw)?),
        "GetNodeToken" => nodes::node_token(reader, &parse(method, raw)?),
        "GetIdpNodes" => nodes::idp_nodes(reader, &parse(method, raw)?),
        "GetIdpNodesInfo" => nodes::idp_nodes_info(reader, &parse(method, raw)?),

        // Services
        "GetAsNodesByServiceId" => catalog::as_nodes(reader, &parse(method, raw)?),
        "GetAsNodesInfoByServiceId" => catalog::as_nodes_info(reader, &parse(method, raw)?),
        "GetServicesByAsID" => catalog::services_by_as(reader, &parse(method, raw)?),
        "GetServiceDetail" => catalog::service_detail(reader, &parse(method, raw)?),
        "GetServiceList" => {
            parse::<crate::domain::NoParams>(method, raw)?;
            catalog::service_list(reader)
        }
        "GetErrorCodeList" => catalog::error_code_list(reader, &parse(method, raw)?),

        // Namespaces & identities
        "GetNamespaceList" => {
            parse::<crate::domain::NoParams>(method, raw)?;
            identity::namespace_list(reader)
        }
        "GetIdentityInfo" => identity::identity_info(reader, &parse(method, raw)?),
        "GetReferenceGroupCode" => identity::reference_group_code(reader, &parse(method, raw)?),
        "GetReferenceGroupCodeByAccessorID" => {
            identity::reference_group_code_by_accessor(reader, &parse(method, raw)?)
        }
        "CheckExistingIdentity" => identity::check_existing_identity(reader, &parse(method, raw)?),
        "GetAccessorKey" => identity::accessor_key(reader, &parse(method, raw)?),
        "GetAccessorOwner" => identity::accessor_owner(reader, &parse(method, raw)?),
        "GetAllowedModeList" => identity::allowed_mode_list(reader, &parse(method, raw)?),
        "GetAllowedMinIalForRegisterIdentityAtFirstIdp" => {
            parse::<crate::domain::NoParams>(method, raw)?;
            identity::allowed_min_ial(reader)
        }

        // Requests
        "GetRequest" => requests::request(reader, chain, &parse(method, raw)?),
        "GetRequestDetail" => requests::request_detail(reader, chain, &parse(method, raw)?),
        "GetDataSignature" => requests::data_signature(reader, &parse(method, raw)?),

        // Chain
        "GetChainInfo" => found(&ChainInfoView {
            height: chain.height,
            state_root: hex::encode(chain.state_root),
        }),

        other => Err(QueryError::UnknownMethod(other.to_string())),
    }
}

/// Decode query params; an empty string means `{}`.
fn parse<T: DeserializeOwned>(method: &str, raw: &str) -> Result<T, QueryError> {
    let raw = if raw.trim().is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).map_err(|e| QueryError::InvalidParams {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

fn render<T: Serialize>(value: &T) -> Result<String, QueryError> {
    serde_json::to_string(value).map_err(|e| QueryError::Render(e.to_string()))
}

pub(crate) fn found<T: Serialize>(value: &T) -> Result<QueryOutcome, QueryError> {
    Ok(QueryOutcome::found(render(value)?))
}

/// "success" with the value, or "not found" with the view's default.
pub(crate) fn answer<T: Serialize + Default>(value: Option<T>) -> Result<QueryOutcome, QueryError> {
    match value {
        Some(value) => found(&value),
        None => Ok(QueryOutcome::not_found(render(&T::default())?)),
    }
}

/// A bare list; empty is "not found".
pub(crate) fn answer_list<T: Serialize>(items: Vec<T>) -> Result<QueryOutcome, QueryError> {
    if items.is_empty() {
        Ok(QueryOutcome::not_found(render(&items)?))
    } else {
        found(&items)
    }
}
