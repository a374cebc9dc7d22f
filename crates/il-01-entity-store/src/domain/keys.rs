//! # Key Layout
//!
//! Every entity lives under a string prefix. Secondary indexes map a lookup
//! key to the primary id of the owning record.
//!
//! Ids may contain `:`, so a two-part key carries the byte length of its
//! first part (`{len}:{first}:{second}`). Without it `("a:b", "c")` and
//! `("a", "b:c")` would share a key.
//!
//! | Prefix | Value |
//! |--------|-------|
//! | `node:{id}` | `Node` |
//! | `namespace:{ns}` | `Namespace` |
//! | `ref_group:{code}` | `ReferenceGroup` |
//! | `identity:{len}:{ns}:{hash}` | reference group code |
//! | `accessor:{id}` | reference group code |
//! | `request:{id}` | `Request` |
//! | `service:{id}` | `Service` |
//! | `approved_service:{len}:{svc}:{node}` | `ServiceApproval` |
//! | `service_dest:{len}:{svc}:{node}` | `ServiceDestination` |
//! | `error_code:{type}:{code}` | `ErrorCode` |
//! | `allowed_mode:{purpose}` | mode list |
//! | `governance:*` | chain-wide scalars |
//! | `meta:*` | height and state root, written on commit only |

use shared_types::ErrorCodeType;

pub const NODE_PREFIX: &str = "node:";
pub const NAMESPACE_PREFIX: &str = "namespace:";
pub const REFERENCE_GROUP_PREFIX: &str = "ref_group:";
pub const IDENTITY_PREFIX: &str = "identity:";
pub const ACCESSOR_PREFIX: &str = "accessor:";
pub const REQUEST_PREFIX: &str = "request:";
pub const SERVICE_PREFIX: &str = "service:";
pub const APPROVAL_PREFIX: &str = "approved_service:";
pub const DESTINATION_PREFIX: &str = "service_dest:";
pub const ERROR_CODE_PREFIX: &str = "error_code:";
pub const ALLOWED_MODE_PREFIX: &str = "allowed_mode:";

pub const NDID_NODE_ID: &[u8] = b"governance:ndid_node_id";
pub const ALLOWED_MIN_IAL: &[u8] = b"governance:allowed_min_ial_first_idp";
pub const LAST_BLOCK: &[u8] = b"governance:last_block";

pub const META_HEIGHT: &[u8] = b"meta:height";
pub const META_STATE_ROOT: &[u8] = b"meta:state_root";

fn key(prefix: &str, rest: &str) -> Vec<u8> {
    format!("{prefix}{rest}").into_bytes()
}

fn pair_key(prefix: &str, first: &str, second: &str) -> Vec<u8> {
    format!("{prefix}{}:{first}:{second}", first.len()).into_bytes()
}

pub fn node(node_id: &str) -> Vec<u8> {
    key(NODE_PREFIX, node_id)
}

pub fn namespace(namespace: &str) -> Vec<u8> {
    key(NAMESPACE_PREFIX, namespace)
}

pub fn reference_group(code: &str) -> Vec<u8> {
    key(REFERENCE_GROUP_PREFIX, code)
}

pub fn identity_index(namespace: &str, identifier_hash: &str) -> Vec<u8> {
    pair_key(IDENTITY_PREFIX, namespace, identifier_hash)
}

pub fn accessor_index(accessor_id: &str) -> Vec<u8> {
    key(ACCESSOR_PREFIX, accessor_id)
}

pub fn request(request_id: &str) -> Vec<u8> {
    key(REQUEST_PREFIX, request_id)
}

pub fn service(service_id: &str) -> Vec<u8> {
    key(SERVICE_PREFIX, service_id)
}

pub fn approval(service_id: &str, node_id: &str) -> Vec<u8> {
    pair_key(APPROVAL_PREFIX, service_id, node_id)
}

pub fn destination(service_id: &str, node_id: &str) -> Vec<u8> {
    pair_key(DESTINATION_PREFIX, service_id, node_id)
}

/// Scan prefix for all destinations of one service.
pub fn destinations_of(service_id: &str) -> Vec<u8> {
    pair_key(DESTINATION_PREFIX, service_id, "")
}

pub fn error_code(error_type: ErrorCodeType, code: i32) -> Vec<u8> {
    key(ERROR_CODE_PREFIX, &format!("{}:{code}", error_type.as_str()))
}

/// Scan prefix for all codes of one type.
pub fn error_codes_of(error_type: ErrorCodeType) -> Vec<u8> {
    key(ERROR_CODE_PREFIX, &format!("{}:", error_type.as_str()))
}

pub fn allowed_mode_list(purpose: &str) -> Vec<u8> {
    key(ALLOWED_MODE_PREFIX, purpose)
}
