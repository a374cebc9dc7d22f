//! # Role Policy
//!
//! Which roles may call which method. `InitNDID` has no caller role: it is
//! self-certifying and handled before the policy is consulted.

use shared_types::{Method, Role};

/// Roles permitted to call `method`.
pub fn permitted_roles(method: Method) -> &'static [Role] {
    use Method::*;
    match method {
        InitNdid => &[],

        UpdateNode | SetMqAddresses => &[Role::Ndid, Role::Rp, Role::Idp, Role::As, Role::Proxy],

        RegisterNode
        | UpdateNodeByNdid
        | DisableNode
        | EnableNode
        | AddNodeToken
        | ReduceNodeToken
        | SetNodeToken
        | AddNodeToProxyNode
        | UpdateNodeProxyNode
        | RemoveNodeFromProxyNode
        | AddNamespace
        | UpdateNamespace
        | DisableNamespace
        | EnableNamespace
        | SetAllowedModeList
        | SetAllowedMinIalForRegisterIdentityAtFirstIdp
        | AddService
        | UpdateService
        | DisableService
        | EnableService
        | RegisterServiceDestinationByNdid
        | DisableServiceDestinationByNdid
        | EnableServiceDestinationByNdid
        | AddErrorCode
        | RemoveErrorCode
        | SetLastBlock => &[Role::Ndid],

        RegisterIdentity
        | AddIdentity
        | UpdateIdentity
        | UpdateIdentityModeList
        | AddAccessorMethod
        | RevokeAccessor
        | RevokeAndAddAccessor
        | RevokeIdentityAssociation
        | CreateIdpResponse => &[Role::Idp],

        CreateRequest | CloseRequest | TimeOutRequest | SetDataReceived => {
            &[Role::Rp, Role::Idp]
        }

        RegisterServiceDestination
        | UpdateServiceDestination
        | DisableServiceDestination
        | EnableServiceDestination
        | CreateAsResponse => &[Role::As],
    }
}

/// Whether a node of `role` may call `method`.
pub fn is_permitted(role: Role, method: Method) -> bool {
    permitted_roles(method).contains(&role)
}
