//! # Identity Ledger Handlers
//!
//! | Module | Methods |
//! |--------|---------|
//! | `namespace` | namespace CRUD, `SetAllowedModeList`, first-IdP minimum IAL |
//! | `identity` | `RegisterIdentity`, `AddIdentity`, `UpdateIdentity*`, `RevokeIdentityAssociation` |
//! | `accessor` | `AddAccessorMethod`, `RevokeAccessor`, `RevokeAndAddAccessor` |

mod accessor;
mod identity;
mod namespace;

pub use accessor::{add_accessor, revoke_accessor, revoke_and_add_accessor};
pub use identity::{
    add_identity, register_identity, revoke_identity_association, update_identity,
    update_identity_mode_list,
};
pub use namespace::{
    add_namespace, set_allowed_min_ial, set_allowed_mode_list, set_namespace_active,
    update_namespace,
};
