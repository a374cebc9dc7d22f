//! Domain rules of the identity ledger.

pub mod lookup;
pub mod rules;

pub use lookup::{group_of_accessor, resolve_reference_group};
pub use rules::{
    check_ceilings, check_ial, check_mode_list, check_new_accessor, check_new_identities,
    check_unbound,
};
