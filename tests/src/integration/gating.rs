//! # Request-Gated Mutations
//!
//! `AddIdentity`, `AddAccessorMethod`, `RevokeAccessor` and
//! `RevokeIdentityAssociation` each cite a request that must be closed,
//! carry the mutation's method name as its purpose, and hold an `accept`
//! from the mutating IdP. Conditions are checked in that order.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        accessor_key, consent_request, identifier_hash, identity_network, register_identity,
        Participants, TestNetwork,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};

    const GATED: [&str; 4] = [
        "AddIdentity",
        "AddAccessorMethod",
        "RevokeAccessor",
        "RevokeIdentityAssociation",
    ];

    const CODE: &str = "group-gated";

    /// Identity network with one group served by idp1, plus a second
    /// namespace for `AddIdentity`.
    fn gated_network() -> (TestNetwork, Participants) {
        let (mut net, p) = identity_network();
        net.add_namespace("passport");
        net.expect_ok(p.idp1.tx(
            "RegisterIdentity",
            register_identity(CODE, "user-1", "acc-1"),
        ));
        (net, p)
    }

    fn mutation(method: &str, request_id: &str) -> Value {
        match method {
            "AddIdentity" => json!({
                "request_id": request_id,
                "reference_group_code": CODE,
                "new_identity_list": [{"namespace": "passport", "identifier_hash": identifier_hash("P-77")}],
            }),
            "AddAccessorMethod" => json!({
                "request_id": request_id,
                "reference_group_code": CODE,
                "accessor_id": "acc-new",
                "accessor_public_key": accessor_key(),
                "accessor_type": "Ed25519",
            }),
            "RevokeAccessor" => json!({
                "request_id": request_id,
                "accessor_id_list": ["acc-1"],
            }),
            "RevokeIdentityAssociation" => json!({
                "request_id": request_id,
                "reference_group_code": CODE,
            }),
            other => panic!("not a gated method: {other}"),
        }
    }

    #[test]
    fn test_full_consent_admits_every_gated_mutation() {
        for method in GATED {
            let (mut net, p) = gated_network();
            consent_request(&mut net, &p.rp1, &p.idp1, "req-ok", method, Some("accept"), true);
            let outcome = net.submit(p.idp1.tx(method, mutation(method, "req-ok")));
            assert!(outcome.is_ok(), "{method}: {}", outcome.log);
        }
    }

    #[test]
    fn test_open_request_is_rejected() {
        for method in GATED {
            let (mut net, p) = gated_network();
            consent_request(&mut net, &p.rp1, &p.idp1, "req-open", method, Some("accept"), false);
            let log = net.expect_rejected(p.idp1.tx(method, mutation(method, "req-open")));
            assert_eq!(log, "Request is not closed", "{method}");
        }
    }

    #[test]
    fn test_purpose_must_name_the_mutation() {
        for method in GATED {
            let (mut net, p) = gated_network();
            let other = GATED.iter().find(|m| **m != method).unwrap();
            consent_request(&mut net, &p.rp1, &p.idp1, "req-other", other, Some("accept"), true);
            let log = net.expect_rejected(p.idp1.tx(method, mutation(method, "req-other")));
            assert_eq!(log, "Request purpose does not match", "{method}");
        }
    }

    #[test]
    fn test_rejecting_idp_cannot_mutate() {
        for method in GATED {
            let (mut net, p) = gated_network();
            consent_request(&mut net, &p.rp1, &p.idp1, "req-no", method, Some("reject"), true);
            let log = net.expect_rejected(p.idp1.tx(method, mutation(method, "req-no")));
            assert_eq!(log, "IdP has not accepted request", "{method}");
        }
    }

    #[test]
    fn test_one_request_backs_repeated_mutations() {
        let (mut net, p) = gated_network();
        consent_request(&mut net, &p.rp1, &p.idp1, "req-many", "AddAccessorMethod", Some("accept"), true);
        for accessor_id in ["acc-2", "acc-3"] {
            let mut params = mutation("AddAccessorMethod", "req-many");
            params["accessor_id"] = json!(accessor_id);
            net.expect_ok(p.idp1.tx("AddAccessorMethod", params));
        }
        let (log, _) = net.query("GetAccessorKey", json!({"accessor_id": "acc-3"}));
        assert_eq!(log, "success");
    }

    #[test]
    fn test_consent_given_to_another_idp_does_not_transfer() {
        let (mut net, p) = gated_network();
        consent_request(&mut net, &p.rp1, &p.idp2, "req-idp2", "RevokeAccessor", Some("accept"), true);
        let log = net.expect_rejected(p.idp1.tx("RevokeAccessor", mutation("RevokeAccessor", "req-idp2")));
        assert_eq!(log, "IdP has not accepted request");
    }

    #[test]
    fn test_unknown_or_missing_request_id() {
        let (mut net, p) = gated_network();
        let log = net.expect_rejected(p.idp1.tx("RevokeAccessor", mutation("RevokeAccessor", "req-ghost")));
        assert_eq!(log, "Request ID not found");
        let log = net.expect_rejected(p.idp1.tx("RevokeAccessor", mutation("RevokeAccessor", "")));
        assert_eq!(log, "Please input request ID");
    }

    #[test]
    fn test_revoked_association_hides_identity_from_idp() {
        let (mut net, p) = gated_network();
        consent_request(
            &mut net,
            &p.rp1,
            &p.idp1,
            "req-leave",
            "RevokeIdentityAssociation",
            Some("accept"),
            true,
        );
        net.expect_ok(p.idp1.tx(
            "RevokeIdentityAssociation",
            mutation("RevokeIdentityAssociation", "req-leave"),
        ));

        let (log, _) = net.query(
            "GetIdentityInfo",
            json!({"reference_group_code": CODE, "node_id": "idp1"}),
        );
        assert_eq!(log, "not found");
        let (_, key) = net.query("GetAccessorKey", json!({"accessor_id": "acc-1"}));
        assert_eq!(key["active"], false);
        let (_, exists) = net.query(
            "CheckExistingIdentity",
            json!({"identity_namespace": "cid", "identity_identifier_hash": identifier_hash("user-1")}),
        );
        assert_eq!(exists["exist"], false);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_first_failing_condition_is_reported(
            method in proptest::sample::select(GATED.to_vec()),
            closed in any::<bool>(),
            purpose_matches in any::<bool>(),
            accepted in any::<bool>(),
        ) {
            let (mut net, p) = gated_network();
            let purpose = if purpose_matches { method } else { "SomethingElse" };
            let status = if accepted { "accept" } else { "reject" };
            consent_request(&mut net, &p.rp1, &p.idp1, "req-prop", purpose, Some(status), closed);

            let outcome = net.submit(p.idp1.tx(method, mutation(method, "req-prop")));
            let expected = if !closed {
                Some("Request is not closed")
            } else if !purpose_matches {
                Some("Request purpose does not match")
            } else if !accepted {
                Some("IdP has not accepted request")
            } else {
                None
            };
            match expected {
                Some(log) => prop_assert_eq!(outcome.log, log),
                None => prop_assert!(outcome.is_ok(), "{}", outcome.log),
            }
        }
    }
}
