//! # Identity and Request Scenarios
//!
//! ## Flows Tested
//!
//! 1. Identity registration: missing code, first IdP, duplicate identity.
//! 2. Accessor revocation behind a closed, accepted request.
//! 3. A data request answered by an AS and acknowledged by the RP.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        accessor_key, consent_request, identifier_hash, identity_network, register_identity,
        Actor,
    };
    use serde_json::json;

    #[test]
    fn test_register_identity_requires_reference_group_code() {
        let (mut net, p) = identity_network();
        let log = net.expect_rejected(p.idp1.tx(
            "RegisterIdentity",
            register_identity("", "user-1", "acc-1"),
        ));
        assert_eq!(log, "Please input reference group code");
    }

    #[test]
    fn test_first_idp_registers_identity() {
        let (mut net, p) = identity_network();
        let code = uuid::Uuid::new_v4().to_string();
        net.expect_ok(p.idp1.tx(
            "RegisterIdentity",
            register_identity(&code, "user-1", "acc-1"),
        ));

        let (log, info) = net.query(
            "GetIdentityInfo",
            json!({"reference_group_code": code, "node_id": "idp1"}),
        );
        assert_eq!(log, "success");
        assert_eq!(info, json!({"ial": 3, "mode_list": [2]}));

        let (_, found) = net.query(
            "GetReferenceGroupCode",
            json!({"identity_namespace": "cid", "identity_identifier_hash": identifier_hash("user-1")}),
        );
        assert_eq!(found["reference_group_code"], code);

        let (_, owner) = net.query("GetAccessorOwner", json!({"accessor_id": "acc-1"}));
        assert_eq!(owner["node_id"], "idp1");
    }

    #[test]
    fn test_second_idp_cannot_rebind_existing_identity() {
        let (mut net, p) = identity_network();
        let code = uuid::Uuid::new_v4().to_string();
        net.expect_ok(p.idp1.tx(
            "RegisterIdentity",
            register_identity(&code, "user-1", "acc-1"),
        ));

        let log = net.expect_rejected(p.idp2.tx(
            "RegisterIdentity",
            register_identity(&code, "user-1", "acc-2"),
        ));
        assert_eq!(log, "Identity already existed");

        // The failed attempt left no accessor behind.
        let (log, _) = net.query("GetAccessorKey", json!({"accessor_id": "acc-2"}));
        assert_eq!(log, "not found");
    }

    #[test]
    fn test_identities_split_differently_across_colon_stay_distinct() {
        let (mut net, p) = identity_network();
        net.add_namespace("a");
        net.add_namespace("a:b");
        let binding = |code: &str, namespace: &str, hash: &str, accessor_id: &str| {
            json!({
                "reference_group_code": code,
                "new_identity_list": [{"namespace": namespace, "identifier_hash": hash}],
                "ial": 3,
                "mode_list": [2],
                "accessor_id": accessor_id,
                "accessor_public_key": accessor_key(),
                "accessor_type": "Ed25519",
            })
        };

        net.expect_ok(p.idp1.tx("RegisterIdentity", binding("group-x", "a:b", "c", "acc-x")));
        net.expect_ok(p.idp2.tx("RegisterIdentity", binding("group-y", "a", "b:c", "acc-y")));

        let group_of = |namespace: &str, hash: &str| {
            let (log, found) = net.query(
                "GetReferenceGroupCode",
                json!({"identity_namespace": namespace, "identity_identifier_hash": hash}),
            );
            assert_eq!(log, "success");
            found["reference_group_code"].clone()
        };
        assert_eq!(group_of("a:b", "c"), "group-x");
        assert_eq!(group_of("a", "b:c"), "group-y");
    }

    #[test]
    fn test_second_idp_joins_with_new_identity() {
        let (mut net, p) = identity_network();
        net.add_namespace("passport");
        let code = uuid::Uuid::new_v4().to_string();
        net.expect_ok(p.idp1.tx(
            "RegisterIdentity",
            register_identity(&code, "user-1", "acc-1"),
        ));

        let mut params = register_identity(&code, "user-1", "acc-2");
        params["new_identity_list"] =
            json!([{"namespace": "passport", "identifier_hash": identifier_hash("P123")}]);
        net.expect_ok(p.idp2.tx("RegisterIdentity", params));

        let (_, idps) = net.query(
            "GetIdpNodes",
            json!({"reference_group_code": code, "min_ial": 1.1, "min_aal": 1}),
        );
        let mut ids: Vec<_> = idps["node"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["node_id"].as_str().unwrap().to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["idp1", "idp2"]);
    }

    #[test]
    fn test_revoke_accessor_after_consent() {
        let (mut net, p) = identity_network();
        let code = uuid::Uuid::new_v4().to_string();
        net.expect_ok(p.idp1.tx(
            "RegisterIdentity",
            register_identity(&code, "user-1", "acc-1"),
        ));
        consent_request(&mut net, &p.rp1, &p.idp1, "req-revoke", "RevokeAccessor", Some("accept"), true);

        net.expect_ok(p.idp1.tx(
            "RevokeAccessor",
            json!({"request_id": "req-revoke", "accessor_id_list": ["acc-1"]}),
        ));

        let (log, key) = net.query("GetAccessorKey", json!({"accessor_id": "acc-1"}));
        assert_eq!(log, "success");
        assert_eq!(key["active"], false);

        let log = net.expect_rejected(p.idp1.tx(
            "RevokeAccessor",
            json!({"request_id": "req-revoke", "accessor_id_list": ["acc-1"]}),
        ));
        assert_eq!(log, "Accessor is not active");
    }

    #[test]
    fn test_revoke_and_add_accessor_swaps_keys() {
        let (mut net, p) = identity_network();
        let code = uuid::Uuid::new_v4().to_string();
        net.expect_ok(p.idp1.tx(
            "RegisterIdentity",
            register_identity(&code, "user-1", "acc-1"),
        ));
        consent_request(
            &mut net,
            &p.rp1,
            &p.idp1,
            "req-swap",
            "RevokeAndAddAccessor",
            Some("accept"),
            true,
        );

        let new_key = accessor_key();
        net.expect_ok(p.idp1.tx(
            "RevokeAndAddAccessor",
            json!({
                "request_id": "req-swap",
                "revoking_accessor_id": "acc-1",
                "accessor_id": "acc-1b",
                "accessor_public_key": new_key,
            }),
        ));

        let (_, old) = net.query("GetAccessorKey", json!({"accessor_id": "acc-1"}));
        let (_, new) = net.query("GetAccessorKey", json!({"accessor_id": "acc-1b"}));
        assert_eq!(old["active"], false);
        assert_eq!(new["active"], true);
        assert_eq!(new["accessor_public_key"], new_key);
    }

    #[test]
    fn test_data_request_round_trip() {
        let (mut net, p) = identity_network();
        let as1 = Actor::new("as1");
        net.register(&as1, "AS");
        net.expect_ok(net.ndid_tx("AddService", json!({"service_id": "bank_statement", "service_name": "Bank statement"})));
        net.expect_ok(net.ndid_tx(
            "RegisterServiceDestinationByNDID",
            json!({"service_id": "bank_statement", "node_id": "as1"}),
        ));
        net.expect_ok(as1.tx(
            "RegisterServiceDestination",
            json!({"service_id": "bank_statement", "min_ial": 1.1, "min_aal": 1, "supported_namespace_list": ["cid"]}),
        ));

        net.expect_ok(p.rp1.tx(
            "CreateRequest",
            json!({
                "request_id": "req-data",
                "min_idp": 1,
                "min_ial": 1.1,
                "min_aal": 1,
                "idp_id_list": ["idp1"],
                "mode": 2,
                "data_request_list": [{
                    "service_id": "bank_statement",
                    "as_id_list": ["as1"],
                    "min_as": 1,
                    "request_params_hash": "params-hash",
                }],
            }),
        ));
        net.expect_ok(p.idp1.tx(
            "CreateIdpResponse",
            json!({"request_id": "req-data", "ial": 2.3, "aal": 3, "status": "accept", "signature": "sig"}),
        ));
        net.expect_ok(as1.tx(
            "CreateAsResponse",
            json!({"request_id": "req-data", "service_id": "bank_statement", "signature": "as-sig"}),
        ));
        let log = net.expect_rejected(as1.tx(
            "CreateAsResponse",
            json!({"request_id": "req-data", "service_id": "bank_statement", "signature": "again"}),
        ));
        assert_eq!(log, "Duplicate AS ID in response list");

        let log = net.expect_rejected(p.idp2.tx(
            "SetDataReceived",
            json!({"request_id": "req-data", "service_id": "bank_statement", "as_id": "as1"}),
        ));
        assert_eq!(log, "Only requester can modify this request");
        net.expect_ok(p.rp1.tx(
            "SetDataReceived",
            json!({"request_id": "req-data", "service_id": "bank_statement", "as_id": "as1"}),
        ));
        net.expect_ok(p.rp1.tx("CloseRequest", json!({"request_id": "req-data"})));

        let (_, detail) = net.query("GetRequestDetail", json!({"request_id": "req-data"}));
        assert_eq!(detail["closed"], true);
        assert_eq!(detail["response_list"][0]["idp_id"], "idp1");
        let as_response = &detail["data_request_list"][0]["response_list"][0];
        assert_eq!(as_response["as_id"], "as1");
        assert_eq!(as_response["signed"], true);
        assert_eq!(as_response["received_data"], true);

        let (_, signature) = net.query(
            "GetDataSignature",
            json!({"node_id": "as1", "request_id": "req-data", "service_id": "bank_statement"}),
        );
        assert_eq!(signature["signature"], "as-sig");

        let log = net.expect_rejected(p.idp2.tx(
            "CreateIdpResponse",
            json!({"request_id": "req-data", "ial": 2.3, "aal": 3, "status": "accept"}),
        ));
        assert_eq!(log, "Request is already closed");
    }

    #[test]
    fn test_requester_times_out_request() {
        let (mut net, p) = identity_network();
        consent_request(&mut net, &p.rp1, &p.idp1, "req-slow", "", None, false);

        let log = net.expect_rejected(p.idp2.tx("TimeOutRequest", json!({"request_id": "req-slow"})));
        assert_eq!(log, "Only requester can modify this request");
        net.expect_ok(p.rp1.tx("TimeOutRequest", json!({"request_id": "req-slow"})));

        let log = net.expect_rejected(p.idp1.tx(
            "CreateIdpResponse",
            json!({"request_id": "req-slow", "ial": 3, "aal": 3, "status": "accept"}),
        ));
        assert_eq!(log, "Request is already timed out");

        let (_, request) = net.query("GetRequest", json!({"request_id": "req-slow"}));
        assert_eq!(request["timed_out"], true);
        assert_eq!(request["closed"], false);
    }
}
