//! # Typed Repositories
//!
//! Per-entity get/put/exists over any [`StateReader`] / [`StateWriter`].
//! Handlers use these instead of building keys themselves.

use crate::domain::errors::StoreError;
use crate::domain::keys;
use crate::ports::state::{StateReader, StateReaderExt, StateWriter, StateWriterExt};
use shared_types::levels::DEFAULT_ALLOWED_MODES;
use shared_types::{
    ErrorCode, ErrorCodeType, Namespace, Node, ReferenceGroup, Request, Service, ServiceApproval,
    ServiceDestination,
};

/// Read access to every entity kind.
pub trait EntityReader: StateReader {
    // ---- nodes ----

    fn node(&self, node_id: &str) -> Result<Option<Node>, StoreError> {
        self.get_entity(&keys::node(node_id))
    }

    fn node_exists(&self, node_id: &str) -> Result<bool, StoreError> {
        self.contains(&keys::node(node_id))
    }

    /// All nodes in id order.
    fn nodes(&self) -> Result<Vec<Node>, StoreError> {
        self.scan_entities(keys::NODE_PREFIX.as_bytes())
    }

    fn ndid_node_id(&self) -> Result<Option<String>, StoreError> {
        self.get_entity(keys::NDID_NODE_ID)
    }

    // ---- namespaces ----

    fn namespace(&self, namespace: &str) -> Result<Option<Namespace>, StoreError> {
        self.get_entity(&keys::namespace(namespace))
    }

    fn namespaces(&self) -> Result<Vec<Namespace>, StoreError> {
        self.scan_entities(keys::NAMESPACE_PREFIX.as_bytes())
    }

    // ---- reference groups ----

    fn reference_group(&self, code: &str) -> Result<Option<ReferenceGroup>, StoreError> {
        self.get_entity(&keys::reference_group(code))
    }

    fn reference_group_code_by_identity(
        &self,
        namespace: &str,
        identifier_hash: &str,
    ) -> Result<Option<String>, StoreError> {
        self.get_entity(&keys::identity_index(namespace, identifier_hash))
    }

    fn reference_group_code_by_accessor(
        &self,
        accessor_id: &str,
    ) -> Result<Option<String>, StoreError> {
        self.get_entity(&keys::accessor_index(accessor_id))
    }

    // ---- requests ----

    fn request(&self, request_id: &str) -> Result<Option<Request>, StoreError> {
        self.get_entity(&keys::request(request_id))
    }

    fn request_exists(&self, request_id: &str) -> Result<bool, StoreError> {
        self.contains(&keys::request(request_id))
    }

    // ---- services ----

    fn service(&self, service_id: &str) -> Result<Option<Service>, StoreError> {
        self.get_entity(&keys::service(service_id))
    }

    fn services(&self) -> Result<Vec<Service>, StoreError> {
        self.scan_entities(keys::SERVICE_PREFIX.as_bytes())
    }

    fn service_approval(
        &self,
        service_id: &str,
        node_id: &str,
    ) -> Result<Option<ServiceApproval>, StoreError> {
        self.get_entity(&keys::approval(service_id, node_id))
    }

    fn service_destination(
        &self,
        service_id: &str,
        node_id: &str,
    ) -> Result<Option<ServiceDestination>, StoreError> {
        self.get_entity(&keys::destination(service_id, node_id))
    }

    /// Destinations of one service, in AS id order.
    fn service_destinations(&self, service_id: &str) -> Result<Vec<ServiceDestination>, StoreError> {
        self.scan_entities(&keys::destinations_of(service_id))
    }

    /// Every destination of every service, in service id order.
    fn all_service_destinations(&self) -> Result<Vec<ServiceDestination>, StoreError> {
        let mut all: Vec<ServiceDestination> =
            self.scan_entities(keys::DESTINATION_PREFIX.as_bytes())?;
        all.sort_by(|a, b| (&a.service_id, &a.node_id).cmp(&(&b.service_id, &b.node_id)));
        Ok(all)
    }

    // ---- error codes ----

    fn error_code(
        &self,
        error_type: ErrorCodeType,
        code: i32,
    ) -> Result<Option<ErrorCode>, StoreError> {
        self.get_entity(&keys::error_code(error_type, code))
    }

    /// Codes of one type, in numeric order.
    fn error_codes(&self, error_type: ErrorCodeType) -> Result<Vec<ErrorCode>, StoreError> {
        let mut codes: Vec<ErrorCode> = self.scan_entities(&keys::error_codes_of(error_type))?;
        codes.sort_by_key(|c| c.error_code);
        Ok(codes)
    }

    // ---- governance ----

    /// Allowed modes for `purpose`, `[1,2,3]` when unset.
    fn allowed_mode_list(&self, purpose: &str) -> Result<Vec<u8>, StoreError> {
        Ok(self
            .get_entity(&keys::allowed_mode_list(purpose))?
            .unwrap_or_else(|| DEFAULT_ALLOWED_MODES.to_vec()))
    }

    /// Minimum IAL for the first IdP of a new reference group (default 0).
    fn allowed_min_ial_for_first_idp(&self) -> Result<f64, StoreError> {
        Ok(self.get_entity(keys::ALLOWED_MIN_IAL)?.unwrap_or(0.0))
    }

    /// Last block the chain accepts transactions at, -1 = unlimited.
    fn last_block(&self) -> Result<i64, StoreError> {
        Ok(self.get_entity(keys::LAST_BLOCK)?.unwrap_or(-1))
    }
}

impl<R: StateReader + ?Sized> EntityReader for R {}

/// Staged writes for every entity kind.
pub trait EntityWriter: StateWriter {
    fn put_node(&mut self, node: &Node) -> Result<(), StoreError> {
        self.put_entity(keys::node(&node.node_id), node)
    }

    fn set_ndid_node_id(&mut self, node_id: &str) -> Result<(), StoreError> {
        self.put_entity(keys::NDID_NODE_ID.to_vec(), &node_id.to_string())
    }

    fn put_namespace(&mut self, namespace: &Namespace) -> Result<(), StoreError> {
        self.put_entity(keys::namespace(&namespace.namespace), namespace)
    }

    fn put_reference_group(&mut self, group: &ReferenceGroup) -> Result<(), StoreError> {
        self.put_entity(keys::reference_group(&group.reference_group_code), group)
    }

    fn index_identity(
        &mut self,
        namespace: &str,
        identifier_hash: &str,
        code: &str,
    ) -> Result<(), StoreError> {
        self.put_entity(
            keys::identity_index(namespace, identifier_hash),
            &code.to_string(),
        )
    }

    fn index_accessor(&mut self, accessor_id: &str, code: &str) -> Result<(), StoreError> {
        self.put_entity(keys::accessor_index(accessor_id), &code.to_string())
    }

    fn put_request(&mut self, request: &Request) -> Result<(), StoreError> {
        self.put_entity(keys::request(&request.request_id), request)
    }

    fn put_service(&mut self, service: &Service) -> Result<(), StoreError> {
        self.put_entity(keys::service(&service.service_id), service)
    }

    fn put_service_approval(&mut self, approval: &ServiceApproval) -> Result<(), StoreError> {
        self.put_entity(
            keys::approval(&approval.service_id, &approval.node_id),
            approval,
        )
    }

    fn put_service_destination(
        &mut self,
        destination: &ServiceDestination,
    ) -> Result<(), StoreError> {
        self.put_entity(
            keys::destination(&destination.service_id, &destination.node_id),
            destination,
        )
    }

    fn put_error_code(&mut self, code: &ErrorCode) -> Result<(), StoreError> {
        self.put_entity(keys::error_code(code.error_type, code.error_code), code)
    }

    fn delete_error_code(&mut self, error_type: ErrorCodeType, code: i32) {
        self.delete_raw(keys::error_code(error_type, code));
    }

    fn set_allowed_mode_list(&mut self, purpose: &str, modes: &[u8]) -> Result<(), StoreError> {
        self.put_entity(keys::allowed_mode_list(purpose), &modes.to_vec())
    }

    fn set_allowed_min_ial_for_first_idp(&mut self, min_ial: f64) -> Result<(), StoreError> {
        self.put_entity(keys::ALLOWED_MIN_IAL.to_vec(), &min_ial)
    }

    fn set_last_block(&mut self, height: i64) -> Result<(), StoreError> {
        self.put_entity(keys::LAST_BLOCK.to_vec(), &height)
    }
}

impl<W: StateWriter + ?Sized> EntityWriter for W {}
