//! Service, destination and error-code projections.

use super::nodes::proxy_view;
use super::{answer, answer_list, QueryError};
use crate::domain::{
    AsIdQuery, AsNodeInfoView, AsNodeView, AsNodesInfoQuery, AsNodesInfoView, AsNodesView,
    AsServiceView, AsServicesView, ErrorCodeListQuery, ErrorCodeView, ServiceDetailView,
    ServiceIdQuery, ServiceSummaryView,
};
use il_01_entity_store::{EntityReader, StateReader};
use il_03_node_registry::{effective_key, effective_mq_addresses, KeyKind};
use il_06_service_registry::visible_destinations;
use shared_types::{ErrorCodeType, LedgerError, QueryOutcome};

/// AS nodes currently offering the service: destination active and not
/// suspended, service active, AS active.
pub(super) fn as_nodes<R: StateReader + ?Sized>(
    reader: &R,
    query: &ServiceIdQuery,
) -> Result<QueryOutcome, QueryError> {
    let mut node = Vec::new();
    for destination in visible_destinations(reader, &query.service_id)? {
        let Some(as_node) = reader.node(&destination.node_id)? else {
            continue;
        };
        node.push(AsNodeView {
            node_id: destination.node_id,
            node_name: as_node.node_name,
            min_ial: destination.min_ial,
            min_aal: destination.min_aal,
            supported_namespace_list: destination.supported_namespace_list,
        });
    }
    answer((!node.is_empty()).then_some(AsNodesView { node }))
}

pub(super) fn as_nodes_info<R: StateReader + ?Sized>(
    reader: &R,
    query: &AsNodesInfoQuery,
) -> Result<QueryOutcome, QueryError> {
    let mut node = Vec::new();
    for destination in visible_destinations(reader, &query.service_id)? {
        if !query.node_id_list.is_empty() && !query.node_id_list.contains(&destination.node_id) {
            continue;
        }
        let Some(as_node) = reader.node(&destination.node_id)? else {
            continue;
        };
        let key = effective_key(reader, &as_node, KeyKind::Signing)?;
        let proxy = proxy_view(reader, &as_node)?;
        node.push(AsNodeInfoView {
            mq: effective_mq_addresses(reader, &as_node)?,
            node_id: destination.node_id,
            name: as_node.node_name,
            min_ial: destination.min_ial,
            min_aal: destination.min_aal,
            supported_namespace_list: destination.supported_namespace_list,
            public_key: key.public_key,
            algorithm: key.signing_algorithm.as_str().to_string(),
            proxy,
        });
    }
    let view = (!node.is_empty()).then(|| AsNodesInfoView {
        service_id: query.service_id.clone(),
        node,
    });
    answer(view)
}

/// Every destination the AS registered, whatever its state.
pub(super) fn services_by_as<R: StateReader + ?Sized>(
    reader: &R,
    query: &AsIdQuery,
) -> Result<QueryOutcome, QueryError> {
    let services: Vec<AsServiceView> = reader
        .all_service_destinations()?
        .iter()
        .filter(|d| d.node_id == query.as_id)
        .map(AsServiceView::from)
        .collect();
    answer((!services.is_empty()).then_some(AsServicesView { services }))
}

pub(super) fn service_detail<R: StateReader + ?Sized>(
    reader: &R,
    query: &ServiceIdQuery,
) -> Result<QueryOutcome, QueryError> {
    answer(reader.service(&query.service_id)?.map(ServiceDetailView::from))
}

pub(super) fn service_list<R: StateReader + ?Sized>(reader: &R) -> Result<QueryOutcome, QueryError> {
    let services: Vec<ServiceSummaryView> = reader
        .services()?
        .into_iter()
        .map(|s| ServiceSummaryView {
            service_id: s.service_id,
            service_name: s.service_name,
            active: s.active,
        })
        .collect();
    answer_list(services)
}

pub(super) fn error_code_list<R: StateReader + ?Sized>(
    reader: &R,
    query: &ErrorCodeListQuery,
) -> Result<QueryOutcome, QueryError> {
    let error_type: ErrorCodeType = query
        .error_type
        .parse()
        .map_err(|()| LedgerError::InvalidErrorCodeType)?;
    let codes: Vec<ErrorCodeView> = reader
        .error_codes(error_type)?
        .into_iter()
        .map(ErrorCodeView::from)
        .collect();
    answer_list(codes)
}
