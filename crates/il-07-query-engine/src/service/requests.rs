//! Request projections. Time-outs are evaluated at the committed height.

use super::{answer, QueryError};
use crate::domain::{
    ChainInfo, DataSignatureQuery, DataSignatureView, RequestDetailView, RequestQuery, RequestView,
};
use il_01_entity_store::{EntityReader, StateReader};
use shared_types::QueryOutcome;

pub(super) fn request<R: StateReader + ?Sized>(
    reader: &R,
    chain: &ChainInfo,
    query: &RequestQuery,
) -> Result<QueryOutcome, QueryError> {
    let view = reader
        .request(&query.request_id)?
        .map(|r| RequestView::new(&r, chain.height));
    answer(view)
}

pub(super) fn request_detail<R: StateReader + ?Sized>(
    reader: &R,
    chain: &ChainInfo,
    query: &RequestQuery,
) -> Result<QueryOutcome, QueryError> {
    let view = reader
        .request(&query.request_id)?
        .map(|r| RequestDetailView::new(&r, chain.height));
    answer(view)
}

/// Signature an AS attached to its data for one service of a request.
pub(super) fn data_signature<R: StateReader + ?Sized>(
    reader: &R,
    query: &DataSignatureQuery,
) -> Result<QueryOutcome, QueryError> {
    let signature = reader.request(&query.request_id)?.and_then(|request| {
        request
            .data_request(&query.service_id)?
            .response_list
            .iter()
            .find(|r| r.as_id == query.node_id && !r.signature.is_empty())
            .map(|r| DataSignatureView {
                signature: r.signature.clone(),
            })
    });
    answer(signature)
}
