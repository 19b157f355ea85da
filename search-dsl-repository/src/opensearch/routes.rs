//! OpenSearch route builders.
//!
//! This module translates request objects into HTTP routes (method, path,
//! query parameters and body). Translation is pure so it can be tested
//! without a server.
//!
//! Operations OpenSearch only offers as query types are mapped onto `_search`:
//! - suggest → `suggest` section with `size: 0`
//! - percolate → `percolate` query
//! - more-like-this → `more_like_this` query

use serde_json::{json, Map, Value};
use url::Url;

use crate::errors::SearchError;
use search_dsl_shared::{
    ActionRequest, BulkItem, BulkRequest, ClearScrollRequest, CountRequest, DeleteByQueryRequest,
    DeleteIndexedScriptRequest, DeleteRequest, ExplainRequest, GetIndexedScriptRequest,
    GetRequest, IndexRequest, MoreLikeThisRequest, MultiGetRequest, MultiPercolateRequest,
    MultiSearchRequest, MultiTermVectorRequest, OpType, PercolateRequest, PutIndexedScriptRequest,
    SearchRequest, SearchScrollRequest, SuggestRequest, TermVectorRequest, UpdateRequest,
};

/// Base used only to percent-encode path segments.
const PATH_BASE: &str = "http://localhost/";

/// Percolator field used when a percolate request names none.
const DEFAULT_PERCOLATOR_FIELD: &str = "query";

/// Script language used when a stored script names none.
const DEFAULT_SCRIPT_LANG: &str = "painless";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RouteBody {
    Empty,
    Json(Value),
    /// Newline-delimited JSON (bulk, msearch).
    NdJson(Vec<Value>),
}

/// A fully resolved HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub params: Vec<(&'static str, String)>,
    pub body: RouteBody,
}

impl Route {
    fn new(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            params: Vec::new(),
            body: RouteBody::Empty,
        }
    }

    fn param(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.params.push((key, value.to_string()));
        }
        self
    }

    fn list_param(self, key: &'static str, values: &[String]) -> Self {
        let joined = (!values.is_empty()).then(|| values.join(","));
        self.param(key, joined)
    }

    fn json(mut self, body: Value) -> Self {
        self.body = RouteBody::Json(body);
        self
    }

    fn nd_json(mut self, lines: Vec<Value>) -> Self {
        self.body = RouteBody::NdJson(lines);
        self
    }
}

/// Non-empty text value of an optional field.
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn required<'a>(
    value: &'a Option<String>,
    request: &str,
    field: &str,
) -> Result<&'a str, SearchError> {
    text(value).ok_or_else(|| SearchError::missing_field(request, field))
}

fn require_non_empty(values: &[String], request: &str, field: &str) -> Result<(), SearchError> {
    if values.is_empty() {
        return Err(SearchError::missing_field(request, field));
    }
    Ok(())
}

/// Join percent-encoded path segments.
fn encode_path(segments: &[&str]) -> Result<String, SearchError> {
    let mut url = Url::parse(PATH_BASE).map_err(|e| SearchError::invalid_request(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SearchError::invalid_request("cannot build request path"))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

/// Path for a single-document endpoint.
///
/// Legacy typed paths put the endpoint after the id
/// (`/{index}/{type}/{id}/_update`); typeless paths put it before
/// (`/{index}/_update/{id}`). `_doc` is the plain document endpoint.
fn document_path(
    index: &str,
    doc_type: Option<&str>,
    endpoint: &str,
    id: &str,
) -> Result<String, SearchError> {
    match doc_type {
        Some(doc_type) if endpoint == "_doc" => encode_path(&[index, doc_type, id]),
        Some(doc_type) => encode_path(&[index, doc_type, id, endpoint]),
        None => encode_path(&[index, endpoint, id]),
    }
}

/// Path for a multi-index endpoint such as `_search` or `_count`.
fn indices_path(
    indices: &[String],
    types: &[String],
    endpoint: &str,
) -> Result<String, SearchError> {
    let indices = indices.join(",");
    let types = types.join(",");
    match (indices.is_empty(), types.is_empty()) {
        (true, true) => encode_path(&[endpoint]),
        (false, true) => encode_path(&[&indices, endpoint]),
        (true, false) => encode_path(&["_all", &types, endpoint]),
        (false, false) => encode_path(&[&indices, &types, endpoint]),
    }
}

/// Insert `value` under `key` when present.
fn put(map: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

/// Combine a generated query with an optional caller query as a filter.
fn with_filter(query: Value, filter: Option<Value>) -> Value {
    match filter {
        Some(filter) => json!({ "bool": { "must": [query], "filter": [filter] } }),
        None => query,
    }
}

pub(crate) fn index(request: &IndexRequest) -> Result<Route, SearchError> {
    let index = required(&request.index, IndexRequest::NAME, "index")?;
    let source = request
        .source
        .clone()
        .ok_or_else(|| SearchError::missing_field(IndexRequest::NAME, "source"))?;

    let doc_type = text(&request.doc_type);
    let route = match text(&request.id) {
        Some(id) => Route::new(HttpMethod::Put, document_path(index, doc_type, "_doc", id)?),
        None => Route::new(
            HttpMethod::Post,
            encode_path(&[index, doc_type.unwrap_or("_doc")])?,
        ),
    };

    Ok(route
        .param("routing", text(&request.routing))
        .param("parent", text(&request.parent))
        .param("op_type", request.op_type.map(|op| op.as_str()))
        .param("version", request.version)
        .param("refresh", request.refresh)
        .param("timeout", text(&request.timeout))
        .json(source))
}

fn update_body(request: &UpdateRequest) -> Result<Value, SearchError> {
    let mut body = Map::new();

    if let Some(source) = text(&request.script) {
        let mut script = Map::new();
        script.insert("source".to_string(), json!(source));
        put(&mut script, "lang", text(&request.script_lang));
        put(&mut script, "params", request.script_params.clone());
        body.insert("script".to_string(), Value::Object(script));
    }
    put(&mut body, "doc", request.doc.clone());
    put(&mut body, "upsert", request.upsert.clone());
    put(&mut body, "doc_as_upsert", request.doc_as_upsert);

    if !body.contains_key("script") && !body.contains_key("doc") {
        return Err(SearchError::invalid_request(
            "update request requires `script` or `doc`",
        ));
    }
    Ok(Value::Object(body))
}

pub(crate) fn update(request: &UpdateRequest) -> Result<Route, SearchError> {
    let index = required(&request.index, UpdateRequest::NAME, "index")?;
    let id = required(&request.id, UpdateRequest::NAME, "id")?;
    let path = document_path(index, text(&request.doc_type), "_update", id)?;

    Ok(Route::new(HttpMethod::Post, path)
        .param("routing", text(&request.routing))
        .param("parent", text(&request.parent))
        .param("retry_on_conflict", request.retry_on_conflict)
        .param("refresh", request.refresh)
        .param("timeout", text(&request.timeout))
        .json(update_body(request)?))
}

pub(crate) fn delete(request: &DeleteRequest) -> Result<Route, SearchError> {
    let index = required(&request.index, DeleteRequest::NAME, "index")?;
    let id = required(&request.id, DeleteRequest::NAME, "id")?;
    let path = document_path(index, text(&request.doc_type), "_doc", id)?;

    Ok(Route::new(HttpMethod::Delete, path)
        .param("routing", text(&request.routing))
        .param("parent", text(&request.parent))
        .param("version", request.version)
        .param("refresh", request.refresh)
        .param("timeout", text(&request.timeout)))
}

/// Action metadata for one bulk item.
fn bulk_meta(
    request: &str,
    index: &Option<String>,
    doc_type: &Option<String>,
    id: &Option<String>,
    routing: &Option<String>,
    parent: &Option<String>,
) -> Result<Map<String, Value>, SearchError> {
    let mut meta = Map::new();
    meta.insert(
        "_index".to_string(),
        json!(required(index, request, "index")?),
    );
    put(&mut meta, "_type", text(doc_type));
    put(&mut meta, "_id", text(id));
    put(&mut meta, "routing", text(routing));
    put(&mut meta, "parent", text(parent));
    Ok(meta)
}

fn bulk_line(action: &str, meta: Map<String, Value>) -> Value {
    let mut line = Map::new();
    line.insert(action.to_string(), Value::Object(meta));
    Value::Object(line)
}

pub(crate) fn bulk(request: &BulkRequest) -> Result<Route, SearchError> {
    if request.is_empty() {
        return Err(SearchError::invalid_request("bulk request has no operations"));
    }

    let mut lines = Vec::with_capacity(request.len() * 2);
    for item in &request.requests {
        match item {
            BulkItem::Index(r) => {
                let action = match r.op_type {
                    Some(OpType::Create) => "create",
                    _ => "index",
                };
                let mut meta = bulk_meta(
                    IndexRequest::NAME,
                    &r.index,
                    &r.doc_type,
                    &r.id,
                    &r.routing,
                    &r.parent,
                )?;
                put(&mut meta, "version", r.version);
                lines.push(bulk_line(action, meta));
                lines.push(
                    r.source
                        .clone()
                        .ok_or_else(|| SearchError::missing_field(IndexRequest::NAME, "source"))?,
                );
            }
            BulkItem::Update(r) => {
                required(&r.id, UpdateRequest::NAME, "id")?;
                let mut meta = bulk_meta(
                    UpdateRequest::NAME,
                    &r.index,
                    &r.doc_type,
                    &r.id,
                    &r.routing,
                    &r.parent,
                )?;
                put(&mut meta, "retry_on_conflict", r.retry_on_conflict);
                lines.push(bulk_line("update", meta));
                lines.push(update_body(r)?);
            }
            BulkItem::Delete(r) => {
                required(&r.id, DeleteRequest::NAME, "id")?;
                let mut meta = bulk_meta(
                    DeleteRequest::NAME,
                    &r.index,
                    &r.doc_type,
                    &r.id,
                    &r.routing,
                    &r.parent,
                )?;
                put(&mut meta, "version", r.version);
                lines.push(bulk_line("delete", meta));
            }
        }
    }

    Ok(Route::new(HttpMethod::Post, encode_path(&["_bulk"])?)
        .param("refresh", request.refresh)
        .param("timeout", text(&request.timeout))
        .nd_json(lines))
}

pub(crate) fn delete_by_query(request: &DeleteByQueryRequest) -> Result<Route, SearchError> {
    require_non_empty(&request.indices, DeleteByQueryRequest::NAME, "indices")?;
    let source = request
        .source
        .clone()
        .ok_or_else(|| SearchError::missing_field(DeleteByQueryRequest::NAME, "source"))?;
    let path = indices_path(&request.indices, &request.types, "_delete_by_query")?;

    Ok(Route::new(HttpMethod::Post, path)
        .param("routing", text(&request.routing))
        .param("timeout", text(&request.timeout))
        .json(source))
}

pub(crate) fn get(request: &GetRequest) -> Result<Route, SearchError> {
    let index = required(&request.index, GetRequest::NAME, "index")?;
    let id = required(&request.id, GetRequest::NAME, "id")?;
    let path = document_path(index, text(&request.doc_type), "_doc", id)?;

    Ok(Route::new(HttpMethod::Get, path)
        .param("routing", text(&request.routing))
        .param("preference", text(&request.preference))
        .param("realtime", request.realtime)
        .param("refresh", request.refresh)
        .list_param("_source", &request.fields))
}

pub(crate) fn multi_get(request: &MultiGetRequest) -> Result<Route, SearchError> {
    if request.items.is_empty() {
        return Err(SearchError::invalid_request("multi_get request has no items"));
    }

    let docs = request
        .items
        .iter()
        .map(|item| {
            let mut doc = Map::new();
            let index = required(&item.index, "multi_get item", "index")?;
            doc.insert("_index".to_string(), json!(index));
            put(&mut doc, "_type", text(&item.doc_type));
            doc.insert("_id".to_string(), json!(required(&item.id, "multi_get item", "id")?));
            put(&mut doc, "routing", text(&item.routing));
            if !item.fields.is_empty() {
                doc.insert("_source".to_string(), json!(item.fields));
            }
            Ok(Value::Object(doc))
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    Ok(Route::new(HttpMethod::Post, encode_path(&["_mget"])?)
        .param("preference", text(&request.preference))
        .param("realtime", request.realtime)
        .param("refresh", request.refresh)
        .json(json!({ "docs": docs })))
}

pub(crate) fn suggest(request: &SuggestRequest) -> Result<Route, SearchError> {
    let suggest = request
        .source
        .clone()
        .ok_or_else(|| SearchError::missing_field(SuggestRequest::NAME, "source"))?;
    let path = indices_path(&request.indices, &[], "_search")?;

    Ok(Route::new(HttpMethod::Post, path)
        .param("routing", text(&request.routing))
        .param("preference", text(&request.preference))
        .json(json!({ "size": 0, "suggest": suggest })))
}

pub(crate) fn search(request: &SearchRequest) -> Result<Route, SearchError> {
    let path = indices_path(&request.indices, &request.types, "_search")?;

    Ok(Route::new(HttpMethod::Post, path)
        .param("routing", text(&request.routing))
        .param("preference", text(&request.preference))
        .param("search_type", text(&request.search_type))
        .param("scroll", text(&request.scroll))
        .json(request.source.clone().unwrap_or_else(|| json!({}))))
}

/// Header line of one `_msearch` entry.
fn msearch_header(
    indices: &[String],
    types: &[String],
    routing: &Option<String>,
    preference: &Option<String>,
    search_type: &Option<String>,
) -> Value {
    let mut header = Map::new();
    if !indices.is_empty() {
        header.insert("index".to_string(), json!(indices));
    }
    if !types.is_empty() {
        header.insert("type".to_string(), json!(types));
    }
    put(&mut header, "routing", text(routing));
    put(&mut header, "preference", text(preference));
    put(&mut header, "search_type", text(search_type));
    Value::Object(header)
}

pub(crate) fn multi_search(request: &MultiSearchRequest) -> Result<Route, SearchError> {
    if request.requests.is_empty() {
        return Err(SearchError::invalid_request("multi_search request has no searches"));
    }

    let lines = request
        .requests
        .iter()
        .flat_map(|r| {
            [
                msearch_header(
                    &r.indices,
                    &r.types,
                    &r.routing,
                    &r.preference,
                    &r.search_type,
                ),
                r.source.clone().unwrap_or_else(|| json!({})),
            ]
        })
        .collect();

    Ok(Route::new(HttpMethod::Post, encode_path(&["_msearch"])?).nd_json(lines))
}

pub(crate) fn count(request: &CountRequest) -> Result<Route, SearchError> {
    let path = indices_path(&request.indices, &request.types, "_count")?;
    let route = Route::new(HttpMethod::Post, path)
        .param("routing", text(&request.routing))
        .param("preference", text(&request.preference))
        .param("min_score", request.min_score);

    Ok(match &request.source {
        Some(source) => route.json(source.clone()),
        None => route,
    })
}

pub(crate) fn search_scroll(request: &SearchScrollRequest) -> Result<Route, SearchError> {
    let scroll_id = required(&request.scroll_id, SearchScrollRequest::NAME, "scroll_id")?;
    let mut body = Map::new();
    put(&mut body, "scroll", text(&request.scroll));
    body.insert("scroll_id".to_string(), json!(scroll_id));

    Ok(Route::new(HttpMethod::Post, encode_path(&["_search", "scroll"])?).json(Value::Object(body)))
}

pub(crate) fn clear_scroll(request: &ClearScrollRequest) -> Result<Route, SearchError> {
    if request.scroll_ids.is_empty() {
        return Err(SearchError::missing_field(ClearScrollRequest::NAME, "scroll_ids"));
    }

    Ok(Route::new(HttpMethod::Delete, encode_path(&["_search", "scroll"])?)
        .json(json!({ "scroll_id": request.scroll_ids })))
}

pub(crate) fn term_vector(request: &TermVectorRequest) -> Result<Route, SearchError> {
    let index = required(&request.index, TermVectorRequest::NAME, "index")?;
    let id = required(&request.id, TermVectorRequest::NAME, "id")?;
    let path = document_path(index, text(&request.doc_type), "_termvectors", id)?;

    Ok(Route::new(HttpMethod::Get, path)
        .list_param("fields", &request.fields)
        .param("offsets", request.offsets)
        .param("positions", request.positions)
        .param("payloads", request.payloads)
        .param("term_statistics", request.term_statistics)
        .param("field_statistics", request.field_statistics)
        .param("routing", text(&request.routing))
        .param("preference", text(&request.preference)))
}

pub(crate) fn multi_term_vector(request: &MultiTermVectorRequest) -> Result<Route, SearchError> {
    if request.requests.is_empty() {
        return Err(SearchError::invalid_request("multi_term_vector request has no documents"));
    }

    let docs = request
        .requests
        .iter()
        .map(|r| {
            let mut doc = Map::new();
            let index = required(&r.index, TermVectorRequest::NAME, "index")?;
            doc.insert("_index".to_string(), json!(index));
            put(&mut doc, "_type", text(&r.doc_type));
            doc.insert("_id".to_string(), json!(required(&r.id, TermVectorRequest::NAME, "id")?));
            if !r.fields.is_empty() {
                doc.insert("fields".to_string(), json!(r.fields));
            }
            put(&mut doc, "offsets", r.offsets);
            put(&mut doc, "positions", r.positions);
            put(&mut doc, "payloads", r.payloads);
            put(&mut doc, "term_statistics", r.term_statistics);
            put(&mut doc, "field_statistics", r.field_statistics);
            put(&mut doc, "routing", text(&r.routing));
            Ok(Value::Object(doc))
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    Ok(Route::new(HttpMethod::Post, encode_path(&["_mtermvectors"])?).json(json!({ "docs": docs })))
}

/// Search body equivalent to a percolate request.
///
/// `source.doc` is the document to match; an optional `source.query`
/// narrows the stored queries considered. A request type becomes the
/// query's `document_type`.
fn percolate_body(request: &PercolateRequest) -> Result<Value, SearchError> {
    let source = request
        .source
        .as_ref()
        .ok_or_else(|| SearchError::missing_field(PercolateRequest::NAME, "source"))?;
    let document = source
        .get("doc")
        .cloned()
        .ok_or_else(|| SearchError::missing_field(PercolateRequest::NAME, "source.doc"))?;

    let field = text(&request.field).unwrap_or(DEFAULT_PERCOLATOR_FIELD);
    let mut percolate = Map::new();
    percolate.insert("field".to_string(), json!(field));
    put(&mut percolate, "document_type", text(&request.doc_type));
    percolate.insert("document".to_string(), document);
    let percolate = json!({ "percolate": percolate });

    let mut body = Map::new();
    body.insert(
        "query".to_string(),
        with_filter(percolate, source.get("query").cloned()),
    );
    if request.only_count == Some(true) {
        body.insert("size".to_string(), json!(0));
    } else {
        put(&mut body, "size", source.get("size").cloned());
    }
    Ok(Value::Object(body))
}

pub(crate) fn percolate(request: &PercolateRequest) -> Result<Route, SearchError> {
    let path = indices_path(&request.indices, &[], "_search")?;

    Ok(Route::new(HttpMethod::Post, path)
        .param("routing", text(&request.routing))
        .param("preference", text(&request.preference))
        .json(percolate_body(request)?))
}

pub(crate) fn multi_percolate(request: &MultiPercolateRequest) -> Result<Route, SearchError> {
    if request.requests.is_empty() {
        return Err(SearchError::invalid_request("multi_percolate request has no percolations"));
    }

    let mut lines = Vec::with_capacity(request.requests.len() * 2);
    for r in &request.requests {
        lines.push(msearch_header(&r.indices, &[], &r.routing, &r.preference, &None));
        lines.push(percolate_body(r)?);
    }

    Ok(Route::new(HttpMethod::Post, encode_path(&["_msearch"])?).nd_json(lines))
}

pub(crate) fn explain(request: &ExplainRequest) -> Result<Route, SearchError> {
    let index = required(&request.index, ExplainRequest::NAME, "index")?;
    let id = required(&request.id, ExplainRequest::NAME, "id")?;
    let source = request
        .source
        .clone()
        .ok_or_else(|| SearchError::missing_field(ExplainRequest::NAME, "source"))?;
    let path = document_path(index, text(&request.doc_type), "_explain", id)?;

    Ok(Route::new(HttpMethod::Post, path)
        .param("routing", text(&request.routing))
        .param("preference", text(&request.preference))
        .list_param("_source", &request.fields)
        .json(source))
}

pub(crate) fn put_indexed_script(request: &PutIndexedScriptRequest) -> Result<Route, SearchError> {
    let id = required(&request.id, PutIndexedScriptRequest::NAME, "id")?;
    let source = request
        .source
        .clone()
        .ok_or_else(|| SearchError::missing_field(PutIndexedScriptRequest::NAME, "source"))?;
    let lang = text(&request.lang).unwrap_or(DEFAULT_SCRIPT_LANG);

    let wrapped = matches!(&source, Value::Object(map) if map.contains_key("script"));
    let body = if wrapped {
        source
    } else {
        json!({ "script": { "lang": lang, "source": source } })
    };

    Ok(Route::new(HttpMethod::Put, encode_path(&["_scripts", id])?).json(body))
}

pub(crate) fn get_indexed_script(request: &GetIndexedScriptRequest) -> Result<Route, SearchError> {
    let id = required(&request.id, GetIndexedScriptRequest::NAME, "id")?;
    Ok(Route::new(HttpMethod::Get, encode_path(&["_scripts", id])?))
}

pub(crate) fn delete_indexed_script(
    request: &DeleteIndexedScriptRequest,
) -> Result<Route, SearchError> {
    let id = required(&request.id, DeleteIndexedScriptRequest::NAME, "id")?;
    Ok(Route::new(HttpMethod::Delete, encode_path(&["_scripts", id])?))
}

pub(crate) fn more_like_this(request: &MoreLikeThisRequest) -> Result<Route, SearchError> {
    if request.index.is_empty() {
        return Err(SearchError::missing_field(MoreLikeThisRequest::NAME, "index"));
    }
    let id = required(&request.id, MoreLikeThisRequest::NAME, "id")?;

    let mut like = Map::new();
    like.insert("_index".to_string(), json!(request.index));
    put(&mut like, "_type", text(&request.doc_type));
    like.insert("_id".to_string(), json!(id));
    put(&mut like, "routing", text(&request.routing));

    let mut mlt = Map::new();
    if !request.fields.is_empty() {
        mlt.insert("fields".to_string(), json!(request.fields));
    }
    mlt.insert("like".to_string(), json!([like]));
    put(&mut mlt, "min_term_freq", request.min_term_freq);
    put(&mut mlt, "min_doc_freq", request.min_doc_freq);
    put(&mut mlt, "max_query_terms", request.max_query_terms);
    if !request.stop_words.is_empty() {
        mlt.insert("stop_words".to_string(), json!(request.stop_words));
    }

    let mut body = match request.search_source.clone() {
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(SearchError::invalid_request(
                "more_like_this `search_source` must be an object",
            ))
        }
        None => Map::new(),
    };
    let caller_query = body.remove("query");
    body.insert(
        "query".to_string(),
        with_filter(json!({ "more_like_this": mlt }), caller_query),
    );
    put(&mut body, "size", request.search_size);
    put(&mut body, "from", request.search_from);

    let indices = if request.search_indices.is_empty() {
        vec![request.index.clone()]
    } else {
        request.search_indices.clone()
    };
    let path = indices_path(&indices, &request.search_types, "_search")?;

    Ok(Route::new(HttpMethod::Post, path).json(Value::Object(body)))
}
