//! HTTP handlers: one per external command, plus one GET per read model.
//! Handlers perform request/response marshalling only — every status
//! discrimination happens inside [`Engine`]; a handler never rejects a
//! well-formed request for business reasons.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::inventory::{
    AddCustomerItemStatus, AssignTaskStatus, AuditLogResult, CheckoutCustomerStatus,
    ConfirmReceivingOrderStatus, ConfirmTaskStatus, CreateReceivingOrderStatus, DashboardRow,
    DeleteRuleTemplateStatus, FlowTimelineResult, ForceZoneSweepStatus, IngestRfidReadStatus,
    IngestSalesEventStatus, MasterDataStatus, ReceivingListResult, RemoveCustomerItemStatus,
    StaffCrudStatus, StartTaskStatus, TaskListFilter, TaskListResult, UpsertRuleTemplateStatus,
    ZoneCrudStatus, ZoneDetail,
};
use shared::models::{
    Antenna, CatalogVariant, LocationCreate, LocationUpdate, RuleTemplateUpsert, Sku, StaffMember,
    StaffUpdate,
};

use crate::engine::Engine;
use crate::http::error_response::ApiResult;

pub type SharedEngine = Arc<Engine>;

pub fn router() -> Router<SharedEngine> {
    Router::new()
        .route("/health", get(health))
        // RFID / presence
        .route("/api/rfid/reads", post(ingest_rfid_read))
        .route("/api/zones/{id}/sweep", post(force_zone_sweep))
        // Sales
        .route("/api/sales", post(ingest_sales_event))
        // Customer cart
        .route(
            "/api/customers/{customer_id}/cart/items",
            post(add_customer_item),
        )
        .route("/api/cart/items/{item_id}", delete(remove_customer_item))
        .route(
            "/api/customers/{customer_id}/checkout",
            post(checkout_customer),
        )
        // Rule templates
        .route("/api/rule-templates", post(upsert_rule_template))
        .route(
            "/api/rule-templates/{id}",
            delete(delete_rule_template),
        )
        // Tasks
        .route("/api/tasks/{id}/assign", post(assign_task))
        .route("/api/tasks/{id}/start", post(start_task))
        .route("/api/tasks/{id}/confirm", post(confirm_task))
        .route("/api/tasks", get(list_tasks))
        // Receiving orders
        .route(
            "/api/receiving-orders",
            post(create_receiving_order).get(list_receiving_orders),
        )
        .route(
            "/api/receiving-orders/{id}/confirm",
            post(confirm_receiving_order),
        )
        // Master data mirrors
        .route("/api/antennas", post(register_antenna))
        .route("/api/skus", post(register_sku))
        .route("/api/catalog-variants", post(register_catalog_variant))
        .route("/api/epc-mappings", post(register_epc_mapping))
        // Master data CRUD
        .route("/api/zones", post(create_location))
        .route(
            "/api/zones/{id}",
            get(zone_detail).put(update_location).delete(delete_location),
        )
        .route("/api/staff", post(upsert_staff))
        .route("/api/staff/{id}", put(update_staff))
        // Read models
        .route("/api/dashboard", get(dashboard))
        .route("/api/audit-log", get(audit_log))
        .route("/api/flow-timeline", get(flow_timeline))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ---------------------------------------------------------------
// RFID / presence
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct IngestRfidReadRequest {
    epc: String,
    antenna_id: String,
    t: i64,
    #[serde(default)]
    rssi: Option<f64>,
}

async fn ingest_rfid_read(
    State(engine): State<SharedEngine>,
    Json(req): Json<IngestRfidReadRequest>,
) -> Json<IngestRfidReadStatus> {
    tracing::debug!(epc = %req.epc, antenna_id = %req.antenna_id, "ingest_rfid_read received");
    let status = engine.ingest_rfid_read(&req.epc, &req.antenna_id, req.t, req.rssi);
    tracing::info!(epc = %req.epc, ?status, "ingest_rfid_read processed");
    Json(status)
}

#[derive(Deserialize)]
struct SweepRequest {
    t: i64,
}

async fn force_zone_sweep(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(req): Json<SweepRequest>,
) -> Json<ForceZoneSweepStatus> {
    tracing::debug!(location_id = %id, "force_zone_sweep received");
    let status = engine.force_zone_sweep(&id, req.t);
    tracing::info!(location_id = %id, ?status, "force_zone_sweep processed");
    Json(status)
}

// ---------------------------------------------------------------
// Sales
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct IngestSalesEventRequest {
    location_id: String,
    sku_id: String,
    #[serde(default)]
    is_return: bool,
    qty: i64,
    t: i64,
}

async fn ingest_sales_event(
    State(engine): State<SharedEngine>,
    Json(req): Json<IngestSalesEventRequest>,
) -> Json<IngestSalesEventStatus> {
    tracing::debug!(sku_id = %req.sku_id, location_id = %req.location_id, "ingest_sales_event received");
    let status = engine.ingest_sales_event(&req.location_id, &req.sku_id, req.is_return, req.qty, req.t);
    tracing::info!(sku_id = %req.sku_id, ?status, "ingest_sales_event processed");
    Json(status)
}

// ---------------------------------------------------------------
// Customer cart
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct AddCustomerItemRequest {
    location_id: String,
    sku_id: String,
    qty: i64,
    t: i64,
}

async fn add_customer_item(
    State(engine): State<SharedEngine>,
    Path(customer_id): Path<String>,
    Json(req): Json<AddCustomerItemRequest>,
) -> Json<AddCustomerItemStatus> {
    let status = engine.add_customer_item(&customer_id, &req.location_id, &req.sku_id, req.qty, req.t);
    tracing::info!(customer_id = %customer_id, ?status, "add_customer_item processed");
    Json(status)
}

#[derive(Deserialize)]
struct RemoveCustomerItemRequest {
    t: i64,
}

async fn remove_customer_item(
    State(engine): State<SharedEngine>,
    Path(item_id): Path<String>,
    Json(req): Json<RemoveCustomerItemRequest>,
) -> Json<RemoveCustomerItemStatus> {
    let status = engine.remove_customer_item(&item_id, req.t);
    tracing::info!(item_id = %item_id, ?status, "remove_customer_item processed");
    Json(status)
}

#[derive(Deserialize)]
struct CheckoutCustomerRequest {
    t: i64,
}

async fn checkout_customer(
    State(engine): State<SharedEngine>,
    Path(customer_id): Path<String>,
    Json(req): Json<CheckoutCustomerRequest>,
) -> Json<CheckoutCustomerStatus> {
    let status = engine.checkout_customer(&customer_id, req.t);
    tracing::info!(customer_id = %customer_id, ?status, "checkout_customer processed");
    Json(status)
}

// ---------------------------------------------------------------
// Rule templates
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct RuleTemplateUpsertRequest {
    #[serde(flatten)]
    payload: RuleTemplateUpsert,
    t: i64,
}

async fn upsert_rule_template(
    State(engine): State<SharedEngine>,
    Json(req): Json<RuleTemplateUpsertRequest>,
) -> Json<UpsertRuleTemplateStatus> {
    let status = engine.upsert_rule_template(req.payload, req.t);
    tracing::info!(?status, "upsert_rule_template processed");
    Json(status)
}

#[derive(Deserialize)]
struct DeleteRuleTemplateRequest {
    t: i64,
}

async fn delete_rule_template(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(req): Json<DeleteRuleTemplateRequest>,
) -> Json<DeleteRuleTemplateStatus> {
    let status = engine.delete_rule_template(&id, req.t);
    tracing::info!(template_id = %id, ?status, "delete_rule_template processed");
    Json(status)
}

// ---------------------------------------------------------------
// Task state machine
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct AssignTaskRequest {
    staff_id: String,
    t: i64,
}

async fn assign_task(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(req): Json<AssignTaskRequest>,
) -> Json<AssignTaskStatus> {
    let status = engine.assign_task(&id, &req.staff_id, req.t);
    tracing::info!(task_id = %id, ?status, "assign_task processed");
    Json(status)
}

#[derive(Deserialize)]
struct StartTaskRequest {
    staff_id: String,
    t: i64,
}

async fn start_task(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(req): Json<StartTaskRequest>,
) -> Json<StartTaskStatus> {
    let status = engine.start_task(&id, &req.staff_id, req.t);
    tracing::info!(task_id = %id, ?status, "start_task processed");
    Json(status)
}

#[derive(Deserialize)]
struct ConfirmTaskRequest {
    confirmed_by: String,
    #[serde(default)]
    source_override: Option<String>,
    t: i64,
}

async fn confirm_task(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(req): Json<ConfirmTaskRequest>,
) -> Json<ConfirmTaskStatus> {
    let status = engine.confirm_task(&id, &req.confirmed_by, req.source_override.as_deref(), req.t);
    tracing::info!(task_id = %id, ?status, "confirm_task processed");
    Json(status)
}

async fn list_tasks(
    State(engine): State<SharedEngine>,
    Query(filter): Query<TaskListFilter>,
) -> Json<TaskListResult> {
    Json(engine.list_tasks(&filter))
}

// ---------------------------------------------------------------
// Receiving orders
// ---------------------------------------------------------------

#[derive(Deserialize)]
struct CreateReceivingOrderRequest {
    destination_location_id: String,
    source_location_id: String,
    sku_id: String,
    requested_qty: i64,
    t: i64,
}

async fn create_receiving_order(
    State(engine): State<SharedEngine>,
    Json(req): Json<CreateReceivingOrderRequest>,
) -> Json<CreateReceivingOrderStatus> {
    let status = engine.create_receiving_order(
        &req.destination_location_id,
        &req.source_location_id,
        &req.sku_id,
        req.requested_qty,
        req.t,
    );
    tracing::info!(?status, "create_receiving_order processed");
    Json(status)
}

#[derive(Deserialize)]
struct ConfirmReceivingOrderRequest {
    t: i64,
}

async fn confirm_receiving_order(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(req): Json<ConfirmReceivingOrderRequest>,
) -> Json<ConfirmReceivingOrderStatus> {
    let status = engine.confirm_receiving_order(&id, req.t);
    tracing::info!(order_id = %id, ?status, "confirm_receiving_order processed");
    Json(status)
}

async fn list_receiving_orders(State(engine): State<SharedEngine>) -> Json<ReceivingListResult> {
    Json(engine.list_receiving_orders())
}

// ---------------------------------------------------------------
// Master data mirrors
// ---------------------------------------------------------------

async fn register_antenna(
    State(engine): State<SharedEngine>,
    Json(antenna): Json<Antenna>,
) -> Json<MasterDataStatus> {
    Json(engine.register_antenna(antenna))
}

async fn register_sku(
    State(engine): State<SharedEngine>,
    Json(sku): Json<Sku>,
) -> Json<MasterDataStatus> {
    Json(engine.register_sku(sku))
}

async fn register_catalog_variant(
    State(engine): State<SharedEngine>,
    Json(variant): Json<CatalogVariant>,
) -> Json<MasterDataStatus> {
    Json(engine.register_catalog_variant(variant))
}

#[derive(Deserialize)]
struct RegisterEpcMappingRequest {
    epc: String,
    sku_id: String,
    t: i64,
}

async fn register_epc_mapping(
    State(engine): State<SharedEngine>,
    Json(req): Json<RegisterEpcMappingRequest>,
) -> Json<MasterDataStatus> {
    Json(engine.register_epc_mapping(&req.epc, &req.sku_id, req.t))
}

// ---------------------------------------------------------------
// Master data CRUD
// ---------------------------------------------------------------

async fn create_location(
    State(engine): State<SharedEngine>,
    Json(payload): Json<LocationCreate>,
) -> Json<ZoneCrudStatus> {
    let status = engine.create_location(payload);
    tracing::info!(?status, "create_location processed");
    Json(status)
}

async fn update_location(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(payload): Json<LocationUpdate>,
) -> Json<ZoneCrudStatus> {
    let status = engine.update_location(&id, payload);
    tracing::info!(location_id = %id, ?status, "update_location processed");
    Json(status)
}

#[derive(Deserialize)]
struct DeleteLocationRequest {
    t: i64,
}

async fn delete_location(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(req): Json<DeleteLocationRequest>,
) -> Json<ZoneCrudStatus> {
    let status = engine.delete_location(&id, req.t);
    tracing::info!(location_id = %id, ?status, "delete_location processed");
    Json(status)
}

async fn upsert_staff(
    State(engine): State<SharedEngine>,
    Json(member): Json<StaffMember>,
) -> Json<StaffCrudStatus> {
    let status = engine.upsert_staff(member);
    tracing::info!(?status, "upsert_staff processed");
    Json(status)
}

async fn update_staff(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> Json<StaffCrudStatus> {
    let status = engine.update_staff(&id, payload);
    tracing::info!(staff_id = %id, ?status, "update_staff processed");
    Json(status)
}

// ---------------------------------------------------------------
// Read models
// ---------------------------------------------------------------

async fn dashboard(State(engine): State<SharedEngine>) -> Json<Vec<DashboardRow>> {
    Json(engine.dashboard())
}

async fn zone_detail(
    State(engine): State<SharedEngine>,
    Path(id): Path<String>,
) -> ApiResult<Json<ZoneDetail>> {
    engine
        .zone_detail(&id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("zone {id}")).into())
}

async fn audit_log(State(engine): State<SharedEngine>) -> Json<AuditLogResult> {
    Json(engine.audit_log())
}

async fn flow_timeline(State(engine): State<SharedEngine>) -> Json<FlowTimelineResult> {
    Json(engine.flow_timeline())
}
