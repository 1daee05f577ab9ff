use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::product::{ArchiveReason, UpdateProduct};
use crate::forms::product::{
    CreateProductForm, GenerateBarcodesForm, ProductCategoryForm, RetireBarcodeForm,
    ScanBarcodeForm,
};
use crate::repository::DieselRepository;
use crate::routes::ScopeQuery;
use crate::services::product::ProductListParams;
use crate::services::{self, ServiceError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(list_low_stock)
        .service(list_categories)
        .service(create_category)
        .service(delete_category)
        .service(list_archive)
        .service(restore_archived_units)
        .service(lookup_barcode)
        .service(scan_barcode)
        .service(retire_barcode)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(set_product_archived)
        .service(generate_barcodes)
        .service(list_barcodes)
        .service(archive_units);
}

#[derive(Debug, Deserialize)]
struct ProductListQueryParams {
    franchise_id: Option<i32>,
    category_id: Option<i32>,
    search: Option<String>,
    #[serde(default)]
    include_archived: bool,
    page: Option<usize>,
}

#[get("/products")]
async fn list_products(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ProductListQueryParams>,
) -> Result<HttpResponse, ServiceError> {
    let query = query.into_inner();
    let products = services::product::list_products(
        repo.get_ref(),
        &user,
        ProductListParams {
            franchise_id: query.franchise_id,
            category_id: query.category_id,
            search: query.search,
            include_archived: query.include_archived,
            page: query.page.unwrap_or(1),
        },
    )?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/products/low-stock")]
async fn list_low_stock(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let products = services::product::list_low_stock(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/products/{id}")]
async fn get_product(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let product = services::product::get_product(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("/products")]
async fn create_product(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<CreateProductForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let product = services::product::create_product(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(product))
}

#[patch("/products/{id}")]
async fn update_product(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    updates: web::Json<UpdateProduct>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let product = services::product::update_product(
        repo.get_ref(),
        &user,
        path.into_inner(),
        updates.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(product))
}

#[derive(Debug, Deserialize)]
struct ArchiveFlagForm {
    archived: bool,
}

#[post("/products/{id}/archive")]
async fn set_product_archived(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<ArchiveFlagForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let product = services::product::set_product_archived(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.archived,
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(product))
}

#[get("/product-categories")]
async fn list_categories(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let categories =
        services::product::list_categories(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("/product-categories")]
async fn create_category(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<ProductCategoryForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let category = services::product::create_category(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(category))
}

#[delete("/product-categories/{id}")]
async fn delete_category(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::product::delete_category(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

#[post("/products/{id}/barcodes")]
async fn generate_barcodes(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<GenerateBarcodesForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let product_id = path.into_inner();
    let mut form = form.into_inner();
    form.product_id = product_id;
    let barcodes =
        services::product::generate_barcodes(repo.get_ref(), &user, form, query.franchise_id)?;
    Ok(HttpResponse::Created().json(barcodes))
}

#[get("/products/{id}/barcodes")]
async fn list_barcodes(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let barcodes = services::product::list_barcodes(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(barcodes))
}

#[get("/barcodes/{number}")]
async fn lookup_barcode(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let barcode = services::product::lookup_barcode(
        repo.get_ref(),
        &user,
        &path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(barcode))
}

#[post("/barcodes/scan")]
async fn scan_barcode(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<ScanBarcodeForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let barcode = services::product::scan_barcode(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(barcode))
}

#[post("/barcodes/retire")]
async fn retire_barcode(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    form: web::Json<RetireBarcodeForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let barcode = services::product::retire_barcode(
        repo.get_ref(),
        &user,
        form.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(barcode))
}

#[derive(Debug, Deserialize)]
struct ArchiveUnitsForm {
    quantity: i32,
    reason: ArchiveReason,
    notes: Option<String>,
}

#[post("/products/{id}/archive-units")]
async fn archive_units(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    form: web::Json<ArchiveUnitsForm>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let form = form.into_inner();
    let entry = services::product::archive_units(
        repo.get_ref(),
        &user,
        path.into_inner(),
        form.quantity,
        form.reason,
        form.notes,
        query.franchise_id,
    )?;
    Ok(HttpResponse::Created().json(entry))
}

#[get("/product-archive")]
async fn list_archive(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let entries = services::product::list_archive(repo.get_ref(), &user, query.franchise_id)?;
    Ok(HttpResponse::Ok().json(entries))
}

#[post("/product-archive/{id}/restore")]
async fn restore_archived_units(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    query: web::Query<ScopeQuery>,
) -> Result<HttpResponse, ServiceError> {
    services::product::restore_archived_units(
        repo.get_ref(),
        &user,
        path.into_inner(),
        query.franchise_id,
    )?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
