//! Counter sales: price the cart, apply any coupon, record the sale.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::sale::{DirectSale, NewDirectSale, sale_totals};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::dto::sale::{SaleDetail, SaleSummary};
use crate::forms::sale::CreateSaleForm;
use crate::repository::{
    CouponReader, CouponWriter, CustomerReader, ProductReader, SaleListQuery, SaleReader,
    SaleWriter, SettingsReader,
};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult, document_number};

pub struct SaleListParams {
    pub franchise_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub page: usize,
}

pub fn create_sale<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateSaleForm,
    franchise_id: Option<i32>,
) -> ServiceResult<DirectSale>
where
    R: SaleWriter
        + CustomerReader
        + ProductReader
        + CouponReader
        + CouponWriter
        + SettingsReader
        + ?Sized,
{
    user.ensure(Role::Staff, Module::Sales)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let customer = repo
        .get_customer_by_id(form.customer_id, franchise_id)?
        .ok_or_else(|| ServiceError::Validation("customer not found".to_string()))?;

    let mut subtotal = 0.0;
    for item in &form.items {
        if item.quantity <= 0 {
            return Err(ServiceError::Validation(
                "item quantity must be greater than zero".to_string(),
            ));
        }
        if item.unit_price < 0.0 {
            return Err(ServiceError::Validation(
                "item unit price cannot be negative".to_string(),
            ));
        }
        let product = repo
            .get_product_by_id(item.product_id, franchise_id)?
            .ok_or_else(|| {
                ServiceError::Validation(format!("product {} not found", item.product_id))
            })?;
        if product.stock.available < item.quantity {
            return Err(ServiceError::Validation(format!(
                "only {} of {} available",
                product.stock.available, product.product_code
            )));
        }
        subtotal += item.line_total();
    }

    let (coupon_id, discount_amount) = match form.coupon_code.as_deref() {
        Some(code) => {
            match crate::services::coupon::check_coupon(
                repo,
                franchise_id,
                code,
                subtotal,
                Some(customer.id),
            )? {
                Ok((coupon, discount)) => (Some(coupon.id), discount),
                Err(rejection) => return Err(ServiceError::Validation(rejection.message)),
            }
        }
        None => (None, 0.0),
    };

    let gst_percentage = repo
        .get_company_settings(franchise_id)?
        .map(|s| s.gst_percentage)
        .unwrap_or(0.0);
    let totals = sale_totals(&form.items, discount_amount, gst_percentage);

    let new_sale = NewDirectSale {
        franchise_id,
        customer_id: customer.id,
        sale_number: document_number("DS-"),
        payment_method: form.payment_method,
        subtotal: totals.subtotal,
        discount_amount: totals.discount_amount,
        coupon_id,
        gst_amount: totals.gst_amount,
        total_amount: totals.total_amount,
        notes: form.notes,
        created_by: user.id(),
    };

    let sale = repo.create_sale(&new_sale, &form.items)?;
    if let Some(coupon_id) = coupon_id {
        repo.record_coupon_use(coupon_id, franchise_id, customer.id, None)?;
    }
    Ok(sale)
}

pub fn list_sales<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: SaleListParams,
) -> ServiceResult<Paginated<SaleSummary>>
where
    R: SaleReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Sales)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query = SaleListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(customer_id) = params.customer_id {
        query = query.customer(customer_id);
    }

    let (total, rows) = repo.list_sales(query)?;
    Ok(Paginated::new(
        total,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        rows.into_iter().map(SaleSummary::from).collect(),
    ))
}

pub fn get_sale<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<SaleDetail>
where
    R: SaleReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Sales)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_sale_by_id(id, franchise_id)?
        .map(SaleDetail::from)
        .ok_or(ServiceError::NotFound)
}
