//! Customer directory: CRUD, search and pagination.

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::customer::{Customer, CustomerStatus, NewCustomer, UpdateCustomer};
use crate::domain::user::{Module, Role};
use crate::dto::Paginated;
use crate::forms::customer::CreateCustomerForm;
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult};

pub struct CustomerListParams {
    pub franchise_id: Option<i32>,
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub page: usize,
}

pub fn list_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: CustomerListParams,
) -> ServiceResult<Paginated<Customer>>
where
    R: CustomerReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Customers)?;
    let franchise_id = user.franchise_for(params.franchise_id)?;

    let page = params.page.max(1);
    let mut query =
        CustomerListQuery::new(franchise_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }
    if let Some(status) = params.status {
        query = query.status(status);
    }

    let (total, customers) = repo.list_customers(query)?;
    Ok(Paginated::new(total, page, DEFAULT_ITEMS_PER_PAGE, customers))
}

pub fn get_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    user.ensure(Role::Readonly, Module::Customers)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    repo.get_customer_by_id(id, franchise_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateCustomerForm,
    franchise_id: Option<i32>,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Customers)?;
    form.validate()?;
    let franchise_id = user.franchise_for(franchise_id)?;

    let new_customer = NewCustomer::new(
        franchise_id,
        form.name,
        form.phone,
        form.whatsapp_number,
        form.email,
        form.address,
        form.city,
        form.status.unwrap_or(CustomerStatus::Active),
        form.notes,
    );
    Ok(repo.create_customer(&new_customer)?)
}

pub fn update_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    updates: UpdateCustomer,
    franchise_id: Option<i32>,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    user.ensure(Role::Staff, Module::Customers)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.update_customer(id, franchise_id, &updates)?)
}

/// Refuses with a conflict while bookings reference the customer.
pub fn delete_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    franchise_id: Option<i32>,
) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    user.ensure(Role::FranchiseAdmin, Module::Customers)?;
    let franchise_id = user.franchise_for(franchise_id)?;
    Ok(repo.delete_customer(id, franchise_id)?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::user::{User, UserPermissions};
    use crate::repository::mock::MockRepository;

    fn caller(role: Role, franchise_id: Option<i32>) -> AuthenticatedUser {
        let created = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        AuthenticatedUser {
            user: User {
                id: 7,
                franchise_id,
                name: "Asha".into(),
                email: "asha@safawala.test".into(),
                password_hash: String::new(),
                role,
                permissions: UserPermissions::for_role(role),
                is_active: true,
                created_at: created,
                updated_at: created,
            },
            session_id: "s".into(),
        }
    }

    #[test]
    fn readonly_callers_cannot_create_customers() {
        let repo = MockRepository::new();
        let form = CreateCustomerForm {
            name: "Bina Shah".into(),
            phone: "9898012345".into(),
            whatsapp_number: None,
            email: None,
            address: None,
            city: None,
            status: None,
            notes: None,
        };
        let err =
            create_customer(&repo, &caller(Role::Readonly, Some(1)), form, None).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden));
    }

    #[test]
    fn franchise_callers_are_pinned_to_their_own_scope() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .withf(|query| query.franchise_id == 3)
            .returning(|_| Ok((0, Vec::new())));

        let page = list_customers(
            &repo,
            &caller(Role::Staff, Some(3)),
            CustomerListParams {
                franchise_id: Some(9),
                search: None,
                status: None,
                page: 1,
            },
        )
        .unwrap();
        assert_eq!(page.total, 0);
    }
}
