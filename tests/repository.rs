use safawala_crm::domain::booking::{
    BookingKind, BookingStatus, BookingType, NewBooking, NewBookingItem,
};
use safawala_crm::domain::customer::{CustomerStatus, NewCustomer, UpdateCustomer};
use safawala_crm::domain::delivery::{DeliveryStatus, NewDelivery};
use safawala_crm::domain::franchise::NewFranchise;
use safawala_crm::domain::laundry::LaundryStatus;
use safawala_crm::domain::product::{InventoryOperation, NewProduct};
use safawala_crm::domain::returns::{ReturnLine, ReturnStatus};
use safawala_crm::domain::user::{NewUser, Role};
use safawala_crm::repository::{
    BookingReader, BookingWriter, CustomerListQuery, CustomerReader, CustomerWriter,
    DeliveryWriter, DieselRepository, FranchiseWriter, InventoryTransactionQuery,
    LaundryListQuery, LaundryReader, PaymentWriter, ProductReader, ProductWriter,
    ReturnListQuery, ReturnReader, ReturnWriter, StockMovement, UserWriter,
};

mod common;

fn seed_franchise(repo: &DieselRepository) -> i32 {
    repo.create_franchise(&NewFranchise::new(
        "Safawala Rajkot".into(),
        "rj".into(),
        None,
        None,
        None,
        None,
    ))
    .unwrap()
    .id
}

fn seed_user(repo: &DieselRepository, franchise_id: i32) -> i32 {
    let new_user = NewUser::new(
        Some(franchise_id),
        "Asha".into(),
        "asha@safawala.test".into(),
        "not-a-real-hash".into(),
        Role::FranchiseAdmin,
        None,
    )
    .unwrap();
    repo.create_user(&new_user).unwrap().id
}

#[test]
fn test_customer_repository_crud() {
    let test_db = common::TestDb::new("test_customer_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());
    let franchise_id = seed_franchise(&repo);

    let asha = repo
        .create_customer(&NewCustomer::new(
            franchise_id,
            "Asha Patel".into(),
            "9725295692".into(),
            None,
            None,
            None,
            None,
            CustomerStatus::Active,
            None,
        ))
        .unwrap();
    let bina = repo
        .create_customer(&NewCustomer::new(
            franchise_id,
            "Bina Shah".into(),
            "9898012345".into(),
            None,
            Some("bina@safawala.test".into()),
            None,
            Some("Jamnagar".into()),
            CustomerStatus::Lead,
            None,
        ))
        .unwrap();
    assert_eq!(asha.customer_code, "CUST-00001");
    assert_eq!(bina.customer_code, "CUST-00002");

    let (total, items) = repo
        .list_customers(CustomerListQuery::new(franchise_id))
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (search_total, search_items) = repo
        .list_customers(CustomerListQuery::new(franchise_id).search("Bina"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name, "Bina Shah");

    // Email and city are searchable alongside name, phone and code.
    let (by_email, _) = repo
        .list_customers(CustomerListQuery::new(franchise_id).search("bina@safawala"))
        .unwrap();
    assert_eq!(by_email, 1);
    let (by_city, _) = repo
        .list_customers(CustomerListQuery::new(franchise_id).search("Jamnagar"))
        .unwrap();
    assert_eq!(by_city, 1);

    let updates = UpdateCustomer {
        name: Some("Bina Mehta".into()),
        ..Default::default()
    };
    let updated = repo.update_customer(bina.id, franchise_id, &updates).unwrap();
    assert_eq!(updated.name, "Bina Mehta");
    // Untouched fields survive a partial update.
    assert_eq!(updated.phone, bina.phone);

    repo.delete_customer(asha.id, franchise_id).unwrap();
    assert!(
        repo.get_customer_by_id(asha.id, franchise_id)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_customer_codes_are_never_reissued_after_a_delete() {
    let test_db = common::TestDb::new("test_customer_codes_after_delete.db");
    let repo = DieselRepository::new(test_db.pool());
    let franchise_id = seed_franchise(&repo);

    let first = repo
        .create_customer(&NewCustomer::new(
            franchise_id,
            "Asha Patel".into(),
            "9725295692".into(),
            None,
            None,
            None,
            None,
            CustomerStatus::Active,
            None,
        ))
        .unwrap();
    let second = repo
        .create_customer(&NewCustomer::new(
            franchise_id,
            "Bina Shah".into(),
            "9898012345".into(),
            None,
            None,
            None,
            None,
            CustomerStatus::Active,
            None,
        ))
        .unwrap();
    assert_eq!(first.customer_code, "CUST-00001");
    assert_eq!(second.customer_code, "CUST-00002");

    // A counting scheme would hand the next customer CUST-00002 again and
    // trip the per-franchise unique code constraint.
    repo.delete_customer(first.id, franchise_id).unwrap();
    let third = repo
        .create_customer(&NewCustomer::new(
            franchise_id,
            "Chirag Dave".into(),
            "9427011223".into(),
            None,
            None,
            None,
            None,
            CustomerStatus::Active,
            None,
        ))
        .unwrap();
    assert_eq!(third.customer_code, "CUST-00003");
}

#[test]
fn test_stock_movements_update_buckets_and_ledger() {
    let test_db = common::TestDb::new("test_stock_movements.db");
    let repo = DieselRepository::new(test_db.pool());
    let franchise_id = seed_franchise(&repo);
    let user_id = seed_user(&repo, franchise_id);

    let product = repo
        .create_product(&NewProduct::new(
            franchise_id,
            None,
            "trb-red".into(),
            "Red Turban".into(),
            None,
            500.0,
            1500.0,
            200.0,
            5,
            2,
        ))
        .unwrap();
    assert_eq!(product.product_code, "TRB-RED");
    assert_eq!(product.stock.total, 5);
    assert_eq!(product.stock.available, 5);

    repo.move_stock(
        franchise_id,
        InventoryOperation::Reserve,
        &[StockMovement {
            product_id: product.id,
            quantity: 3,
        }],
        None,
        user_id,
    )
    .unwrap();

    let reserved = repo
        .get_product_by_id(product.id, franchise_id)
        .unwrap()
        .unwrap();
    assert_eq!(reserved.stock.available, 2);
    assert_eq!(reserved.stock.reserved, 3);

    // Oversubscription fails and leaves the buckets untouched.
    let err = repo.move_stock(
        franchise_id,
        InventoryOperation::Reserve,
        &[StockMovement {
            product_id: product.id,
            quantity: 3,
        }],
        None,
        user_id,
    );
    assert!(err.is_err());
    let unchanged = repo
        .get_product_by_id(product.id, franchise_id)
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.stock.available, 2);
    assert_eq!(unchanged.stock.reserved, 3);

    let ledger = repo
        .list_inventory_transactions(InventoryTransactionQuery::new(franchise_id))
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].transaction_type, "reserve");
    assert_eq!(ledger[0].quantity, 3);
    assert_eq!(ledger[0].created_by, user_id);
}

#[test]
fn test_invoice_numbers_increment_per_franchise() {
    let test_db = common::TestDb::new("test_invoice_numbers.db");
    let repo = DieselRepository::new(test_db.pool());
    let franchise_id = seed_franchise(&repo);

    assert_eq!(
        repo.next_invoice_number(franchise_id, "INV-").unwrap(),
        "INV-001"
    );
    assert_eq!(
        repo.next_invoice_number(franchise_id, "INV-").unwrap(),
        "INV-002"
    );

    // Reconfiguring the sequence takes over from the stored prefix and counter.
    repo.set_invoice_sequence(franchise_id, "SAF-", 40).unwrap();
    assert_eq!(
        repo.next_invoice_number(franchise_id, "INV-").unwrap(),
        "SAF-041"
    );
}

fn seed_customer(repo: &DieselRepository, franchise_id: i32) -> i32 {
    repo.create_customer(&NewCustomer::new(
        franchise_id,
        "Asha Patel".into(),
        "9725295692".into(),
        None,
        None,
        None,
        None,
        CustomerStatus::Active,
        None,
    ))
    .unwrap()
    .id
}

/// Confirmed product rental for two units, reserving them on creation.
fn seed_rental_booking(
    repo: &DieselRepository,
    franchise_id: i32,
    customer_id: i32,
    product_id: i32,
    user_id: i32,
) -> i32 {
    repo.create_booking(
        &NewBooking {
            franchise_id,
            customer_id,
            booking_number: "BO-1001".into(),
            kind: BookingKind::Product,
            booking_type: BookingType::Rental,
            is_quote: false,
            status: BookingStatus::Confirmed,
            event_date: None,
            delivery_date: None,
            return_date: None,
            venue_address: None,
            package_id: None,
            variant_id: None,
            distance_km: None,
            subtotal: 1000.0,
            discount_amount: 0.0,
            coupon_id: None,
            distance_addon: 0.0,
            gst_amount: 180.0,
            total_amount: 1380.0,
            security_deposit: 200.0,
            notes: None,
            created_by: user_id,
        },
        &[NewBookingItem {
            product_id,
            quantity: 2,
            unit_price: 500.0,
        }],
    )
    .unwrap()
    .id
}

#[test]
fn test_delivering_a_rental_confirms_stock_and_opens_a_return() {
    let test_db = common::TestDb::new("test_delivered_side_effects.db");
    let repo = DieselRepository::new(test_db.pool());
    let franchise_id = seed_franchise(&repo);
    let user_id = seed_user(&repo, franchise_id);
    let customer_id = seed_customer(&repo, franchise_id);

    let product = repo
        .create_product(&NewProduct::new(
            franchise_id,
            None,
            "trb-red".into(),
            "Red Turban".into(),
            None,
            500.0,
            1500.0,
            200.0,
            5,
            2,
        ))
        .unwrap();
    let booking_id = seed_rental_booking(&repo, franchise_id, customer_id, product.id, user_id);

    let reserved = repo
        .get_product_by_id(product.id, franchise_id)
        .unwrap()
        .unwrap();
    assert_eq!(reserved.stock.reserved, 2);

    let delivery = repo
        .create_delivery(&NewDelivery {
            franchise_id,
            booking_id,
            delivery_number: "DEL-1001".into(),
            booking_type: BookingType::Rental,
            scheduled_date: None,
            scheduled_time: None,
            delivery_address: "12 Palace Road, Rajkot".into(),
            assigned_to: None,
            special_instructions: None,
        })
        .unwrap();
    assert_eq!(delivery.status, DeliveryStatus::Pending);

    repo.transition_delivery(
        delivery.id,
        franchise_id,
        DeliveryStatus::InTransit,
        None,
        None,
        user_id,
    )
    .unwrap();

    // Rentals come back, so delivering one without a return number is
    // refused and nothing moves.
    let err = repo.transition_delivery(
        delivery.id,
        franchise_id,
        DeliveryStatus::Delivered,
        None,
        None,
        user_id,
    );
    assert!(err.is_err());
    let untouched = repo
        .get_product_by_id(product.id, franchise_id)
        .unwrap()
        .unwrap();
    assert_eq!(untouched.stock.reserved, 2);
    assert_eq!(untouched.stock.in_use, 0);

    let delivered = repo
        .transition_delivery(
            delivery.id,
            franchise_id,
            DeliveryStatus::Delivered,
            None,
            Some("RET-1001"),
            user_id,
        )
        .unwrap();
    assert_eq!(delivered.status, DeliveryStatus::Delivered);
    assert!(delivered.delivered_at.is_some());

    // Reserved units moved out on the van.
    let stock = repo
        .get_product_by_id(product.id, franchise_id)
        .unwrap()
        .unwrap()
        .stock;
    assert_eq!(stock.available, 3);
    assert_eq!(stock.reserved, 0);
    assert_eq!(stock.in_use, 2);

    let booking = repo
        .get_booking_by_id(booking_id, franchise_id)
        .unwrap()
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Delivered);

    // The return paperwork opened in the same transaction.
    let (total, returns) = repo.list_returns(ReturnListQuery::new(franchise_id)).unwrap();
    assert_eq!(total, 1);
    let (pending_return, _, _) = &returns[0];
    assert_eq!(pending_return.return_number, "RET-1001");
    assert_eq!(pending_return.booking_id, booking_id);
    assert_eq!(pending_return.status, ReturnStatus::Pending);
}

#[test]
fn test_processing_a_return_reconciles_stock_and_batches_laundry() {
    let test_db = common::TestDb::new("test_process_return.db");
    let repo = DieselRepository::new(test_db.pool());
    let franchise_id = seed_franchise(&repo);
    let user_id = seed_user(&repo, franchise_id);
    let customer_id = seed_customer(&repo, franchise_id);

    let product = repo
        .create_product(&NewProduct::new(
            franchise_id,
            None,
            "trb-red".into(),
            "Red Turban".into(),
            None,
            500.0,
            1500.0,
            200.0,
            5,
            2,
        ))
        .unwrap();
    let booking_id = seed_rental_booking(&repo, franchise_id, customer_id, product.id, user_id);

    let delivery = repo
        .create_delivery(&NewDelivery {
            franchise_id,
            booking_id,
            delivery_number: "DEL-1001".into(),
            booking_type: BookingType::Rental,
            scheduled_date: None,
            scheduled_time: None,
            delivery_address: "12 Palace Road, Rajkot".into(),
            assigned_to: None,
            special_instructions: None,
        })
        .unwrap();
    repo.transition_delivery(
        delivery.id,
        franchise_id,
        DeliveryStatus::InTransit,
        None,
        None,
        user_id,
    )
    .unwrap();
    repo.transition_delivery(
        delivery.id,
        franchise_id,
        DeliveryStatus::Delivered,
        None,
        Some("RET-1001"),
        user_id,
    )
    .unwrap();

    let (_, returns) = repo.list_returns(ReturnListQuery::new(franchise_id)).unwrap();
    let return_id = returns[0].0.id;

    // Two units went out: one comes back for the wash, one got torn.
    let line = ReturnLine {
        product_id: product.id,
        qty_delivered: 2,
        qty_returned: 1,
        qty_not_used: 0,
        qty_damaged: 1,
        qty_lost: 0,
        damage_reason: Some("torn hem".into()),
        lost_reason: None,
        notes: None,
    };
    let processed = repo
        .process_return(return_id, franchise_id, &[line], true, Some("LB-1001"), user_id)
        .unwrap();
    assert_eq!(processed.status, ReturnStatus::Completed);
    assert_eq!(processed.processed_by, Some(user_id));
    assert!(processed.processed_at.is_some());

    let stock = repo
        .get_product_by_id(product.id, franchise_id)
        .unwrap()
        .unwrap()
        .stock;
    assert_eq!(stock.total, 5);
    assert_eq!(stock.available, 3);
    assert_eq!(stock.in_use, 0);
    assert_eq!(stock.in_laundry, 1);
    assert_eq!(stock.damaged, 1);

    let booking = repo
        .get_booking_by_id(booking_id, franchise_id)
        .unwrap()
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Returned);

    // The washable unit opened a laundry batch tied to this return.
    let (batch_total, batches) = repo
        .list_laundry_batches(LaundryListQuery::new(franchise_id))
        .unwrap();
    assert_eq!(batch_total, 1);
    assert_eq!(batches[0].batch_number, "LB-1001");
    assert!(batches[0].auto_created);
    assert_eq!(batches[0].return_id, Some(return_id));
    assert_eq!(batches[0].status, LaundryStatus::Pending);

    let (_, items) = repo
        .get_laundry_batch_by_id(batches[0].id, franchise_id)
        .unwrap()
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 1);

    // The torn unit landed in the archive.
    let archive = repo.list_archive_entries(franchise_id).unwrap();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive[0].0.quantity, 1);

    // A processed return stays processed.
    let line = ReturnLine {
        product_id: product.id,
        qty_delivered: 2,
        qty_returned: 2,
        qty_not_used: 0,
        qty_damaged: 0,
        qty_lost: 0,
        damage_reason: None,
        lost_reason: None,
        notes: None,
    };
    assert!(
        repo.process_return(return_id, franchise_id, &[line], false, None, user_id)
            .is_err()
    );
}

#[test]
fn test_barcodes_are_scoped_to_their_franchise() {
    let test_db = common::TestDb::new("test_barcode_scope.db");
    let repo = DieselRepository::new(test_db.pool());
    let rajkot = seed_franchise(&repo);
    let surat = repo
        .create_franchise(&NewFranchise::new(
            "Safawala Surat".into(),
            "st".into(),
            None,
            None,
            None,
            None,
        ))
        .unwrap()
        .id;
    let user_id = seed_user(&repo, rajkot);

    // Both franchises stock the same catalog item under the same code.
    let rajkot_product = repo
        .create_product(&NewProduct::new(
            rajkot, None, "trb-red".into(), "Red Turban".into(), None,
            500.0, 1500.0, 200.0, 0, 2,
        ))
        .unwrap();
    let surat_product = repo
        .create_product(&NewProduct::new(
            surat, None, "trb-red".into(), "Red Turban".into(), None,
            500.0, 1500.0, 200.0, 0, 2,
        ))
        .unwrap();

    let rajkot_codes = repo
        .generate_barcodes(rajkot_product.id, rajkot, 2, user_id)
        .unwrap();
    // The same barcode strings mint again for the sister franchise.
    let surat_codes = repo
        .generate_barcodes(surat_product.id, surat, 2, user_id)
        .unwrap();
    assert_eq!(rajkot_codes[0].barcode_number, "TRB-RED-001");
    assert_eq!(surat_codes[0].barcode_number, "TRB-RED-001");

    // Lookups resolve within the caller's franchise.
    let found = repo
        .get_barcode_by_number("TRB-RED-001", surat)
        .unwrap()
        .unwrap();
    assert_eq!(found.product_id, surat_product.id);
    let found = repo
        .get_barcode_by_number("TRB-RED-001", rajkot)
        .unwrap()
        .unwrap();
    assert_eq!(found.product_id, rajkot_product.id);
}
