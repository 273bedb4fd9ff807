//! Behavioral specification of [`Command`]s over an in-memory [`Database`]
//! double.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use common::{
    money::Currency,
    operations::{By, Delete, Insert, Select, Update},
    DateTime, Money,
};
use rust_decimal::Decimal;
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::{
        area, category, listing,
        ordering::{IndexBounds, OrderUpdate},
        user, Area, Category, Listing, OrderIndex, Slug, User,
    },
    infra::{database, Database},
    read, Config, Service,
};

use super::{
    create_category, create_listing, create_user, create_user_session,
    delete_category, reorder, update_category, AuthorizeUserSession,
    Command as _, CreateCategory, CreateListing, CreateUser,
    CreateUserSession, DeleteCategory, Reorder, SetListingPlacement,
    UpdateCategory,
};

/// In-memory [`Database`] double backed by plain [`Vec`]s.
#[derive(Clone, Debug, Default)]
struct MockDb(Arc<Mutex<State>>);

/// State of a [`MockDb`].
#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    listings: Vec<Listing>,
    categories: Vec<Category>,
    areas: Vec<Area>,
}

impl MockDb {
    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for MockDb {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }
}

impl<'l> Database<Select<By<Option<User>, &'l user::Login>>> for MockDb {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Login>>,
    ) -> Result<Self::Ok, Self::Err> {
        let login = by.into_inner();
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| &u.login == login)
            .cloned())
    }
}

impl Database<Insert<User>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().users.push(user);
        Ok(())
    }
}

impl Database<Select<By<Option<Listing>, listing::Id>>> for MockDb {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().listings.iter().find(|l| l.id == id).cloned())
    }
}

impl Database<Insert<Listing>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().listings.push(listing);
        Ok(())
    }
}

impl Database<Update<Listing>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        let stored = state
            .listings
            .iter_mut()
            .find(|l| l.id == listing.id)
            .expect("updated `Listing` exists");
        *stored = listing;
        Ok(())
    }
}

impl Database<Delete<By<Listing, listing::Id>>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.state().listings.retain(|l| l.id != id);
        Ok(())
    }
}

impl Database<Select<By<IndexBounds, listing::Placement>>> for MockDb {
    type Ok = IndexBounds;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<IndexBounds, listing::Placement>>,
    ) -> Result<Self::Ok, Self::Err> {
        let placement = by.into_inner();
        let state = self.state();
        let mut indices = state
            .listings
            .iter()
            .filter(|l| l.placement() == placement)
            .map(|l| l.order_index);
        Ok(indices.next().map_or_else(IndexBounds::default, |first| {
            indices.fold(
                IndexBounds {
                    min: Some(first),
                    max: Some(first),
                },
                |bounds, idx| IndexBounds {
                    min: bounds.min.min(Some(idx)),
                    max: bounds.max.max(Some(idx)),
                },
            )
        }))
    }
}

impl Database<Select<By<HashSet<listing::Id>, Vec<listing::Id>>>> for MockDb {
    type Ok = HashSet<listing::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashSet<listing::Id>, Vec<listing::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        let state = self.state();
        Ok(ids
            .into_iter()
            .filter(|id| state.listings.iter().any(|l| l.id == *id))
            .collect())
    }
}

impl Database<Update<OrderUpdate<Listing>>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(update): Update<OrderUpdate<Listing>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        if let Some(stored) =
            state.listings.iter_mut().find(|l| l.id == update.id)
        {
            stored.order_index = update.index;
        }
        Ok(())
    }
}

impl Database<Select<By<Option<Category>, category::Id>>> for MockDb {
    type Ok = Option<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Category>, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

impl<'s> Database<Select<By<Option<Category>, &'s Slug>>> for MockDb {
    type Ok = Option<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Category>, &'s Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();
        Ok(self
            .state()
            .categories
            .iter()
            .find(|c| &c.slug == slug)
            .cloned())
    }
}

impl Database<Select<By<IndexBounds, read::category::All>>> for MockDb {
    type Ok = IndexBounds;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<IndexBounds, read::category::All>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.state();
        Ok(IndexBounds {
            min: state.categories.iter().map(|c| c.order_index).min(),
            max: state.categories.iter().map(|c| c.order_index).max(),
        })
    }
}

impl Database<Insert<Category>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(category): Insert<Category>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().categories.push(category);
        Ok(())
    }
}

impl Database<Update<Category>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(category): Update<Category>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        let stored = state
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .expect("updated `Category` exists");
        *stored = category;
        Ok(())
    }
}

impl Database<Delete<By<Category, category::Id>>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Category, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.state().categories.retain(|c| c.id != id);
        Ok(())
    }
}

impl Database<Select<By<read::DependentListings, category::Id>>> for MockDb {
    type Ok = read::DependentListings;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::DependentListings, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let count = self
            .state()
            .listings
            .iter()
            .filter(|l| l.category_id == id)
            .count();
        Ok(read::DependentListings::from(
            i64::try_from(count).expect("fits"),
        ))
    }
}

impl Database<Select<By<Option<Area>, area::Id>>> for MockDb {
    type Ok = Option<Area>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Area>, area::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().areas.iter().find(|a| a.id == id).cloned())
    }
}

/// Creates a [`Service`] over a fresh [`MockDb`] seeded with an admin and a
/// regular [`User`].
fn service() -> (Service<MockDb>, MockDb, user::Id, user::Id) {
    let db = MockDb::default();

    let admin = User {
        id: user::Id::new(),
        name: user::Name::new("Admin").unwrap(),
        login: user::Login::new("admin").unwrap(),
        password_hash: user::PasswordHash::new(&"secret".into()),
        role: user::Role::Admin,
        created_at: DateTime::now().coerce(),
    };
    let regular = User {
        id: user::Id::new(),
        name: user::Name::new("Visitor").unwrap(),
        login: user::Login::new("visitor").unwrap(),
        password_hash: user::PasswordHash::new(&"secret".into()),
        role: user::Role::User,
        created_at: DateTime::now().coerce(),
    };
    let (admin_id, regular_id) = (admin.id, regular.id);
    db.state().users.extend([admin, regular]);

    let service = Service::new(
        Config {
            jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                b"secret",
            ),
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                b"secret",
            ),
            session_lifetime: Duration::from_secs(30 * 60),
        },
        db.clone(),
    );

    (service, db, admin_id, regular_id)
}

/// Seeds a [`Category`] directly into the [`MockDb`].
fn seed_category(db: &MockDb, name: &str, index: i32) -> category::Id {
    let name = category::Name::new(name).unwrap();
    let category = Category {
        id: category::Id::new(),
        slug: Slug::derive(&name).unwrap(),
        name,
        description: None,
        order_index: OrderIndex::from(index),
        created_at: DateTime::now().coerce(),
    };
    let id = category.id;
    db.state().categories.push(category);
    id
}

/// Seeds an [`Area`] directly into the [`MockDb`].
fn seed_area(db: &MockDb, name: &str) -> area::Id {
    let name = area::Name::new(name).unwrap();
    let area = Area {
        id: area::Id::new(),
        slug: Slug::derive(&name).unwrap(),
        name,
        is_active: true,
        order_index: OrderIndex::FIRST,
        created_at: DateTime::now().coerce(),
    };
    let id = area.id;
    db.state().areas.push(area);
    id
}

/// Returns a [`CreateListing`] command with typical fields.
fn create_listing(
    title: &str,
    category_id: category::Id,
    area_id: area::Id,
    initiator_id: user::Id,
) -> CreateListing {
    CreateListing {
        title: listing::Title::new(title).unwrap(),
        description: None,
        price: Money {
            amount: Decimal::from(1_500_000),
            currency: Currency::Aed,
        },
        location: listing::Location::new("Palm Jumeirah").unwrap(),
        category_id,
        area_id,
        status: listing::Status::Active,
        is_featured: false,
        is_new: false,
        images: vec![],
        order_index: None,
        initiator_id,
    }
}

/// Returns IDs of the stored [`Listing`]s sorted ascending by
/// `(order_index, id)`, i.e. in display order.
fn display_order(db: &MockDb) -> Vec<listing::Id> {
    let state = db.state();
    let mut listings = state
        .listings
        .iter()
        .map(|l| (l.order_index, l.id))
        .collect::<Vec<_>>();
    listings.sort_by(|(ai, aid), (bi, bid)| {
        ai.cmp(bi).then_with(|| aid.to_string().cmp(&bid.to_string()))
    });
    listings.into_iter().map(|(_, id)| id).collect()
}

#[tokio::test]
async fn create_listing_appends_to_the_regular_group() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    for title in ["First", "Second", "Third"] {
        drop(
            service
                .execute(create_listing(title, category_id, area_id, admin))
                .await
                .unwrap(),
        );
    }

    let indices = db
        .state()
        .listings
        .iter()
        .map(|l| i32::from(l.order_index))
        .collect::<Vec<_>>();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[tokio::test]
async fn create_listing_clamps_explicit_position() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    let mut cmd = create_listing("Explicit", category_id, area_id, admin);
    cmd.order_index = Some(-7);
    let created = service.execute(cmd).await.unwrap();

    assert_eq!(created.order_index, OrderIndex::FIRST);
}

#[tokio::test]
async fn create_promoted_listing_outranks_promoted_minimum() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    for (title, index) in [("A", -3), ("B", -1), ("C", 0)] {
        let mut cmd = create_listing(title, category_id, area_id, admin);
        cmd.is_featured = true;
        cmd.order_index = Some(index);
        // Explicit indices are clamped, so promoted rows are seeded directly.
        drop(service.execute(cmd).await.unwrap());
        let mut state = db.state();
        let stored = state.listings.last_mut().unwrap();
        stored.order_index = OrderIndex::from(index);
    }

    let mut cmd = create_listing("D", category_id, area_id, admin);
    cmd.is_featured = true;
    let created = service.execute(cmd).await.unwrap();

    assert_eq!(created.order_index, OrderIndex::from(-4));
}

#[tokio::test]
async fn create_listing_requires_admin() {
    let (service, db, _, regular) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    let err = service
        .execute(create_listing("Nope", category_id, area_id, regular))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_listing::ExecutionError::AdminRequired,
    ));
    assert!(db.state().listings.is_empty());
}

#[tokio::test]
async fn toggling_promotion_reallocates_above_all_promoted() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    let mut ids = vec![];
    for title in ["First", "Second", "Third"] {
        ids.push(
            service
                .execute(create_listing(title, category_id, area_id, admin))
                .await
                .unwrap()
                .id,
        );
    }

    let toggled = service
        .execute(SetListingPlacement {
            id: ids[1],
            is_featured: Some(true),
            is_new: None,
            initiator_id: admin,
        })
        .await
        .unwrap();

    // No promoted listings existed, so the new index goes one position above
    // the default `0` and the listing renders first.
    assert_eq!(toggled.order_index, OrderIndex::from(-1));
    assert_eq!(display_order(&db)[0], ids[1]);
}

#[tokio::test]
async fn toggle_within_promoted_group_keeps_position() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    let mut cmd = create_listing("Featured", category_id, area_id, admin);
    cmd.is_featured = true;
    let created = service.execute(cmd).await.unwrap();
    let stored_index = created.order_index;

    let toggled = service
        .execute(SetListingPlacement {
            id: created.id,
            is_featured: None,
            is_new: Some(true),
            initiator_id: admin,
        })
        .await
        .unwrap();

    assert!(toggled.is_featured);
    assert!(toggled.is_new);
    assert_eq!(toggled.order_index, stored_index);
}

#[tokio::test]
async fn demoting_appends_after_regular_maximum() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    for title in ["First", "Second", "Third"] {
        drop(
            service
                .execute(create_listing(title, category_id, area_id, admin))
                .await
                .unwrap(),
        );
    }
    let mut cmd = create_listing("Featured", category_id, area_id, admin);
    cmd.is_featured = true;
    let promoted = service.execute(cmd).await.unwrap();

    let demoted = service
        .execute(SetListingPlacement {
            id: promoted.id,
            is_featured: Some(false),
            is_new: None,
            initiator_id: admin,
        })
        .await
        .unwrap();

    assert_eq!(demoted.order_index, OrderIndex::from(3));
}

#[tokio::test]
async fn reorder_rejects_unresolvable_ids_without_writing() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    let mut ids = vec![];
    for title in ["First", "Second", "Third"] {
        ids.push(
            service
                .execute(create_listing(title, category_id, area_id, admin))
                .await
                .unwrap()
                .id,
        );
    }
    let before = display_order(&db);

    let unknown = listing::Id::new();
    let updates = [ids[2], ids[0], unknown, ids[1]]
        .into_iter()
        .enumerate()
        .map(|(i, id)| OrderUpdate::<Listing> {
            id,
            index: OrderIndex::from(i32::try_from(i).unwrap()),
        })
        .collect();
    let err = service
        .execute(Reorder::<Listing> {
            updates,
            initiator_id: admin,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        reorder::ExecutionError::RowsNotExist(missing)
            if *missing == vec![unknown],
    ));
    assert_eq!(display_order(&db), before);
}

#[tokio::test]
async fn reorder_applies_submitted_permutation() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    let mut ids = vec![];
    for title in ["A", "B", "C", "D", "E"] {
        ids.push(
            service
                .execute(create_listing(title, category_id, area_id, admin))
                .await
                .unwrap()
                .id,
        );
    }

    let permutation = [ids[4], ids[2], ids[0], ids[3], ids[1]];
    let updates = permutation
        .into_iter()
        .enumerate()
        .map(|(i, id)| OrderUpdate::<Listing> {
            id,
            index: OrderIndex::from(i32::try_from(i).unwrap()),
        })
        .collect();
    service
        .execute(Reorder::<Listing> {
            updates,
            initiator_id: admin,
        })
        .await
        .unwrap();

    assert_eq!(display_order(&db), permutation.to_vec());
    let mut indices = db
        .state()
        .listings
        .iter()
        .map(|l| i32::from(l.order_index))
        .collect::<Vec<_>>();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn reorder_requires_admin() {
    let (service, db, admin, regular) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");

    let id = service
        .execute(create_listing("Only", category_id, area_id, admin))
        .await
        .unwrap()
        .id;

    let err = service
        .execute(Reorder::<Listing> {
            updates: vec![OrderUpdate {
                id,
                index: OrderIndex::FIRST,
            }],
            initiator_id: regular,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        reorder::ExecutionError::AdminRequired,
    ));
}

#[tokio::test]
async fn create_category_derives_slug_and_appends() {
    let (service, db, admin, _) = service();

    let villas = service
        .execute(CreateCategory {
            name: category::Name::new("Villas").unwrap(),
            description: None,
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap();
    let homes = service
        .execute(CreateCategory {
            name: category::Name::new("Beach Homes").unwrap(),
            description: None,
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap();

    assert_eq!(villas.slug.to_string(), "villas");
    assert_eq!(villas.order_index, OrderIndex::from(0));
    assert_eq!(homes.slug.to_string(), "beach-homes");
    assert_eq!(homes.order_index, OrderIndex::from(1));
    assert_eq!(db.state().categories.len(), 2);
}

#[tokio::test]
async fn create_category_rejects_occupied_name() {
    let (service, db, admin, _) = service();

    let first = service
        .execute(CreateCategory {
            name: category::Name::new("Villas").unwrap(),
            description: None,
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap();
    let err = service
        .execute(CreateCategory {
            name: category::Name::new("Villas").unwrap(),
            description: None,
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_category::ExecutionError::NameOccupied(_),
    ));
    let state = db.state();
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].id, first.id);
}

#[tokio::test]
async fn create_category_rejects_unsluggable_name() {
    let (service, db, admin, _) = service();

    let err = service
        .execute(CreateCategory {
            name: category::Name::new("!!!").unwrap(),
            description: None,
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_category::ExecutionError::UnsluggableName(_),
    ));
    assert!(db.state().categories.is_empty());
}

#[tokio::test]
async fn update_category_regenerates_slug_only_on_rename() {
    let (service, db, admin, _) = service();
    let id = seed_category(&db, "Villas", 0);

    let updated = service
        .execute(UpdateCategory {
            id,
            name: category::Name::new("Villas").unwrap(),
            description: Some(
                category::Description::new("Detached houses").unwrap(),
            ),
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap();
    assert_eq!(updated.slug.to_string(), "villas");

    let renamed = service
        .execute(UpdateCategory {
            id,
            name: category::Name::new("Luxury Villas").unwrap(),
            description: None,
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap();
    assert_eq!(renamed.slug.to_string(), "luxury-villas");
}

#[tokio::test]
async fn update_category_rejects_occupied_name() {
    let (service, db, admin, _) = service();
    let _villas = seed_category(&db, "Villas", 0);
    let homes = seed_category(&db, "Beach Homes", 1);

    let err = service
        .execute(UpdateCategory {
            id: homes,
            name: category::Name::new("Villas").unwrap(),
            description: None,
            order_index: None,
            initiator_id: admin,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        update_category::ExecutionError::NameOccupied(_),
    ));
}

#[tokio::test]
async fn delete_category_with_dependent_listings_is_refused() {
    let (service, db, admin, _) = service();
    let category_id = seed_category(&db, "Villas", 0);
    let area_id = seed_area(&db, "Marina");
    drop(
        service
            .execute(create_listing("Tenant", category_id, area_id, admin))
            .await
            .unwrap(),
    );

    let err = service
        .execute(DeleteCategory {
            id: category_id,
            initiator_id: admin,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        delete_category::ExecutionError::DependentListings(d)
            if i64::from(*d) == 1,
    ));
    // The `Category` row is untouched and still resolvable.
    assert!(db.state().categories.iter().any(|c| c.id == category_id));
}

#[tokio::test]
async fn delete_category_without_dependents_succeeds() {
    let (service, db, admin, _) = service();
    let id = seed_category(&db, "Villas", 0);

    let deleted = service
        .execute(DeleteCategory {
            id,
            initiator_id: admin,
        })
        .await
        .unwrap();

    assert_eq!(deleted.id, id);
    assert!(db.state().categories.is_empty());
}

#[tokio::test]
async fn create_user_rejects_occupied_login() {
    let (service, _, _, _) = service();

    let err = service
        .execute(CreateUser {
            name: user::Name::new("Another Admin").unwrap(),
            login: user::Login::new("admin").unwrap(),
            password: SecretBox::init_with(|| "password".into()),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_user::ExecutionError::LoginOccupied(_),
    ));
}

#[tokio::test]
async fn session_round_trips_through_authorization() {
    let (service, _, admin, _) = service();

    let output = service
        .execute(CreateUserSession::ByCredentials {
            login: user::Login::new("admin").unwrap(),
            password: SecretBox::init_with(|| "secret".into()),
        })
        .await
        .unwrap();
    assert_eq!(output.user.id, admin);

    let session = service
        .execute(AuthorizeUserSession {
            token: output.token,
        })
        .await
        .unwrap();
    assert_eq!(session.user_id, admin);
}

#[tokio::test]
async fn session_rejects_wrong_credentials() {
    let (service, _, _, _) = service();

    let err = service
        .execute(CreateUserSession::ByCredentials {
            login: user::Login::new("admin").unwrap(),
            password: SecretBox::init_with(|| "wrong".into()),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_user_session::ExecutionError::WrongCredentials,
    ));
}
