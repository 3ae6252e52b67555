//! Random, related rows for local development.
//!
//! Every iteration seeds one chain: a travel, a user with its main customer,
//! a stay on that travel, up to four companions bound to the stay together
//! with the main customer, then a hotel and a plane booking held by the main
//! customer. Iterations run concurrently and share nothing but the pool.

use chrono::{Days, NaiveDate, Utc};
use fake::faker::address::en::CityName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;
use sqlx::PgPool;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::http_error::AppError;
use crate::plugins::auth::api_key::key_from_uuid;
use crate::plugins::customers::models::CustomerCreate;
use crate::plugins::customers::repo::{clear_customers, insert_customer};
use crate::plugins::stays::models::StayCreate;
use crate::plugins::stays::repo::{bind_customers, bind_hotel_booking, bind_plane_booking, insert_stay};
use crate::plugins::travels::models::TravelCreate;
use crate::plugins::travels::repo::{clear_travels, insert_travel};
use crate::plugins::users::repo::{clear_users, insert_user};

/// Password of every seeded user.
pub const FIXTURE_PASSWORD: &str = "1234";

const BOARD_TYPES: [&str; 2] = ["half-stay", "all-inclusive"];
const MAX_COMPANIONS: usize = 4;

/// Ids written by one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededChain {
    pub id_travel: i32,
    pub id_user: i32,
    pub api_key: String,
    pub id_customer: i32,
    pub id_stay: i32,
    pub companions: Vec<i32>,
    pub hotel_booking: String,
    pub plane_booking: String,
}

#[derive(Debug, Clone)]
struct Person {
    firstname: String,
    lastname: String,
    birthdate: NaiveDate,
}

/// Everything random about a chain, drawn up front so no RNG lives across an
/// await point.
#[derive(Debug, Clone)]
struct ChainPlan {
    travel: TravelCreate,
    email: String,
    main: Person,
    start_at: NaiveDate,
    end_at: NaiveDate,
    companions: Vec<Person>,
    hotel_booking: String,
    plane_booking: String,
}

fn random_person<R: Rng>(rng: &mut R) -> Person {
    let year = rng.random_range(1950..=2005);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=28);
    Person {
        firstname: FirstName().fake_with_rng(rng),
        lastname: LastName().fake_with_rng(rng),
        birthdate: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}

fn booking_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

fn plan_chain<R: Rng>(rng: &mut R, index: usize, today: NaiveDate) -> ChainPlan {
    let travel = TravelCreate {
        destination: CityName().fake_with_rng(rng),
        id_hotel: rng.random_range(1..=500),
        board_type: BOARD_TYPES[rng.random_range(0..BOARD_TYPES.len())].to_string(),
        margin: rng.random_range(1..=20),
        reduction: rng.random_range(1..=10),
    };

    let email: String = SafeEmail().fake_with_rng(rng);
    let start_at = today + Days::new(rng.random_range(1..=60));
    let end_at = start_at + Days::new(rng.random_range(1..=20));
    let companion_count = rng.random_range(0..=MAX_COMPANIONS);

    ChainPlan {
        travel,
        // Prefixed so concurrent iterations never collide on the unique email.
        email: format!("{index}.{}.{email}", Uuid::new_v4().simple()),
        main: random_person(rng),
        start_at,
        end_at,
        companions: (0..companion_count).map(|_| random_person(rng)).collect(),
        hotel_booking: booking_id("HB"),
        plane_booking: booking_id("PB"),
    }
}

async fn seed_chain(pool: PgPool, plan: ChainPlan) -> Result<SeededChain, AppError> {
    let id_travel = insert_travel(&pool, &plan.travel).await?;
    let (id_user, uuid) = insert_user(&pool, &plan.email, FIXTURE_PASSWORD).await?;

    let main = CustomerCreate {
        firstname: plan.main.firstname,
        lastname: plan.main.lastname,
        birthdate: plan.main.birthdate,
        email: Some(plan.email.clone()),
        is_companion: false,
        id_user: Some(id_user),
    };
    let id_customer = insert_customer(&pool, &main).await?;

    let stay = StayCreate { id_travel, start_at: plan.start_at, end_at: plan.end_at, id_main_customer: id_customer };
    let id_stay = insert_stay(&pool, &stay).await?;

    let mut companions = Vec::with_capacity(plan.companions.len());
    for person in plan.companions {
        let companion = CustomerCreate {
            firstname: person.firstname,
            lastname: person.lastname,
            birthdate: person.birthdate,
            email: None,
            is_companion: true,
            id_user: None,
        };
        companions.push(insert_customer(&pool, &companion).await?);
    }

    let mut travellers = companions.clone();
    travellers.push(id_customer);
    bind_customers(&pool, id_stay, &travellers).await?;

    let hotel_booking = bind_hotel_booking(&pool, id_customer, &plan.hotel_booking).await?;
    let plane_booking = bind_plane_booking(&pool, id_customer, &plan.plane_booking).await?;

    Ok(SeededChain {
        id_travel,
        id_user,
        api_key: key_from_uuid(uuid),
        id_customer,
        id_stay,
        companions,
        hotel_booking,
        plane_booking,
    })
}

/// Seeds `count` chains concurrently and waits for all of them. Fails with the
/// first error once every iteration has finished.
pub async fn seed(pool: &PgPool, count: usize) -> anyhow::Result<Vec<SeededChain>> {
    let today = Utc::now().date_naive();
    let plans: Vec<ChainPlan> = {
        let mut rng = rand::rng();
        (0..count).map(|index| plan_chain(&mut rng, index, today)).collect()
    };

    let mut set = JoinSet::new();
    for plan in plans {
        set.spawn(seed_chain(pool.clone(), plan));
    }

    let mut seeded = Vec::with_capacity(count);
    let mut first_error: Option<anyhow::Error> = None;
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Ok(chain)) => {
                tracing::info!(
                    id_user = chain.id_user,
                    id_customer = chain.id_customer,
                    id_stay = chain.id_stay,
                    companions = chain.companions.len(),
                    api_key = %chain.api_key,
                    "seeded chain"
                );
                seeded.push(chain);
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "fixture iteration failed");
                first_error.get_or_insert(e.into());
            }
            Err(e) => {
                tracing::error!(error = %e, "fixture task panicked");
                first_error.get_or_insert(e.into());
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(seeded),
    }
}

/// Deletes every seeded row. Stays, stay members and bookings go with their
/// customers.
pub async fn clear(pool: &PgPool) -> anyhow::Result<()> {
    let customers = clear_customers(pool).await?;
    let travels = clear_travels(pool).await?;
    let users = clear_users(pool).await?;
    tracing::info!(customers, travels, users, "cleared fixtures");
    Ok(())
}
