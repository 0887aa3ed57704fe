//! Demo data seeding
//!
//! Creates two organizations, ten users spread across them and twenty
//! orders placed by those users, all with random but valid values.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::organization::NewOrganization;
use crate::models::order::NewOrder;
use crate::models::responses::{SeededOrganization, SeededUser};
use crate::models::user::NewUser;
use crate::models::SeedResponse;
use crate::repository::Database;

const ORGANIZATIONS: usize = 2;
const USERS: usize = 10;
const ORDERS: usize = 20;
/// Fresh emails drawn for one user before the seed gives up.
const EMAIL_ATTEMPTS: usize = 32;

const INDUSTRIES: [&str; 3] = ["IT", "Transport", "Package Provider"];
const FIRST_NAMES: [&str; 10] = [
    "Alex", "Jamie", "Taylor", "Jordan", "Casey", "Riley", "Morgan", "Avery", "Parker", "Reese",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Brown", "O'Neil", "Garcia", "Davis", "Miller", "Wilson", "Moore",
    "Taylor",
];

struct UserPlan {
    first_name: &'static str,
    last_name: &'static str,
    email: String,
    organization: usize,
}

struct OrderPlan {
    user: usize,
    order_date: DateTime<Utc>,
    total_amount: f64,
}

/// Random choices made up front so no RNG is held across an await.
struct SeedPlan {
    organizations: Vec<NewOrganization>,
    users: Vec<UserPlan>,
    orders: Vec<OrderPlan>,
}

/// A moment between one and `days_back` days ago, at a random time of day.
fn random_past_date(rng: &mut impl Rng, days_back: i64) -> DateTime<Utc> {
    let days = rng.random_range(1..=days_back.max(1));
    let date = Utc::now() - Duration::days(days);
    date.with_hour(rng.random_range(0..24))
        .and_then(|d| d.with_minute(rng.random_range(0..60)))
        .and_then(|d| d.with_second(rng.random_range(0..60)))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(date)
}

fn random_email(rng: &mut impl Rng, first_name: &str, last_name: &str) -> String {
    format!(
        "{}.{}{}@yopmail.com",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        rng.random_range(100..=999)
    )
}

/// Whole cents between `min` and `max`.
fn random_amount(rng: &mut impl Rng, min: u32, max: u32) -> f64 {
    f64::from(rng.random_range(min * 100..=max * 100)) / 100.0
}

fn plan() -> SeedPlan {
    let mut rng = rand::rng();

    let organizations = (0..ORGANIZATIONS)
        .map(|_| NewOrganization {
            name: format!("OneRail{:06}", rng.random_range(100_000..=999_999)),
            industry: Some(INDUSTRIES[rng.random_range(0..INDUSTRIES.len())].to_string()),
            date_founded: Some(random_past_date(&mut rng, 365 * 10)),
        })
        .collect();

    let mut emails = HashSet::new();
    let mut users = Vec::with_capacity(USERS);
    while users.len() < USERS {
        let first_name = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
        let last_name = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
        let email = random_email(&mut rng, first_name, last_name);
        if !emails.insert(email.clone()) {
            continue;
        }
        users.push(UserPlan {
            first_name,
            last_name,
            email,
            organization: rng.random_range(0..ORGANIZATIONS),
        });
    }

    let orders = (0..ORDERS)
        .map(|_| OrderPlan {
            user: rng.random_range(0..USERS),
            order_date: random_past_date(&mut rng, 365),
            total_amount: random_amount(&mut rng, 10, 1000),
        })
        .collect();

    SeedPlan {
        organizations,
        users,
        orders,
    }
}

/// Emails are unique across the whole table, not just this run: an email
/// already stored by an earlier seed is redrawn.
pub async fn seed(db: &Database) -> Result<SeedResponse, StoreError> {
    let plan = plan();

    let mut organizations = Vec::with_capacity(plan.organizations.len());
    for input in plan.organizations {
        organizations.push(db.create_organization(input).await);
    }

    let mut users: Vec<(Uuid, String, Uuid)> = Vec::with_capacity(plan.users.len());
    for user in plan.users {
        let organization_id = organizations[user.organization].id;
        let mut email = user.email;
        let mut attempts = 1;
        let created = loop {
            let input = NewUser {
                first_name: user.first_name.to_string(),
                last_name: user.last_name.to_string(),
                email: email.clone(),
                date_created: Some(Utc::now()),
                organization_id,
            };
            match db.create_user(input).await {
                Ok(created) => break created,
                Err(err) if attempts >= EMAIL_ATTEMPTS => return Err(err),
                Err(_) => {
                    debug!(email = %email, "Seed email taken, drawing another");
                    email = random_email(&mut rand::rng(), user.first_name, user.last_name);
                    attempts += 1;
                }
            }
        };
        users.push((created.id, created.email, created.organization_id));
    }

    let mut orders = Vec::with_capacity(plan.orders.len());
    for order in plan.orders {
        let (user_id, _, organization_id) = &users[order.user];
        let created = db
            .create_order(NewOrder {
                order_date: order.order_date,
                total_amount: order.total_amount,
                user_id: *user_id,
                organization_id: *organization_id,
            })
            .await;
        orders.push(created.id);
    }

    let organizations: Vec<SeededOrganization> = organizations
        .into_iter()
        .map(|organization| SeededOrganization {
            user_count: users
                .iter()
                .filter(|(_, _, org)| *org == organization.id)
                .count(),
            name: organization.name,
        })
        .collect();

    info!(
        organizations = organizations.len(),
        users = users.len(),
        orders = orders.len(),
        "Seed completed"
    );

    Ok(SeedResponse {
        organizations,
        users: users
            .into_iter()
            .map(|(id, email, _)| SeededUser { id, email })
            .collect(),
        orders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderFilter;
    use crate::models::PaginationParams;

    #[test]
    fn test_random_values_in_range() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let amount = random_amount(&mut rng, 10, 1000);
            assert!((10.0..=1000.0).contains(&amount));
            assert!(random_past_date(&mut rng, 365) < Utc::now());
        }
    }

    #[tokio::test]
    async fn test_seed_counts_and_consistency() {
        let db = Database::new();
        let response = seed(&db).await.unwrap();

        assert_eq!(response.organizations.len(), ORGANIZATIONS);
        assert_eq!(response.users.len(), USERS);
        assert_eq!(response.orders.len(), ORDERS);
        let counted: usize = response.organizations.iter().map(|o| o.user_count).sum();
        assert_eq!(counted, USERS);

        let params = PaginationParams {
            page: None,
            limit: Some(100),
        };
        let orders = db.list_orders(params, &OrderFilter::default()).await;
        assert_eq!(orders.total, ORDERS);
        for order in orders.data {
            let user = db.get_user(order.user_id).await.unwrap();
            assert_eq!(user.organization_id, order.organization_id);
            assert!(order.total_amount > 0.0);
        }

        for seeded in &response.users {
            assert!(seeded.email.ends_with("@yopmail.com"));
            assert!(db.find_user_by_email(&seeded.email).await.is_some());
        }
    }

    #[tokio::test]
    async fn test_repeated_seeds_keep_emails_unique() {
        let db = Database::new();
        for _ in 0..100 {
            seed(&db).await.unwrap();
        }

        let mut emails = HashSet::new();
        let mut page = 1;
        loop {
            let params = PaginationParams {
                page: Some(page),
                limit: Some(100),
            };
            let users = db.list_users(params).await;
            for user in &users.data {
                assert!(emails.insert(user.email.clone()), "{} stored twice", user.email);
            }
            if users.data.is_empty() {
                break;
            }
            page += 1;
        }
        assert_eq!(emails.len(), 100 * USERS);
    }
}
