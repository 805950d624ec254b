//! Seed the local aggregate with demo data.
//!
//! Goes through the regular services rather than raw inserts, so every
//! write obeys the same validation the windows use. Re-running against an
//! already seeded aggregate skips the accounts that exist.

use tracing::info;

use campus_canteen_admin::{MenuService, StoreProfileService};
use campus_canteen_core::{CampusLocation, Price};
use campus_canteen_datastore::{ChangeNotifier, DataStore};
use campus_canteen_storefront::{AuthError, AuthService};

struct MerchantSeed {
    username: &'static str,
    password: &'static str,
    store_name: &'static str,
    location: CampusLocation,
    description: &'static str,
    dishes: &'static [(&'static str, i64, &'static str)],
}

const MERCHANTS: &[MerchantSeed] = &[
    MerchantSeed {
        username: "laowang",
        password: "wang123",
        store_name: "Wang's Braised Pork",
        location: CampusLocation::Xingan,
        description: "Slow-cooked braised pork over rice, every day since 2009.",
        dishes: &[
            ("braised pork rice", 1500, "house special, extra sauce"),
            ("tea egg", 300, "steeped overnight"),
            ("seaweed soup", 500, "free refills"),
        ],
    },
    MerchantSeed {
        username: "auntie_min",
        password: "noodles",
        store_name: "Auntie Min's Noodles",
        location: CampusLocation::Shanbei,
        description: "Hand-pulled noodles, numbing and hot.",
        dishes: &[
            ("dan dan noodles", 1200, "classic sichuan heat"),
            ("cold sesame noodles", 1000, "summer favourite"),
        ],
    },
];

const STUDENTS: &[(&str, &str)] = &[("alice", "alice123"), ("bob", "bob123")];

/// Seed demo accounts, stores, and dishes.
pub fn run(store: &DataStore, notifier: &ChangeNotifier) -> Result<(), Box<dyn std::error::Error>> {
    let auth = AuthService::new(store);
    let profiles = StoreProfileService::new(store, notifier);
    let menu = MenuService::new(store, notifier);

    for seed in MERCHANTS {
        let merchant = match auth.register(seed.username, seed.password, true) {
            Ok(user) => user,
            Err(AuthError::UsernameTaken) => {
                info!(username = seed.username, "merchant already seeded, skipping");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        profiles.create_store(merchant.id, seed.store_name, seed.location, seed.description)?;
        for (name, price, description) in seed.dishes {
            menu.add_dish(
                merchant.id,
                name,
                Price::from_minor_units(*price),
                description,
            )?;
        }
        info!(
            username = seed.username,
            store = seed.store_name,
            dishes = seed.dishes.len(),
            "merchant seeded"
        );
    }

    for (username, password) in STUDENTS {
        match auth.register(username, password, false) {
            Ok(_) => info!(username, "student seeded"),
            Err(AuthError::UsernameTaken) => {
                info!(username, "student already seeded, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
