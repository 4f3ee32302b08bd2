//! Demo seed data for local development.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use teller_ledger::{Account, AccountStore, Pin};
use teller_shared::AccountId;

/// Fixed id of the first demo account (consistent across restarts).
const DEMO_ALICE_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Fixed id of the second demo account.
const DEMO_BOB_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Loads two demo accounts into an empty store.
///
/// A store that already holds accounts is left untouched, so restarts and
/// test harnesses never double-seed.
pub fn load_demo_accounts(store: &AccountStore) -> Result<()> {
    if store.count() > 0 {
        info!("Account store already populated, skipping demo seed");
        return Ok(());
    }

    let demo = [
        (DEMO_ALICE_ID, "Alice Example", "1234", Decimal::new(100_000, 2)),
        (DEMO_BOB_ID, "Bob Example", "5678", Decimal::new(200_000, 2)),
    ];

    for (id, owner_name, pin, balance) in demo {
        let account = Account {
            id: AccountId::from_uuid(Uuid::parse_str(id)?),
            owner_name: owner_name.to_string(),
            pin: Pin::parse(pin)?,
            balance,
            created_at: Utc::now(),
        };

        info!(
            account_id = %account.id,
            owner = %account.owner_name,
            balance = %account.balance,
            "Seeded demo account"
        );
        store.put(account);
    }

    Ok(())
}
