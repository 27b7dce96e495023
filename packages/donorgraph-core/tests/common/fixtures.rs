//! Test fixtures
//!
//! Small donation patterns with hand-checked similarity values.

use super::builders::DonationsBuilder;

/// Donors 1 and 2 both give to recipient 10 only ($100 and $50)
pub fn fixture_single_shared_recipient() -> DonationsBuilder {
    DonationsBuilder::new().give(1, 10, 100).give(2, 10, 50)
}

/// Donor 1 gives to {10, 11}, donor 2 to {11, 12}
pub fn fixture_one_of_three() -> DonationsBuilder {
    DonationsBuilder::new()
        .give(1, 10, 20)
        .give(1, 11, 20)
        .give(2, 11, 30)
        .give(2, 12, 30)
}

/// Recipient 10 received a single dollar; donors 1 and 2 share only it
pub fn fixture_one_dollar_recipient() -> DonationsBuilder {
    DonationsBuilder::new()
        .give(1, 10, 1)
        .give(1, 11, 500)
        .give(2, 10, 0)
        .give(2, 12, 400)
}

/// Six donors over five recipients, enough for several weight levels
pub fn fixture_small_cycle() -> DonationsBuilder {
    DonationsBuilder::new()
        .give(1, 100, 250)
        .give(1, 101, 250)
        .give(1, 102, 100)
        .give(2, 100, 50)
        .give(2, 101, 75)
        .give(3, 101, 1000)
        .give(3, 103, 20)
        .give(4, 102, 10)
        .give(4, 103, 10)
        .give(4, 104, 10)
        .give(5, 104, 300)
        .give(5, 100, 5)
        .give(6, 103, 60)
}

/// Deterministic pseudo-random donations (xorshift), for larger inputs
pub fn fixture_generated(donors: u32, recipients: u32, per_donor: u32, seed: u64) -> DonationsBuilder {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut builder = DonationsBuilder::new();
    for d in 0..donors {
        for _ in 0..per_donor {
            let r = donors + (next() % recipients as u64) as u32;
            let amount = 1 + (next() % 1000) as i64;
            builder = builder.give(d, r, amount);
        }
    }
    builder
}
