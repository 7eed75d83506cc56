/// Seat shuffler, the only source of randomness in the engine.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::schema::role::{Assignment, RolePool};

/// Deal `pool` into seats 1..=N in a uniformly random order.
///
/// The caller supplies the random source; pass a seeded `StdRng` for
/// reproducible deals.
pub fn shuffle_seats<R: Rng + ?Sized>(pool: RolePool, rng: &mut R) -> Vec<Assignment> {
    let mut roles = pool.into_roles();
    roles.shuffle(rng);
    roles
        .into_iter()
        .zip(1u32..)
        .map(|(role, seat)| Assignment {
            seat,
            role: role.name,
            team: role.team,
        })
        .collect()
}
