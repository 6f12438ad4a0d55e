//! Display colors for agent groups.

use rand::Rng;
use std::collections::BTreeMap;

/// Assign each agent a random `#RRGGBB` color for map display.
///
/// Purely cosmetic: there is no uniqueness guarantee and no seed contract,
/// so colors vary between runs even when the partition does not.
pub fn assign(num_agents: usize) -> BTreeMap<usize, String> {
    let mut rng = rand::thread_rng();

    (0..num_agents)
        .map(|agent| {
            let rgb: u32 = rng.gen_range(0..=0xFFFFFF);
            (agent, format!("#{:06X}", rgb))
        })
        .collect()
}
