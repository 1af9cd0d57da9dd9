//! Loot table: weighted draws with replacement vs. a hand of distinct cards.
//!
//! With replacement, observed frequencies converge on `weight / total`.
//! Without replacement, each pick leaves the table, so rare entries show up sooner.

use std::collections::BTreeMap;

use tirage::Sampler;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = [
        ("common", 60),
        ("uncommon", 30),
        ("rare", 9),
        ("legendary", 1),
    ];

    let mut loot = Sampler::new_non_uniform(table)?.with_seed(7);
    let draws = 10_000;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in loot.sample_n(draws)? {
        *counts.entry(item).or_default() += 1;
    }

    println!("{draws} draws with replacement:");
    for (item, count) in &counts {
        println!(
            "  {item:<10} observed={:.4}  expected={:.4}",
            *count as f64 / draws as f64,
            loot.probability_of(item)
        );
    }
    println!();

    let mut hand = loot.clone();
    println!("three distinct picks: {:?}", hand.sample_unique(3)?);
    println!("left in the table:    {:?}", hand.all_values());

    let mut dice = Sampler::new_uniform(1..=6)?.with_seed(7);
    println!("five d6 rolls:        {:?}", dice.sample_n(5)?);

    Ok(())
}
