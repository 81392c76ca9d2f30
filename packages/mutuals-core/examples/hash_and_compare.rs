//! # Contact Discovery Demo
//!
//! This example walks two users through a full discovery round:
//! 1. Each side hashes its own address book on-device
//! 2. The sides swap hash text
//! 3. Each side intersects the other's hashes with its own
//!
//! ## Run
//!
//! ```bash
//! cargo run --example hash_and_compare
//! ```

use mutuals_core::contacts::{ContactRecord, MemoryContactSource};
use mutuals_core::discovery::{DiscoveryConfig, DiscoveryService, DiscoverySession, SessionState};
use mutuals_core::matching::match_hashes;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=================================================");
    println!("          MUTUALS CONTACT DISCOVERY DEMO");
    println!("=================================================\n");

    // =========================================================================
    // STEP 1: Hash Alice's address book
    // =========================================================================
    println!("1. Hashing Alice's contacts...\n");

    let alice_contacts = MemoryContactSource::new(vec![
        ContactRecord::new(["+1 (555) 123-4567"], ["carol@example.com"]),
        ContactRecord::new(["555.000.1111"], Vec::<String>::new()),
    ]);
    let mut alice = DiscoverySession::new(DiscoveryService::new(
        alice_contacts,
        DiscoveryConfig::default(),
    ));

    match alice.start().await {
        SessionState::Ready { count } => println!("   Alice has {} unique hashes", count),
        other => {
            println!("   Alice could not hash contacts: {:?}", other);
            return;
        }
    }
    println!();

    // =========================================================================
    // STEP 2: Hash Bob's address book
    // =========================================================================
    println!("2. Hashing Bob's contacts...\n");

    let bob = DiscoveryService::new(
        MemoryContactSource::new(vec![
            ContactRecord::new(["15551234567"], Vec::<String>::new()),
            ContactRecord::new(Vec::<String>::new(), ["  Carol@Example.COM "]),
            ContactRecord::new(["555 999 0000"], ["dave@example.com"]),
        ]),
        DiscoveryConfig::default(),
    );
    let bob_set = match bob.hash_contacts().await {
        Ok(set) => set,
        Err(e) => {
            println!("   Bob could not hash contacts: {}", e);
            return;
        }
    };
    let bob_text = bob_set.to_text();

    println!("   Bob shares {} hashes:", bob_set.len());
    for line in bob_text.lines() {
        println!("     - {}", line);
    }
    println!();

    // =========================================================================
    // STEP 3: Compare
    // =========================================================================
    println!("3. Comparing...\n");

    if let Some(result) = alice.compare(&bob_text) {
        println!("   Matches Found: {}", result.count);
        for hash in &result.matched_hashes {
            println!("     - {}", hash);
        }
    }

    if let Some(alice_set) = alice.local_hashes() {
        let reverse = match_hashes(&bob_set, &alice_set.to_text());
        println!("   Bob sees the same {} matches", reverse.count);
    }

    println!("\n=================================================");
    println!("                 DEMO COMPLETE");
    println!("=================================================");
}
