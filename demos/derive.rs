//! Example demonstrating the #[derive(Component)] macro
//!
//! Run with:
//!   cargo run --example derive --features derive

use ioc_container::{Component, Container, HookResult, Lifecycle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

trait Database: Send + Sync {
    fn url(&self) -> &str;
}

// Dependencies
#[derive(Component)]
#[component(expose = "dyn Database")]
struct Postgres {
    url: String,
}

impl Database for Postgres {
    fn url(&self) -> &str {
        if self.url.is_empty() {
            "postgres://localhost:5432/myapp"
        } else {
            &self.url
        }
    }
}

impl Lifecycle for Postgres {
    fn pre_destroy(&self) -> HookResult {
        println!("  [App] Closing {}", self.url());
        Ok(())
    }
}

#[derive(Component)]
struct Cache;

impl Lifecycle for Cache {}

// Component with injected dependencies
#[derive(Component)]
struct UserService {
    #[inject(name = "postgres")]
    db: Arc<dyn Database>,
    #[inject]
    cache: Arc<Cache>,
    // Non-injected field uses Default
    request_count: AtomicU64,
}

impl Lifecycle for UserService {
    fn post_construct(&self) -> HookResult {
        println!("  [App] UserService ready on {}", self.db.url());
        Ok(())
    }
}

impl UserService {
    fn describe(&self) -> String {
        let _ = &self.cache;
        format!(
            "UserService connected to {} (requests: {})",
            self.db.url(),
            self.request_count.fetch_add(1, Ordering::SeqCst)
        )
    }
}

fn main() {
    println!("=== IoC Container Derive Macro Demo ===\n");

    let mut container = Container::new();
    container.register::<Postgres>().expect("postgres");
    container.register::<Cache>().expect("cache");
    container.register::<UserService>().expect("user service");

    let users = container.lookup::<UserService>().expect("user service");
    println!("  {}", users.describe());
    println!("  {}", users.describe());

    println!();
    container.log();

    println!();
    container.stop();

    println!("\n=== Demo Complete ===");
    println!("\nThe #[derive(Component)] macro generated a constructor that:");
    println!("  - Resolves #[inject] fields by field name (or #[inject(name = ...)]) and type");
    println!("  - Uses Default::default() for non-injected fields");
    println!("  - Exposes the types listed in #[component(expose = ...)]");
}
