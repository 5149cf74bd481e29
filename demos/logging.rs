//! Example demonstrating logging capabilities
//!
//! Run with JSON logging (production):
//! ```bash
//! cargo run --example logging --features logging-json
//! ```
//!
//! Run with pretty logging (development):
//! ```bash
//! cargo run --example logging --features logging-pretty
//! ```

use ioc_container::prelude::*;

// Example components
struct Settings {
    url: &'static str,
}

impl Lifecycle for Settings {}
impl Managed for Settings {}
impl Component for Settings {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::new(|| Settings {
            url: "postgres://localhost/mydb",
        })]
    }
}

struct Pool {
    settings: Arc<Settings>,
}

impl Lifecycle for Pool {
    fn post_construct(&self) -> HookResult {
        println!("  [App] Opening pool to {}", self.settings.url);
        Ok(())
    }

    fn pre_destroy(&self) -> HookResult {
        // Fails on purpose: the container logs it and keeps stopping
        Err("pool still has checked-out connections".into())
    }
}

impl Managed for Pool {}
impl Component for Pool {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::builder()
            .param::<Settings>("settings")
            .build(|args| Ok(Pool { settings: args.next()? }))]
    }
}

struct RequestCounter;

impl Lifecycle for RequestCounter {
    fn pre_destroy(&self) -> HookResult {
        println!("  [App] Flushing request counter");
        Ok(())
    }
}

impl Managed for RequestCounter {}

fn main() {
    // Initialize logging - uses JSON if logging-json feature enabled,
    // pretty otherwise
    ioc_container::logging::init();

    println!("=== IoC Container Logging Demo ===\n");

    // Create the container (logs: "Creating new IoC container")
    let mut container = Container::new();

    // Register components (logs: "Registering component", "Resolving constructor argument")
    container.register::<Settings>().expect("settings");
    container.register::<Pool>().expect("pool");

    // Register a pre-built instance (logs: "Registering instance")
    container.register_instance("requests", RequestCounter);

    // Resolve (logs: "Instance resolved")
    let _pool = container.lookup::<Pool>().expect("pool");

    // Miss (logs: "Instance not found")
    assert!(container.try_lookup::<String>().is_none());

    println!("\nRegistered entries:");
    container.log();

    // Shut down (logs: "Stopping IoC container", then a hook failure warning)
    println!();
    container.stop();

    for failure in container.hook_failures() {
        println!("  [App] {}", failure);
    }

    println!("\n=== Demo Complete ===");
    println!("\nTip: Use --features logging-json for production (JSON output)");
    println!("     Use --features logging-pretty for development (colorful output)");
}
