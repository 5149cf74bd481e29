#![no_main]

//! Fuzz target for registration, lookup and shutdown sequences
//!
//! Checks the singleton invariant, the by-type/by-name resolution rules and
//! that `stop` runs each pre-destroy hook once, in registration order.

use arbitrary::Arbitrary;
use ioc_container::prelude::*;
use libfuzzer_sys::fuzz_target;
use std::sync::Mutex;

/// Shutdown journal shared by every instance
static STOPPED: Mutex<Vec<String>> = Mutex::new(Vec::new());

trait Shape: Send + Sync {
    fn sides(&self) -> u8;
}

/// Pre-built instance with a shape view
struct Tile {
    sides: u8,
    label: String,
    fail: bool,
}

impl Shape for Tile {
    fn sides(&self) -> u8 {
        self.sides
    }
}

impl Lifecycle for Tile {
    fn pre_destroy(&self) -> HookResult {
        STOPPED.lock().unwrap().push(self.label.clone());
        if self.fail {
            return Err("tile refused".into());
        }
        Ok(())
    }
}

impl Managed for Tile {
    fn expose(views: &mut Views<Self>) {
        views.expose::<dyn Shape>(|tile| tile);
    }
}

/// Component depending on a shape bound to "board"
struct Board {
    shape: Arc<dyn Shape>,
}

impl Lifecycle for Board {}
impl Managed for Board {}
impl Component for Board {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::builder()
            .param::<dyn Shape>("board")
            .build(|args| Ok(Board { shape: args.next()? }))]
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    RegisterTile { slot: u8, sides: u8, fail: bool },
    RegisterBoard,
    LookupShape,
    LookupShapeNamed { slot: u8 },
    LookupBoardTwice,
    Log,
}

fn slot_name(slot: u8) -> String {
    if slot % 5 == 0 {
        "board".to_string()
    } else {
        format!("tile{}", slot % 5)
    }
}

fuzz_target!(|ops: Vec<Op>| {
    STOPPED.lock().unwrap().clear();

    let mut container = Container::new();
    // Names in registration order, mirroring the container's ordering rules
    let mut order: Vec<String> = Vec::new();
    let mut failing = 0usize;

    for op in ops.into_iter().take(64) {
        match op {
            Op::RegisterTile { slot, sides, fail } => {
                let name = slot_name(slot);
                if !order.contains(&name) {
                    order.push(name.clone());
                }
                container.register_instance(
                    name.clone(),
                    Tile {
                        sides,
                        label: name,
                        fail,
                    },
                );
            }
            Op::RegisterBoard => {
                let shapes = order.iter().filter(|n| n.as_str() != "boardcomponent").count();
                let result = container.register_as::<Board>("boardcomponent");
                if result.is_ok() && !order.iter().any(|n| n == "boardcomponent") {
                    order.push("boardcomponent".to_string());
                }
                if shapes == 0 {
                    assert!(result.is_err());
                }
            }
            Op::LookupShape => {
                let shapes = order.iter().filter(|n| n.as_str() != "boardcomponent").count();
                let result = container.lookup::<dyn Shape>();
                assert_eq!(result.is_ok(), shapes == 1);
            }
            Op::LookupShapeNamed { slot } => {
                let name = slot_name(slot);
                let shapes = order.iter().filter(|n| n.as_str() != "boardcomponent").count();
                let result = container.lookup_named::<dyn Shape>(&name);
                if shapes == 1 || order.contains(&name) {
                    assert!(result.is_ok());
                } else {
                    assert!(result.is_err());
                }
            }
            Op::LookupBoardTwice => {
                if let (Ok(a), Ok(b)) = (container.lookup::<Board>(), container.lookup::<Board>()) {
                    assert!(Arc::ptr_eq(&a, &b));
                    let _ = a.shape.sides();
                }
            }
            Op::Log => {
                let mut out = Vec::new();
                container.write_log(&mut out).unwrap();
                assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), container.len());
            }
        }
    }

    assert_eq!(container.names(), order);

    container.stop_to(&mut std::io::sink());
    let stopped = STOPPED.lock().unwrap().clone();
    let tiles: Vec<String> = order.into_iter().filter(|n| n != "boardcomponent").collect();
    assert_eq!(stopped, tiles);

    for failure in container.hook_failures() {
        failing += 1;
        assert!(tiles.contains(&failure.name));
    }
    assert!(failing <= tiles.len());
});
