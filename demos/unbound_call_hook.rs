//! Installing an unbound-call observer.
//!
//! The observer is the policy point for direct calls on unbound bindings:
//! it sees the condition first, and the call then panics. The total call
//! forms never involve it.

use tether::{MethodBinding, UnboundCall, hooks};

struct Motor {
    rpm: u32,
}

impl Motor {
    #[allow(dead_code)]
    fn throttle(&mut self, delta: u32) -> u32 {
        self.rpm += delta;
        self.rpm
    }
}

fn report(condition: &UnboundCall) {
    eprintln!("observer saw: {condition}");
}

fn main() {
    hooks::set_unbound_call_hook(report);

    let binding = MethodBinding::<fn(&mut Motor, u32) -> u32>::unbound();
    let mut motor = Motor { rpm: 0 };

    // The total forms report through their return value instead.
    assert_eq!(binding.call_if(&mut motor, (100,)), None);
    assert_eq!(binding.call_or_else(|(delta,)| delta, &mut motor, (100,)), 100);

    // A direct call hands the condition to the observer, then panics.
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        binding.call(&mut motor, (100,))
    }));
    assert!(outcome.is_err());
    println!("direct call panicked after reporting; rpm is still {}", motor.rpm);
}
