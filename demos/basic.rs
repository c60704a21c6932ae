//! A short tour of the three binding families.

use tether::{ConstMethodBinding, FnBinding, MethodBinding};

fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

struct Thermostat {
    target: f32,
}

impl Thermostat {
    fn nudge(&mut self, by: f32) -> f32 {
        self.target += by;
        self.target
    }

    fn target(&self) -> f32 {
        self.target
    }
}

fn main() {
    // A free function, stored by value.
    let convert = FnBinding::from_function(celsius_to_fahrenheit as fn(f32) -> f32);
    println!("21C = {}F", convert.call((21.0,)));

    // A stateful closure, referenced for the duration of the binding.
    let mut samples = Vec::new();
    {
        let mut record_sample = |reading: f32| samples.push(reading);
        // SAFETY: `record_sample` never reenters the binding.
        let record: FnBinding<fn(f32)> = unsafe { FnBinding::from_closure_mut(&mut record_sample) };
        record.call((20.5,));
        record.call((21.0,));
    }
    println!("recorded {} samples", samples.len());

    // Receiver-taking functions; the receiver is supplied per call.
    let nudge = MethodBinding::from_method(Thermostat::nudge as fn(&mut Thermostat, f32) -> f32);
    let target = ConstMethodBinding::from_method(Thermostat::target as fn(&Thermostat) -> f32);

    let mut thermostat = Thermostat { target: 20.0 };
    nudge.call(&mut thermostat, (1.5,));
    println!("target is now {}C", target.call(&thermostat, ()));
}
