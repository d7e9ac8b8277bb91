mod distributor;
mod monitor;
mod pending;
mod throttle;

use crate::generator::{Binding, Constant, Generator};

pub(crate) fn constant(v: f64) -> Box<dyn Generator> {
    Box::new(Constant::new(v).expect("valid constant"))
}

pub(crate) fn rule(source: &str, cooldown: f64, next: &str) -> Binding {
    Binding::for_source(source, constant(cooldown), Some(next.to_string()))
}

pub(crate) fn wildcard(cooldown: f64, next: &str) -> Binding {
    Binding::new(constant(cooldown), Some(next.to_string()))
}

pub(crate) fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
