mod structural;

use allotment::feasibility::{Capacities, Request};

pub fn capacities(entries: &[(&str, f64)]) -> Capacities {
    Capacities::new(entries.iter().copied())
}

pub fn request(entries: &[(&str, f64)]) -> Request {
    Request::new(entries.iter().copied())
}
