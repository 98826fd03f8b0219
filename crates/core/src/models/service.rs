use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: u32,
    pub price_cents: i64,
    pub description: String,
}

impl Service {
    fn new(id: &str, name: &str, duration_minutes: u32, price_cents: i64, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            duration_minutes,
            price_cents,
            description: description.to_string(),
        }
    }
}

/// The services offered by the salon. Static for the lifetime of the process.
pub fn default_catalog() -> Vec<Service> {
    vec![
        Service::new(
            "1",
            "Fiber Placement",
            180,
            20_000,
            "Premium fiberglass extension for maximum strength and a natural look.",
        ),
        Service::new(
            "2",
            "Fiber Maintenance",
            120,
            13_000,
            "Refill and care of fiber nails to keep their structure and shine.",
        ),
        Service::new(
            "3",
            "Gel on Natural Nail",
            120,
            15_000,
            "Gel reinforcement over the natural nail to prevent breakage.",
        ),
        Service::new(
            "4",
            "Semi-permanent Polish",
            60,
            8_000,
            "Long-lasting color for up to 21 days with a mirror finish.",
        ),
    ]
}

pub fn find_service<'a>(catalog: &'a [Service], id: &str) -> Option<&'a Service> {
    catalog.iter().find(|service| service.id == id)
}
