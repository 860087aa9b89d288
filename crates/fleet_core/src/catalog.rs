//! Static reference data: Nairobi routes, the initial fleet, and operator
//! metadata. Coordinates are real stop locations along the corridors.

use rand::Rng;

use crate::ecs::{Operator, Seat, Vehicle, VehicleKind};
use crate::routes::{Route, Stop};

fn stop(lat: f64, lng: f64, label: &str) -> Stop {
    Stop {
        lat,
        lng,
        label: label.to_string(),
    }
}

/// The four fixed corridors served by the simulated fleet.
pub fn nairobi_routes() -> Vec<Route> {
    vec![
        Route {
            id: "route-thika-rd".to_string(),
            name: "Thika Road (Juja - CBD)".to_string(),
            color: "#3b82f6".to_string(),
            stops: vec![
                stop(-1.102554, 37.013193, "Juja (JKUAT)"),
                stop(-1.180496, 36.937229, "Kenyatta Univ (KU)"),
                stop(-1.218653, 36.887270, "Roysambu"),
                stop(-1.233824, 36.873260, "Allsops"),
                stop(-1.258525, 36.845860, "Survey"),
                stop(-1.272183, 36.832960, "Ngara"),
                stop(-1.286389, 36.817223, "CBD Archives"),
            ],
        },
        Route {
            id: "route-waiyaki".to_string(),
            name: "Waiyaki Way (Kikuyu - CBD)".to_string(),
            color: "#ef4444".to_string(),
            stops: vec![
                stop(-1.246476, 36.663185, "Kikuyu"),
                stop(-1.255959, 36.723048, "Uthiru"),
                stop(-1.261944, 36.748372, "Kangemi"),
                stop(-1.267824, 36.807865, "Westlands"),
                stop(-1.277322, 36.815340, "Museum Hill"),
                stop(-1.282928, 36.822760, "CBD Odeon"),
            ],
        },
        Route {
            id: "route-jogoo".to_string(),
            name: "Jogoo Road (Donholm - CBD)".to_string(),
            color: "#10b981".to_string(),
            stops: vec![
                stop(-1.294676, 36.872472, "Donholm"),
                stop(-1.296836, 36.852562, "Makadara"),
                stop(-1.293318, 36.840422, "City Stadium"),
                stop(-1.287114, 36.828695, "CBD Bus Station"),
            ],
        },
        Route {
            id: "route-langata".to_string(),
            name: "Langata Road (Karen - CBD)".to_string(),
            color: "#f59e0b".to_string(),
            stops: vec![
                stop(-1.324637, 36.705144, "Karen"),
                stop(-1.345862, 36.764585, "Galleria"),
                stop(-1.327598, 36.804828, "Wilson Airport"),
                stop(-1.309440, 36.812356, "Strathmore Univ"),
                stop(-1.291778, 36.826505, "CBD Railways"),
            ],
        },
    ]
}

/// Per-operator display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorInfo {
    pub color: &'static str,
    pub description: &'static str,
    pub price_per_km: f64,
}

pub fn operator_info(operator: Operator) -> OperatorInfo {
    match operator {
        Operator::SuperMetro => OperatorInfo {
            color: "#1e40af",
            description: "Reliable, clean, and disciplined.",
            price_per_km: 5.0,
        },
        Operator::Lopha => OperatorInfo {
            color: "#166534",
            description: "Fast connection for Waiyaki & Thika Rd.",
            price_per_km: 4.0,
        },
        Operator::Embassava => OperatorInfo {
            color: "#991b1b",
            description: "Serving the Eastlands community.",
            price_per_km: 3.0,
        },
        Operator::Nico => OperatorInfo {
            color: "#6b21a8",
            description: "Comfortable cross-town travels.",
            price_per_km: 4.5,
        },
        Operator::Kmo => OperatorInfo {
            color: "#b45309",
            description: "Serving Langata and Ngong routes.",
            price_per_km: 4.0,
        },
    }
}

/// Seat grid: 4 across per row, ids `1A`..`NB`, roughly 30% pre-booked.
pub fn generate_seats<R: Rng>(capacity: usize, rng: &mut R) -> Vec<Seat> {
    const COLUMNS: [char; 4] = ['A', 'B', 'C', 'D'];
    (0..capacity)
        .map(|i| Seat {
            id: format!("{}{}", i / 4 + 1, COLUMNS[i % 4]),
            booked: rng.gen_bool(0.3),
        })
        .collect()
}

struct FleetEntry {
    id: &'static str,
    plate_number: &'static str,
    operator: Operator,
    kind: VehicleKind,
    route_id: &'static str,
    current_stop_index: usize,
    progress: f64,
    capacity: usize,
    eta_minutes: u32,
    speed: f64,
}

const INITIAL_FLEET: &[FleetEntry] = &[
    FleetEntry {
        id: "v1",
        plate_number: "KCC 123A",
        operator: Operator::SuperMetro,
        kind: VehicleKind::Bus,
        route_id: "route-thika-rd",
        current_stop_index: 1,
        progress: 10.0,
        capacity: 33,
        eta_minutes: 5,
        speed: 0.5,
    },
    FleetEntry {
        id: "v2",
        plate_number: "KDA 456B",
        operator: Operator::SuperMetro,
        kind: VehicleKind::Bus,
        route_id: "route-thika-rd",
        current_stop_index: 3,
        progress: 50.0,
        capacity: 33,
        eta_minutes: 15,
        speed: 0.6,
    },
    FleetEntry {
        id: "v3",
        plate_number: "KDE 789C",
        operator: Operator::Lopha,
        kind: VehicleKind::MiniBus,
        route_id: "route-thika-rd",
        current_stop_index: 4,
        progress: 80.0,
        capacity: 14,
        eta_minutes: 25,
        speed: 0.8,
    },
    FleetEntry {
        id: "v4",
        plate_number: "KBZ 101X",
        operator: Operator::Lopha,
        kind: VehicleKind::MiniBus,
        route_id: "route-waiyaki",
        current_stop_index: 1,
        progress: 20.0,
        capacity: 14,
        eta_minutes: 8,
        speed: 0.7,
    },
    FleetEntry {
        id: "v5",
        plate_number: "KCY 202Y",
        operator: Operator::Nico,
        kind: VehicleKind::Bus,
        route_id: "route-waiyaki",
        current_stop_index: 2,
        progress: 60.0,
        capacity: 33,
        eta_minutes: 18,
        speed: 0.5,
    },
    FleetEntry {
        id: "v6",
        plate_number: "KCA 303Z",
        operator: Operator::Embassava,
        kind: VehicleKind::Bus,
        route_id: "route-jogoo",
        current_stop_index: 1,
        progress: 30.0,
        capacity: 33,
        eta_minutes: 3,
        speed: 0.6,
    },
    FleetEntry {
        id: "v7",
        plate_number: "KDG 404L",
        operator: Operator::Kmo,
        kind: VehicleKind::MiniBus,
        route_id: "route-langata",
        current_stop_index: 3,
        progress: 10.0,
        capacity: 14,
        eta_minutes: 12,
        speed: 0.7,
    },
    FleetEntry {
        id: "v8",
        plate_number: "KBB 505M",
        operator: Operator::SuperMetro,
        kind: VehicleKind::Bus,
        route_id: "route-langata",
        current_stop_index: 2,
        progress: 70.0,
        capacity: 33,
        eta_minutes: 7,
        speed: 0.5,
    },
];

/// The eight vehicles a fresh session starts with. Seat occupancy comes from
/// `rng`, so a seeded scenario reproduces the same starting fleet.
pub fn initial_fleet<R: Rng>(rng: &mut R) -> Vec<Vehicle> {
    INITIAL_FLEET
        .iter()
        .map(|entry| Vehicle {
            id: entry.id.to_string(),
            plate_number: entry.plate_number.to_string(),
            operator: entry.operator,
            kind: entry.kind,
            route_id: entry.route_id.to_string(),
            current_stop_index: entry.current_stop_index,
            progress: entry.progress,
            speed: entry.speed,
            capacity: entry.capacity,
            seats: generate_seats(entry.capacity, rng),
            eta_minutes: entry.eta_minutes,
        })
        .collect()
}
