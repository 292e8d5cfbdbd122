//! Mohali / Zirakpur locations for the courier demo scenarios.
//!
//! Coordinates are approximate; tests only rely on them being distinct and
//! close together.

use scenario_router::scenario::Scenario;
use scenario_router::test_support::StubGeocoder;
use scenario_router::traits::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub const DEPOT: Location = Location::new("Dtdc Courier Service Aerocity mohali", 30.6655, 76.7390);

pub const STOPS: &[Location] = &[
    Location::new("La Palacio Luxury Banquet & Lawns", 30.6430, 76.8230),
    Location::new("Wedding Palace in Zirakpur", 30.6500, 76.8200),
    Location::new("Mahendra Chaudhary Zoological Park, Chhat Bir Zoo, Zirakpur", 30.6046, 76.7930),
    Location::new("Sharon Resort", 30.6180, 76.8050),
    Location::new("Mohali IT City Park", 30.6600, 76.7080),
    Location::new("Akm Resorts", 30.6380, 76.8290),
    Location::new("Jayant education", 30.6560, 76.8210),
    Location::new("Plaksha University", 30.6318, 76.7250),
    Location::new("Singh Sheeda Gurdwara Sahib", 30.7080, 76.7100),
    Location::new("Gurdwara Dushat Daman Durali", 30.6520, 76.6900),
    Location::new("The Amaltas Farms", 30.6100, 76.7600),
    Location::new("Radisson Hotel Chandigarh Zirakpur", 30.6470, 76.8140),
    Location::new("Amity University, Mohali", 30.6650, 76.6820),
    Location::new("Strawberry Global Smart School", 30.6700, 76.6990),
    Location::new("JLPL Falcon View", 30.6890, 76.7150),
    Location::new("Bestech Square Mall", 30.7020, 76.7060),
    Location::new("The Mohali Club || Wyndham Chandigarh Mohali", 30.7140, 76.7200),
];

/// Geocoder that resolves the depot and every stop.
pub fn mohali_geocoder() -> StubGeocoder {
    STOPS
        .iter()
        .fold(StubGeocoder::new().with(DEPOT.name, DEPOT.coordinate()), |geocoder, stop| {
            geocoder.with(stop.name, stop.coordinate())
        })
}

fn depot_round(stops: &[&str], loads: &[u32]) -> Scenario {
    Scenario::new(DEPOT.name, DEPOT.name)
        .with_stops(stops.iter().copied())
        .with_loads(loads.to_vec())
}

/// Capacitated delivery rounds, all starting and ending at the depot.
pub fn delivery_scenarios() -> Vec<Scenario> {
    vec![
        depot_round(
            &[
                "La Palacio Luxury Banquet & Lawns",
                "Wedding Palace in Zirakpur",
                "Mahendra Chaudhary Zoological Park, Chhat Bir Zoo, Zirakpur",
                "Sharon Resort",
            ],
            &[0, 4, 8, 16, 16],
        ),
        depot_round(&["Mohali IT City Park"], &[0, 3, 3]),
        depot_round(&["Akm Resorts", "Jayant education"], &[0, 1, 4, 4]),
        depot_round(
            &[
                "Plaksha University",
                "Singh Sheeda Gurdwara Sahib",
                "Gurdwara Dushat Daman Durali",
            ],
            &[0, 9, 11, 17, 17],
        ),
        depot_round(
            &["The Amaltas Farms", "Radisson Hotel Chandigarh Zirakpur"],
            &[0, 7, 12, 12],
        ),
        depot_round(&["Amity University, Mohali"], &[0, 3, 3]),
        depot_round(&["Strawberry Global Smart School"], &[0, 8, 8]),
        depot_round(&["JLPL Falcon View"], &[0, 5, 5]),
        depot_round(&[], &[0, 0]),
        depot_round(
            &["Bestech Square Mall", "The Mohali Club || Wyndham Chandigarh Mohali"],
            &[0, 5, 7, 7],
        ),
    ]
}
