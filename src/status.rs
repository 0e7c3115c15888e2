use crate::model::SizeClass;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotStatus {
    pub id: u32,
    pub capacity: SizeClass,
    pub occupied: bool,
    pub plate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorStatus {
    pub number: u32,
    pub spots: Vec<SpotStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotStatus {
    pub floors: Vec<FloorStatus>,
    pub active_tickets: usize,
    pub free_spots: usize,
}

impl LotStatus {
    #[must_use]
    pub fn total_spots(&self) -> usize {
        self.floors.iter().map(|f| f.spots.len()).sum()
    }
}
