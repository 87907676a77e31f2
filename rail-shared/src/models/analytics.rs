use serde::{Deserialize, Serialize};

use super::reservation::Section;

/// Occupancy of a single section at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOccupancy {
    pub section: Section,
    pub occupied: u32,
    pub capacity: u32,
}

/// Point-in-time view of sales and seat usage across the train
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    pub total_tickets: u32,
    pub total_tickets_sold: u32,
    pub total_tickets_available: u32,
    pub total_revenue: f64,
    pub sections: Vec<SectionOccupancy>,
}

impl OccupancySnapshot {
    pub fn occupancy_of(&self, section: &str) -> Option<u32> {
        self.sections
            .iter()
            .find(|s| s.section.as_str() == section)
            .map(|s| s.occupied)
    }
}
