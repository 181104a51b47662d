//! Static demo content shown on the dashboard.

use serde_json::json;

use crate::patient::PatientRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatEntry {
    /// Matches the id of the anchor the card is placed at.
    pub id: &'static str,
    pub title: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry {
    pub id: u32,
    pub title: &'static str,
    pub date: &'static str,
    pub note: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalEntry {
    pub label: &'static str,
    pub value: &'static str,
}

pub const STATS: [StatEntry; 4] = [
    StatEntry {
        id: "head",
        title: "Head",
        value: "Normal",
    },
    StatEntry {
        id: "chest",
        title: "Chest",
        value: "116 / 70",
    },
    StatEntry {
        id: "shoulder",
        title: "Shoulder",
        value: "Healthy",
    },
    StatEntry {
        id: "knee",
        title: "Knee",
        value: "No Issues",
    },
];

pub const MEDICAL_TIMELINE: [TimelineEntry; 3] = [
    TimelineEntry {
        id: 1,
        title: "Backpain Checkup",
        date: "02/03/2025",
        note: "Prescribed physiotherapy",
    },
    TimelineEntry {
        id: 2,
        title: "Neurological Test",
        date: "02/05/2025",
        note: "Followup in 6 months",
    },
    TimelineEntry {
        id: 3,
        title: "Knee Surgery",
        date: "02/06/2025",
        note: "Arthroscopy performed",
    },
];

pub const VITALS: [VitalEntry; 4] = [
    VitalEntry {
        label: "Blood Pressure",
        value: "116/70",
    },
    VitalEntry {
        label: "Heart Rate",
        value: "120 bpm",
    },
    VitalEntry {
        label: "Blood Count",
        value: "80 - 90",
    },
    VitalEntry {
        label: "Glucose",
        value: "230 /ml",
    },
];

pub fn demo_patient() -> PatientRecord {
    PatientRecord::default()
        .with_field("name", json!("Hudson Dylan"))
        .with_field("sex", json!("Male"))
        .with_field("age", json!(49))
        .with_field("body_condition", json!(96))
}

pub fn stat_for(id: &str) -> Option<&'static StatEntry> {
    STATS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stat_is_findable_by_id() {
        for stat in &STATS {
            assert_eq!(stat_for(stat.id), Some(stat));
        }
        assert!(stat_for("elbow").is_none());
    }

    #[test]
    fn demo_patient_has_display_fields() {
        let patient = demo_patient();
        assert_eq!(patient.get_str("name"), Some("Hudson Dylan"));
        assert_eq!(patient.get("age").and_then(|v| v.as_u64()), Some(49));
    }
}
