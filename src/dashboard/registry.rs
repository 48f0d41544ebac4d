use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientDosha {
    Vata,
    Pitta,
    Kapha,
    Mixed,
}

impl FromStr for PatientDosha {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vata" => Ok(Self::Vata),
            "pitta" => Ok(Self::Pitta),
            "kapha" => Ok(Self::Kapha),
            "mixed" => Ok(Self::Mixed),
            other => Err(format!("unknown dosha '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatientStatus {
    #[serde(rename = "On Plan")]
    OnPlan,
    #[serde(rename = "Follow-up Due")]
    FollowUpDue,
    #[default]
    New,
    Completed,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnPlan => "On Plan",
            Self::FollowUpDue => "Follow-up Due",
            Self::New => "New",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::OnPlan, Self::FollowUpDue, Self::New, Self::Completed]
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
    #[default]
    O,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub sex: Sex,
    pub dosha: PatientDosha,
    pub status: PatientStatus,
    /// Percent, 0..=100.
    pub adherence: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_patients: usize,
    pub active_plans: usize,
    pub follow_ups: usize,
    pub alerts: usize,
}

#[derive(Debug, Default, Clone)]
pub struct PatientFilter {
    pub query: Option<String>,
    pub dosha: Option<PatientDosha>,
    pub status: Option<PatientStatus>,
}

impl PatientFilter {
    pub fn matches(&self, p: &Patient) -> bool {
        if let Some(q) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            if !p.name.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        self.dosha.map_or(true, |d| d == p.dosha) && self.status.map_or(true, |s| s == p.status)
    }
}

pub struct NewPatient {
    pub name: String,
    pub dosha: PatientDosha,
    pub status: PatientStatus,
    pub age: Option<u32>,
    pub sex: Sex,
}

/// In-memory patient list, newest first.
#[derive(Clone)]
pub struct PatientRegistry {
    patients: Arc<RwLock<Vec<Patient>>>,
}

impl Default for PatientRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed(
    id: &str,
    name: &str,
    dosha: PatientDosha,
    status: PatientStatus,
    adherence: u8,
    age: u32,
    sex: Sex,
) -> Patient {
    Patient {
        id: id.to_string(),
        name: name.to_string(),
        age: Some(age),
        sex,
        dosha,
        status,
        adherence,
    }
}

impl PatientRegistry {
    pub fn empty() -> Self {
        Self {
            patients: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn seeded() -> Self {
        use PatientDosha::*;
        use PatientStatus::*;
        let patients = vec![
            seed("p1", "Ansh Bire", Vata, OnPlan, 78, 32, Sex::M),
            seed("p2", "Indrapal", Pitta, FollowUpDue, 55, 27, Sex::F),
            seed("p3", "Shobhit", Kapha, New, 0, 45, Sex::M),
            seed("p4", "Vanshikha", Vata, OnPlan, 90, 38, Sex::F),
            seed("p5", "Yash", Pitta, Completed, 100, 50, Sex::M),
        ];
        Self {
            patients: Arc::new(RwLock::new(patients)),
        }
    }

    pub async fn list(&self, filter: &PatientFilter) -> Vec<Patient> {
        self.patients
            .read()
            .await
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub async fn totals(&self) -> Totals {
        let patients = self.patients.read().await;
        Totals {
            total_patients: patients.len(),
            active_plans: patients.iter().filter(|p| p.status == PatientStatus::OnPlan).count(),
            follow_ups: patients
                .iter()
                .filter(|p| p.status == PatientStatus::FollowUpDue)
                .count(),
            alerts: patients.iter().filter(|p| p.adherence < 50).count(),
        }
    }

    /// Returns `None` when the trimmed name is empty.
    pub async fn add(&self, new: NewPatient) -> Option<Patient> {
        let name = new.name.trim();
        if name.is_empty() {
            return None;
        }
        let mut patients = self.patients.write().await;
        let patient = Patient {
            id: format!("p{}", patients.len() + 1),
            name: name.to_string(),
            age: new.age,
            sex: new.sex,
            dosha: new.dosha,
            status: new.status,
            adherence: 0,
        };
        patients.insert(0, patient.clone());
        info!(id = %patient.id, "patient added");
        Some(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.into(),
            dosha: PatientDosha::Mixed,
            status: PatientStatus::New,
            age: None,
            sex: Sex::O,
        }
    }

    #[tokio::test]
    async fn seeded_totals() {
        let reg = PatientRegistry::seeded();
        assert_eq!(
            reg.totals().await,
            Totals {
                total_patients: 5,
                active_plans: 2,
                follow_ups: 1,
                alerts: 1,
            }
        );
    }

    #[tokio::test]
    async fn filters_combine() {
        let reg = PatientRegistry::seeded();
        let all = reg.list(&PatientFilter::default()).await;
        assert_eq!(all.len(), 5);

        let by_name = reg
            .list(&PatientFilter {
                query: Some("  SH ".into()),
                ..Default::default()
            })
            .await;
        let names: Vec<_> = by_name.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ansh Bire", "Shobhit", "Vanshikha", "Yash"]);

        let vata_on_plan = reg
            .list(&PatientFilter {
                query: None,
                dosha: Some(PatientDosha::Vata),
                status: Some(PatientStatus::OnPlan),
            })
            .await;
        assert_eq!(vata_on_plan.len(), 2);

        let none = reg
            .list(&PatientFilter {
                dosha: Some(PatientDosha::Mixed),
                ..Default::default()
            })
            .await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn add_puts_newest_first() {
        let reg = PatientRegistry::seeded();
        let p = reg.add(new_patient("  Meera  ")).await.expect("added");
        assert_eq!(p.id, "p6");
        assert_eq!(p.name, "Meera");
        assert_eq!(p.adherence, 0);

        let all = reg.list(&PatientFilter::default()).await;
        assert_eq!(all[0], p);
        // new patients start at zero adherence, so they raise an alert
        assert_eq!(reg.totals().await.alerts, 2);
    }

    #[tokio::test]
    async fn blank_name_is_ignored() {
        let reg = PatientRegistry::empty();
        assert!(reg.add(new_patient("   ")).await.is_none());
        assert_eq!(reg.totals().await.total_patients, 0);
        let first = reg.add(new_patient("Asha")).await.expect("added");
        assert_eq!(first.id, "p1");
    }

    #[test]
    fn status_parses_display_names() {
        assert_eq!("on plan".parse::<PatientStatus>(), Ok(PatientStatus::OnPlan));
        assert_eq!(
            "Follow-up Due".parse::<PatientStatus>(),
            Ok(PatientStatus::FollowUpDue)
        );
        assert!("Paused".parse::<PatientStatus>().is_err());
        assert_eq!(
            serde_json::to_value(PatientStatus::FollowUpDue).unwrap(),
            "Follow-up Due"
        );
        assert_eq!("MIXED".parse::<PatientDosha>(), Ok(PatientDosha::Mixed));
    }
}
