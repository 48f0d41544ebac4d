use serde::{Deserialize, Serialize};

use super::registry::{Patient, PatientDosha, PatientFilter, PatientStatus, Sex};

/// Empty strings mean "no filter", the way the dashboard selects send them.
#[derive(Debug, Default, Deserialize)]
pub struct PatientQuery {
    pub q: Option<String>,
    pub dosha: Option<String>,
    pub status: Option<String>,
}

impl PatientQuery {
    pub fn into_filter(self) -> Result<PatientFilter, String> {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Ok(PatientFilter {
            query: non_empty(self.q),
            dosha: non_empty(self.dosha).map(|d| d.parse()).transpose()?,
            status: non_empty(self.status).map(|s| s.parse()).transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PatientList {
    pub count: usize,
    pub patients: Vec<Patient>,
}

#[derive(Debug, Deserialize)]
pub struct AddPatientRequest {
    pub name: String,
    pub dosha: PatientDosha,
    #[serde(default)]
    pub status: PatientStatus,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Sex,
}
