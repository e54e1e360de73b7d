//! Static credential roster for the classroom.
//!
//! Accounts are seeded the way the deployment hands them out: the class
//! list maps to ids `HS001…` with default passwords `pass001…`, and
//! reserve accounts fill the numbering out to `HS050` for late
//! enrollments. Password overrides live in storage, never here.

use crate::model::{CredentialRecord, StudentId};

const CLASS_NAMES: &[&str] = &[
    "Alice Bennett",
    "Brian Chu",
    "Carmen Diaz",
    "Daniel Evans",
    "Elena Fischer",
    "Felix Garner",
    "Gloria Huynh",
    "Henry Iverson",
    "Irene Johansson",
    "Jacob Kim",
    "Katie Lam",
    "Liam Moreno",
    "Maya Novak",
    "Noah Okafor",
    "Olivia Park",
    "Priya Raman",
    "Quentin Ross",
    "Rosa Silva",
    "Samuel Torres",
    "Tara Ueda",
    "Umar Vance",
    "Vera Walsh",
    "Wendy Xu",
    "Xavier Young",
    "Yara Zaman",
    "Zoe Almeida",
];

/// Highest seeded account number (`HS050`).
const LAST_ACCOUNT: usize = 50;

/// The set of accounts that may sign in.
#[derive(Debug, Clone)]
pub struct Roster {
    records: Vec<CredentialRecord>,
}

impl Roster {
    /// Builds the seeded classroom roster.
    #[must_use]
    pub fn classroom() -> Self {
        let mut records = Vec::with_capacity(LAST_ACCOUNT);
        for (position, name) in CLASS_NAMES.iter().enumerate() {
            records.push(seeded_record(position + 1, (*name).to_owned()));
        }
        for number in CLASS_NAMES.len() + 1..=LAST_ACCOUNT {
            records.push(seeded_record(number, format!("Reserve Student {number}")));
        }

        Self { records }
    }

    /// Builds a roster from explicit records, mainly for tests.
    #[must_use]
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    /// Looks up the record for an account id.
    #[must_use]
    pub fn find(&self, id: &StudentId) -> Option<&CredentialRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    #[must_use]
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn seeded_record(number: usize, name: String) -> CredentialRecord {
    CredentialRecord::new(
        StudentId::new(format!("HS{number:03}")),
        name,
        format!("pass{number:03}"),
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
