//! Configuration for fake student generation.

/// Programmes handed out to generated students.
pub const PROGRAMMES: [&str; 6] = [
    "Computer Science",
    "Mathematics",
    "Economics",
    "Biology",
    "Civil Engineering",
    "Accounting",
];

/// How many students to generate and how their ids look.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub count: usize,
    pub id_prefix: String,
    /// One in this many generated students is inactive.
    pub inactive_every: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: 50,
            id_prefix: "SEED".to_string(),
            inactive_every: 10,
        }
    }
}

impl SeedConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// `<prefix><6-digit index>`, e.g. `SEED000001`.
    pub fn student_id(&self, index: usize) -> String {
        format!("{}{:06}", self.id_prefix, index)
    }
}
