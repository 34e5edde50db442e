use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Medal::Gold => "#FFD700",
            Medal::Silver => "#C0C0C0",
            Medal::Bronze => "#CD7F32",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub nome: String,
    pub acertos: u32,
}
