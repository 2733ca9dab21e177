use serde::{Deserialize, Serialize};

/// Body of `POST /api/newRound`. The service lays out `rows × cols` seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewRoundRequest {
    pub rows: u32,
    pub cols: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoundInfo {
    #[serde(rename = "roundId")]
    pub round_id: String,
    pub seats: u64,
}

/// One row of the `GET /api/booking/owners` leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OwnerStanding {
    pub owner: String,
    pub counts: u64,
}
