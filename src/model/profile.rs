//! IVAO profile returned by `/v2/users/me`.

use serde::{Deserialize, Deserializer};

/// Subset of the IVAO user profile the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// VID; the upstream sends it as a number.
    #[serde(rename = "id", deserialize_with = "vid_from_number_or_string")]
    pub vid: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub division_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_staff: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_staff_positions: Vec<StaffPosition>,
}

/// A staff position held by the member, e.g. `XM-SOC`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaffPosition {
    pub id: String,
}

impl Profile {
    /// Full name when both parts are present and non-blank.
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.trim().is_empty() && !last.trim().is_empty() => {
                Some(format!("{} {}", first.trim(), last.trim()))
            }
            _ => None,
        }
    }

    /// Position codes in the order the upstream returned them.
    pub fn position_codes(&self) -> impl Iterator<Item = &str> {
        self.user_staff_positions.iter().map(|p| p.id.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVid {
    Number(u64),
    Text(String),
}

fn vid_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawVid::deserialize(deserializer)? {
        RawVid::Number(n) => n.to_string(),
        RawVid::Text(s) => s,
    })
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<StaffPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<StaffPosition>>::deserialize(deserializer)?.unwrap_or_default())
}
