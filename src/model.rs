//! Person and Address records as exchanged over the API and stored by the repositories.

use serde::{Deserialize, Deserializer, Serialize};

/// Postal address owned by exactly one person.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email_address: String,
    #[serde(default)]
    pub address: Option<Address>,
}

impl Person {
    /// Drops every identifier so the repository assigns fresh ones on save.
    pub fn without_ids(mut self) -> Self {
        self.id = None;
        if let Some(address) = self.address.as_mut() {
            address.id = None;
        }
        self
    }

    /// Overwrites the four mutable fields with the ones from `details`. Absent
    /// values in `details` clear the current ones; `id` is left untouched.
    pub fn apply_details(&mut self, details: Person) {
        self.name = details.name;
        self.phone_number = details.phone_number;
        self.email_address = details.email_address;
        self.address = details.address;
    }
}

/// Missing and `null` strings both become empty so validation reports them as blank.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
