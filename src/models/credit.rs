use serde::{Deserialize, Serialize};

/// Role category of a credited person
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Actor,
    Director,
    #[serde(other)]
    Other,
}

/// One row of the credits table as it appears on disk
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawCredit {
    /// Foreign key into the titles table
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    pub role: Role,
}

/// A cleaned cast or crew credit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credit {
    pub title_id: String,
    pub name: String,
    pub character: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserialization() {
        let actor: Role = serde_json::from_str("\"ACTOR\"").unwrap();
        let director: Role = serde_json::from_str("\"DIRECTOR\"").unwrap();
        let writer: Role = serde_json::from_str("\"WRITER\"").unwrap();

        assert_eq!(actor, Role::Actor);
        assert_eq!(director, Role::Director);
        assert_eq!(writer, Role::Other);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Actor).unwrap(), "\"ACTOR\"");
    }
}
