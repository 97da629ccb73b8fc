//! Model value object representing a generative-language model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models the console can talk to (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini3Flash,
    Gemini3Pro,
    Gemini25Flash,
    Gemini25Pro,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini3Flash => "gemini-3-flash-preview",
            Model::Gemini3Pro => "gemini-3-pro-preview",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is one of the built-in preview models
    pub fn is_preview(&self) -> bool {
        matches!(self, Model::Gemini3Flash | Model::Gemini3Pro)
    }
}

impl Default for Model {
    /// Returns the default model (Gemini 3 Flash preview)
    fn default() -> Self {
        Model::Gemini3Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-3-flash-preview" => Model::Gemini3Flash,
            "gemini-3-pro-preview" => Model::Gemini3Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.parse::<Model>() {
            Ok(model) => Ok(model),
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_names_parse() {
        let model: Model = "gemini-3-pro-preview".parse().unwrap();
        assert_eq!(model, Model::Gemini3Pro);
        assert_eq!(model.to_string(), "gemini-3-pro-preview");
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(model, Model::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.to_string(), "gemini-exp-1206");
        assert!(!model.is_preview());
    }

    #[test]
    fn test_model_default() {
        let model = Model::default();
        assert_eq!(model, Model::Gemini3Flash);
        assert_eq!(model.as_str(), "gemini-3-flash-preview");
        assert!(model.is_preview());
    }

    #[test]
    fn test_model_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::Gemini25Flash).unwrap();
        assert_eq!(json, "\"gemini-2.5-flash\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::Gemini25Flash);
    }
}
