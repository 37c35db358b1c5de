//! Model value object representing a text-generation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models known to querydash (Value Object)
///
/// Any other identifier is carried through as [`Model::Custom`], so the
/// service decides whether it exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // DeepSeek models
    DeepseekChat,
    DeepseekReasoner,
    // GPT models
    Gpt4oMini,
    Gpt41Nano,
    // Claude models
    ClaudeSonnet4,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::DeepseekChat => "deepseek-chat",
            Model::DeepseekReasoner => "deepseek-reasoner",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41Nano => "gpt-4.1-nano",
            Model::ClaudeSonnet4 => "claude-sonnet-4",
            Model::Custom(s) => s,
        }
    }

    /// Resolve an identifier, falling back to [`Model::Custom`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "deepseek-chat" => Model::DeepseekChat,
            "deepseek-reasoner" => Model::DeepseekReasoner,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1-nano" => Model::Gpt41Nano,
            "claude-sonnet-4" => Model::ClaudeSonnet4,
            other => Model::Custom(other.to_string()),
        }
    }

    /// Models listed by `/models` in chat mode
    pub fn known_models() -> Vec<Model> {
        vec![
            Model::DeepseekChat,
            Model::DeepseekReasoner,
            Model::Gpt4oMini,
            Model::Gpt41Nano,
            Model::ClaudeSonnet4,
        ]
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Model::Custom(_))
    }
}

impl Default for Model {
    /// Returns the default model (deepseek-chat)
    fn default() -> Self {
        Model::DeepseekChat
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
        Ok(Model::from_name(s))
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
        Ok(Model::from_name(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_models_parse_back() {
        for model in Model::known_models() {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
            assert!(!parsed.is_custom());
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "mistral-small".parse().unwrap();
        assert_eq!(model, Model::Custom("mistral-small".to_string()));
        assert_eq!(model.to_string(), "mistral-small");
        assert!(model.is_custom());
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::DeepseekChat);
        assert_eq!(Model::default().as_str(), "deepseek-chat");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::Gpt4oMini).unwrap();
        assert_eq!(json, "\"gpt-4o-mini\"");
        let model: Model = serde_json::from_str("\"deepseek-reasoner\"").unwrap();
        assert_eq!(model, Model::DeepseekReasoner);
    }
}
