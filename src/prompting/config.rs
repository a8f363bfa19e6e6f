//! Assistant generation parameters, validated once at construction.

/// Parameters for a remote assistant generation call.
///
/// Construction validates the numeric bounds; an `AssistantConfig` value is
/// always valid, so callers never re-check per call.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    temperature: f32,
    max_tokens: u32,
    system_instruction: String,
}

/// Error when assistant parameters violate their bounds.
///
/// This signals a programming error in configuration, so it surfaces at
/// construction time rather than being mapped to a runtime client failure.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidAssistantConfig {
    /// Temperature outside `[0.0, 2.0]`.
    Temperature(f32),
    /// `max_tokens` was zero.
    MaxTokens,
}

impl std::fmt::Display for InvalidAssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperature(t) => {
                write!(f, "temperature must be between 0.0 and 2.0, got {t}")
            }
            Self::MaxTokens => write!(f, "max tokens must be greater than 0"),
        }
    }
}

impl std::error::Error for InvalidAssistantConfig {}

impl AssistantConfig {
    /// Create a validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if `temperature` is outside `[0.0, 2.0]` or
    /// `max_tokens` is zero.
    pub fn new(
        temperature: f32,
        max_tokens: u32,
        system_instruction: impl Into<String>,
    ) -> Result<Self, InvalidAssistantConfig> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(InvalidAssistantConfig::Temperature(temperature));
        }
        if max_tokens == 0 {
            return Err(InvalidAssistantConfig::MaxTokens);
        }
        Ok(Self { temperature, max_tokens, system_instruction: system_instruction.into() })
    }

    /// Sampling temperature in `[0.0, 2.0]`.
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Maximum tokens to generate, always positive.
    #[must_use]
    pub const fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// System instruction sent alongside every prompt.
    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            system_instruction: "You are a helpful task management assistant.".to_string(),
        }
    }
}
