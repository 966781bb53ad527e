use thiserror::Error;
use url::Url;

use crate::model::TrainerId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BrandingError {
    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("accent color must be a #rrggbb hex value, got {0:?}")]
    InvalidAccentColor(String),
}

/// Trainer-supplied theming applied to client-facing views.
///
/// This is an explicit value handed to the views that need it, with
/// load/apply/reset handled by the branding service; there is no ambient
/// session-wide storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerBranding {
    trainer_id: Option<TrainerId>,
    display_name: String,
    logo_url: Option<Url>,
    accent_color: String,
}

const DEFAULT_ACCENT: &str = "#2f6f4f";

fn is_hex_color(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('#') else {
        return false;
    };
    rest.len() == 6 && rest.chars().all(|c| c.is_ascii_hexdigit())
}

impl TrainerBranding {
    /// Build a trainer's branding.
    ///
    /// # Errors
    ///
    /// Returns `BrandingError` if the display name is empty or the accent
    /// color is not a `#rrggbb` value.
    pub fn new(
        trainer_id: TrainerId,
        display_name: impl Into<String>,
        logo_url: Option<Url>,
        accent_color: impl Into<String>,
    ) -> Result<Self, BrandingError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(BrandingError::EmptyDisplayName);
        }
        let accent_color = accent_color.into();
        if !is_hex_color(&accent_color) {
            return Err(BrandingError::InvalidAccentColor(accent_color));
        }

        Ok(Self {
            trainer_id: Some(trainer_id),
            display_name,
            logo_url,
            accent_color,
        })
    }

    /// Neutral theme shown before any trainer branding loads, or after reset.
    #[must_use]
    pub fn default_theme() -> Self {
        Self {
            trainer_id: None,
            display_name: "Coach".to_owned(),
            logo_url: None,
            accent_color: DEFAULT_ACCENT.to_owned(),
        }
    }

    #[must_use]
    pub fn trainer_id(&self) -> Option<TrainerId> {
        self.trainer_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn logo_url(&self) -> Option<&Url> {
        self.logo_url.as_ref()
    }

    #[must_use]
    pub fn accent_color(&self) -> &str {
        &self.accent_color
    }
}

impl Default for TrainerBranding {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_has_no_trainer() {
        let branding = TrainerBranding::default_theme();
        assert!(branding.trainer_id().is_none());
        assert_eq!(branding.accent_color(), DEFAULT_ACCENT);
    }

    #[test]
    fn valid_branding_round_trips_fields() {
        let logo = Url::parse("https://cdn.example.com/logo.png").unwrap();
        let branding = TrainerBranding::new(
            TrainerId::generate(),
            "Studio Norte",
            Some(logo.clone()),
            "#aa33ff",
        )
        .unwrap();

        assert_eq!(branding.display_name(), "Studio Norte");
        assert_eq!(branding.logo_url(), Some(&logo));
        assert_eq!(branding.accent_color(), "#aa33ff");
    }

    #[test]
    fn bad_accent_colors_are_rejected() {
        for bad in ["aa33ff", "#aa33f", "#aa33fg", "#aa33ff00", ""] {
            let err =
                TrainerBranding::new(TrainerId::generate(), "Studio", None, bad).unwrap_err();
            assert!(matches!(err, BrandingError::InvalidAccentColor(_)), "{bad:?}");
        }
    }

    #[test]
    fn empty_display_name_is_rejected() {
        let err = TrainerBranding::new(TrainerId::generate(), " ", None, "#ffffff").unwrap_err();
        assert_eq!(err, BrandingError::EmptyDisplayName);
    }
}
