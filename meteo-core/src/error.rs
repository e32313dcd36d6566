use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Veuillez entrer un code postal valide (5 chiffres)")]
    InvalidPostalCode,

    #[error("Veuillez sélectionner une date")]
    MissingDate,

    #[error("Veuillez sélectionner une date valide")]
    InvalidDate(String),

    #[error("Les prévisions sont disponibles jusqu'à 16 jours à l'avance")]
    BeyondHorizon { max: NaiveDate },
}

/// Failures of the geocoding or forecast services.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Erreur lors du géocodage du code postal")]
    GeocodingStatus(u16),

    #[error("Code postal introuvable. Vérifiez le code postal saisi.")]
    PostalCodeNotFound,

    #[error("Réponse de géocodage invalide : {0}")]
    MalformedFeature(&'static str),

    #[error("Erreur API ({status}): {body}")]
    ForecastStatus { status: u16, body: String },

    #[error("Les données météo ne sont pas disponibles pour cette localisation")]
    MissingDaily,

    #[error("Série « {0} » incomplète dans la réponse météo")]
    IncompleteSeries(&'static str),

    #[error("Date « {0} » invalide dans la réponse météo")]
    MalformedDate(String),

    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything that can end a lookup. Each variant is terminal for the
/// current invocation.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Erreur lors de la récupération des données : {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Erreur lors de la récupération des données : Date non disponible dans les prévisions")]
    DateUnavailable(NaiveDate),
}

impl LookupError {
    /// True when the lookup was rejected without touching the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, LookupError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_have_no_prefix() {
        let err = LookupError::from(ValidationError::InvalidPostalCode);
        assert_eq!(err.to_string(), "Veuillez entrer un code postal valide (5 chiffres)");
        assert!(err.is_validation());
    }

    #[test]
    fn horizon_message_names_the_limit() {
        let max = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        let err = ValidationError::BeyondHorizon { max };
        assert_eq!(
            err.to_string(),
            "Les prévisions sont disponibles jusqu'à 16 jours à l'avance"
        );
    }

    #[test]
    fn upstream_messages_carry_the_fixed_prefix() {
        let err = LookupError::from(UpstreamError::ForecastStatus {
            status: 400,
            body: "bad latitude".into(),
        });
        assert_eq!(
            err.to_string(),
            "Erreur lors de la récupération des données : Erreur API (400): bad latitude"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn missing_date_is_a_data_absence_error() {
        let err = LookupError::DateUnavailable(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!(err.to_string().ends_with("Date non disponible dans les prévisions"));
    }
}
