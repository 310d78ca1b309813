//! `?service=` URL parameter support.
//!
//! Landing pages link into the booking flow with a short service key
//! (`/online-booking?service=hybrid`). The static table below maps each key to
//! a category and the treatment slugs it stands for.

use serde::Serialize;

use crate::api::Treatment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceMapping {
    pub category: &'static str,
    pub treatment_slugs: &'static [&'static str],
    pub display_name: &'static str,
    pub description: Option<&'static str>,
}

pub const SERVICE_MAPPINGS: [(&str, ServiceMapping); 6] = [
    (
        "einzeltechnik",
        ServiceMapping {
            category: "wimpern",
            treatment_slugs: &["einzeltechnik"],
            display_name: "Einzeltechnik",
            description: Some("Präzise 1:1 Technik für natürlichen Look"),
        },
    ),
    (
        "refill",
        ServiceMapping {
            category: "refill",
            treatment_slugs: &["hybrid", "volumen"],
            display_name: "Refill Termine",
            description: Some("Auffrischung für bestehende Wimpernverlängerungen"),
        },
    ),
    (
        "hybrid",
        ServiceMapping {
            category: "wimpern",
            treatment_slugs: &["hybrid"],
            display_name: "Hybrid",
            description: Some("Kombination aus klassischer und Volumen-Technik"),
        },
    ),
    (
        "volumen",
        ServiceMapping {
            category: "wimpern",
            treatment_slugs: &["volumen"],
            display_name: "Volumen",
            description: Some("Volumen-Technik für maximale Fülle"),
        },
    ),
    (
        "liftings",
        ServiceMapping {
            category: "augenbrauen",
            treatment_slugs: &["wimpernlifting", "augenbraunlifting", "lifting-kombi"],
            display_name: "Liftings",
            description: Some("Wimpern- und Augenbraunlifting"),
        },
    ),
    (
        "feinschliff",
        ServiceMapping {
            category: "extras",
            treatment_slugs: &["augenbrauen-zupfen", "augenbrauen-faerben", "shellac-naegel"],
            display_name: "Feinschliff",
            description: Some("Augenbrauen und Nagelpflege"),
        },
    ),
];

pub fn get_service_mapping(param: &str) -> Option<&'static ServiceMapping> {
    SERVICE_MAPPINGS
        .iter()
        .find(|(key, _)| *key == param)
        .map(|(_, mapping)| mapping)
}

pub fn is_valid_service_param(param: &str) -> bool {
    get_service_mapping(param).is_some()
}

pub fn valid_service_params() -> Vec<&'static str> {
    SERVICE_MAPPINGS.iter().map(|(key, _)| *key).collect()
}

/// Display name for the parameter, or the parameter itself when unknown
pub fn service_display_name(param: &str) -> String {
    get_service_mapping(param)
        .map(|mapping| mapping.display_name.to_string())
        .unwrap_or_else(|| param.to_string())
}

/// First service key whose slug set contains `treatment_slug`
pub fn find_service_by_treatment_slug(treatment_slug: &str) -> Option<&'static str> {
    SERVICE_MAPPINGS
        .iter()
        .find(|(_, mapping)| mapping.treatment_slugs.contains(&treatment_slug))
        .map(|(key, _)| *key)
}

/// Result of resolving the `service` URL parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServicePreselection {
    pub service_param: Option<&'static str>,
    pub is_valid: bool,
    pub category: Option<&'static str>,
    pub treatment_slugs: Vec<&'static str>,
    pub display_name: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl ServicePreselection {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn matches_treatment(&self, treatment: &Treatment) -> bool {
        self.is_valid
            && self
                .treatment_slugs
                .iter()
                .any(|slug| slug.eq_ignore_ascii_case(&treatment.slug))
    }

    /// The single matching treatment, if the preselection narrows the list to exactly one
    pub fn unique_match<'a>(&self, treatments: &'a [Treatment]) -> Option<&'a Treatment> {
        let mut matches = treatments.iter().filter(|t| t.active && self.matches_treatment(t));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

/// Resolve the raw `service` query value. Absent or unknown values yield an invalid preselection.
pub fn resolve_preselection(param: Option<&str>) -> ServicePreselection {
    let Some(param) = param.map(str::trim).filter(|p| !p.is_empty()) else {
        return ServicePreselection::invalid();
    };

    match SERVICE_MAPPINGS.iter().find(|(key, _)| *key == param) {
        Some((key, mapping)) => ServicePreselection {
            service_param: Some(*key),
            is_valid: true,
            category: Some(mapping.category),
            treatment_slugs: mapping.treatment_slugs.to_vec(),
            display_name: Some(mapping.display_name),
            description: mapping.description,
        },
        None => ServicePreselection::invalid(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TreatmentCategory;

    fn treatment(id: i64, slug: &str) -> Treatment {
        Treatment {
            id,
            name: slug.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            category: TreatmentCategory::Wimpern,
            duration_minutes: 90,
            price: 80.0,
            image_url: None,
            active: true,
            sort_order: 0,
            version_number: None,
        }
    }

    #[test]
    fn test_hybrid_resolves() {
        let preselection = resolve_preselection(Some("hybrid"));
        assert!(preselection.is_valid);
        assert_eq!(preselection.category, Some("wimpern"));
        assert_eq!(preselection.treatment_slugs, vec!["hybrid"]);
        assert_eq!(preselection.display_name, Some("Hybrid"));
        assert_eq!(preselection.service_param, Some("hybrid"));
    }

    #[test]
    fn test_unknown_and_missing_are_invalid() {
        let unknown = resolve_preselection(Some("unknown"));
        assert!(!unknown.is_valid);
        assert_eq!(unknown, ServicePreselection::invalid());

        assert!(!resolve_preselection(None).is_valid);
        assert!(!resolve_preselection(Some("")).is_valid);
        assert!(!resolve_preselection(Some("HYBRID")).is_valid);
    }

    #[test]
    fn test_lookup_helpers() {
        assert!(is_valid_service_param("liftings"));
        assert!(!is_valid_service_param("massage"));
        assert_eq!(valid_service_params().len(), 6);
        assert_eq!(service_display_name("refill"), "Refill Termine");
        assert_eq!(service_display_name("massage"), "massage");
        assert_eq!(find_service_by_treatment_slug("lifting-kombi"), Some("liftings"));
        // hybrid is listed under refill first
        assert_eq!(find_service_by_treatment_slug("hybrid"), Some("refill"));
        assert_eq!(find_service_by_treatment_slug("gesichtsbehandlung"), None);
    }

    #[test]
    fn test_unique_match() {
        let treatments = vec![treatment(1, "einzeltechnik"), treatment(2, "hybrid"), treatment(3, "volumen")];

        let hybrid = resolve_preselection(Some("hybrid"));
        assert_eq!(hybrid.unique_match(&treatments).map(|t| t.id), Some(2));

        let refill = resolve_preselection(Some("refill"));
        assert!(refill.matches_treatment(&treatments[1]));
        assert!(refill.unique_match(&treatments).is_none());

        assert!(ServicePreselection::invalid().unique_match(&treatments).is_none());
    }
}
