// ABOUTME: Read-only make -> models reference table used as input hints on the vehicle step

/// Known makes and a selection of their models
const VEHICLE_CATALOG: &[(&str, &[&str])] = &[
    ("Audi", &["A4", "A5", "Q5", "Q7", "RS6", "e-tron GT"]),
    ("BMW", &["3 Series", "5 Series", "M3", "M4", "X3", "X5"]),
    ("Chevrolet", &["Corvette", "Silverado", "Tahoe", "Camaro"]),
    ("Ford", &["F-150", "Mustang", "Bronco", "Explorer", "Raptor"]),
    ("GMC", &["Sierra", "Yukon", "Canyon"]),
    ("Honda", &["Civic", "Accord", "CR-V", "Pilot"]),
    ("Lexus", &["IS", "ES", "RX", "GX", "LC"]),
    ("Mercedes-Benz", &["C-Class", "E-Class", "G-Class", "GLE", "AMG GT"]),
    ("Porsche", &["911", "Cayenne", "Macan", "Taycan", "Panamera"]),
    ("Ram", &["1500", "2500", "TRX"]),
    ("Rivian", &["R1T", "R1S"]),
    ("Tesla", &["Model 3", "Model S", "Model X", "Model Y", "Cybertruck"]),
    ("Toyota", &["4Runner", "Camry", "RAV4", "Tacoma", "Tundra", "Supra"]),
];

/// All makes in the table
pub fn makes() -> impl Iterator<Item = &'static str> {
    VEHICLE_CATALOG.iter().map(|(make, _)| *make)
}

/// Models for a make, matched case-insensitively
pub fn models_for(make: &str) -> &'static [&'static str] {
    let make = make.trim();
    VEHICLE_CATALOG
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(make))
        .map_or(&[], |(_, models)| models)
}

/// Makes starting with the typed prefix, for completion hints
pub fn suggest_makes(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }
    makes()
        .filter(|make| make.to_ascii_lowercase().starts_with(&prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_for_is_case_insensitive() {
        assert!(models_for("porsche").contains(&"911"));
        assert!(models_for(" Tesla ").contains(&"Model Y"));
    }

    #[test]
    fn test_unknown_make_has_no_models() {
        assert!(models_for("DeLorean").is_empty());
    }

    #[test]
    fn test_suggest_makes() {
        assert_eq!(suggest_makes("r"), vec!["Ram", "Rivian"]);
        assert!(suggest_makes("").is_empty());
    }
}
