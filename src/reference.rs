//! Static lookup tables shown to the user before projecting

/// Position codes accepted by the model
pub const POSITION_CODES: [&str; 5] = ["C", "LW", "RW", "D", "G"];

/// Nationality codes found in NHL draft history, with country names
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("AUT", "Austria"),
    ("BLR", "Belarus"),
    ("CAN", "Canada"),
    ("CHE", "Switzerland"),
    ("CZE", "Czech Republic"),
    ("DEU", "Germany"),
    ("DNK", "Denmark"),
    ("FIN", "Finland"),
    ("FRA", "France"),
    ("GBR", "United Kingdom"),
    ("ITA", "Italy"),
    ("JPN", "Japan"),
    ("KAZ", "Kazakhstan"),
    ("LTU", "Lithuania"),
    ("LVA", "Latvia"),
    ("NLD", "Netherlands"),
    ("NOR", "Norway"),
    ("POL", "Poland"),
    ("RUS", "Russia"),
    ("SVK", "Slovakia"),
    ("SVN", "Slovenia"),
    ("SWE", "Sweden"),
    ("UKR", "Ukraine"),
    ("USA", "United States"),
];

/// Country name for a nationality code
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
