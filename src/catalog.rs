//! Registry catalog: recognized country codes, display names, and the
//! excluded-territory set.
//!
//! The catalog is plain immutable data injected into the components that need
//! it, so tests can substitute a reduced fixture without touching pipeline
//! logic. The excluded set holds territories with no independent address
//! allocation; it is disjoint from the recognized set by construction and
//! codes in it must never appear in generated output.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// ISO 3166 alpha-2 codes with display names, minus the excluded territories.
const COUNTRIES: &[(&str, &str)] = &[
    ("AD", "Andorra"),
    ("AE", "United Arab Emirates"),
    ("AF", "Afghanistan"),
    ("AG", "Antigua and Barbuda"),
    ("AI", "Anguilla"),
    ("AL", "Albania"),
    ("AM", "Armenia"),
    ("AO", "Angola"),
    ("AR", "Argentina"),
    ("AS", "American Samoa"),
    ("AT", "Austria"),
    ("AU", "Australia"),
    ("AW", "Aruba"),
    ("AX", "Aland Islands"),
    ("AZ", "Azerbaijan"),
    ("BA", "Bosnia and Herzegovina"),
    ("BB", "Barbados"),
    ("BD", "Bangladesh"),
    ("BE", "Belgium"),
    ("BF", "Burkina Faso"),
    ("BG", "Bulgaria"),
    ("BH", "Bahrain"),
    ("BI", "Burundi"),
    ("BJ", "Benin"),
    ("BL", "Saint Barthelemy"),
    ("BM", "Bermuda"),
    ("BN", "Brunei"),
    ("BO", "Bolivia"),
    ("BQ", "Bonaire, Sint Eustatius and Saba"),
    ("BR", "Brazil"),
    ("BS", "Bahamas"),
    ("BT", "Bhutan"),
    ("BW", "Botswana"),
    ("BY", "Belarus"),
    ("BZ", "Belize"),
    ("CA", "Canada"),
    ("CC", "Cocos (Keeling) Islands"),
    ("CD", "Democratic Republic of the Congo"),
    ("CF", "Central African Republic"),
    ("CG", "Republic of the Congo"),
    ("CH", "Switzerland"),
    ("CI", "Cote d'Ivoire"),
    ("CK", "Cook Islands"),
    ("CL", "Chile"),
    ("CM", "Cameroon"),
    ("CN", "China"),
    ("CO", "Colombia"),
    ("CR", "Costa Rica"),
    ("CU", "Cuba"),
    ("CV", "Cabo Verde"),
    ("CW", "Curacao"),
    ("CX", "Christmas Island"),
    ("CY", "Cyprus"),
    ("CZ", "Czechia"),
    ("DE", "Germany"),
    ("DJ", "Djibouti"),
    ("DK", "Denmark"),
    ("DM", "Dominica"),
    ("DO", "Dominican Republic"),
    ("DZ", "Algeria"),
    ("EC", "Ecuador"),
    ("EE", "Estonia"),
    ("EG", "Egypt"),
    ("EH", "Western Sahara"),
    ("ER", "Eritrea"),
    ("ES", "Spain"),
    ("ET", "Ethiopia"),
    ("FI", "Finland"),
    ("FJ", "Fiji"),
    ("FK", "Falkland Islands"),
    ("FM", "Micronesia"),
    ("FO", "Faroe Islands"),
    ("FR", "France"),
    ("GA", "Gabon"),
    ("GB", "United Kingdom"),
    ("GD", "Grenada"),
    ("GE", "Georgia"),
    ("GF", "French Guiana"),
    ("GG", "Guernsey"),
    ("GH", "Ghana"),
    ("GI", "Gibraltar"),
    ("GL", "Greenland"),
    ("GM", "Gambia"),
    ("GN", "Guinea"),
    ("GP", "Guadeloupe"),
    ("GQ", "Equatorial Guinea"),
    ("GR", "Greece"),
    ("GS", "South Georgia and the South Sandwich Islands"),
    ("GT", "Guatemala"),
    ("GU", "Guam"),
    ("GW", "Guinea-Bissau"),
    ("GY", "Guyana"),
    ("HK", "Hong Kong"),
    ("HM", "Heard Island and McDonald Islands"),
    ("HN", "Honduras"),
    ("HR", "Croatia"),
    ("HT", "Haiti"),
    ("HU", "Hungary"),
    ("ID", "Indonesia"),
    ("IE", "Ireland"),
    ("IL", "Israel"),
    ("IM", "Isle of Man"),
    ("IN", "India"),
    ("IQ", "Iraq"),
    ("IR", "Iran"),
    ("IS", "Iceland"),
    ("IT", "Italy"),
    ("JE", "Jersey"),
    ("JM", "Jamaica"),
    ("JO", "Jordan"),
    ("JP", "Japan"),
    ("KE", "Kenya"),
    ("KG", "Kyrgyzstan"),
    ("KH", "Cambodia"),
    ("KI", "Kiribati"),
    ("KM", "Comoros"),
    ("KN", "Saint Kitts and Nevis"),
    ("KP", "North Korea"),
    ("KR", "South Korea"),
    ("KW", "Kuwait"),
    ("KY", "Cayman Islands"),
    ("KZ", "Kazakhstan"),
    ("LA", "Laos"),
    ("LB", "Lebanon"),
    ("LC", "Saint Lucia"),
    ("LI", "Liechtenstein"),
    ("LK", "Sri Lanka"),
    ("LR", "Liberia"),
    ("LS", "Lesotho"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("LV", "Latvia"),
    ("LY", "Libya"),
    ("MA", "Morocco"),
    ("MC", "Monaco"),
    ("MD", "Moldova"),
    ("ME", "Montenegro"),
    ("MF", "Saint Martin"),
    ("MG", "Madagascar"),
    ("MH", "Marshall Islands"),
    ("MK", "North Macedonia"),
    ("ML", "Mali"),
    ("MM", "Myanmar"),
    ("MN", "Mongolia"),
    ("MO", "Macao"),
    ("MP", "Northern Mariana Islands"),
    ("MQ", "Martinique"),
    ("MR", "Mauritania"),
    ("MS", "Montserrat"),
    ("MT", "Malta"),
    ("MU", "Mauritius"),
    ("MV", "Maldives"),
    ("MW", "Malawi"),
    ("MX", "Mexico"),
    ("MY", "Malaysia"),
    ("MZ", "Mozambique"),
    ("NA", "Namibia"),
    ("NC", "New Caledonia"),
    ("NE", "Niger"),
    ("NF", "Norfolk Island"),
    ("NG", "Nigeria"),
    ("NI", "Nicaragua"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NP", "Nepal"),
    ("NU", "Niue"),
    ("NZ", "New Zealand"),
    ("OM", "Oman"),
    ("PA", "Panama"),
    ("PE", "Peru"),
    ("PF", "French Polynesia"),
    ("PG", "Papua New Guinea"),
    ("PH", "Philippines"),
    ("PK", "Pakistan"),
    ("PL", "Poland"),
    ("PM", "Saint Pierre and Miquelon"),
    ("PR", "Puerto Rico"),
    ("PS", "Palestine"),
    ("PT", "Portugal"),
    ("PW", "Palau"),
    ("PY", "Paraguay"),
    ("QA", "Qatar"),
    ("RE", "Reunion"),
    ("RO", "Romania"),
    ("RS", "Serbia"),
    ("RU", "Russia"),
    ("RW", "Rwanda"),
    ("SA", "Saudi Arabia"),
    ("SB", "Solomon Islands"),
    ("SC", "Seychelles"),
    ("SD", "Sudan"),
    ("SE", "Sweden"),
    ("SG", "Singapore"),
    ("SH", "Saint Helena"),
    ("SI", "Slovenia"),
    ("SJ", "Svalbard and Jan Mayen"),
    ("SK", "Slovakia"),
    ("SL", "Sierra Leone"),
    ("SM", "San Marino"),
    ("SN", "Senegal"),
    ("SO", "Somalia"),
    ("SR", "Suriname"),
    ("SS", "South Sudan"),
    ("ST", "Sao Tome and Principe"),
    ("SV", "El Salvador"),
    ("SX", "Sint Maarten"),
    ("SY", "Syria"),
    ("SZ", "Eswatini"),
    ("TC", "Turks and Caicos Islands"),
    ("TD", "Chad"),
    ("TF", "French Southern Territories"),
    ("TG", "Togo"),
    ("TH", "Thailand"),
    ("TJ", "Tajikistan"),
    ("TL", "Timor-Leste"),
    ("TM", "Turkmenistan"),
    ("TN", "Tunisia"),
    ("TO", "Tonga"),
    ("TR", "Turkey"),
    ("TT", "Trinidad and Tobago"),
    ("TV", "Tuvalu"),
    ("TW", "Taiwan"),
    ("TZ", "Tanzania"),
    ("UA", "Ukraine"),
    ("UG", "Uganda"),
    ("US", "United States"),
    ("UY", "Uruguay"),
    ("UZ", "Uzbekistan"),
    ("VC", "Saint Vincent and the Grenadines"),
    ("VE", "Venezuela"),
    ("VG", "British Virgin Islands"),
    ("VI", "U.S. Virgin Islands"),
    ("VN", "Vietnam"),
    ("VU", "Vanuatu"),
    ("WF", "Wallis and Futuna"),
    ("WS", "Samoa"),
    ("YE", "Yemen"),
    ("YT", "Mayotte"),
    ("ZA", "South Africa"),
    ("ZM", "Zambia"),
    ("ZW", "Zimbabwe"),
];

/// Territories deliberately left out of generated output: no permanent
/// population, or address space administered under another country.
const EXCLUDED: &[(&str, &str)] = &[
    ("AQ", "Antarctica"),
    ("BV", "Bouvet Island"),
    ("IO", "British Indian Ocean Territory"),
    ("NR", "Nauru"),
    ("PN", "Pitcairn Islands"),
    ("TK", "Tokelau"),
    ("UM", "United States Minor Outlying Islands"),
    ("VA", "Vatican City"),
];

/// Immutable reference data: which country codes the pipeline recognizes and
/// which it deliberately skips.
#[derive(Clone, Debug)]
pub struct RegistryCatalog {
    countries: BTreeMap<String, String>,
    excluded: BTreeMap<String, String>,
}

impl RegistryCatalog {
    /// The full built-in catalog used by the production pipeline.
    pub fn builtin() -> Self {
        Self {
            countries: COUNTRIES
                .iter()
                .map(|&(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            excluded: EXCLUDED
                .iter()
                .map(|&(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Build a catalog from arbitrary code→name pairs.
    ///
    /// Codes listed in `excluded` are removed from the recognized set so the
    /// two sets stay disjoint, whatever the caller passed in.
    pub fn new<I, J>(countries: I, excluded: J) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
        J: IntoIterator<Item = (String, String)>,
    {
        let excluded: BTreeMap<String, String> = excluded.into_iter().collect();
        let countries = countries
            .into_iter()
            .filter(|(code, _)| !excluded.contains_key(code))
            .collect();
        Self {
            countries,
            excluded,
        }
    }

    /// Whether `code` is a recognized (non-excluded) country code.
    pub fn contains(&self, code: &str) -> bool {
        self.countries.contains_key(code)
    }

    /// Whether `code` is in the excluded-territory set.
    pub fn is_excluded(&self, code: &str) -> bool {
        self.excluded.contains_key(code)
    }

    /// Display name for a recognized code.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.countries.get(code).map(String::as_str)
    }

    /// All recognized codes in lexicographic order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    /// Render the lookup result for a single code.
    ///
    /// Distinguishes recognized codes, excluded territories, and unknown
    /// input. Pure formatting for the CLI `lookup` command.
    pub fn format_lookup(&self, code: &str) -> String {
        let code = code.to_uppercase();
        if let Some(name) = self.excluded.get(&code) {
            return format!("{code} {name} (excluded, no independent IP allocation)");
        }
        match self.countries.get(&code) {
            Some(name) => format!("{code} {name}"),
            None => format!("unknown country code: {code}"),
        }
    }

    /// Render the full catalog as a columnar listing, `per_line` codes per
    /// row, followed by the excluded-territory list.
    pub fn format_all(&self, per_line: usize) -> String {
        let per_line = per_line.max(1);
        let mut out = format!(
            "All country/region codes ({} total, {} per line):\n",
            self.countries.len(),
            per_line
        );
        for (i, (code, name)) in self.countries.iter().enumerate() {
            let _ = write!(out, "{code:<3} {name:<28}");
            if (i + 1) % per_line == 0 {
                out.push('\n');
            }
        }
        if self.countries.len() % per_line != 0 {
            out.push('\n');
        }

        let _ = write!(
            out,
            "\nExcluded territories ({} total, no independent IP allocation):\n",
            self.excluded.len()
        );
        for (i, (code, name)) in self.excluded.iter().enumerate() {
            let _ = write!(out, "{code:<3} {name:<28}");
            if (i + 1) % per_line == 0 {
                out.push('\n');
            }
        }
        if self.excluded.len() % per_line != 0 {
            out.push('\n');
        }
        out
    }
}

impl Default for RegistryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
