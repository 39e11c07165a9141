use std::fmt;
use std::str::FromStr;

/// Represents the licence classes DriveTest books road tests for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenceClass {
    /// Level two graduated licence
    G2,
    /// Full passenger vehicle licence
    G,
    /// Level two motorcycle
    M2,
    /// Full motorcycle
    M,
    /// Level two limited-speed motorcycle
    LM2,
    /// Full limited-speed motorcycle
    LM,
    /// Commercial classes
    A,
    B,
    C,
    D,
    E,
    F,
    /// Air brake endorsement
    Z,
    /// Anything else the server may list
    Other(String),
}

impl LicenceClass {
    /// Gets the code the booking service uses for this class
    pub fn code(&self) -> &str {
        match self {
            LicenceClass::G2 => "G2",
            LicenceClass::G => "G",
            LicenceClass::M2 => "M2",
            LicenceClass::M => "M",
            LicenceClass::LM2 => "LM2",
            LicenceClass::LM => "LM",
            LicenceClass::A => "A",
            LicenceClass::B => "B",
            LicenceClass::C => "C",
            LicenceClass::D => "D",
            LicenceClass::E => "E",
            LicenceClass::F => "F",
            LicenceClass::Z => "Z",
            LicenceClass::Other(code) => code,
        }
    }

    /// Gets a human readable description of the class
    pub fn description(&self) -> &'static str {
        match self {
            LicenceClass::G2 => "level two road test",
            LicenceClass::G => "full road test",
            LicenceClass::M2 => "level two motorcycle test",
            LicenceClass::M => "full motorcycle test",
            LicenceClass::LM2 => "level two limited-speed motorcycle test",
            LicenceClass::LM => "full limited-speed motorcycle test",
            LicenceClass::A
            | LicenceClass::B
            | LicenceClass::C
            | LicenceClass::D
            | LicenceClass::E
            | LicenceClass::F => "commercial road test",
            LicenceClass::Z => "air brake endorsement",
            LicenceClass::Other(_) => "unrecognised class",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LicenceClass::Other(_))
    }
}

impl FromStr for LicenceClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class = match s {
            "G2" => LicenceClass::G2,
            "G" => LicenceClass::G,
            "M2" => LicenceClass::M2,
            "M" => LicenceClass::M,
            "LM2" => LicenceClass::LM2,
            "LM" => LicenceClass::LM,
            "A" => LicenceClass::A,
            "B" => LicenceClass::B,
            "C" => LicenceClass::C,
            "D" => LicenceClass::D,
            "E" => LicenceClass::E,
            "F" => LicenceClass::F,
            "Z" => LicenceClass::Z,
            other => LicenceClass::Other(other.to_string()),
        };
        Ok(class)
    }
}

impl fmt::Display for LicenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse_to_their_variant() {
        assert_eq!("G".parse::<LicenceClass>().unwrap(), LicenceClass::G);
        assert_eq!("LM2".parse::<LicenceClass>().unwrap(), LicenceClass::LM2);
        assert_eq!("Z".parse::<LicenceClass>().unwrap().code(), "Z");
    }

    #[test]
    fn unknown_codes_are_kept_verbatim() {
        let class = "g".parse::<LicenceClass>().unwrap();
        assert_eq!(class, LicenceClass::Other("g".to_string()));
        assert_eq!(class.code(), "g");
        assert!(!class.is_known());
    }
}
